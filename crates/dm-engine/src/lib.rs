pub mod engine;
pub mod source;

pub use engine::ComparisonEngine;
pub use source::{PlainTextSource, TextSource};
