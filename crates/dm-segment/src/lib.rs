pub mod rules;
pub mod segmenter;
pub mod stats;

pub use rules::RuleSegmenter;
pub use segmenter::{RawSpan, SegmentationService, SentenceSegmenter};
pub use stats::*;
