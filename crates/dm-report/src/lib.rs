pub mod classify;
pub mod html;
pub mod reorder;
pub mod report;

pub use classify::{classify_match, severity_for, suggest_causes, Classification, Severity};
pub use html::render_html;
pub use reorder::{detect_reorderings, Reordering};
pub use report::*;
