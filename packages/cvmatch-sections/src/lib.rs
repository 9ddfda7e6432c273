pub mod extract;
pub mod patterns;
pub mod segment;

pub use extract::{Extraction, extract_cv, extract_jd};
pub use patterns::{PatternSet, SectionPattern, cv_patterns, jd_patterns};
pub use segment::{SectionSpan, segment};
