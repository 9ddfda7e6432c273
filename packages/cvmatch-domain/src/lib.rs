pub mod document;
pub mod normalize;
pub mod tier;

pub use document::{CvDocument, EncoderKind, JdDocument, MAPPED_PAIRS, MappedPair, SectionKind};
pub use normalize::normalize;
pub use tier::MatchTier;
