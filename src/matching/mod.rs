pub mod field_matcher;
pub mod normalizer;
pub mod similarity;

pub use field_matcher::{FieldMatcher, MatchOutcome};
pub use normalizer::normalize;
pub use similarity::similarity;
