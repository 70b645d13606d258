pub mod data;
pub mod rules;

pub use data::{
    keys, DocumentImage, FieldCategory, FieldMatchResult, FieldSpec, ImageAnalysis,
    ImageExtraction, ImageSource, ResidentProfile, VerificationReport, VerificationStatus,
};
pub use rules::MatchRules;
