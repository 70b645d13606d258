pub mod scorer;

pub use scorer::VerificationScorer;
