pub mod identity_verifier;
pub mod matching;
pub mod models;
pub mod processing;
pub mod utils;
pub mod verification;

pub use identity_verifier::IdentityVerifier;
