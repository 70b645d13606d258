pub mod error;

pub use error::{OcrError, VerifyError};
