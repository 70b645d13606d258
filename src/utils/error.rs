use thiserror::Error;

/// Errors raised by the external OCR capability for a single image.
///
/// These are always recovered at the aggregation layer: a failed image is
/// recorded as a zero-confidence extraction and the batch continues.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image unreachable: {0}")]
    Unreachable(String),
    #[error("Image unreadable: {0}")]
    Unreadable(String),
    #[error("OCR engine failure: {0}")]
    EngineFailure(String),
}

/// Errors surfaced to the caller of the verification engine.
///
/// Missing or empty profile data is never an error (such fields are excluded
/// from scoring); only integration-level contract violations propagate.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Invalid field spec: {0}")]
    InvalidFieldSpec(String),
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),
}
