use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stable field identifiers, matching the keys the admin front end uses.
pub mod keys {
    pub const FULL_NAME: &str = "fullName";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const MIDDLE_NAME: &str = "middleName";
    pub const ADDRESS: &str = "address";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const GENDER: &str = "gender";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Identity,
    Address,
    Personal,
}

/// A single profile field to look for in the extracted document text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    pub value: String,
    pub key: String,
    pub required: bool,
    pub category: FieldCategory,
}

impl FieldSpec {
    pub fn new(
        label: &str,
        value: &str,
        key: &str,
        required: bool,
        category: FieldCategory,
    ) -> Self {
        FieldSpec {
            label: label.to_string(),
            value: value.to_string(),
            key: key.to_string(),
            required,
            category,
        }
    }
}

/// OCR result for one uploaded document image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageExtraction {
    pub label: String,
    pub text: String,
    pub ocr_confidence: u32,
    pub failed: bool,
}

/// Outcome of matching one field against the combined extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMatchResult {
    pub label: String,
    pub value: String,
    pub key: String,
    pub required: bool,
    pub category: FieldCategory,
    pub matched: bool,
    pub confidence: u32,
    /// Matched tokens/words, or the match type (e.g. "exact match").
    pub evidence: Vec<String>,
}

/// Per-image breakdown: which physical document carried which evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub label: String,
    pub has_name: bool,
    pub has_address: bool,
    pub ocr_confidence: u32,
    pub failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Partial,
    Failed,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VerificationStatus::Verified => write!(f, "verified"),
            VerificationStatus::Partial => write!(f, "partial"),
            VerificationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// The final report handed back to the admin page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub fields: Vec<FieldMatchResult>,
    pub identity_score: u32,
    pub address_score: u32,
    pub overall_score: u32,
    pub name_verified: bool,
    pub address_verified: bool,
    pub status: VerificationStatus,
    pub image_analysis: Vec<ImageAnalysis>,
    pub avg_ocr_confidence: u32,
    pub total_images: usize,
    pub processed_images: usize,
}

impl VerificationReport {
    /// One-line rendering for logs.
    pub fn summary(&self) -> String {
        format!(
            "status={} overall={} identity={} address={} images={}/{}",
            self.status,
            self.overall_score,
            self.identity_score,
            self.address_score,
            self.processed_images,
            self.total_images
        )
    }
}

/// Where the image bytes live; the OCR engine decides what it supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
    Bytes(Vec<u8>),
}

/// One uploaded identification image, as supplied by the admin page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentImage {
    pub source: ImageSource,
    pub label: String,
    pub document_type: String,
}

/// The resident's stored profile, as submitted at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentProfile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(rename = "fullAddressParts")]
    pub address_parts: Vec<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
}
