use crate::models::ImageSource;
use crate::utils::OcrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text and confidence reported by the OCR capability for one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrOutput {
    pub text: String,
    /// 0-100 as reported by the engine.
    pub confidence: u32,
}

/// Page segmentation strategy requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Fully automatic full-page segmentation.
    Auto,
    SingleBlock,
    SparseText,
}

/// Recognition model requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionMode {
    Legacy,
    /// Neural-net (LSTM) recognition.
    Neural,
    Combined,
}

/// Engine settings the verifier passes along with every image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    /// Language hints, primary first (e.g. English then Filipino).
    pub language_hints: Vec<String>,
    pub segmentation: SegmentationMode,
    pub recognition: RecognitionMode,
}

impl Default for OcrConfig {
    fn default() -> Self {
        OcrConfig {
            language_hints: vec!["eng".to_string(), "fil".to_string()],
            segmentation: SegmentationMode::Auto,
            recognition: RecognitionMode::Neural,
        }
    }
}

/// The external OCR capability. Implementations wrap whatever engine the
/// deployment uses (a tesseract binding, a cloud vision API); the matching
/// core only ever sees this trait.
pub trait OcrEngine {
    fn recognize(&self, source: &ImageSource, config: &OcrConfig) -> Result<OcrOutput, OcrError>;
}

/// Canned engine for demos and tests: serves a prepared text and confidence
/// per source key, and reports unknown sources as unreachable.
#[derive(Debug, Default)]
pub struct FixtureOcr {
    fixtures: HashMap<String, OcrOutput>,
}

impl FixtureOcr {
    pub fn new() -> Self {
        FixtureOcr::default()
    }

    pub fn insert(&mut self, key: &str, text: &str, confidence: u32) {
        self.fixtures.insert(
            key.to_string(),
            OcrOutput {
                text: text.to_string(),
                confidence,
            },
        );
    }

    fn source_key(source: &ImageSource) -> String {
        match source {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Url(url) => url.clone(),
            ImageSource::Bytes(bytes) => format!("bytes:{}", bytes.len()),
        }
    }
}

impl OcrEngine for FixtureOcr {
    fn recognize(&self, source: &ImageSource, _config: &OcrConfig) -> Result<OcrOutput, OcrError> {
        let key = Self::source_key(source);
        self.fixtures
            .get(&key)
            .cloned()
            .ok_or_else(|| OcrError::Unreachable(format!("no fixture for source: {}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_serves_prepared_text() {
        let mut engine = FixtureOcr::new();
        engine.insert("fixture://front", "JUAN DELA CRUZ", 92);

        let output = engine
            .recognize(
                &ImageSource::Url("fixture://front".to_string()),
                &OcrConfig::default(),
            )
            .unwrap();
        assert_eq!(output.text, "JUAN DELA CRUZ");
        assert_eq!(output.confidence, 92);
    }

    #[test]
    fn test_fixture_unknown_source_is_unreachable() {
        let engine = FixtureOcr::new();
        let err = engine
            .recognize(
                &ImageSource::Url("fixture://missing".to_string()),
                &OcrConfig::default(),
            )
            .unwrap_err();
        assert!(matches!(err, OcrError::Unreachable(_)));
    }

    #[test]
    fn test_default_config() {
        let config = OcrConfig::default();
        assert_eq!(config.language_hints, vec!["eng", "fil"]);
        assert_eq!(config.segmentation, SegmentationMode::Auto);
        assert_eq!(config.recognition, RecognitionMode::Neural);
    }
}
