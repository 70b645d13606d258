use crate::models::{DocumentImage, ImageExtraction};
use crate::processing::ocr::{OcrConfig, OcrEngine};
use log::{debug, warn};

/// Combined OCR output over a batch of document images.
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    /// All extracted texts concatenated in input order, each prefixed by its
    /// image label.
    pub combined_text: String,
    /// Mean OCR confidence across all images, failures counting as zero.
    pub avg_ocr_confidence: u32,
    pub per_image: Vec<ImageExtraction>,
}

pub struct OcrAggregator;

impl OcrAggregator {
    /// Run OCR over every image in order, isolating per-image failures.
    ///
    /// A failed image is recorded with empty text and zero confidence rather
    /// than aborting the batch, so a bad upload still drags down the average
    /// confidence visibly. The progress callback, if given, fires after each
    /// image with the completed percentage.
    pub fn run(
        engine: &dyn OcrEngine,
        images: &[DocumentImage],
        config: &OcrConfig,
        mut on_progress: Option<&mut dyn FnMut(u32)>,
    ) -> AggregateOutcome {
        let mut per_image = Vec::with_capacity(images.len());
        let mut combined_text = String::new();

        for (index, image) in images.iter().enumerate() {
            let extraction = match engine.recognize(&image.source, config) {
                Ok(output) => {
                    debug!(
                        "OCR for '{}': {} chars at confidence {}",
                        image.label,
                        output.text.len(),
                        output.confidence
                    );
                    ImageExtraction {
                        label: image.label.clone(),
                        text: output.text,
                        ocr_confidence: output.confidence.min(100),
                        failed: false,
                    }
                }
                Err(err) => {
                    warn!("OCR failed for '{}': {}", image.label, err);
                    ImageExtraction {
                        label: image.label.clone(),
                        text: String::new(),
                        ocr_confidence: 0,
                        failed: true,
                    }
                }
            };

            combined_text.push_str(&extraction.label);
            combined_text.push('\n');
            combined_text.push_str(&extraction.text);
            combined_text.push('\n');
            per_image.push(extraction);

            if let Some(callback) = on_progress.as_mut() {
                callback(((index + 1) * 100 / images.len()) as u32);
            }
        }

        let avg_ocr_confidence = if per_image.is_empty() {
            0
        } else {
            let sum: u32 = per_image.iter().map(|img| img.ocr_confidence).sum();
            (sum as f64 / per_image.len() as f64).round() as u32
        };

        AggregateOutcome {
            combined_text,
            avg_ocr_confidence,
            per_image,
        }
    }
}
