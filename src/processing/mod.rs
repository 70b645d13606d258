pub mod aggregator;
pub mod ocr;

pub use aggregator::{AggregateOutcome, OcrAggregator};
pub use ocr::{FixtureOcr, OcrConfig, OcrEngine, OcrOutput, RecognitionMode, SegmentationMode};
