pub mod classifier;
pub mod extractors;
pub mod image;
pub mod name;
pub mod ocr;
pub mod tokenizer;

pub use classifier::{SideClassifier, SideScore};
pub use extractors::FieldExtractor;
pub use image::ImageProcessor;
pub use ocr::{recognize_pair, OcrEngine, OcrFailure, PairTranscripts, TesseractEngine};
pub use tokenizer::LineSequence;
