pub mod card_processor;
pub mod config;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;

pub use card_processor::CardProcessor;
pub use config::{OcrFailurePolicy, ProcessorConfig, SideCheckPolicy};
pub use models::{CardReport, Extraction, PairValidationOutcome, SideLabel, NOT_FOUND};
pub use utils::CardError;

use processing::{FieldExtractor, SideClassifier};
use validation::ContentValidator;

/// Holder name, or `"Not found"`.
pub fn extract_name(transcript: &str) -> String {
    FieldExtractor::extract_name(transcript).to_string()
}

/// 12-digit ID number, or `"Not found"`.
pub fn extract_id_number(transcript: &str) -> String {
    FieldExtractor::extract_id_number(transcript).to_string()
}

/// Date of birth as printed (or rebuilt as DD/MM/YYYY), or `"Not found"`.
pub fn extract_date_of_birth(transcript: &str) -> String {
    FieldExtractor::extract_date_of_birth(transcript).to_string()
}

/// Comma-joined address lines, or `"Not found"`.
pub fn extract_address(transcript: &str) -> String {
    FieldExtractor::extract_address(transcript).to_string()
}

pub fn classify_side(transcript: &str) -> SideLabel {
    SideClassifier::classify(transcript)
}

/// Content and side checks for a declared front/back pair with the default policy.
pub fn validate_pair(front_transcript: &str, back_transcript: &str) -> PairValidationOutcome {
    ContentValidator::default().validate_pair(front_transcript, back_transcript)
}
