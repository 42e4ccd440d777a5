use crate::config::{OcrFailurePolicy, ProcessorConfig};
use crate::models::*;
use crate::processing::*;
use crate::utils::CardError;
use crate::validation::*;
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;

/// Validate-then-extract pipeline over a front/back image pair.
pub struct CardProcessor {
    config: ProcessorConfig,
    engine: Arc<dyn OcrEngine>,
    validator: ContentValidator,
}

impl CardProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        let engine = Arc::new(TesseractEngine::from_config(&config));
        Self::with_engine(config, engine)
    }

    pub fn with_engine(config: ProcessorConfig, engine: Arc<dyn OcrEngine>) -> Self {
        let validator = ContentValidator::new(config.side_check_policy);
        CardProcessor {
            config,
            engine,
            validator,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn process(&self, front: &Path, back: &Path) -> Result<CardReport, CardError> {
        let result = self.process_images(front, back);
        if self.config.cleanup_uploads {
            Self::cleanup(&[front, back]);
        }
        result
    }

    fn process_images(&self, front: &Path, back: &Path) -> Result<CardReport, CardError> {
        // Step 1: Upload preconditions
        UploadValidator::new(&self.config).validate(Some(front), Some(back))?;

        // Step 2: OCR both faces
        let transcripts = recognize_pair(
            Arc::clone(&self.engine),
            front,
            back,
            self.config.ocr_timeout(),
        );

        // Step 3: Content validation, unless OCR failed and policy says skip
        if let Some((side, failure)) = transcripts.first_failure() {
            match self.config.ocr_failure_policy {
                OcrFailurePolicy::Reject => {
                    error!("OCR failed for {} image: {}", side, failure);
                    return Err(CardError::OcrError(format!(
                        "OCR failed for {} image: {}",
                        side, failure
                    )));
                }
                OcrFailurePolicy::SkipValidation => {
                    warn!(
                        "OCR failed for {} image ({}); skipping content validation",
                        side, failure
                    );
                    let front_text = transcripts.front.as_deref().unwrap_or("");
                    let back_text = transcripts.back.as_deref().unwrap_or("");
                    return Ok(Self::extract(front_text, back_text, None, true));
                }
            }
        }

        let front_text = transcripts.front.as_deref().unwrap_or("");
        let back_text = transcripts.back.as_deref().unwrap_or("");
        self.process_transcripts(front_text, back_text)
    }

    /// Validation and extraction for transcripts that were already recognised.
    pub fn process_transcripts(
        &self,
        front_text: &str,
        back_text: &str,
    ) -> Result<CardReport, CardError> {
        let outcome = self.validator.validate_pair(front_text, back_text).into_result()?;
        info!("Image pair passed content validation");
        Ok(Self::extract(front_text, back_text, Some(&outcome), false))
    }

    /// Pulls the card fields out of both transcripts. Name, birth date and
    /// address come from the front; the address falls back to the back, and
    /// the ID number is looked for across both.
    pub fn extract(
        front_text: &str,
        back_text: &str,
        outcome: Option<&PairValidationOutcome>,
        validation_skipped: bool,
    ) -> CardReport {
        let name = FieldExtractor::extract_name(front_text);
        let aadhaar_number =
            FieldExtractor::extract_id_number(&format!("{} {}", front_text, back_text));
        let dob = FieldExtractor::extract_date_of_birth(front_text);
        let address = FieldExtractor::extract_address(front_text)
            .or_else(|| FieldExtractor::extract_address(back_text));

        let checks = CardChecks {
            id_checksum_valid: aadhaar_number.value().map_or(false, is_valid_id_checksum),
            dob_valid: dob.value().map_or(false, is_valid_date),
            front_side: outcome.and_then(|o| o.front_side),
            back_side: outcome.and_then(|o| o.back_side),
        };

        let report = CardReport {
            name,
            aadhaar_number,
            dob,
            address,
            checks,
            validation_skipped,
        };
        info!(
            "Parsed data: name={}, number={}, dob={}, address={}",
            report.name, report.aadhaar_number, report.dob, report.address
        );
        report
    }

    fn cleanup(paths: &[&Path]) {
        for path in paths {
            match std::fs::remove_file(path) {
                Ok(()) => info!("Removed uploaded file {}", path.display()),
                Err(e) => error!("Error cleaning up {}: {}", path.display(), e),
            }
        }
    }
}
