use crate::config::SideCheckPolicy;
use crate::models::rules::{
    contains_any, ADDRESS_CONTEXT_TOKENS, INSTITUTIONAL_TOKENS, PERSONAL_INFO_TOKENS,
};
use crate::models::{
    DeclaredSide, FailureKind, PairValidationOutcome, SideLabel, ValidationFailure,
    ValidationOutcome,
};
use crate::processing::classifier::{has_id_number, has_pin_code, SideClassifier};
use log::{debug, warn};

/// Checks that a pair of transcripts really are the front and back of one card.
pub struct ContentValidator {
    side_policy: SideCheckPolicy,
}

impl Default for ContentValidator {
    fn default() -> Self {
        ContentValidator::new(SideCheckPolicy::default())
    }
}

impl ContentValidator {
    pub fn new(side_policy: SideCheckPolicy) -> Self {
        ContentValidator { side_policy }
    }

    pub fn validate_front(text: &str) -> Result<(), ValidationFailure> {
        let lower = text.to_lowercase();
        let fail = |kind, message: &str| {
            Err(ValidationFailure::new(kind, message).on_side(DeclaredSide::Front))
        };
        if !contains_any(&lower, INSTITUTIONAL_TOKENS) {
            return fail(
                FailureKind::MissingInstitutionalReference,
                "Front image does not appear to be an Aadhaar card",
            );
        }
        if !has_id_number(text) {
            return fail(
                FailureKind::MissingIdNumber,
                "Front image does not contain a valid Aadhaar number",
            );
        }
        if !contains_any(&lower, PERSONAL_INFO_TOKENS) {
            return fail(
                FailureKind::MissingPersonalDetails,
                "Front image does not contain date of birth or gender details",
            );
        }
        Ok(())
    }

    pub fn validate_back(text: &str) -> Result<(), ValidationFailure> {
        let lower = text.to_lowercase();
        let fail = |kind, message: &str| {
            Err(ValidationFailure::new(kind, message).on_side(DeclaredSide::Back))
        };
        if !contains_any(&lower, INSTITUTIONAL_TOKENS) {
            return fail(
                FailureKind::MissingInstitutionalReference,
                "Back image does not appear to be an Aadhaar card",
            );
        }
        if !contains_any(&lower, ADDRESS_CONTEXT_TOKENS) && !has_pin_code(text) {
            return fail(
                FailureKind::MissingAddress,
                "Back image does not contain an address",
            );
        }
        Ok(())
    }

    /// Compares the classified sides against what was declared. Unknown never
    /// counts against an image unless the policy is strict.
    pub fn check_sides(&self, front: SideLabel, back: SideLabel) -> Option<ValidationFailure> {
        let strict = self.side_policy == SideCheckPolicy::Strict;
        let kind = match (front, back) {
            (SideLabel::Back, SideLabel::Front) => FailureKind::Swapped,
            (SideLabel::Back, SideLabel::Unknown) if strict => FailureKind::FrontIsBack,
            (SideLabel::Unknown, SideLabel::Front) if strict => FailureKind::BackIsFront,
            (SideLabel::Front, SideLabel::Front) | (SideLabel::Back, SideLabel::Back) => {
                FailureKind::SameSide(front)
            }
            _ => return None,
        };
        let message = match &kind {
            FailureKind::Swapped => "Front and back images appear to be swapped".to_string(),
            FailureKind::FrontIsBack => {
                "The image uploaded as front is actually the back of the card".to_string()
            }
            FailureKind::BackIsFront => {
                "The image uploaded as back is actually the front of the card".to_string()
            }
            _ => format!("Both images are the same side: {}", front),
        };
        Some(ValidationFailure::new(kind, message))
    }

    /// Per-image content checks, then cross-image side checks. The first failure wins.
    pub fn validate_pair(&self, front_text: &str, back_text: &str) -> PairValidationOutcome {
        let mut outcome = PairValidationOutcome {
            front: ValidationOutcome::not_checked(),
            back: ValidationOutcome::not_checked(),
            front_side: None,
            back_side: None,
            failure: None,
        };

        if let Err(failure) = Self::validate_front(front_text) {
            warn!("Front image rejected: {}", failure);
            outcome.front = ValidationOutcome::failed(&failure.message);
            outcome.failure = Some(failure);
            return outcome;
        }
        outcome.front = ValidationOutcome::passed();

        if let Err(failure) = Self::validate_back(back_text) {
            warn!("Back image rejected: {}", failure);
            outcome.back = ValidationOutcome::failed(&failure.message);
            outcome.failure = Some(failure);
            return outcome;
        }
        outcome.back = ValidationOutcome::passed();

        let front_side = SideClassifier::classify(front_text);
        let back_side = SideClassifier::classify(back_text);
        debug!("Declared front classified {}, declared back classified {}", front_side, back_side);
        outcome.front_side = Some(front_side);
        outcome.back_side = Some(back_side);

        if let Some(failure) = self.check_sides(front_side, back_side) {
            warn!("Image pair rejected: {}", failure);
            outcome.failure = Some(failure);
        }
        outcome
    }
}
