use serde::{Serialize, Serializer};
use std::fmt;

/// Text shown for a field nobody could read off the card.
pub const NOT_FOUND: &str = "Not found";

/// Outcome of a single field extractor. Absence is a value, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Extraction {
    Found(String),
    #[default]
    NotFound,
}

impl Extraction {
    pub fn as_str(&self) -> &str {
        match self {
            Extraction::Found(value) => value,
            Extraction::NotFound => NOT_FOUND,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Extraction::Found(value) => Some(value),
            Extraction::NotFound => None,
        }
    }

    /// Keeps `self` when found, otherwise evaluates the fallback.
    pub fn or_else<F: FnOnce() -> Extraction>(self, fallback: F) -> Extraction {
        match self {
            Extraction::Found(_) => self,
            Extraction::NotFound => fallback(),
        }
    }
}

impl From<Option<String>> for Extraction {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => Extraction::Found(v),
            None => Extraction::NotFound,
        }
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for Extraction {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for Extraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which face of the card a transcript was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SideLabel {
    Front,
    Back,
    Unknown,
}

impl fmt::Display for SideLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SideLabel::Front => write!(f, "front"),
            SideLabel::Back => write!(f, "back"),
            SideLabel::Unknown => write!(f, "unknown"),
        }
    }
}

/// The side the uploader claims an image shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredSide {
    Front,
    Back,
}

impl DeclaredSide {
    pub fn as_label(&self) -> SideLabel {
        match self {
            DeclaredSide::Front => SideLabel::Front,
            DeclaredSide::Back => SideLabel::Back,
        }
    }
}

impl fmt::Display for DeclaredSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_label().fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    // Upload preconditions
    MissingImage,
    InvalidFileType,
    FileTooLarge,
    DuplicateFile,
    // Per-image content
    MissingInstitutionalReference,
    MissingIdNumber,
    MissingPersonalDetails,
    MissingAddress,
    // Cross-image consistency
    Swapped,
    FrontIsBack,
    BackIsFront,
    SameSide(SideLabel),
}

/// A rejection of what the caller submitted, carrying the reason to show them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub kind: FailureKind,
    pub side: Option<DeclaredSide>,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        ValidationFailure {
            kind,
            side: None,
            message: message.into(),
        }
    }

    pub fn on_side(mut self, side: DeclaredSide) -> Self {
        self.side = Some(side);
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationOutcome {
    pub fn passed() -> Self {
        ValidationOutcome {
            valid: true,
            reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        ValidationOutcome {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    pub fn not_checked() -> Self {
        ValidationOutcome {
            valid: false,
            reason: Some("not checked".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairValidationOutcome {
    pub front: ValidationOutcome,
    pub back: ValidationOutcome,
    /// Classifications are only computed once both content checks pass.
    pub front_side: Option<SideLabel>,
    pub back_side: Option<SideLabel>,
    pub failure: Option<ValidationFailure>,
}

impl PairValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    pub fn into_result(self) -> Result<PairValidationOutcome, ValidationFailure> {
        match self.failure.clone() {
            Some(failure) => Err(failure),
            None => Ok(self),
        }
    }
}

/// Advisory checks over the extracted fields. They never reject a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardChecks {
    pub id_checksum_valid: bool,
    pub dob_valid: bool,
    pub front_side: Option<SideLabel>,
    pub back_side: Option<SideLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReport {
    pub name: Extraction,
    pub aadhaar_number: Extraction,
    pub dob: Extraction,
    pub address: Extraction,
    pub checks: CardChecks,
    pub validation_skipped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_as_sentinel() {
        assert_eq!(Extraction::NotFound.to_string(), "Not found");
        assert_eq!(Extraction::Found("Rahul".to_string()), "Rahul");
        assert_eq!(serde_json::to_string(&Extraction::NotFound).unwrap(), "\"Not found\"");
    }

    #[test]
    fn or_else_only_runs_on_absence() {
        let found = Extraction::Found("A".to_string()).or_else(|| Extraction::Found("B".to_string()));
        assert_eq!(found, "A");
        let fallback = Extraction::NotFound.or_else(|| Extraction::Found("B".to_string()));
        assert_eq!(fallback, "B");
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let report = CardReport {
            name: Extraction::Found("Priya Verma".to_string()),
            aadhaar_number: Extraction::NotFound,
            dob: Extraction::NotFound,
            address: Extraction::NotFound,
            checks: CardChecks {
                id_checksum_valid: false,
                dob_valid: false,
                front_side: Some(SideLabel::Front),
                back_side: None,
            },
            validation_skipped: false,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["aadhaarNumber"], "Not found");
        assert_eq!(json["checks"]["frontSide"], "front");
        assert_eq!(json["validationSkipped"], false);
    }
}
