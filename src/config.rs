use crate::utils::CardError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// What to do when the OCR engine fails or times out while validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrFailurePolicy {
    /// Treat the validation step as passed and carry on with whatever text is available.
    #[default]
    SkipValidation,
    /// Abort with an internal error.
    Reject,
}

/// When the cross-image side checks are allowed to reject a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideCheckPolicy {
    /// Only when both images were classified with confidence.
    #[default]
    Lenient,
    /// Also when one image is confidently the wrong side and the other is unknown.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub max_file_size: u64,
    pub allowed_extensions: Vec<String>,
    pub ocr_language: String,
    /// Falls back to `TESSDATA_PREFIX` when unset.
    pub tessdata_dir: Option<String>,
    pub ocr_timeout_secs: Option<u64>,
    pub ocr_failure_policy: OcrFailurePolicy,
    pub side_check_policy: SideCheckPolicy,
    pub cleanup_uploads: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            ocr_language: "eng".to_string(),
            tessdata_dir: None,
            ocr_timeout_secs: None,
            ocr_failure_policy: OcrFailurePolicy::default(),
            side_check_policy: SideCheckPolicy::default(),
            cleanup_uploads: false,
        }
    }
}

impl ProcessorConfig {
    pub fn from_json(json: &str) -> Result<Self, CardError> {
        serde_json::from_str(json)
            .map_err(|e| CardError::ConfigError(format!("Invalid configuration: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CardError> {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            CardError::ConfigError(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    pub fn ocr_timeout(&self) -> Option<Duration> {
        self.ocr_timeout_secs.map(Duration::from_secs)
    }

    pub fn tessdata_dir(&self) -> Option<String> {
        self.tessdata_dir
            .clone()
            .or_else(|| std::env::var("TESSDATA_PREFIX").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upload_limits() {
        let config = ProcessorConfig::default();
        assert_eq!(config.max_file_size, 5 * 1024 * 1024);
        assert_eq!(config.allowed_extensions, vec!["jpg", "jpeg", "png"]);
        assert_eq!(config.ocr_failure_policy, OcrFailurePolicy::SkipValidation);
        assert_eq!(config.side_check_policy, SideCheckPolicy::Lenient);
        assert!(config.ocr_timeout().is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ProcessorConfig::from_json(
            r#"{"ocr_timeout_secs": 30, "ocr_failure_policy": "reject", "side_check_policy": "strict"}"#,
        )
        .unwrap();
        assert_eq!(config.ocr_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.ocr_failure_policy, OcrFailurePolicy::Reject);
        assert_eq!(config.side_check_policy, SideCheckPolicy::Strict);
        assert_eq!(config.ocr_language, "eng");
    }

    #[test]
    fn bad_json_is_config_error() {
        let err = ProcessorConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, CardError::ConfigError(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = ProcessorConfig::from_file("/nonexistent/aadhaar.json").unwrap_err();
        assert!(matches!(err, CardError::ConfigError(_)));
    }
}
