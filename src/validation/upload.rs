use crate::config::ProcessorConfig;
use crate::models::{DeclaredSide, FailureKind, ValidationFailure};
use crate::utils::CardError;
use image::ImageFormat;
use log::debug;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const SNIFF_LEN: usize = 32;

/// Presence, type, size and duplicate checks on the uploaded image files.
pub struct UploadValidator<'a> {
    config: &'a ProcessorConfig,
}

impl<'a> UploadValidator<'a> {
    pub fn new(config: &'a ProcessorConfig) -> Self {
        UploadValidator { config }
    }

    pub fn validate(&self, front: Option<&Path>, back: Option<&Path>) -> Result<(), CardError> {
        let (front, back) = match (front, back) {
            (Some(front), Some(back)) if front.is_file() && back.is_file() => (front, back),
            _ => {
                return Err(ValidationFailure::new(
                    FailureKind::MissingImage,
                    "Both front and back images are required",
                )
                .into())
            }
        };

        for (side, path) in [(DeclaredSide::Front, front), (DeclaredSide::Back, back)] {
            self.check_type(side, path)?;
        }
        for (side, path) in [(DeclaredSide::Front, front), (DeclaredSide::Back, back)] {
            self.check_size(side, path)?;
        }

        if Self::digest(front)? == Self::digest(back)? {
            return Err(ValidationFailure::new(
                FailureKind::DuplicateFile,
                "Front and back images are the same file",
            )
            .into());
        }
        debug!("Upload checks passed for {} and {}", front.display(), back.display());
        Ok(())
    }

    fn check_type(&self, side: DeclaredSide, path: &Path) -> Result<(), CardError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let extension_ok = self.config.allowed_extensions.iter().any(|allowed| *allowed == extension);

        let mut header = Vec::with_capacity(SNIFF_LEN);
        File::open(path)?.take(SNIFF_LEN as u64).read_to_end(&mut header)?;
        let content_ok = matches!(
            image::guess_format(&header),
            Ok(ImageFormat::Jpeg) | Ok(ImageFormat::Png)
        );

        if extension_ok && content_ok {
            Ok(())
        } else {
            Err(ValidationFailure::new(
                FailureKind::InvalidFileType,
                "Invalid file type. Only JPEG or PNG allowed.",
            )
            .on_side(side)
            .into())
        }
    }

    fn check_size(&self, side: DeclaredSide, path: &Path) -> Result<(), CardError> {
        let size = std::fs::metadata(path)?.len();
        if size > self.config.max_file_size {
            return Err(ValidationFailure::new(
                FailureKind::FileTooLarge,
                format!(
                    "The {} image exceeds the {} byte size limit",
                    side, self.config.max_file_size
                ),
            )
            .on_side(side)
            .into());
        }
        Ok(())
    }

    fn digest(path: &Path) -> Result<Vec<u8>, CardError> {
        let bytes = std::fs::read(path)?;
        Ok(Sha256::digest(&bytes).to_vec())
    }
}
