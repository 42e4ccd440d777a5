#![allow(dead_code)]

use aadhaar_ocr::processing::OcrEngine;
use aadhaar_ocr::CardError;
use image::{GrayImage, Luma};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FRONT_TEXT: &str = "\
Government of India
Rahul Sharma
2345 6789 0124
DOB: 15/08/1995
MALE
Aadhaar - Aam Aadmi ka Adhikar";

pub const BACK_TEXT: &str = "\
Unique Identification Authority of India
Address:
S/O: Ramesh Sharma
12 Park Street, Hazratganj
Lucknow, Uttar Pradesh - 226001
Mobile: 9876543210
1947 help@uidai.gov.in www.uidai.gov.in";

/// Answers with canned transcripts keyed by image file name.
#[derive(Default)]
pub struct ScriptedEngine {
    texts: HashMap<String, Result<String, String>>,
}

impl ScriptedEngine {
    pub fn with_text(mut self, file_name: &str, text: &str) -> Self {
        self.texts.insert(file_name.to_string(), Ok(text.to_string()));
        self
    }

    pub fn with_failure(mut self, file_name: &str, message: &str) -> Self {
        self.texts.insert(file_name.to_string(), Err(message.to_string()));
        self
    }
}

impl OcrEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn recognize(&self, image: &Path) -> Result<String, CardError> {
        let key = image
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        match self.texts.get(key) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(CardError::OcrError(message.clone())),
            None => Err(CardError::OcrError(format!("no transcript for {}", key))),
        }
    }
}

/// Writes a small PNG; distinct shades give distinct file contents.
pub fn write_card_image(dir: &TempDir, name: &str, shade: u8) -> PathBuf {
    let path = dir.path().join(name);
    GrayImage::from_pixel(16, 10, Luma([shade])).save(&path).unwrap();
    path
}
