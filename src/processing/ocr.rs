use crate::config::ProcessorConfig;
use crate::models::DeclaredSide;
use crate::processing::image::ImageProcessor;
use crate::utils::CardError;
use log::{debug, info};
use std::fmt;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tesseract::Tesseract;

/// Turns a card image into plain text. Implementations must be callable from
/// several threads at once.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn recognize(&self, image: &Path) -> Result<String, CardError>;
}

pub struct TesseractEngine {
    language: String,
    datapath: Option<String>,
}

impl TesseractEngine {
    pub fn new(language: &str, datapath: Option<String>) -> Self {
        TesseractEngine {
            language: language.to_string(),
            datapath,
        }
    }

    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self::new(&config.ocr_language, config.tessdata_dir())
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &Path) -> Result<String, CardError> {
        let prepared = ImageProcessor::prepare_for_ocr(image)?;
        let path_str = prepared
            .path()
            .to_str()
            .ok_or_else(|| CardError::OcrError("Failed to convert path to string".to_string()))?;

        let mut tess = Tesseract::new(self.datapath.as_deref(), Some(self.language.as_str()))
            .map_err(|e| CardError::OcrError(format!("Tesseract init error: {}", e)))?;
        tess = tess
            .set_image(path_str)
            .map_err(|e| CardError::OcrError(format!("Tesseract set image error: {}", e)))?;
        let text = tess
            .get_text()
            .map_err(|e| CardError::OcrError(format!("Tesseract error: {}", e)))?;
        debug!("OCR result for {}:\n{}", image.display(), text);
        Ok(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrFailure {
    Engine(String),
    TimedOut,
}

impl fmt::Display for OcrFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OcrFailure::Engine(msg) => write!(f, "{}", msg),
            OcrFailure::TimedOut => write!(f, "OCR timed out"),
        }
    }
}

#[derive(Debug)]
pub struct PairTranscripts {
    pub front: Result<String, OcrFailure>,
    pub back: Result<String, OcrFailure>,
}

impl PairTranscripts {
    pub fn first_failure(&self) -> Option<(DeclaredSide, &OcrFailure)> {
        match (&self.front, &self.back) {
            (Err(failure), _) => Some((DeclaredSide::Front, failure)),
            (_, Err(failure)) => Some((DeclaredSide::Back, failure)),
            _ => None,
        }
    }
}

/// Runs OCR on both faces in parallel. With a timeout, a side that has not
/// answered by the shared deadline is reported as `TimedOut`; its worker is
/// left to finish in the background and its text is discarded.
pub fn recognize_pair(
    engine: Arc<dyn OcrEngine>,
    front: &Path,
    back: &Path,
    timeout: Option<Duration>,
) -> PairTranscripts {
    let front_rx = spawn_recognition(Arc::clone(&engine), DeclaredSide::Front, front);
    let back_rx = spawn_recognition(engine, DeclaredSide::Back, back);

    let deadline = timeout.map(|t| Instant::now() + t);
    PairTranscripts {
        front: wait_for(front_rx, deadline),
        back: wait_for(back_rx, deadline),
    }
}

fn spawn_recognition(
    engine: Arc<dyn OcrEngine>,
    side: DeclaredSide,
    image: &Path,
) -> Receiver<Result<String, CardError>> {
    let (tx, rx) = mpsc::channel();
    let image = image.to_path_buf();
    thread::spawn(move || {
        info!("Starting OCR for {} image with {}...", side, engine.name());
        let result = engine.recognize(&image);
        info!("Finished OCR for {} image", side);
        // The receiver is gone if the caller already gave up waiting
        let _ = tx.send(result);
    });
    rx
}

fn wait_for(
    rx: Receiver<Result<String, CardError>>,
    deadline: Option<Instant>,
) -> Result<String, OcrFailure> {
    let received = match deadline {
        None => rx
            .recv()
            .map_err(|_| OcrFailure::Engine("OCR worker stopped unexpectedly".to_string())),
        Some(deadline) => rx
            .recv_timeout(deadline.saturating_duration_since(Instant::now()))
            .map_err(|e| match e {
                RecvTimeoutError::Timeout => OcrFailure::TimedOut,
                RecvTimeoutError::Disconnected => {
                    OcrFailure::Engine("OCR worker stopped unexpectedly".to_string())
                }
            }),
    }?;
    received.map_err(|e| OcrFailure::Engine(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoEngine;

    impl OcrEngine for EchoEngine {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn recognize(&self, image: &Path) -> Result<String, CardError> {
            match image.file_name().and_then(|n| n.to_str()) {
                Some("broken.png") => Err(CardError::OcrError("engine crashed".to_string())),
                Some("slow.png") => {
                    thread::sleep(Duration::from_millis(500));
                    Ok("late".to_string())
                }
                Some(name) => Ok(format!("text of {}", name)),
                None => Ok(String::new()),
            }
        }
    }

    #[test]
    fn both_sides_are_recognized() {
        let pair = recognize_pair(Arc::new(EchoEngine), Path::new("front.png"), Path::new("back.png"), None);
        assert_eq!(pair.front, Ok("text of front.png".to_string()));
        assert_eq!(pair.back, Ok("text of back.png".to_string()));
        assert!(pair.first_failure().is_none());
    }

    #[test]
    fn engine_error_is_reported_per_side() {
        let pair = recognize_pair(Arc::new(EchoEngine), Path::new("front.png"), Path::new("broken.png"), None);
        assert!(pair.front.is_ok());
        let (side, failure) = pair.first_failure().unwrap();
        assert_eq!(side, DeclaredSide::Back);
        assert_eq!(failure, &OcrFailure::Engine("OCR error: engine crashed".to_string()));
    }

    #[test]
    fn slow_side_times_out() {
        let pair = recognize_pair(
            Arc::new(EchoEngine),
            Path::new("slow.png"),
            Path::new("back.png"),
            Some(Duration::from_millis(50)),
        );
        assert_eq!(pair.front, Err(OcrFailure::TimedOut));
        assert_eq!(pair.first_failure().map(|(side, _)| side), Some(DeclaredSide::Front));
    }
}
