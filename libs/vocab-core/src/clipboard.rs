//! Copying answers with a primary mechanism and a fallback.

use crate::error::CopyError;

/// Something that can place text on a clipboard.
pub trait ClipboardBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn write_text(&self, text: &str) -> Result<(), String>;
}

/// A primary clipboard backend with an optional fallback.
pub struct Clipboard {
    primary: Box<dyn ClipboardBackend>,
    fallback: Option<Box<dyn ClipboardBackend>>,
}

impl Clipboard {
    pub fn new(primary: Box<dyn ClipboardBackend>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn ClipboardBackend>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Write `text`, trying the fallback only when the primary fails.
    pub fn copy(&self, text: &str) -> Result<(), CopyError> {
        let primary_err = match self.primary.write_text(text) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        tracing::debug!(backend = self.primary.name(), error = %primary_err, "clipboard write failed");

        let Some(fallback) = &self.fallback else {
            return Err(CopyError::PrimaryFailed(primary_err));
        };

        fallback.write_text(text).map_err(|fallback_err| {
            tracing::warn!(backend = fallback.name(), error = %fallback_err, "clipboard fallback failed");
            CopyError::FallbackFailed {
                primary: primary_err,
                fallback: fallback_err,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        fail: bool,
        written: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn written(&self) -> Vec<String> {
            self.written.lock().unwrap().clone()
        }
    }

    impl ClipboardBackend for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn write_text(&self, text: &str) -> Result<(), String> {
            if self.fail {
                return Err("unavailable".to_string());
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn primary_success_skips_fallback() {
        let primary = Recorder::default();
        let fallback = Recorder::default();
        let clipboard = Clipboard::new(Box::new(primary.clone())).with_fallback(Box::new(fallback.clone()));

        clipboard.copy("사과").unwrap();
        assert_eq!(primary.written(), vec!["사과"]);
        assert!(fallback.written().is_empty());
    }

    #[test]
    fn falls_back_on_primary_failure() {
        let fallback = Recorder::default();
        let clipboard =
            Clipboard::new(Box::new(Recorder::failing())).with_fallback(Box::new(fallback.clone()));

        clipboard.copy("apple").unwrap();
        assert_eq!(fallback.written(), vec!["apple"]);
    }

    #[test]
    fn both_failing_is_reported() {
        let clipboard =
            Clipboard::new(Box::new(Recorder::failing())).with_fallback(Box::new(Recorder::failing()));
        assert_eq!(
            clipboard.copy("apple"),
            Err(CopyError::FallbackFailed {
                primary: "unavailable".to_string(),
                fallback: "unavailable".to_string(),
            })
        );
    }

    #[test]
    fn primary_failure_without_fallback() {
        let clipboard = Clipboard::new(Box::new(Recorder::failing()));
        assert!(matches!(clipboard.copy("apple"), Err(CopyError::PrimaryFailed(_))));
    }
}
