//! Image openers that record instead of launching a viewer.

use std::cell::RefCell;

use phonebook_core::{ImageOpener, ViewerError};

/// Records every path it is asked to open.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: RefCell<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths opened so far, in call order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl ImageOpener for RecordingOpener {
    fn open(&self, image_path: &str) -> Result<(), ViewerError> {
        tracing::debug!(image_path, "Recorded image open");
        self.opened.borrow_mut().push(image_path.to_string());
        Ok(())
    }
}

/// Fails every open as if the viewer program were missing.
#[derive(Debug, Default)]
pub struct FailingOpener;

impl ImageOpener for FailingOpener {
    fn open(&self, _image_path: &str) -> Result<(), ViewerError> {
        Err(ViewerError::Spawn {
            program: "missing-viewer".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}
