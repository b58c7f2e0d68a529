//! Opening a contact's image in an external viewer.
//!
//! The stored image path is handed to the viewer verbatim as a single
//! argument. No shell is involved except for the Windows default, where
//! `start` is a `cmd` builtin.

use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, info};

use phonebook_config::ViewerConfig;

use crate::trie::{ContactTrie, TrieError};

/// Errors from opening an image.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("viewer command is empty")]
    EmptyCommand,

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed: {status}")]
    Exited { program: String, status: ExitStatus },

    #[error(transparent)]
    Lookup(#[from] TrieError),
}

/// Something that can display an image file.
pub trait ImageOpener {
    /// Open `image_path` with this viewer.
    fn open(&self, image_path: &str) -> Result<(), ViewerError>;
}

impl<T: ImageOpener + ?Sized> ImageOpener for &T {
    fn open(&self, image_path: &str) -> Result<(), ViewerError> {
        (**self).open(image_path)
    }
}

/// Launches an OS program to display images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemOpener {
    program: String,
    args: Vec<String>,
}

impl SystemOpener {
    /// Use `program` with `args` placed before the image path.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The platform's "open with default application" command.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "windows") {
            // The empty string is the window title `start` expects first.
            Self::new("cmd", vec!["/C".into(), "start".into(), String::new()])
        } else if cfg!(target_os = "macos") {
            Self::new("open", Vec::new())
        } else {
            Self::new("xdg-open", Vec::new())
        }
    }

    /// The configured viewer, falling back to the platform default.
    pub fn from_config(config: &ViewerConfig) -> Self {
        match &config.command {
            Some(program) => Self::new(program.clone(), config.args.clone()),
            None => Self::platform_default(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The full argument vector that would be run for `image_path`.
    pub fn command_line(&self, image_path: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv.push(image_path.to_string());
        argv
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl ImageOpener for SystemOpener {
    fn open(&self, image_path: &str) -> Result<(), ViewerError> {
        if self.program.trim().is_empty() {
            return Err(ViewerError::EmptyCommand);
        }
        debug!(argv = ?self.command_line(image_path), "Launching image viewer");

        // Blocks until the launcher exits. The platform defaults return as
        // soon as the file has been handed to a viewer.
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(image_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ViewerError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(ViewerError::Exited {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Look up exactly `name` and open its image with `opener`.
///
/// Fails with [`TrieError::NotFound`] (wrapped in [`ViewerError::Lookup`])
/// when no contact is stored under that name.
pub fn open_contact_image(
    trie: &ContactTrie,
    opener: &dyn ImageOpener,
    name: &str,
) -> Result<(), ViewerError> {
    let contact = trie.get(name)?;
    opener.open(contact.image_path())?;
    info!(name, image = contact.image_path(), "Opened contact image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        opened: RefCell<Vec<String>>,
    }

    impl ImageOpener for Recorder {
        fn open(&self, image_path: &str) -> Result<(), ViewerError> {
            self.opened.borrow_mut().push(image_path.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_open_contact_image_passes_path_verbatim() {
        let mut trie = ContactTrie::new();
        trie.insert("Dee", "1234567890", "", "/pics/My Photo (1).JPG")
            .unwrap();
        let recorder = Recorder::default();

        open_contact_image(&trie, &recorder, "DEE").unwrap();
        assert_eq!(*recorder.opened.borrow(), vec!["/pics/My Photo (1).JPG"]);
    }

    #[test]
    fn test_open_contact_image_unknown_name() {
        let mut trie = ContactTrie::new();
        trie.insert("deeann", "1234567890", "", "/d.png").unwrap();
        let recorder = Recorder::default();

        // A path node without a contact is not a match.
        let err = open_contact_image(&trie, &recorder, "dee").unwrap_err();
        assert!(matches!(err, ViewerError::Lookup(TrieError::NotFound(_))));
        let err = open_contact_image(&trie, &recorder, "xavier").unwrap_err();
        assert!(matches!(err, ViewerError::Lookup(TrieError::NotFound(_))));
        assert!(recorder.opened.borrow().is_empty());
    }

    #[test]
    fn test_command_line_places_path_last() {
        let opener = SystemOpener::new("feh", vec!["--scale-down".to_string()]);
        assert_eq!(
            opener.command_line("/a b.png"),
            vec!["feh", "--scale-down", "/a b.png"]
        );
    }

    #[test]
    fn test_from_config_prefers_configured_command() {
        let config = ViewerConfig {
            command: Some("eog".to_string()),
            args: Vec::new(),
        };
        assert_eq!(SystemOpener::from_config(&config).program(), "eog");
        assert_eq!(
            SystemOpener::from_config(&ViewerConfig::default()),
            SystemOpener::platform_default()
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_platform_default_on_linux() {
        assert_eq!(SystemOpener::platform_default().program(), "xdg-open");
    }

    #[test]
    fn test_empty_program_is_rejected() {
        let opener = SystemOpener::new(" ", Vec::new());
        assert!(matches!(opener.open("/a.png"), Err(ViewerError::EmptyCommand)));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let opener = SystemOpener::new("/nonexistent/phonebook-viewer", Vec::new());
        let err = opener.open("/a.png").unwrap_err();
        assert!(matches!(err, ViewerError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/phonebook-viewer"));
    }

    #[cfg(unix)]
    #[test]
    fn test_viewer_exit_status_is_checked() {
        let err = SystemOpener::new("false", Vec::new())
            .open("/no/such/image.png")
            .unwrap_err();
        match &err {
            ViewerError::Exited { program, status } => {
                assert_eq!(program, "false");
                assert!(!status.success());
            }
            other => panic!("expected Exited, got {other:?}"),
        }
        assert!(err.to_string().starts_with("false failed: "));

        SystemOpener::new("true", Vec::new())
            .open("/no/such/image.png")
            .unwrap();
    }
}
