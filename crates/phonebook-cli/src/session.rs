//! The interactive menu loop.
//!
//! A [`Session`] owns the contact trie for the lifetime of the program and
//! reads one menu choice at a time from its input. Every failure is reported
//! to the user and the loop carries on; only quitting (or end of input)
//! ends it.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use phonebook_core::{
    ContactTrie, ImageOpener, InsertOutcome, TrieError, ViewerError, open_contact_image,
    save_to_file,
};

use crate::menu::{MenuChoice, MenuError};

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An interactive phone directory session.
pub struct Session<R, W, O> {
    trie: ContactTrie,
    opener: O,
    default_save_file: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, O: ImageOpener> Session<R, W, O> {
    pub fn new(
        trie: ContactTrie,
        opener: O,
        default_save_file: impl Into<PathBuf>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            trie,
            opener,
            default_save_file: default_save_file.into(),
            input,
            output,
        }
    }

    /// Run until the user quits or input ends, then release the trie.
    pub fn run(mut self) -> io::Result<()> {
        info!(policy = %self.trie.policy(), "Session started");
        loop {
            self.show_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("Input closed");
                break;
            };
            let choice = match MenuChoice::parse(&line) {
                Ok(choice) => choice,
                Err(e) => {
                    if let MenuError::OutOfRange(n) = e {
                        debug!(choice = n, "Menu choice out of range");
                    }
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };
            debug!(?choice, "Menu choice");
            if self.dispatch(choice)? == Flow::Quit {
                break;
            }
        }

        let Self {
            trie, mut output, ..
        } = self;
        info!(contacts = trie.contact_count(), "Session ended");
        trie.destroy();
        writeln!(output, "Thank you!")?;
        output.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        match choice {
            MenuChoice::AddContact | MenuChoice::AddContactWithImage => self.add_contact(),
            MenuChoice::SearchByPrefix => self.search(),
            MenuChoice::SaveToFile => self.save(),
            MenuChoice::OpenImage => self.open_image(),
            MenuChoice::Quit => Ok(Flow::Quit),
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Phone Book Directory")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{choice}")?;
        }
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()
    }

    fn add_contact(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(phone) = self.prompt("Enter contact number: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.prompt("Enter email: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(image_path) = self.prompt("Enter image address: ")? else {
            return Ok(Flow::Quit);
        };

        match self.trie.insert(&name, &phone, &email, &image_path) {
            Ok(InsertOutcome::Created) => writeln!(self.output, "Contact added.")?,
            Ok(InsertOutcome::Replaced(_)) => writeln!(self.output, "Contact updated.")?,
            Err(TrieError::InvalidPhone(_)) => writeln!(
                self.output,
                "Invalid mobile number. Please enter a 10-digit number."
            )?,
            Err(TrieError::InvalidName { found, .. }) => writeln!(
                self.output,
                "Invalid name: {found:?} is not allowed. Use letters and spaces only."
            )?,
            Err(e) => writeln!(self.output, "Could not add contact: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(prefix) = self.prompt("Enter prefix to search: ")? else {
            return Ok(Flow::Quit);
        };

        let mut shown = 0;
        match self.trie.traverse_from_prefix(&prefix) {
            Ok(contacts) => {
                for (name, contact) in contacts {
                    writeln!(self.output, "{}", contact.line(&name))?;
                    shown += 1;
                }
            }
            Err(TrieError::InvalidName { found, .. }) => {
                writeln!(
                    self.output,
                    "Invalid prefix: {found:?} is not allowed. Use letters and spaces only."
                )?;
                return Ok(Flow::Continue);
            }
            Err(e) => debug!(error = %e, "Prefix search found nothing"),
        }
        if shown == 0 {
            writeln!(self.output, "No contacts found with the given prefix.")?;
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> io::Result<Flow> {
        let label = format!(
            "Enter file name to save contacts [{}]: ",
            self.default_save_file.display()
        );
        let Some(file_name) = self.prompt(&label)? else {
            return Ok(Flow::Quit);
        };
        let path = if file_name.trim().is_empty() {
            self.default_save_file.clone()
        } else {
            PathBuf::from(file_name)
        };

        match save_to_file(&self.trie, &path) {
            Ok(_) => writeln!(self.output, "Contacts saved to file successfully.")?,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Saving contacts failed");
                writeln!(self.output, "Error opening file for writing: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn open_image(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Enter name to open image: ")? else {
            return Ok(Flow::Quit);
        };

        match open_contact_image(&self.trie, &self.opener, &name) {
            Ok(()) => {}
            Err(ViewerError::Lookup(TrieError::InvalidName { found, .. })) => writeln!(
                self.output,
                "Invalid name: {found:?} is not allowed. Use letters and spaces only."
            )?,
            Err(ViewerError::Lookup(_)) => {
                writeln!(self.output, "Contact not found or no image associated.")?;
            }
            Err(e) => {
                warn!(name = %name, error = %e, "Opening image failed");
                writeln!(self.output, "Could not open image: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next input line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
