#![deny(unsafe_code)]

//! Phonebook core: a prefix-tree contact directory.
//!
//! Contacts (mobile number, email, image path) are stored in a 26-way trie
//! keyed by name, matched case-insensitively with spaces ignored. The crate
//! provides insertion, exact lookup, prefix enumeration, appending the whole
//! directory to a flat text file, and handing a contact's image to an
//! external viewer. It holds no global state: callers own the
//! [`ContactTrie`] and pass it to every operation.

/// Compile-time build metadata (version, git hash, profile).
pub mod build_info;
/// Contact records and mobile number validation.
pub mod contact;
/// Appending the directory to a text file.
pub mod export;
/// Name-to-slot mapping and the policy for non-letter characters.
pub mod key;
/// The prefix tree itself.
pub mod trie;
/// External image viewer integration.
pub mod viewer;

pub use contact::{Contact, validate_phone};
pub use export::save_to_file;
pub use key::NamePolicy;
pub use trie::{ContactTrie, Contacts, InsertOutcome, TrieError, TrieNode};
pub use viewer::{ImageOpener, SystemOpener, ViewerError, open_contact_image};
