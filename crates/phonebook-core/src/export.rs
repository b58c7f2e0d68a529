//! Appending the directory to a flat text file.
//!
//! Each save appends a full snapshot, one line per contact, to the end of
//! the file. Existing content is never truncated, so saving twice to the
//! same file leaves two copies of every line.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::trie::{ContactTrie, TrieError};

/// Append every contact in `trie` to the file at `path`, creating it if
/// needed. Returns the number of lines written.
///
/// Nothing is written if the file cannot be opened.
pub fn save_to_file(trie: &ContactTrie, path: &Path) -> Result<usize, TrieError> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut writer = BufWriter::new(file);
    let lines = trie.serialize_all(&mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), contacts = lines, "Saved contacts");
    Ok(lines)
}
