//! Sample contacts and temporary save files.

use std::path::{Path, PathBuf};

use phonebook_core::ContactTrie;
use tempfile::TempDir;

/// A contact as entered by a user, before it reaches the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleContact {
    pub name: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub image_path: &'static str,
}

impl SampleContact {
    /// The name as the trie spells it back: lowercase, spaces removed.
    pub fn stored_name(&self) -> String {
        self.name
            .chars()
            .filter(|c| *c != ' ')
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    /// The directory line this contact serializes to.
    pub fn line(&self) -> String {
        format!(
            "Name: {}, Mobile Number: {}, Email: {}, Image Address: {}",
            self.stored_name(),
            self.phone,
            self.email,
            self.image_path
        )
    }
}

/// Five contacts with overlapping prefixes, deliberately out of order.
pub const SAMPLE_CONTACTS: [SampleContact; 5] = [
    SampleContact {
        name: "Anna",
        phone: "5550000002",
        email: "anna@example.com",
        image_path: "/photos/anna.png",
    },
    SampleContact {
        name: "Bob Stone",
        phone: "5550000004",
        email: "bob@example.com",
        image_path: "/photos/bob.jpg",
    },
    SampleContact {
        name: "Ann",
        phone: "5550000001",
        email: "ann@example.com",
        image_path: "/photos/ann.png",
    },
    SampleContact {
        name: "alice smith",
        phone: "5550000000",
        email: "alice@example.com",
        image_path: "/photos/alice smith.png",
    },
    SampleContact {
        name: "Andrew",
        phone: "5550000003",
        email: "andrew@example.com",
        image_path: "C:\\photos\\andrew.bmp",
    },
];

/// [`SAMPLE_CONTACTS`] sorted the way the trie enumerates them.
pub fn sample_contacts_sorted() -> Vec<SampleContact> {
    let mut sorted = SAMPLE_CONTACTS.to_vec();
    sorted.sort_by_key(SampleContact::stored_name);
    sorted
}

/// A trie holding every contact in [`SAMPLE_CONTACTS`].
pub fn sample_trie() -> ContactTrie {
    let mut trie = ContactTrie::new();
    for c in SAMPLE_CONTACTS {
        trie.insert(c.name, c.phone, c.email, c.image_path)
            .expect("sample contacts are valid");
    }
    trie
}

/// A save-file path inside a temporary directory.
///
/// The directory is deleted when this value is dropped, including on panic.
pub struct TempSaveFile {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TempSaveFile {
    /// A path to a file that does not exist yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("contacts.txt");
        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file's lines, or an empty list if it was never created.
    pub fn lines(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for TempSaveFile {
    fn default() -> Self {
        Self::new()
    }
}
