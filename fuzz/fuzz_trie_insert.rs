//! Fuzz target for trie insertion and lookup with arbitrary names.
//!
//! Run with: cargo +nightly fuzz run fuzz_trie_insert
//!
//! Input is split on newlines into names. Each name is inserted under both
//! name policies and must then be found again, or have been rejected
//! without changing the tree.

#![no_main]

use libfuzzer_sys::fuzz_target;
use phonebook_core::{ContactTrie, NamePolicy, TrieError};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    for policy in [NamePolicy::Reject, NamePolicy::Strip] {
        let mut trie = ContactTrie::with_policy(policy);
        for name in s.lines() {
            let nodes = trie.node_count();
            match trie.insert(name, "1234567890", "", name) {
                Ok(_) => assert_eq!(trie.get(name).unwrap().image_path(), name),
                Err(TrieError::InvalidName { .. }) => {
                    assert_eq!(policy, NamePolicy::Reject);
                    assert_eq!(trie.node_count(), nodes);
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        let mut sink = Vec::new();
        let lines = trie.serialize_all(&mut sink).unwrap();
        assert_eq!(lines, trie.contact_count());
        trie.destroy();
    }
});
