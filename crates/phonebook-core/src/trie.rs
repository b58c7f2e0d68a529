//! The contact trie: a 26-way prefix tree keyed by name.
//!
//! Each node owns up to [`ALPHABET_SIZE`] children, one per letter, and
//! optionally a [`Contact`]. A name is stored by walking one level per
//! letter (see [`crate::key`] for how names map to letters) and attaching
//! the record to the node where the walk ends. Names sharing a prefix share
//! the nodes of that prefix.
//!
//! Enumeration is a depth-first pre-order walk that visits children in
//! letter order, so contacts come out sorted by their stored spelling.

use std::fmt;
use std::io::Write;

use tracing::{debug, warn};

use crate::contact::Contact;
use crate::key::{ALPHABET_SIZE, NameKey, NamePolicy, letter_for};

/// Errors from trie operations.
#[derive(Debug, thiserror::Error)]
pub enum TrieError {
    #[error("invalid mobile number {0:?}: expected exactly 10 digits")]
    InvalidPhone(String),

    #[error("invalid character {found:?} in name {name:?}: only letters and spaces are allowed")]
    InvalidName { name: String, found: char },

    #[error("no contacts found under {0:?}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single position in the trie.
#[derive(Default)]
pub struct TrieNode {
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    record: Option<Contact>,
}

impl TrieNode {
    /// The contact stored at this node, if a name ends here.
    pub fn record(&self) -> Option<&Contact> {
        self.record.as_ref()
    }

    fn child(&self, slot: usize) -> Option<&TrieNode> {
        self.children[slot].as_deref()
    }

    /// Present children with their letters, in letter order.
    fn children(&self) -> impl DoubleEndedIterator<Item = (char, &TrieNode)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(slot, child)| child.as_deref().map(|node| (letter_for(slot), node)))
    }
}

// Shallow: children are listed by letter only, never descended into.
impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = self.children().map(|(letter, _)| letter).collect();
        f.debug_struct("TrieNode")
            .field("children", &letters)
            .field("record", &self.record)
            .finish()
    }
}

// Tear down without recursion so long names cannot exhaust the stack.
// Nodes are freed post-order: every child before its parent.
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<(Box<TrieNode>, bool)> = self
            .children
            .iter_mut()
            .filter_map(|slot| slot.take().map(|child| (child, false)))
            .collect();

        while let Some((mut node, expanded)) = stack.pop() {
            if expanded {
                continue;
            }
            let children: Vec<_> = node
                .children
                .iter_mut()
                .filter_map(|slot| slot.take().map(|child| (child, false)))
                .collect();
            stack.push((node, true));
            stack.extend(children);
        }
    }
}

/// What [`ContactTrie::insert`] did at the target node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The node had no contact before.
    Created,
    /// An existing contact was overwritten; it is returned here.
    Replaced(Contact),
}

/// Contact directory backed by a prefix tree.
pub struct ContactTrie {
    root: TrieNode,
    policy: NamePolicy,
    nodes: usize,
}

impl fmt::Debug for ContactTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactTrie")
            .field("policy", &self.policy)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

impl Default for ContactTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactTrie {
    /// Create an empty trie that rejects names with non-letter characters.
    pub fn new() -> Self {
        Self::with_policy(NamePolicy::default())
    }

    /// Create an empty trie with the given name policy.
    pub fn with_policy(policy: NamePolicy) -> Self {
        Self {
            root: TrieNode::default(),
            policy,
            nodes: 1,
        }
    }

    pub fn policy(&self) -> NamePolicy {
        self.policy
    }

    /// The root node. A contact inserted under an empty name lives here.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Store a contact under `name`, overwriting any contact already there.
    ///
    /// The mobile number and the name are both checked before the tree is
    /// touched; on error the trie is left exactly as it was.
    pub fn insert(
        &mut self,
        name: &str,
        phone: &str,
        email: &str,
        image_path: &str,
    ) -> Result<InsertOutcome, TrieError> {
        let contact = Contact::new(phone, email, image_path).inspect_err(|_| {
            warn!(name, "Rejected contact with invalid mobile number");
        })?;
        let key = NameKey::parse(name, self.policy).inspect_err(|e| {
            warn!(name, error = %e, "Rejected contact with invalid name");
        })?;

        let mut created = 0;
        let mut current = &mut self.root;
        for slot in key.slots() {
            current = &mut **current.children[slot].get_or_insert_with(|| {
                created += 1;
                Box::default()
            });
        }
        self.nodes += created;

        let outcome = match current.record.replace(contact) {
            Some(previous) => InsertOutcome::Replaced(previous),
            None => InsertOutcome::Created,
        };
        debug!(
            name,
            depth = key.len(),
            nodes_created = created,
            replaced = matches!(outcome, InsertOutcome::Replaced(_)),
            "Stored contact"
        );
        Ok(outcome)
    }

    /// Enumerate every contact whose name starts with `prefix`.
    ///
    /// Names are rebuilt from `prefix` exactly as given followed by one
    /// lowercase letter per level below it. Fails with
    /// [`TrieError::NotFound`] if no node exists for the prefix.
    pub fn traverse_from_prefix(&self, prefix: &str) -> Result<Contacts<'_>, TrieError> {
        let start = self.descend(prefix)?;
        Ok(Contacts::new(start, prefix.to_string()))
    }

    /// The node reached by spelling out `name`.
    ///
    /// The node may or may not hold a contact; check [`TrieNode::record`].
    pub fn lookup_exact(&self, name: &str) -> Result<&TrieNode, TrieError> {
        self.descend(name)
    }

    /// The contact stored under exactly `name`.
    pub fn get(&self, name: &str) -> Result<&Contact, TrieError> {
        self.lookup_exact(name)?
            .record()
            .ok_or_else(|| TrieError::NotFound(name.to_string()))
    }

    /// Enumerate every contact in the trie.
    pub fn iter(&self) -> Contacts<'_> {
        Contacts::new(&self.root, String::new())
    }

    /// Write one directory line per contact to `sink`, in traversal order.
    ///
    /// Returns the number of lines written.
    pub fn serialize_all<W: Write>(&self, mut sink: W) -> Result<usize, TrieError> {
        let mut lines = 0;
        for (name, contact) in self.iter() {
            writeln!(sink, "{}", contact.line(&name))?;
            lines += 1;
        }
        Ok(lines)
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Number of stored contacts.
    pub fn contact_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Release every node. Equivalent to dropping the trie.
    pub fn destroy(self) {
        debug!(nodes = self.nodes, "Releasing contact trie");
        drop(self);
    }

    fn descend(&self, name: &str) -> Result<&TrieNode, TrieError> {
        let key = NameKey::parse(name, self.policy)?;
        key.slots()
            .try_fold(&self.root, |node, slot| node.child(slot))
            .ok_or_else(|| TrieError::NotFound(name.to_string()))
    }
}

impl<'a> IntoIterator for &'a ContactTrie {
    type Item = (String, &'a Contact);
    type IntoIter = Contacts<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy pre-order iterator over `(name, contact)` pairs below a node.
///
/// Cloning the iterator before it is advanced gives an independent walk
/// over the same contacts.
#[derive(Debug, Clone)]
pub struct Contacts<'a> {
    stack: Vec<(String, &'a TrieNode)>,
}

impl<'a> Contacts<'a> {
    fn new(start: &'a TrieNode, name: String) -> Self {
        Self {
            stack: vec![(name, start)],
        }
    }
}

impl<'a> Iterator for Contacts<'a> {
    type Item = (String, &'a Contact);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((name, node)) = self.stack.pop() {
            // Reverse so that 'a' is popped first.
            for (letter, child) in node.children().rev() {
                let mut child_name = String::with_capacity(name.len() + 1);
                child_name.push_str(&name);
                child_name.push(letter);
                self.stack.push((child_name, child));
            }
            if let Some(contact) = node.record() {
                return Some((name, contact));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(contacts: Contacts<'_>) -> Vec<String> {
        contacts.map(|(name, _)| name).collect()
    }

    #[test]
    fn test_new_trie_is_empty() {
        let trie = ContactTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert_eq!(trie.contact_count(), 0);
        assert!(trie.root().record().is_none());
        assert_eq!(trie.policy(), NamePolicy::Reject);
    }

    #[test]
    fn test_insert_creates_one_node_per_letter() {
        let mut trie = ContactTrie::new();
        let outcome = trie.insert("Bo b", "1234567890", "b@x.com", "b.png").unwrap();
        assert_eq!(outcome, InsertOutcome::Created);
        assert_eq!(trie.node_count(), 4);

        // Shared prefix "bo" is reused.
        trie.insert("bonnie", "1234567891", "", "").unwrap();
        assert_eq!(trie.node_count(), 8);
    }

    #[test]
    fn test_insert_invalid_phone_leaves_tree_untouched() {
        let mut trie = ContactTrie::new();
        let err = trie.insert("Zed", "12345", "z@x.com", "z.png").unwrap_err();
        assert!(matches!(err, TrieError::InvalidPhone(_)));
        assert_eq!(trie.node_count(), 1);
        assert!(matches!(trie.lookup_exact("zed"), Err(TrieError::NotFound(_))));
    }

    #[test]
    fn test_insert_invalid_name_leaves_tree_untouched() {
        let mut trie = ContactTrie::new();
        let err = trie.insert("abc1", "1234567890", "", "").unwrap_err();
        assert!(matches!(err, TrieError::InvalidName { found: '1', .. }));
        assert_eq!(trie.node_count(), 1);
        assert!(trie.is_empty());
    }

    #[test]
    fn test_strip_policy_stores_letters_only() {
        let mut trie = ContactTrie::with_policy(NamePolicy::Strip);
        trie.insert("R2-D2", "1234567890", "", "").unwrap();
        assert!(trie.get("rd").is_ok());
        assert!(trie.get("r-d").is_ok());
    }

    #[test]
    fn test_empty_name_stores_at_root() {
        let mut trie = ContactTrie::new();
        trie.insert("", "1234567890", "root@x.com", "").unwrap();
        assert_eq!(trie.node_count(), 1);
        assert_eq!(trie.root().record().unwrap().email(), "root@x.com");
        assert_eq!(names(trie.iter()), vec![String::new()]);
    }

    #[test]
    fn test_overwrite_returns_previous_contact() {
        let mut trie = ContactTrie::new();
        trie.insert("Ann", "1111111111", "old@x.com", "old.png").unwrap();
        let nodes = trie.node_count();

        let outcome = trie.insert("ann", "2222222222", "new@x.com", "new.png").unwrap();
        match outcome {
            InsertOutcome::Replaced(previous) => assert_eq!(previous.phone(), "1111111111"),
            other => panic!("expected Replaced, got {other:?}"),
        }
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(trie.contact_count(), 1);
        assert_eq!(trie.get("ANN").unwrap().email(), "new@x.com");
    }

    #[test]
    fn test_lookup_exact_returns_record_less_node() {
        let mut trie = ContactTrie::new();
        trie.insert("anna", "1234567890", "", "").unwrap();
        let node = trie.lookup_exact("an").unwrap();
        assert!(node.record().is_none());
        assert!(matches!(trie.get("an"), Err(TrieError::NotFound(_))));
    }

    #[test]
    fn test_traverse_orders_by_letter_and_keeps_prefix() {
        let mut trie = ContactTrie::new();
        for name in ["anna", "Ann", "andy", "bob", "al"] {
            trie.insert(name, "1234567890", "", "").unwrap();
        }
        assert_eq!(
            names(trie.traverse_from_prefix("An").unwrap()),
            vec!["Andy", "Ann", "Anna"]
        );
        assert_eq!(names(trie.iter()), vec!["al", "andy", "ann", "anna", "bob"]);
    }

    #[test]
    fn test_traverse_missing_prefix_is_not_found() {
        let mut trie = ContactTrie::new();
        trie.insert("ann", "1234567890", "", "").unwrap();
        assert!(matches!(
            trie.traverse_from_prefix("zz"),
            Err(TrieError::NotFound(p)) if p == "zz"
        ));
    }

    #[test]
    fn test_traverse_is_restartable() {
        let mut trie = ContactTrie::new();
        trie.insert("ann", "1234567890", "", "").unwrap();
        trie.insert("anna", "1234567890", "", "").unwrap();

        let walk = trie.traverse_from_prefix("an").unwrap();
        let first: Vec<_> = walk.clone().collect();
        let second: Vec<_> = walk.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_serialize_all_writes_one_line_per_contact() {
        let mut trie = ContactTrie::new();
        trie.insert("bob", "2222222222", "b@x.com", "/b.png").unwrap();
        trie.insert("amy", "1111111111", "a@x.com", "/a.png").unwrap();

        let mut out = Vec::new();
        let lines = trie.serialize_all(&mut out).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Name: amy, Mobile Number: 1111111111, Email: a@x.com, Image Address: /a.png\n\
             Name: bob, Mobile Number: 2222222222, Email: b@x.com, Image Address: /b.png\n"
        );
    }

    #[test]
    fn test_deep_trie_drops_without_overflow() {
        let mut trie = ContactTrie::new();
        let name = "a".repeat(100_000);
        trie.insert(&name, "1234567890", "", "").unwrap();
        assert_eq!(trie.node_count(), 100_001);
        trie.destroy();
    }

    #[test]
    fn test_debug_does_not_descend_into_deep_trie() {
        let mut trie = ContactTrie::new();
        trie.insert(&"b".repeat(100_000), "1234567890", "", "").unwrap();
        trie.insert("ann", "1234567890", "", "").unwrap();

        let shown = format!("{trie:?}");
        assert!(shown.contains("nodes: 100004"));
        assert!(shown.contains("Reject"));
        assert_eq!(format!("{:?}", trie.root()), r#"TrieNode { children: "ab", record: None }"#);
    }
}
