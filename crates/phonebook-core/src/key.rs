//! Mapping names onto trie child slots.
//!
//! Names are matched case-insensitively and spaces are ignored, so
//! `"Alice Smith"`, `"alicesmith"` and `"ALICE SMITH"` all follow the same
//! path. What happens to any other character is decided by [`NamePolicy`].

use std::fmt;
use std::str::FromStr;

use crate::trie::TrieError;

/// Number of child slots per node, one per letter `a`..=`z`.
pub const ALPHABET_SIZE: usize = 26;

/// Treatment of characters that are neither ASCII letters nor spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Fail the whole operation with [`TrieError::InvalidName`].
    #[default]
    Reject,
    /// Skip the character, as if it were a space.
    Strip,
}

impl NamePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Strip => "strip",
        }
    }
}

impl fmt::Display for NamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a [`NamePolicy`] from an unknown string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name policy {0:?}, expected \"reject\" or \"strip\"")]
pub struct UnknownNamePolicy(pub String);

impl FromStr for NamePolicy {
    type Err = UnknownNamePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "strip" => Ok(Self::Strip),
            other => Err(UnknownNamePolicy(other.to_string())),
        }
    }
}

/// Child slot for `c`, or `None` if `c` is not an ASCII letter.
pub fn slot_for(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    c.is_ascii_lowercase().then(|| usize::from(c as u8 - b'a'))
}

/// The letter labelling child slot `slot`.
pub(crate) fn letter_for(slot: usize) -> char {
    debug_assert!(slot < ALPHABET_SIZE);
    char::from(b'a' + slot as u8)
}

/// A name resolved to its sequence of child slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameKey {
    slots: Vec<usize>,
}

impl NameKey {
    /// Resolve `name` under `policy`.
    ///
    /// Resolution completes before any caller touches the tree, so a
    /// rejected name never leaves partially created nodes behind.
    pub(crate) fn parse(name: &str, policy: NamePolicy) -> Result<Self, TrieError> {
        let mut slots = Vec::with_capacity(name.len());
        for c in name.chars() {
            if c == ' ' {
                continue;
            }
            match (slot_for(c), policy) {
                (Some(slot), _) => slots.push(slot),
                (None, NamePolicy::Strip) => {}
                (None, NamePolicy::Reject) => {
                    return Err(TrieError::InvalidName {
                        name: name.to_string(),
                        found: c,
                    });
                }
            }
        }
        Ok(Self { slots })
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slots(name: &str, policy: NamePolicy) -> Vec<usize> {
        NameKey::parse(name, policy).unwrap().slots().collect()
    }

    #[test]
    fn test_letters_lowercased_and_spaces_skipped() {
        assert_eq!(slots("Ab c", NamePolicy::Reject), vec![0, 1, 2]);
        assert_eq!(slots("ZZ", NamePolicy::Reject), vec![25, 25]);
    }

    #[test]
    fn test_empty_and_blank_names_resolve_to_root() {
        assert_eq!(NameKey::parse("", NamePolicy::Reject).unwrap().len(), 0);
        assert_eq!(NameKey::parse("   ", NamePolicy::Reject).unwrap().len(), 0);
    }

    #[test]
    fn test_reject_policy_reports_offending_character() {
        let err = NameKey::parse("Agent 007", NamePolicy::Reject).unwrap_err();
        match err {
            TrieError::InvalidName { name, found } => {
                assert_eq!(name, "Agent 007");
                assert_eq!(found, '0');
            }
            other => panic!("expected InvalidName, got {other:?}"),
        }
    }

    #[test]
    fn test_reject_policy_rejects_non_ascii_letters() {
        assert!(NameKey::parse("José", NamePolicy::Reject).is_err());
        assert!(NameKey::parse("tab\tname", NamePolicy::Reject).is_err());
    }

    #[test]
    fn test_strip_policy_skips_non_letters() {
        assert_eq!(
            slots("O'Brien-2", NamePolicy::Strip),
            slots("obrien", NamePolicy::Reject)
        );
    }

    #[test]
    fn test_slot_letter_mapping() {
        assert_eq!(slot_for('a'), Some(0));
        assert_eq!(slot_for('Z'), Some(25));
        assert_eq!(slot_for('-'), None);
        assert_eq!(slot_for('é'), None);
        assert_eq!(letter_for(0), 'a');
        assert_eq!(letter_for(25), 'z');
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!("reject".parse::<NamePolicy>(), Ok(NamePolicy::Reject));
        assert_eq!("strip".parse::<NamePolicy>(), Ok(NamePolicy::Strip));
        assert_eq!(
            "loose".parse::<NamePolicy>(),
            Err(UnknownNamePolicy("loose".to_string()))
        );
        assert_eq!(NamePolicy::Strip.to_string(), "strip");
        assert_eq!(NamePolicy::default(), NamePolicy::Reject);
    }
}
