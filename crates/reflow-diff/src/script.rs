//! Edit scripts: the classified result of an identity diff.

use serde::{Deserialize, Serialize};

/// A single classified difference between two ordered sequences.
///
/// Indices carry everything needed to apply the edit without re-deriving
/// positions: `Delete` and move sources use the old index, `Insert` and move
/// destinations use the new index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// An identity only present in the new sequence.
    Insert { index: usize },
    /// An identity only present in the old sequence.
    Delete { index: usize },
    /// A retained identity that was genuinely reordered.
    Move { from: usize, to: usize },
    /// A retained identity that kept its relative position but was flagged
    /// as changed by the caller's change-detection hook.
    Replace { from: usize, to: usize },
}

/// An identity present in both sequences: its old and new positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retained {
    pub old: usize,
    pub new: usize,
}

/// The result of diffing two ordered identity sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript {
    /// Deletes (ascending old index), inserts (ascending new index), then
    /// moves and replaces in new order.
    pub changes: Vec<Change>,
    /// Every identity present in both sequences, in new order.
    pub retained: Vec<Retained>,
}

/// Edit script over a list of sections.
pub type SectionEditScript = EditScript;

/// Edit script over the items of one retained section.
pub type ItemEditScript = EditScript;

impl EditScript {
    /// Create an empty edit script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Old indices of deleted elements.
    pub fn deletes(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().filter_map(|c| match c {
            Change::Delete { index } => Some(*index),
            _ => None,
        })
    }

    /// New indices of inserted elements.
    pub fn inserts(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().filter_map(|c| match c {
            Change::Insert { index } => Some(*index),
            _ => None,
        })
    }

    /// `(from, to)` pairs of moved elements.
    pub fn moves(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.changes.iter().filter_map(|c| match c {
            Change::Move { from, to } => Some((*from, *to)),
            _ => None,
        })
    }

    /// `(from, to)` pairs of elements replaced in place.
    pub fn replaces(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.changes.iter().filter_map(|c| match c {
            Change::Replace { from, to } => Some((*from, *to)),
            _ => None,
        })
    }

    /// Number of inserted elements.
    pub fn insertions(&self) -> usize {
        self.inserts().count()
    }

    /// Number of deleted elements.
    pub fn deletions(&self) -> usize {
        self.deletes().count()
    }

    /// Number of moved elements.
    pub fn movements(&self) -> usize {
        self.moves().count()
    }

    /// Number of elements replaced in place.
    pub fn replacements(&self) -> usize {
        self.replaces().count()
    }

    /// Old index of the retained element now at `new_index`.
    pub fn old_index_of(&self, new_index: usize) -> Option<usize> {
        self.retained
            .iter()
            .find(|r| r.new == new_index)
            .map(|r| r.old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EditScript {
        EditScript {
            changes: vec![
                Change::Delete { index: 0 },
                Change::Delete { index: 3 },
                Change::Insert { index: 2 },
                Change::Move { from: 2, to: 0 },
                Change::Replace { from: 1, to: 1 },
            ],
            retained: vec![
                Retained { old: 2, new: 0 },
                Retained { old: 1, new: 1 },
            ],
        }
    }

    #[test]
    fn empty_script() {
        let script = EditScript::new();
        assert!(script.is_empty());
        assert_eq!(script.len(), 0);
    }

    #[test]
    fn counters_classify_changes() {
        let script = sample();
        assert_eq!(script.len(), 5);
        assert_eq!(script.deletions(), 2);
        assert_eq!(script.insertions(), 1);
        assert_eq!(script.movements(), 1);
        assert_eq!(script.replacements(), 1);
        assert_eq!(script.deletes().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(script.moves().collect::<Vec<_>>(), vec![(2, 0)]);
    }

    #[test]
    fn resolves_old_index_of_retained() {
        let script = sample();
        assert_eq!(script.old_index_of(0), Some(2));
        assert_eq!(script.old_index_of(2), None);
    }

    #[test]
    fn change_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Change::Move { from: 1, to: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"move","from":1,"to":4}"#);
    }
}
