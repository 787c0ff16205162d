//! Two-level diff: sections first, then items of every retained section.
//!
//! A section present only in the new snapshot is not item-diffed: its items
//! arrive with the section insert. Likewise a deleted section takes its
//! items with it. Only sections whose identity survives get a second,
//! independent item-level diff.

use std::collections::BTreeMap;

use reflow_types::{Model, Section, Snapshot};

use crate::identity_diff::diff_models;
use crate::script::{ItemEditScript, SectionEditScript};

/// Section edits plus item edits for every retained section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Section-level edit script.
    pub sections: SectionEditScript,
    /// Item-level edit scripts keyed by the retained section's new index.
    /// Sections whose items did not change are omitted.
    pub items: BTreeMap<usize, ItemEditScript>,
}

impl SnapshotDiff {
    /// Returns `true` if neither level has changes.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.items.values().all(ItemEditScript::is_empty)
    }

    /// Total number of item-level changes.
    pub fn item_changes(&self) -> usize {
        self.items.values().map(ItemEditScript::len).sum()
    }
}

/// Diff two section lists by section identity.
///
/// Section content is not inspected beyond the [`Model`] change hook, which
/// for [`Section`] compares header and footer titles.
pub fn diff_sections<M>(old: &[Section<M>], new: &[Section<M>]) -> SectionEditScript {
    diff_models(old, new)
}

/// Diff the items of a retained section pair.
pub fn diff_items<M: Model>(old: &Section<M>, new: &Section<M>) -> ItemEditScript {
    diff_models(&old.items, &new.items)
}

/// Run the section-level diff, then the item-level diff for every section
/// present in both snapshots.
pub fn diff_snapshots<M: Model>(old: &Snapshot<M>, new: &Snapshot<M>) -> SnapshotDiff {
    let sections = diff_sections(old.sections(), new.sections());

    let items = sections
        .retained
        .iter()
        .filter_map(|r| {
            let script = diff_items(&old.sections()[r.old], &new.sections()[r.new]);
            (!script.is_empty()).then_some((r.new, script))
        })
        .collect();

    SnapshotDiff { sections, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Change;
    use reflow_types::ModelId;

    fn section(id: &str, items: &[&str]) -> Section<ModelId> {
        Section::new(id, items.iter().map(|i| ModelId::new(*i)).collect())
    }

    fn snapshot(sections: &[Section<ModelId>]) -> Snapshot<ModelId> {
        Snapshot::capture(sections)
    }

    #[test]
    fn item_changes_in_retained_section() {
        let old = snapshot(&[section("S1", &["a", "b", "c"])]);
        let new = snapshot(&[section("S1", &["b", "c", "d"])]);

        let diff = diff_snapshots(&old, &new);
        assert!(diff.sections.is_empty());
        assert_eq!(
            diff.items[&0].changes,
            vec![Change::Delete { index: 0 }, Change::Insert { index: 2 }]
        );
    }

    #[test]
    fn swapped_sections_move_without_item_edits() {
        let old = snapshot(&[section("S1", &["a"]), section("S2", &["b"])]);
        let new = snapshot(&[section("S2", &["b"]), section("S1", &["a"])]);

        let diff = diff_snapshots(&old, &new);
        assert_eq!(diff.sections.len(), 1);
        assert_eq!(diff.sections.movements(), 1);
        assert!(diff.items.is_empty());
        assert_eq!(diff.item_changes(), 0);
    }

    #[test]
    fn deleted_section_has_no_item_edits() {
        let old = snapshot(&[section("S1", &["a", "b"])]);
        let new = snapshot(&[]);

        let diff = diff_snapshots(&old, &new);
        assert_eq!(diff.sections.changes, vec![Change::Delete { index: 0 }]);
        assert!(diff.items.is_empty());
    }

    #[test]
    fn inserted_section_has_no_item_edits() {
        let old = snapshot(&[]);
        let new = snapshot(&[section("S1", &["a", "b"])]);

        let diff = diff_snapshots(&old, &new);
        assert_eq!(diff.sections.changes, vec![Change::Insert { index: 0 }]);
        assert!(diff.items.is_empty());
    }

    #[test]
    fn rotation_inside_section() {
        let old = snapshot(&[section("S1", &["a", "b", "c"])]);
        let new = snapshot(&[section("S1", &["c", "a", "b"])]);

        let diff = diff_snapshots(&old, &new);
        assert_eq!(diff.items[&0].changes, vec![Change::Move { from: 2, to: 0 }]);
    }

    #[test]
    fn item_scripts_keyed_by_new_section_index() {
        let old = snapshot(&[section("S1", &["a"]), section("S2", &["x"])]);
        let new = snapshot(&[
            section("S0", &[]),
            section("S1", &["a"]),
            section("S2", &["x", "y"]),
        ]);

        let diff = diff_snapshots(&old, &new);
        assert_eq!(diff.sections.changes, vec![Change::Insert { index: 0 }]);
        assert_eq!(diff.items.keys().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(diff.items[&2].changes, vec![Change::Insert { index: 1 }]);
    }

    #[test]
    fn identical_snapshots_are_empty() {
        let old = snapshot(&[section("S1", &["a", "b"]), section("S2", &[])]);
        let diff = diff_snapshots(&old, &old.clone());
        assert!(diff.is_empty());
    }

    #[test]
    fn retitled_section_is_replaced_and_item_diffed() {
        let old = snapshot(&[section("S1", &["a"]).titled(Some("Old"), None)]);
        let new = snapshot(&[section("S1", &["a", "b"]).titled(Some("New"), None)]);

        let diff = diff_snapshots(&old, &new);
        assert_eq!(diff.sections.changes, vec![Change::Replace { from: 0, to: 0 }]);
        assert_eq!(diff.items[&0].changes, vec![Change::Insert { index: 1 }]);
    }
}
