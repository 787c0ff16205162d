//! Identity-bearing section: an ordered, mutable container of items.

use serde::{Deserialize, Serialize};

use crate::identity::{Model, ModelId};

/// A single section of a list.
///
/// A section's identity is independent of its items' identities: a section
/// is matched as retained across snapshots even if every item inside it
/// changed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section<M> {
    /// Unique identifier of the section among its siblings.
    pub model_id: ModelId,
    /// Title shown in the section header, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_title: Option<String>,
    /// Title shown in the section footer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_title: Option<String>,
    /// Items inside the section, in display order.
    #[serde(default = "Vec::new")]
    pub items: Vec<M>,
}

impl<M> Section<M> {
    /// Create a section with an explicit identity.
    pub fn new(model_id: impl Into<ModelId>, items: Vec<M>) -> Self {
        Self {
            model_id: model_id.into(),
            header_title: None,
            footer_title: None,
            items,
        }
    }

    /// Create a section with a generated identity.
    pub fn with_items(items: Vec<M>) -> Self {
        Self::new(ModelId::generate(), items)
    }

    /// Set header and footer titles.
    pub fn titled(mut self, header: Option<&str>, footer: Option<&str>) -> Self {
        self.header_title = header.map(str::to_string);
        self.footer_title = footer.map(str::to_string);
        self
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if valid.
    pub fn item(&self, index: usize) -> Option<&M> {
        self.items.get(index)
    }

    /// Replace the whole content of the section.
    pub fn set_items(&mut self, items: Vec<M>) {
        self.items = items;
    }

    /// Replace the item at `index`, returning the previous one.
    ///
    /// Returns `None` (and changes nothing) if `index` is out of range.
    pub fn set_item_at(&mut self, item: M, index: usize) -> Option<M> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, item))
    }

    /// Insert `item` at `index`; appends when `index` is `None` or invalid.
    pub fn insert_at(&mut self, item: M, index: Option<usize>) {
        match index {
            Some(i) if i < self.items.len() => self.items.insert(i, item),
            _ => self.items.push(item),
        }
    }

    /// Insert `items` starting at `index`; appends when `index` is `None`
    /// or invalid.
    pub fn insert_all_at(&mut self, items: Vec<M>, index: Option<usize>) {
        match index {
            Some(i) if i < self.items.len() => {
                self.items.splice(i..i, items);
            }
            _ => self.items.extend(items),
        }
    }

    /// Remove the item at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<M> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Remove the items at the given indexes.
    ///
    /// Indexes are processed from the highest down so earlier removals do
    /// not shift later ones. Invalid indexes are ignored. The removed items
    /// are returned in removal order (highest index first).
    pub fn remove_at_indexes(&mut self, indexes: &[usize]) -> Vec<M> {
        let mut sorted = indexes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut removed = Vec::with_capacity(sorted.len());
        for index in sorted.into_iter().rev() {
            if index < self.items.len() {
                removed.push(self.items.remove(index));
            }
        }
        removed
    }

    /// Remove every item, returning how many were removed.
    pub fn remove_all(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Swap two items. No-op if either index is invalid.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.items.len() && b < self.items.len() {
            self.items.swap(a, b);
        }
    }

    /// Remove the item at `from` and reinsert it at `to`.
    /// No-op if either index is invalid.
    pub fn move_item(&mut self, from: usize, to: usize) {
        if from < self.items.len() && to < self.items.len() {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
    }
}

impl<M: Model> Section<M> {
    /// Position of the item with the given identity.
    pub fn position_of(&self, id: &ModelId) -> Option<usize> {
        self.items.iter().position(|m| m.model_id() == id)
    }

    /// Replace the item with the same identity, or insert it at the front.
    pub fn prepend_or_update(&mut self, item: M) {
        match self.position_of(item.model_id()) {
            Some(i) => self.items[i] = item,
            None => self.items.insert(0, item),
        }
    }

    /// Replace the item with the same identity, or append it.
    pub fn append_or_update(&mut self, item: M) {
        match self.position_of(item.model_id()) {
            Some(i) => self.items[i] = item,
            None => self.items.push(item),
        }
    }
}

impl<M> Model for Section<M> {
    fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    /// A section needs re-rendering when its header or footer changed.
    fn is_changed_from(&self, previous: &Self) -> bool {
        self.header_title != previous.header_title || self.footer_title != previous.footer_title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: ModelId,
        label: &'static str,
    }

    impl Model for Row {
        fn model_id(&self) -> &ModelId {
            &self.id
        }
    }

    fn row(id: &str, label: &'static str) -> Row {
        Row {
            id: ModelId::new(id),
            label,
        }
    }

    fn ids(section: &Section<Row>) -> Vec<&str> {
        section.items.iter().map(|r| r.id.as_str()).collect()
    }

    fn sample() -> Section<Row> {
        Section::new("s", vec![row("a", "A"), row("b", "B"), row("c", "C")])
    }

    #[test]
    fn generated_section_ids_differ() {
        let a: Section<Row> = Section::with_items(vec![]);
        let b: Section<Row> = Section::with_items(vec![]);
        assert_ne!(a.model_id, b.model_id);
    }

    #[test]
    fn set_item_at_returns_previous() {
        let mut s = sample();
        let old = s.set_item_at(row("x", "X"), 1).unwrap();
        assert_eq!(old.id.as_str(), "b");
        assert_eq!(ids(&s), vec!["a", "x", "c"]);
        assert!(s.set_item_at(row("y", "Y"), 9).is_none());
    }

    #[test]
    fn insert_at_appends_on_invalid_index() {
        let mut s = sample();
        s.insert_at(row("d", "D"), Some(10));
        s.insert_at(row("z", "Z"), Some(0));
        s.insert_at(row("e", "E"), None);
        assert_eq!(ids(&s), vec!["z", "a", "b", "c", "d", "e"]);
    }

    #[test]
    fn insert_all_at_splices() {
        let mut s = sample();
        s.insert_all_at(vec![row("x", "X"), row("y", "Y")], Some(1));
        assert_eq!(ids(&s), vec!["a", "x", "y", "b", "c"]);
        s.insert_all_at(vec![row("q", "Q")], None);
        assert_eq!(ids(&s).last(), Some(&"q"));
    }

    #[test]
    fn remove_at_indexes_ignores_invalid() {
        let mut s = sample();
        let removed = s.remove_at_indexes(&[0, 2, 7]);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].id.as_str(), "c");
        assert_eq!(ids(&s), vec!["b"]);
    }

    #[test]
    fn remove_all_reports_count() {
        let mut s = sample();
        assert_eq!(s.remove_all(), 3);
        assert!(s.is_empty());
    }

    #[test]
    fn swap_and_move() {
        let mut s = sample();
        s.swap(0, 2);
        assert_eq!(ids(&s), vec!["c", "b", "a"]);
        s.move_item(0, 2);
        assert_eq!(ids(&s), vec!["b", "a", "c"]);
        s.move_item(0, 5);
        assert_eq!(ids(&s), vec!["b", "a", "c"]);
    }

    #[test]
    fn append_or_update_replaces_in_place() {
        let mut s = sample();
        s.append_or_update(row("b", "B2"));
        assert_eq!(s.items[1].label, "B2");
        s.append_or_update(row("d", "D"));
        assert_eq!(ids(&s), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn prepend_or_update_inserts_at_front() {
        let mut s = sample();
        s.prepend_or_update(row("z", "Z"));
        assert_eq!(ids(&s)[0], "z");
        s.prepend_or_update(row("c", "C2"));
        assert_eq!(s.items[3].label, "C2");
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn section_change_tracks_titles_only() {
        let a = sample().titled(Some("Header"), None);
        let mut b = a.clone();
        b.items.clear();
        assert!(!b.is_changed_from(&a));
        b.header_title = Some("Other".into());
        assert!(b.is_changed_from(&a));
    }
}
