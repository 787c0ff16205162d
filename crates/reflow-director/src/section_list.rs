//! The live, mutable list of sections a [`Director`](crate::Director) owns.

use reflow_types::{Model, ModelId, Section, Snapshot};

/// An ordered list of sections.
///
/// Mutations run against this list inside
/// [`Director::reconcile`](crate::Director::reconcile); outside a pass the
/// director only exposes it read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionList<M> {
    sections: Vec<Section<M>>,
}

impl<M> Default for SectionList<M> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<M> SectionList<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sections(sections: Vec<Section<M>>) -> Self {
        Self { sections }
    }

    /// Replace every section.
    pub fn set(&mut self, sections: Vec<Section<M>>) {
        self.sections = sections;
    }

    /// Append a new section with a generated identity holding `items`.
    pub fn add_items(&mut self, items: Vec<M>) -> &mut Section<M> {
        let index = self.sections.len();
        self.sections.push(Section::with_items(items));
        &mut self.sections[index]
    }

    /// Insert `section` at `at`; appends when `at` is `None` or invalid.
    pub fn add_section(&mut self, section: Section<M>, at: Option<usize>) {
        match at {
            Some(i) if i < self.sections.len() => self.sections.insert(i, section),
            _ => self.sections.push(section),
        }
    }

    /// Insert `sections` starting at `at`; appends when `at` is `None` or
    /// invalid.
    pub fn add_sections(&mut self, sections: Vec<Section<M>>, at: Option<usize>) {
        match at {
            Some(i) if i < self.sections.len() => {
                self.sections.splice(i..i, sections);
            }
            _ => self.sections.extend(sections),
        }
    }

    pub fn section(&self, index: usize) -> Option<&Section<M>> {
        self.sections.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section<M>> {
        self.sections.get_mut(index)
    }

    pub fn first(&self) -> Option<&Section<M>> {
        self.sections.first()
    }

    pub fn last(&self) -> Option<&Section<M>> {
        self.sections.last()
    }

    /// Remove every section, returning how many were removed.
    pub fn remove_all(&mut self) -> usize {
        let count = self.sections.len();
        self.sections.clear();
        count
    }

    /// Remove the section at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Section<M>> {
        (index < self.sections.len()).then(|| self.sections.remove(index))
    }

    /// Remove the sections at the given indexes, highest first. Invalid and
    /// repeated indexes are ignored.
    pub fn remove_at_indexes(&mut self, indexes: &[usize]) -> Vec<Section<M>> {
        let mut sorted = indexes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        sorted
            .into_iter()
            .rev()
            .filter_map(|index| self.remove(index))
            .collect()
    }

    /// Swap two sections. No-op if either index is invalid.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.sections.len() && b < self.sections.len() {
            self.sections.swap(a, b);
        }
    }

    /// Remove the section at `from` and reinsert it at `to`.
    /// No-op if either index is invalid.
    pub fn move_section(&mut self, from: usize, to: usize) {
        if from < self.sections.len() && to < self.sections.len() {
            let section = self.sections.remove(from);
            self.sections.insert(to, section);
        }
    }

    /// Position of the section with the given identity.
    pub fn position_of(&self, id: &ModelId) -> Option<usize> {
        self.sections.iter().position(|s| s.model_id() == id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section<M>> {
        self.sections.iter()
    }

    pub fn as_slice(&self) -> &[Section<M>] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section<M>> {
        self.sections
    }

    /// Restore the list to the structure captured in `snapshot`.
    pub(crate) fn restore(&mut self, snapshot: Snapshot<M>) {
        self.sections = snapshot.into_sections();
    }
}

impl<M: Clone> SectionList<M> {
    /// Capture an immutable copy of the current structure.
    pub fn snapshot(&self) -> Snapshot<M> {
        Snapshot::capture(&self.sections)
    }
}

impl<'a, M> IntoIterator for &'a SectionList<M> {
    type Item = &'a Section<M>;
    type IntoIter = std::slice::Iter<'a, Section<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[&str]) -> SectionList<ModelId> {
        SectionList::from_sections(ids.iter().map(|id| Section::new(*id, vec![])).collect())
    }

    fn ids(list: &SectionList<ModelId>) -> Vec<&str> {
        list.iter().map(|s| s.model_id.as_str()).collect()
    }

    #[test]
    fn add_section_appends_on_invalid_index() {
        let mut sections = list(&["a", "b"]);
        sections.add_section(Section::new("c", vec![]), Some(9));
        sections.add_section(Section::new("z", vec![]), Some(0));
        assert_eq!(ids(&sections), vec!["z", "a", "b", "c"]);
    }

    #[test]
    fn add_sections_splices() {
        let mut sections = list(&["a", "d"]);
        sections.add_sections(
            vec![Section::new("b", vec![]), Section::new("c", vec![])],
            Some(1),
        );
        assert_eq!(ids(&sections), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn add_items_generates_identity() {
        let mut sections = list(&[]);
        let first = sections.add_items(vec![ModelId::new("x")]).model_id.clone();
        let second = sections.add_items(vec![]).model_id.clone();
        assert_ne!(first, second);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.position_of(&second), Some(1));
    }

    #[test]
    fn remove_at_indexes_ignores_invalid() {
        let mut sections = list(&["a", "b", "c", "d"]);
        let removed = sections.remove_at_indexes(&[3, 1, 1, 7]);
        assert_eq!(removed.len(), 2);
        assert_eq!(ids(&sections), vec!["a", "c"]);
    }

    #[test]
    fn swap_and_move() {
        let mut sections = list(&["a", "b", "c"]);
        sections.swap(0, 2);
        assert_eq!(ids(&sections), vec!["c", "b", "a"]);
        sections.move_section(0, 2);
        assert_eq!(ids(&sections), vec!["b", "a", "c"]);
        sections.move_section(0, 5);
        assert_eq!(ids(&sections), vec!["b", "a", "c"]);
    }

    #[test]
    fn remove_all_and_accessors() {
        let mut sections = list(&["a", "b"]);
        assert_eq!(sections.first().map(|s| s.model_id.as_str()), Some("a"));
        assert_eq!(sections.last().map(|s| s.model_id.as_str()), Some("b"));
        assert!(sections.remove(5).is_none());
        assert_eq!(sections.remove_all(), 2);
        assert!(sections.is_empty());
    }
}
