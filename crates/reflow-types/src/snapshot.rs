//! Immutable point-in-time copies of a section list.
//!
//! A snapshot is captured fresh for every reconciliation pass and dropped
//! when the pass completes. It owns value copies of every section and item,
//! so nothing done to the live list afterwards can change what the differ
//! compares against.

use std::collections::HashSet;

use crate::identity::{Model, ModelId};
use crate::index_path::IndexPath;
use crate::section::Section;

/// An immutable copy of sections and their items.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<M> {
    sections: Vec<Section<M>>,
}

impl<M> Default for Snapshot<M> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<M: Clone> Snapshot<M> {
    /// Capture a deep copy of `sections` (section metadata and item lists).
    pub fn capture(sections: &[Section<M>]) -> Self {
        Self {
            sections: sections.to_vec(),
        }
    }
}

impl<M> Snapshot<M> {
    /// Build a snapshot that takes ownership of already-detached sections.
    pub fn from_sections(sections: Vec<Section<M>>) -> Self {
        Self { sections }
    }

    /// All sections, in order.
    pub fn sections(&self) -> &[Section<M>] {
        &self.sections
    }

    /// Section at `index`.
    pub fn section(&self, index: usize) -> Option<&Section<M>> {
        self.sections.get(index)
    }

    /// Item at `path`.
    pub fn item(&self, path: IndexPath) -> Option<&M> {
        self.sections.get(path.section)?.items.get(path.item)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the snapshot has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Consume the snapshot and hand back its sections.
    pub fn into_sections(self) -> Vec<Section<M>> {
        self.sections
    }
}

impl<M: Model> Snapshot<M> {
    /// Section identities that appear more than once, in first-seen order.
    pub fn duplicate_section_ids(&self) -> Vec<ModelId> {
        duplicates(self.sections.iter().map(|s| &s.model_id))
    }

    /// Item identities that appear more than once within the same section,
    /// paired with that section's identity.
    pub fn duplicate_item_ids(&self) -> Vec<(ModelId, ModelId)> {
        self.sections
            .iter()
            .flat_map(|section| {
                duplicates(section.items.iter().map(Model::model_id))
                    .into_iter()
                    .map(move |id| (section.model_id.clone(), id))
            })
            .collect()
    }
}

fn duplicates<'a>(ids: impl Iterator<Item = &'a ModelId>) -> Vec<ModelId> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            dups.push(id.clone());
        }
    }
    dups
}
