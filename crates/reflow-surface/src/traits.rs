//! The [`RenderSurface`] and [`DataSource`] traits.
//!
//! A surface receives one batch per reconciliation pass:
//! `begin_batch`, one call per command, then `commit_batch`. The surface
//! resolves all deletes and move sources against the structure it had
//! before the batch and all inserts, move destinations and reloads against
//! the structure described by the data source passed to `commit_batch`.

use reflow_batch::Command;
use reflow_types::{IndexPath, Model, ModelId, Snapshot};

use crate::animation::ReloadAnimations;
use crate::error::Result;

/// Completion signal for a committed batch or full reload.
///
/// The argument reports whether the surface finished the update. A surface
/// may invoke it synchronously from `commit_batch` or later.
pub type Completion = Box<dyn FnOnce(bool) + Send + 'static>;

/// Read access to the post-batch structure, used by the surface to fetch
/// inserted and reloaded elements.
pub trait DataSource {
    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Identity of the section at `section`.
    fn section_id(&self, section: usize) -> Option<&ModelId>;

    /// Number of items in `section` (zero for an invalid section).
    fn item_count(&self, section: usize) -> usize;

    /// Identity of the item at `path`.
    fn item_id(&self, path: IndexPath) -> Option<&ModelId>;
}

impl<M: Model> DataSource for Snapshot<M> {
    fn section_count(&self) -> usize {
        self.len()
    }

    fn section_id(&self, section: usize) -> Option<&ModelId> {
        self.section(section).map(|s| &s.model_id)
    }

    fn item_count(&self, section: usize) -> usize {
        self.section(section).map_or(0, |s| s.len())
    }

    fn item_id(&self, path: IndexPath) -> Option<&ModelId> {
        self.item(path).map(Model::model_id)
    }
}

/// A stateful, section-grouped list view that applies structural edits in
/// atomic batches.
pub trait RenderSurface {
    /// Open a batch. Edits received until [`commit_batch`] are applied
    /// together.
    ///
    /// [`commit_batch`]: RenderSurface::commit_batch
    fn begin_batch(&mut self, animations: &ReloadAnimations) -> Result<()>;

    /// Insert a section at a post-batch index.
    fn insert_section(&mut self, index: usize) -> Result<()>;

    /// Delete the section at a pre-batch index.
    fn delete_section(&mut self, index: usize) -> Result<()>;

    /// Move a section from a pre-batch index to a post-batch index.
    fn move_section(&mut self, from: usize, to: usize) -> Result<()>;

    /// Re-render the section at a post-batch index.
    ///
    /// The same batch may also carry item commands for this section. A
    /// surface whose view rejects that combination should rebuild the whole
    /// section from the data source here and skip those item commands.
    fn reload_section(&mut self, index: usize) -> Result<()>;

    /// Insert an item at a post-batch path.
    fn insert_item(&mut self, at: IndexPath) -> Result<()>;

    /// Delete the item at a pre-batch path.
    fn delete_item(&mut self, at: IndexPath) -> Result<()>;

    /// Move an item from a pre-batch path to a post-batch path.
    fn move_item(&mut self, from: IndexPath, to: IndexPath) -> Result<()>;

    /// Re-render the item at a post-batch path.
    fn reload_item(&mut self, at: IndexPath) -> Result<()>;

    /// Apply every edit received since `begin_batch` as one update.
    ///
    /// `on_complete` fires once the update is finished. It is not invoked
    /// if an error is returned.
    fn commit_batch(&mut self, source: &dyn DataSource, on_complete: Completion) -> Result<()>;

    /// Discard an open batch without applying it. No-op if none is open.
    fn abort_batch(&mut self) {}

    /// Discard the current structure and rebuild it from `source` without
    /// incremental edits.
    fn full_reload(&mut self, source: &dyn DataSource, on_complete: Completion) -> Result<()>;

    /// Dispatch a [`Command`] to the matching per-kind method.
    fn apply(&mut self, command: &Command) -> Result<()> {
        match *command {
            Command::SectionInsert { index } => self.insert_section(index),
            Command::SectionDelete { index } => self.delete_section(index),
            Command::SectionMove { from, to } => self.move_section(from, to),
            Command::SectionReplace { index } => self.reload_section(index),
            Command::ItemInsert { at } => self.insert_item(at),
            Command::ItemDelete { at } => self.delete_item(at),
            Command::ItemMove { from, to } => self.move_item(from, to),
            Command::ItemReplace { at } => self.reload_item(at),
        }
    }

    /// Apply a sequence of commands in order.
    fn apply_all(&mut self, commands: &[Command]) -> Result<()> {
        commands.iter().try_for_each(|command| self.apply(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_types::Section;

    #[test]
    fn snapshot_is_a_data_source() {
        let snapshot = Snapshot::capture(&[
            Section::new("s1", vec![ModelId::new("a"), ModelId::new("b")]),
            Section::new("s2", vec![]),
        ]);
        let source: &dyn DataSource = &snapshot;

        assert_eq!(source.section_count(), 2);
        assert_eq!(source.section_id(1).map(ModelId::as_str), Some("s2"));
        assert_eq!(source.item_count(0), 2);
        assert_eq!(source.item_count(7), 0);
        assert_eq!(
            source.item_id(IndexPath::new(0, 1)).map(ModelId::as_str),
            Some("b")
        );
        assert!(source.item_id(IndexPath::new(1, 0)).is_none());
    }
}
