//! In-memory rendering surface for tests and headless use.
//!
//! [`InMemorySurface`] keeps the rendered structure as plain vectors and
//! resolves each batch the way an incremental list view does:
//!
//! 1. deletes and move sources are taken out of the pre-batch structure,
//! 2. inserts are fetched from the data source and placed, together with
//!    move destinations, at their post-batch positions,
//! 3. the remaining elements fill the gaps in their original order,
//! 4. reloads re-fetch elements at post-batch positions.
//!
//! Before applying anything the final section and item counts are checked
//! against the data source. Any inconsistency (out-of-range index, two
//! edits for the same slot, item edits inside an inserted or deleted
//! section, wrong counts) rejects the whole batch and leaves the rendered
//! structure untouched.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use reflow_types::{IndexPath, ModelId};

use crate::animation::ReloadAnimations;
use crate::error::{Result, SurfaceError};
use crate::traits::{Completion, DataSource, RenderSurface};

/// A rendered row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedItem {
    pub id: ModelId,
    /// Incremented each time the row is reloaded in place.
    pub generation: u64,
}

/// A rendered section and its rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedSection {
    pub id: ModelId,
    /// Incremented each time the section is reloaded in place.
    pub generation: u64,
    pub items: Vec<RenderedItem>,
}

/// Edits collected between `begin_batch` and `commit_batch`.
#[derive(Debug, Default)]
struct PendingBatch {
    section_deletes: BTreeSet<usize>,
    section_inserts: BTreeSet<usize>,
    section_moves: BTreeMap<usize, usize>,
    section_reloads: BTreeSet<usize>,
    item_deletes: BTreeSet<IndexPath>,
    item_inserts: BTreeSet<IndexPath>,
    item_moves: BTreeMap<IndexPath, IndexPath>,
    item_reloads: BTreeSet<IndexPath>,
}

/// An in-memory implementation of [`RenderSurface`].
#[derive(Debug, Default)]
pub struct InMemorySurface {
    sections: Vec<RenderedSection>,
    pending: Option<PendingBatch>,
    last_animations: Option<ReloadAnimations>,
    batches_committed: usize,
    full_reloads: usize,
}

impl InMemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface already showing the structure of `source`.
    pub fn from_source(source: &dyn DataSource) -> Result<Self> {
        Ok(Self {
            sections: fetch_all(source)?,
            ..Self::default()
        })
    }

    /// The rendered sections.
    pub fn sections(&self) -> &[RenderedSection] {
        &self.sections
    }

    /// Rendered section identities, in order.
    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    /// Rendered item identities of `section`, in order.
    pub fn item_ids(&self, section: usize) -> Vec<&str> {
        self.sections
            .get(section)
            .map(|s| s.items.iter().map(|i| i.id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if the rendered identities equal those of `source`.
    pub fn matches(&self, source: &dyn DataSource) -> bool {
        self.sections.len() == source.section_count()
            && self.sections.iter().enumerate().all(|(s, section)| {
                source.section_id(s) == Some(&section.id)
                    && section.items.len() == source.item_count(s)
                    && section
                        .items
                        .iter()
                        .enumerate()
                        .all(|(i, item)| source.item_id(IndexPath::new(s, i)) == Some(&item.id))
            })
    }

    /// Returns `true` between `begin_batch` and `commit_batch`.
    pub fn is_batch_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Animations of the most recently opened batch.
    pub fn last_animations(&self) -> Option<&ReloadAnimations> {
        self.last_animations.as_ref()
    }

    /// Number of batches committed successfully.
    pub fn batches_committed(&self) -> usize {
        self.batches_committed
    }

    /// Number of full reloads performed.
    pub fn full_reloads(&self) -> usize {
        self.full_reloads
    }

    fn pending_mut(&mut self) -> Result<&mut PendingBatch> {
        self.pending.as_mut().ok_or(SurfaceError::BatchNotOpen)
    }

    fn check_old_section(&self, index: usize) -> Result<()> {
        if index < self.sections.len() {
            Ok(())
        } else {
            Err(SurfaceError::SectionOutOfBounds {
                index,
                count: self.sections.len(),
            })
        }
    }

    fn check_old_item(&self, path: IndexPath) -> Result<()> {
        self.check_old_section(path.section)?;
        let count = self.sections[path.section].items.len();
        if path.item < count {
            Ok(())
        } else {
            Err(SurfaceError::ItemOutOfBounds { path, count })
        }
    }
}

impl RenderSurface for InMemorySurface {
    fn begin_batch(&mut self, animations: &ReloadAnimations) -> Result<()> {
        if self.pending.is_some() {
            return Err(SurfaceError::BatchAlreadyOpen);
        }
        self.pending = Some(PendingBatch::default());
        self.last_animations = Some(*animations);
        Ok(())
    }

    fn insert_section(&mut self, index: usize) -> Result<()> {
        let batch = self.pending_mut()?;
        record(batch.section_inserts.insert(index), || {
            format!("section {index} inserted twice")
        })
    }

    fn delete_section(&mut self, index: usize) -> Result<()> {
        self.check_old_section(index)?;
        let batch = self.pending_mut()?;
        let fresh = !batch.section_moves.contains_key(&index);
        record(fresh && batch.section_deletes.insert(index), || {
            format!("section {index} deleted twice or deleted and moved")
        })
    }

    fn move_section(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_old_section(from)?;
        let batch = self.pending_mut()?;
        let fresh = !batch.section_deletes.contains(&from);
        record(fresh && batch.section_moves.insert(from, to).is_none(), || {
            format!("section {from} moved twice or deleted and moved")
        })
    }

    fn reload_section(&mut self, index: usize) -> Result<()> {
        let batch = self.pending_mut()?;
        record(batch.section_reloads.insert(index), || {
            format!("section {index} reloaded twice")
        })
    }

    fn insert_item(&mut self, at: IndexPath) -> Result<()> {
        let batch = self.pending_mut()?;
        record(batch.item_inserts.insert(at), || {
            format!("item {at} inserted twice")
        })
    }

    fn delete_item(&mut self, at: IndexPath) -> Result<()> {
        self.check_old_item(at)?;
        let batch = self.pending_mut()?;
        let fresh = !batch.item_moves.contains_key(&at);
        record(fresh && batch.item_deletes.insert(at), || {
            format!("item {at} deleted twice or deleted and moved")
        })
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) -> Result<()> {
        self.check_old_item(from)?;
        let batch = self.pending_mut()?;
        let fresh = !batch.item_deletes.contains(&from);
        record(fresh && batch.item_moves.insert(from, to).is_none(), || {
            format!("item {from} moved twice or deleted and moved")
        })
    }

    fn reload_item(&mut self, at: IndexPath) -> Result<()> {
        let batch = self.pending_mut()?;
        record(batch.item_reloads.insert(at), || {
            format!("item {at} reloaded twice")
        })
    }

    fn commit_batch(&mut self, source: &dyn DataSource, on_complete: Completion) -> Result<()> {
        let batch = self.pending.take().ok_or(SurfaceError::BatchNotOpen)?;
        self.sections = resolve(&self.sections, &batch, source)?;
        self.batches_committed += 1;

        debug!(
            sections = self.sections.len(),
            section_edits = batch.section_deletes.len()
                + batch.section_inserts.len()
                + batch.section_moves.len()
                + batch.section_reloads.len(),
            item_edits = batch.item_deletes.len()
                + batch.item_inserts.len()
                + batch.item_moves.len()
                + batch.item_reloads.len(),
            "in-memory batch committed"
        );

        on_complete(true);
        Ok(())
    }

    fn abort_batch(&mut self) {
        self.pending = None;
    }

    fn full_reload(&mut self, source: &dyn DataSource, on_complete: Completion) -> Result<()> {
        if self.pending.is_some() {
            return Err(SurfaceError::BatchAlreadyOpen);
        }
        self.sections = fetch_all(source)?;
        self.full_reloads += 1;
        debug!(sections = self.sections.len(), "in-memory full reload");

        on_complete(true);
        Ok(())
    }
}

fn record(accepted: bool, conflict: impl FnOnce() -> String) -> Result<()> {
    if accepted {
        Ok(())
    } else {
        Err(SurfaceError::Conflict(conflict()))
    }
}

fn fetch_item(source: &dyn DataSource, path: IndexPath) -> Result<RenderedItem> {
    let id = source
        .item_id(path)
        .cloned()
        .ok_or_else(|| SurfaceError::MissingData(format!("item {path}")))?;
    Ok(RenderedItem { id, generation: 0 })
}

fn fetch_section(source: &dyn DataSource, index: usize) -> Result<RenderedSection> {
    let id = source
        .section_id(index)
        .cloned()
        .ok_or_else(|| SurfaceError::MissingData(format!("section {index}")))?;
    let items = (0..source.item_count(index))
        .map(|item| fetch_item(source, IndexPath::new(index, item)))
        .collect::<Result<Vec<_>>>()?;
    Ok(RenderedSection {
        id,
        generation: 0,
        items,
    })
}

fn fetch_all(source: &dyn DataSource) -> Result<Vec<RenderedSection>> {
    (0..source.section_count())
        .map(|index| fetch_section(source, index))
        .collect()
}

fn check_new_section(index: usize, count: usize) -> Result<()> {
    if index < count {
        Ok(())
    } else {
        Err(SurfaceError::SectionOutOfBounds { index, count })
    }
}

/// Place `fixed` elements at their slots and fill the rest with `rest` in
/// order. Returns `None` if the counts do not line up.
fn fill_slots<T>(len: usize, fixed: Vec<(usize, T)>, rest: Vec<T>) -> Option<Vec<T>> {
    let mut slots: Vec<Option<T>> = (0..len).map(|_| None).collect();
    for (index, value) in fixed {
        let slot = slots.get_mut(index)?;
        if slot.is_some() {
            return None;
        }
        *slot = Some(value);
    }
    let mut rest = rest.into_iter();
    let filled = slots
        .into_iter()
        .map(|slot| slot.or_else(|| rest.next()))
        .collect::<Option<Vec<T>>>()?;
    rest.next().is_none().then_some(filled)
}

/// Compute the post-batch structure. Pure: `old` is never modified.
fn resolve(
    old: &[RenderedSection],
    batch: &PendingBatch,
    source: &dyn DataSource,
) -> Result<Vec<RenderedSection>> {
    let new_count = source.section_count();

    // Section counts.
    let expected = old.len() - batch.section_deletes.len() + batch.section_inserts.len();
    if expected != new_count {
        return Err(SurfaceError::CountMismatch {
            what: "sections".into(),
            expected: new_count,
            actual: expected,
        });
    }

    // Item edits must not address sections that are deleted or inserted.
    let old_paths = batch.item_deletes.iter().chain(batch.item_moves.keys());
    for path in old_paths {
        if batch.section_deletes.contains(&path.section) {
            return Err(SurfaceError::Conflict(format!(
                "item {path} edited inside deleted section"
            )));
        }
    }
    let new_paths = batch
        .item_inserts
        .iter()
        .chain(batch.item_moves.values())
        .chain(batch.item_reloads.iter());
    for path in new_paths {
        check_new_section(path.section, new_count)?;
        if batch.section_inserts.contains(&path.section) {
            return Err(SurfaceError::Conflict(format!(
                "item {path} edited inside inserted section"
            )));
        }
    }

    // Take deleted and moved items out of their pre-batch sections.
    let mut carried: BTreeMap<IndexPath, RenderedItem> = BTreeMap::new();
    let mut stripped: Vec<RenderedSection> = Vec::with_capacity(old.len());
    for (s, section) in old.iter().enumerate() {
        let mut items = Vec::with_capacity(section.items.len());
        for (i, item) in section.items.iter().enumerate() {
            let path = IndexPath::new(s, i);
            if batch.item_deletes.contains(&path) {
                continue;
            }
            match batch.item_moves.get(&path) {
                Some(to) => {
                    if carried.insert(*to, item.clone()).is_some() {
                        return Err(SurfaceError::Conflict(format!(
                            "two items moved to {to}"
                        )));
                    }
                }
                None => items.push(item.clone()),
            }
        }
        stripped.push(RenderedSection {
            id: section.id.clone(),
            generation: section.generation,
            items,
        });
    }

    // Sections: inserts and move destinations are fixed, survivors fill in.
    let mut fixed = Vec::with_capacity(batch.section_inserts.len() + batch.section_moves.len());
    for &index in &batch.section_inserts {
        check_new_section(index, new_count)?;
        fixed.push((index, fetch_section(source, index)?));
    }
    let mut survivors = Vec::with_capacity(stripped.len());
    for (s, section) in stripped.into_iter().enumerate() {
        if batch.section_deletes.contains(&s) {
            continue;
        }
        match batch.section_moves.get(&s) {
            Some(&to) => {
                check_new_section(to, new_count)?;
                fixed.push((to, section));
            }
            None => survivors.push(section),
        }
    }
    let mut sections = fill_slots(new_count, fixed, survivors).ok_or_else(|| {
        SurfaceError::Conflict("section inserts and moves overlap".into())
    })?;

    // Items of every section that was not inserted.
    for (s, section) in sections.iter_mut().enumerate() {
        if batch.section_inserts.contains(&s) {
            continue;
        }
        let range = IndexPath::new(s, 0)..IndexPath::new(s + 1, 0);
        let inserts: Vec<IndexPath> = batch.item_inserts.range(range.clone()).copied().collect();
        let moved: Vec<(IndexPath, RenderedItem)> = carried
            .range(range)
            .map(|(path, item)| (*path, item.clone()))
            .collect();

        let count = source.item_count(s);
        let actual = section.items.len() + inserts.len() + moved.len();
        if actual != count {
            return Err(SurfaceError::CountMismatch {
                what: format!("items in section {s}"),
                expected: count,
                actual,
            });
        }

        let mut fixed = Vec::with_capacity(inserts.len() + moved.len());
        for path in inserts {
            if path.item >= count {
                return Err(SurfaceError::ItemOutOfBounds { path, count });
            }
            fixed.push((path.item, fetch_item(source, path)?));
        }
        for (path, item) in moved {
            if path.item >= count {
                return Err(SurfaceError::ItemOutOfBounds { path, count });
            }
            fixed.push((path.item, item));
        }

        let survivors = std::mem::take(&mut section.items);
        section.items = fill_slots(count, fixed, survivors).ok_or_else(|| {
            SurfaceError::Conflict(format!("item inserts and moves overlap in section {s}"))
        })?;
    }

    // Reloads address post-batch positions of elements that existed before.
    for &path in &batch.item_reloads {
        if batch.item_inserts.contains(&path) || carried.contains_key(&path) {
            return Err(SurfaceError::Conflict(format!(
                "item {path} reloaded and inserted or moved"
            )));
        }
        let count = sections[path.section].items.len();
        if path.item >= count {
            return Err(SurfaceError::ItemOutOfBounds { path, count });
        }
        let fresh = fetch_item(source, path)?;
        let item = &mut sections[path.section].items[path.item];
        item.id = fresh.id;
        item.generation += 1;
    }
    for &index in &batch.section_reloads {
        check_new_section(index, new_count)?;
        if batch.section_inserts.contains(&index) {
            return Err(SurfaceError::Conflict(format!(
                "section {index} reloaded and inserted"
            )));
        }
        let generation = sections[index].generation + 1;
        sections[index] = RenderedSection {
            generation,
            ..fetch_section(source, index)?
        };
    }

    Ok(sections)
}
