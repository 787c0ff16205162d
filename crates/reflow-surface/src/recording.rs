//! A surface that records what it receives.

use tracing::trace;

use reflow_batch::Command;
use reflow_types::IndexPath;

use crate::animation::ReloadAnimations;
use crate::error::{Result, SurfaceError};
use crate::traits::{Completion, DataSource, RenderSurface};

/// One committed batch as seen by a [`RecordingSurface`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordedBatch {
    pub animations: ReloadAnimations,
    pub commands: Vec<Command>,
}

/// A [`RenderSurface`] that records batches without interpreting them.
///
/// With `defer_completion` set, completions are held until
/// [`complete_pending`](RecordingSurface::complete_pending) is called,
/// simulating an animated update that is still running.
#[derive(Default)]
pub struct RecordingSurface {
    batches: Vec<RecordedBatch>,
    open: Option<RecordedBatch>,
    full_reloads: usize,
    defer_completion: bool,
    pending: Vec<Completion>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that holds completions until released.
    pub fn deferred() -> Self {
        Self {
            defer_completion: true,
            ..Self::default()
        }
    }

    /// Committed batches, oldest first.
    pub fn batches(&self) -> &[RecordedBatch] {
        &self.batches
    }

    pub fn last_batch(&self) -> Option<&RecordedBatch> {
        self.batches.last()
    }

    pub fn full_reloads(&self) -> usize {
        self.full_reloads
    }

    /// Number of completions waiting to be released.
    pub fn pending_completions(&self) -> usize {
        self.pending.len()
    }

    /// Invoke every held completion with `finished`. Returns how many ran.
    pub fn complete_pending(&mut self, finished: bool) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for completion in pending {
            completion(finished);
        }
        count
    }

    fn push(&mut self, command: Command) -> Result<()> {
        let batch = self.open.as_mut().ok_or(SurfaceError::BatchNotOpen)?;
        trace!(%command, "recorded");
        batch.commands.push(command);
        Ok(())
    }

    fn finish(&mut self, on_complete: Completion) {
        if self.defer_completion {
            self.pending.push(on_complete);
        } else {
            on_complete(true);
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn begin_batch(&mut self, animations: &ReloadAnimations) -> Result<()> {
        if self.open.is_some() {
            return Err(SurfaceError::BatchAlreadyOpen);
        }
        self.open = Some(RecordedBatch {
            animations: *animations,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn insert_section(&mut self, index: usize) -> Result<()> {
        self.push(Command::SectionInsert { index })
    }

    fn delete_section(&mut self, index: usize) -> Result<()> {
        self.push(Command::SectionDelete { index })
    }

    fn move_section(&mut self, from: usize, to: usize) -> Result<()> {
        self.push(Command::SectionMove { from, to })
    }

    fn reload_section(&mut self, index: usize) -> Result<()> {
        self.push(Command::SectionReplace { index })
    }

    fn insert_item(&mut self, at: IndexPath) -> Result<()> {
        self.push(Command::ItemInsert { at })
    }

    fn delete_item(&mut self, at: IndexPath) -> Result<()> {
        self.push(Command::ItemDelete { at })
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) -> Result<()> {
        self.push(Command::ItemMove { from, to })
    }

    fn reload_item(&mut self, at: IndexPath) -> Result<()> {
        self.push(Command::ItemReplace { at })
    }

    fn commit_batch(&mut self, _source: &dyn DataSource, on_complete: Completion) -> Result<()> {
        let batch = self.open.take().ok_or(SurfaceError::BatchNotOpen)?;
        self.batches.push(batch);
        self.finish(on_complete);
        Ok(())
    }

    fn abort_batch(&mut self) {
        self.open = None;
    }

    fn full_reload(&mut self, _source: &dyn DataSource, on_complete: Completion) -> Result<()> {
        if self.open.is_some() {
            return Err(SurfaceError::BatchAlreadyOpen);
        }
        self.full_reloads += 1;
        self.finish(on_complete);
        Ok(())
    }
}
