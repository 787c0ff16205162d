//! The reconciliation orchestrator.
//!
//! One pass of [`Director::reconcile`]:
//!
//! 1. capture the `old` snapshot,
//! 2. run the mutation against the live [`SectionList`],
//! 3. capture the `new` snapshot,
//! 4. diff sections, then items of every retained section,
//! 5. translate both into one ordered command list,
//! 6. submit it to the surface as one batch.
//!
//! Only one pass may be in flight. The guard is released by the surface's
//! completion signal, not when `reconcile` returns, so a surface that
//! finishes asynchronously keeps later passes out until it is done. Any pass
//! that ends before reaching the surface, including one whose mutation
//! panics, releases the guard on the way out.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use reflow_batch::{translate_snapshot_diff, Batch};
use reflow_diff::diff_snapshots;
use reflow_surface::{Completion, ReloadAnimations, RenderSurface};
use reflow_types::{Model, Section, Snapshot};

use crate::config::DirectorConfig;
use crate::error::{MutationError, ReconcileError, ReconcileResult};
use crate::section_list::SectionList;

/// What one reconciliation pass submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    /// Section-level edits found by the differ.
    pub section_edits: usize,
    /// Item-level edits found across all retained sections.
    pub item_edits: usize,
    /// Commands submitted to the surface (zero for a full reload).
    pub commands: usize,
    /// Item edits dropped by the translator.
    pub dropped: usize,
    /// Whether the pass fell back to a full reload.
    pub full_reload: bool,
}

/// Holds the in-flight flag for one pass. Dropping it releases the flag
/// unless ownership was handed to the surface completion.
struct InFlight {
    flag: Arc<AtomicBool>,
    armed: bool,
}

impl InFlight {
    fn hand_off(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(false, Ordering::Release);
        }
    }
}

/// Drives a [`RenderSurface`] from a [`SectionList`].
pub struct Director<M, S> {
    sections: SectionList<M>,
    surface: S,
    config: DirectorConfig,
    in_flight: Arc<AtomicBool>,
}

impl<M, S> Director<M, S>
where
    M: Model + Clone,
    S: RenderSurface,
{
    /// Create a director with an empty list over `surface`.
    pub fn new(surface: S, config: DirectorConfig) -> Self {
        Self {
            sections: SectionList::new(),
            surface,
            config,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start from `sections`. The surface must already display them.
    pub fn with_sections(mut self, sections: Vec<Section<M>>) -> Self {
        self.sections = SectionList::from_sections(sections);
        self
    }

    pub fn sections(&self) -> &SectionList<M> {
        &self.sections
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// Returns `true` while a submitted pass has not completed.
    pub fn is_reconciling(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run `mutate` and animate the resulting changes with the configured
    /// animations.
    ///
    /// `on_complete` runs once the surface has finished the batch.
    pub fn reconcile<F, E>(
        &mut self,
        mutate: F,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> ReconcileResult<ReconcileSummary>
    where
        F: FnOnce(&mut SectionList<M>) -> Result<(), E>,
        E: Into<MutationError>,
    {
        let animations = self.config.animations;
        self.reconcile_with(animations, mutate, on_complete)
    }

    /// Like [`reconcile`](Self::reconcile) with explicit animations.
    ///
    /// If `mutate` fails the live list is restored to its structure before
    /// the pass and nothing is submitted. A pass rejected by the surface is
    /// rolled back the same way. If `mutate` panics the list is restored and
    /// the guard released before the panic resumes.
    pub fn reconcile_with<F, E>(
        &mut self,
        animations: ReloadAnimations,
        mutate: F,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> ReconcileResult<ReconcileSummary>
    where
        F: FnOnce(&mut SectionList<M>) -> Result<(), E>,
        E: Into<MutationError>,
    {
        let guard = self.acquire()?;

        let old = self.sections.snapshot();
        match panic::catch_unwind(AssertUnwindSafe(|| mutate(&mut self.sections))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                let err = err.into();
                warn!(error = %err, "mutation failed, restoring section list");
                self.sections.restore(old);
                return Err(ReconcileError::Mutation(err));
            }
            Err(payload) => {
                warn!("mutation panicked, restoring section list");
                self.sections.restore(old);
                drop(guard);
                panic::resume_unwind(payload);
            }
        }
        let new = self.sections.snapshot();
        self.check_duplicates(&new);

        let diff = diff_snapshots(&old, &new);
        let batch = translate_snapshot_diff(&diff);
        let full_reload = self.config.prefers_full_reload(batch.len());
        let summary = ReconcileSummary {
            section_edits: diff.sections.len(),
            item_edits: diff.item_changes(),
            commands: if full_reload { 0 } else { batch.len() },
            dropped: batch.dropped,
            full_reload,
        };

        let completion = self.completion(on_complete);
        let submitted = if full_reload {
            debug!(
                commands = batch.len(),
                "batch above threshold, using full reload"
            );
            self.surface.full_reload(&new, completion)
        } else {
            self.submit(&animations, &batch, &new, completion)
        };
        if let Err(err) = submitted {
            warn!(error = %err, "surface rejected batch, restoring section list");
            self.sections.restore(old);
            return Err(err.into());
        }
        guard.hand_off();

        debug!(
            section_edits = summary.section_edits,
            item_edits = summary.item_edits,
            commands = summary.commands,
            dropped = summary.dropped,
            full_reload = summary.full_reload,
            "reconciliation submitted"
        );
        Ok(summary)
    }

    /// Re-render everything without diffing.
    ///
    /// This is the path taken when there is no mutation to observe, for
    /// instance after the list was replaced wholesale outside a pass.
    pub fn reload_data(&mut self, on_complete: impl FnOnce() + Send + 'static) -> ReconcileResult<()> {
        let guard = self.acquire()?;

        let current = self.sections.snapshot();
        let completion = self.completion(on_complete);
        self.surface.full_reload(&current, completion)?;
        guard.hand_off();
        debug!(sections = current.len(), "full reload submitted");
        Ok(())
    }

    /// Replace the live list wholesale, then full-reload.
    ///
    /// If the reload is rejected the previous list is put back, so the list
    /// keeps matching what the surface shows.
    pub fn replace_all(
        &mut self,
        sections: Vec<Section<M>>,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> ReconcileResult<()> {
        let previous = std::mem::replace(&mut self.sections, SectionList::from_sections(sections));
        if let Err(err) = self.reload_data(on_complete) {
            warn!(error = %err, "replace rejected, restoring section list");
            self.sections = previous;
            return Err(err);
        }
        Ok(())
    }

    fn acquire(&self) -> ReconcileResult<InFlight> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            warn!("reconciliation rejected, another pass is in flight");
            return Err(ReconcileError::Busy);
        }
        Ok(InFlight {
            flag: Arc::clone(&self.in_flight),
            armed: true,
        })
    }

    fn completion(&self, on_complete: impl FnOnce() + Send + 'static) -> Completion {
        let in_flight = Arc::clone(&self.in_flight);
        Box::new(move |finished| {
            in_flight.store(false, Ordering::Release);
            debug!(finished, "surface update completed");
            on_complete();
        })
    }

    fn submit(
        &mut self,
        animations: &ReloadAnimations,
        batch: &Batch,
        new: &Snapshot<M>,
        completion: Completion,
    ) -> reflow_surface::Result<()> {
        self.surface.begin_batch(animations)?;
        let applied = self
            .surface
            .apply_all(&batch.commands)
            .and_then(|()| self.surface.commit_batch(new, completion));
        if applied.is_err() {
            self.surface.abort_batch();
        }
        applied
    }

    fn check_duplicates(&self, snapshot: &Snapshot<M>) {
        if !self.config.warn_on_duplicate_ids {
            return;
        }
        let sections = snapshot.duplicate_section_ids();
        if !sections.is_empty() {
            warn!(?sections, "duplicate section identities");
        }
        let items = snapshot.duplicate_item_ids();
        if !items.is_empty() {
            warn!(?items, "duplicate item identities");
        }
    }
}
