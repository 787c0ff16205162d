//! Reconciliation orchestrator for Reflow.
//!
//! A [`Director`] owns the live [`SectionList`] and a rendering surface.
//! Each call to [`Director::reconcile`] snapshots the list, runs the
//! caller's mutation, diffs both snapshots at section and item level, and
//! submits the translated commands to the surface as one batch.
//!
//! # Modules
//!
//! - [`config`] — [`DirectorConfig`]
//! - [`error`] — [`ReconcileError`]
//! - [`section_list`] — The mutable section list handed to mutations
//! - [`director`] — The orchestrator and its in-flight guard

pub mod config;
pub mod director;
pub mod error;
pub mod section_list;

pub use config::DirectorConfig;
pub use director::{Director, ReconcileSummary};
pub use error::{ReconcileError, ReconcileResult};
pub use section_list::SectionList;

// Re-export the types callers need to build sections and surfaces.
pub use reflow_surface::{InMemorySurface, RecordingSurface, ReloadAnimations, RenderSurface};
pub use reflow_types::{IndexPath, Model, ModelId, Section, Snapshot};
