//! Rendering-surface interface for Reflow.
//!
//! The surface is the external list view that receives structural edits.
//! This crate defines the interface the orchestrator drives and two
//! reference implementations.
//!
//! # Modules
//!
//! - [`error`] — Error types for surface operations
//! - [`animation`] — Per-action row and section animations
//! - [`traits`] — The [`RenderSurface`] and [`DataSource`] traits
//! - [`memory`] — [`InMemorySurface`], which resolves batches like an
//!   incremental list view and rejects inconsistent ones
//! - [`recording`] — [`RecordingSurface`], which records what it receives

pub mod animation;
pub mod error;
pub mod memory;
pub mod recording;
pub mod traits;

pub use animation::{ActionAnimations, AnimationAction, ReloadAnimations, RowAnimation};
pub use error::{Result, SurfaceError};
pub use memory::{InMemorySurface, RenderedItem, RenderedSection};
pub use recording::{RecordedBatch, RecordingSurface};
pub use traits::{Completion, DataSource, RenderSurface};
