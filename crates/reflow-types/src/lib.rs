//! Foundation types for Reflow.
//!
//! This crate provides the identity, container, and snapshot types shared by
//! every other Reflow crate. A list is an ordered set of [`Section`]s, each
//! holding ordered, identity-bearing items.
//!
//! # Key Types
//!
//! - [`ModelId`] — Stable, caller-assigned identity used to match elements across snapshots
//! - [`Model`] — Trait implemented by every diffable element
//! - [`Section`] — Identity-bearing, ordered container of items
//! - [`Snapshot`] — Immutable point-in-time copy of a section list
//! - [`IndexPath`] — `(section, item)` coordinate on a rendering surface

pub mod identity;
pub mod index_path;
pub mod section;
pub mod snapshot;

pub use identity::{Model, ModelId};
pub use index_path::IndexPath;
pub use section::Section;
pub use snapshot::Snapshot;
