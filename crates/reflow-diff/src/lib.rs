//! Identity diff engine for Reflow.
//!
//! Compares two ordered sequences of identity-bearing elements and classifies
//! every difference as an insertion, deletion, move, or in-place replacement.
//! The same algorithm runs once over sections and once per retained section
//! over its items.
//!
//! # Key Types
//!
//! - [`EditScript`] / [`Change`] / [`Retained`] -- Classified edits between two sequences
//! - [`SnapshotDiff`] -- Section edits plus per-section item edits for two snapshots

pub mod identity_diff;
pub mod script;
pub mod section_diff;

pub use identity_diff::{diff_by, diff_models};
pub use script::{Change, EditScript, ItemEditScript, Retained, SectionEditScript};
pub use section_diff::{diff_items, diff_sections, diff_snapshots, SnapshotDiff};
