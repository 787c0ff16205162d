//! Batch edit translation for Reflow.
//!
//! Turns a section edit script and the per-section item edit scripts into a
//! single ordered list of [`Command`]s expressed in rendering-surface
//! coordinates:
//!
//! - delete-class commands and move sources use **pre-batch** indices,
//! - insert-class commands, move destinations and replaces use
//!   **post-batch** indices,
//! - groups are emitted in a fixed order (see [`CommandGroup`]).
//!
//! # Key Types
//!
//! - [`Command`] / [`CommandGroup`] -- One structural edit and its ordering group
//! - [`Batch`] -- The translated command list
//! - [`translate`] -- The translator itself

pub mod command;
pub mod translator;

pub use command::{Command, CommandGroup};
pub use translator::{translate, translate_snapshot_diff, Batch};
