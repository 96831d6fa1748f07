//! Camera control: high-level actions applied between frames.
//!
//! # Invariants
//! - Display glue produces actions, never direct camera writes; every
//!   embodiment shares the same movement and collision rules.
//! - A move commits only when the destination cell is empty.

pub mod action;

pub use action::{apply_action, walk_deltas, Action};

pub fn crate_info() -> &'static str {
    "voxelspace-input v0.1.0"
}
