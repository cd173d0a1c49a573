//! State document model for the student companion.
//!
//! # Responsibility
//! - Define the persisted sections and their wire shapes.
//! - Keep per-record invariants close to the record types.
//!
//! # Invariants
//! - Every record carries a stable string `id`.
//! - `AppState` is the only aggregate; sections are never persisted alone.

pub mod document;
pub mod profile;
pub mod semester;
pub mod state;
pub mod subject;
pub mod task;
pub mod timetable;
