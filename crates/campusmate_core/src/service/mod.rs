//! Core use-case services.
//!
//! # Responsibility
//! - Turn user actions into state transitions (`reducer`).
//! - Project state into dashboard read models (`report`).
//! - Tie transitions to persistence for a running app (`session`).

pub mod reducer;
pub mod report;
pub mod session;
