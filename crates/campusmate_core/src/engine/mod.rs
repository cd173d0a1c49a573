//! Pure computation engines.
//!
//! # Responsibility
//! - Derive attendance, CGPA and study-hint figures from state slices.
//! - Stay free of I/O, logging and persistence concerns.
//!
//! # Invariants
//! - Every function is total: no panics, no `Result`, defaults on bad input.

pub mod assistant;
pub mod attendance;
pub mod cgpa;
pub mod focus_timer;
pub mod percent;
