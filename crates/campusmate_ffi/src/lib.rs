//! Flutter bridge crate for CampusMate core.

pub mod api;
