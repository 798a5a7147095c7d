//! Shared helpers for backend tests: log capture, problem+json assertions and
//! unique player data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
