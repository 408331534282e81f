//! Loading inputs, printing results and generating scenarios.

pub use meshplan_utils::*;
