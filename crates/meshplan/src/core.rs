//! The engines, their options and results. The most common entry points are
//! [placement::run()] and [backbone::run()].

pub use meshplan_core::*;
