#![warn(unreachable_pub, missing_debug_implementations)]

//! The core meshplan library: two topology heuristics from classic telecommunications network
//! design.
//!
//! - [`placement`] runs ADD, which picks concentrator sites and homes terminals on them.
//! - [`backbone`] runs MENTOR, which picks backbone nodes, spans them with a tree and sizes a
//!   mesh of channelized links on top.
//!
//! Both engines take plain [matrices](Matrix), validate them up front and report progress to an
//! [`Observer`]. [`sweep`] runs either one over many option sets in parallel.

mod ident;

pub mod backbone;
pub mod constants;
pub mod matrix;
pub mod observe;
pub mod placement;
pub mod sweep;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use backbone::{Design, MentorOpts};
pub use ident::{NodeId, SiteId};
pub use matrix::Matrix;
pub use observe::{Event, LogObserver, Observer, Phase, Silent};
pub use placement::{AddOpts, Placement};
pub use validate::PreconditionError;
