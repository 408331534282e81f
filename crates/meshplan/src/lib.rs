//! `meshplan` designs the topology of telecommunications networks with two classic greedy
//! heuristics from Kershenbaum's _Telecommunications Network Design Algorithms_ (1993). ADD
//! places concentrators and homes terminals on them; MENTOR picks backbone nodes, spans them
//! with a tree and sizes a mesh of channelized links.

#![warn(unreachable_pub, missing_docs)]

pub mod core;
pub mod utils;
