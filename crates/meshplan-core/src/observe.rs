//! Diagnostics hooks. Both engines report progress through an [`Observer`] supplied by the
//! caller instead of writing to a global logger directly.

use log::Level;

use crate::ident::{NodeId, SiteId};

/// The stages of the two engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phase {
    /// Concentrator placement (ADD).
    Placement,
    /// Backbone selection.
    BackboneSelection,
    /// Backbone median.
    Median,
    /// Spanning tree construction.
    Tree,
    /// Tree-metric distances.
    TreeMetric,
    /// Pair sequencing.
    Sequencing,
    /// Traffic compression.
    Compression,
}

/// Something worth reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A phase began.
    Started(Phase),
    /// A phase ended.
    Finished(Phase),
    /// A candidate site was priced.
    SiteEvaluated {
        /// The site.
        site: SiteId,
        /// The net cost of opening it (negative means a saving).
        expense: f64,
    },
    /// A site was opened.
    SiteOpened {
        /// The site.
        site: SiteId,
        /// The running total after opening it.
        total: f64,
    },
    /// No unopened site offers a saving.
    NoMoreSavings {
        /// The final total.
        total: f64,
    },
    /// A node was attached to a backbone node within the radius.
    Attached {
        /// The attached node.
        node: NodeId,
        /// Its backbone node.
        to: NodeId,
    },
    /// A node was promoted to the backbone on its figure of merit.
    Promoted {
        /// The promoted node.
        node: NodeId,
        /// Its figure of merit.
        merit: f64,
    },
}

impl Event {
    /// The log level this event is reported at by [`LogObserver`].
    pub fn level(&self) -> Level {
        match self {
            Event::Started(_)
            | Event::Finished(_)
            | Event::SiteOpened { .. }
            | Event::NoMoreSavings { .. }
            | Event::Promoted { .. } => Level::Debug,
            Event::SiteEvaluated { .. } | Event::Attached { .. } => Level::Trace,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Started(phase) => write!(f, "{phase}: started"),
            Event::Finished(phase) => write!(f, "{phase}: finished"),
            Event::SiteEvaluated { site, expense } => {
                write!(f, "site {site}: opening it would cost {expense}")
            }
            Event::SiteOpened { site, total } => {
                write!(f, "site {site} opened, total cost is now {total}")
            }
            Event::NoMoreSavings { total } => write!(f, "no more savings, total cost {total}"),
            Event::Attached { node, to } => write!(f, "node {node} attached to {to}"),
            Event::Promoted { node, merit } => {
                write!(f, "node {node} promoted to the backbone (merit {merit:.4})")
            }
        }
    }
}

/// Receives [`Event`]s from a running engine.
pub trait Observer {
    /// Handles one event.
    fn observe(&mut self, event: &Event);
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn observe(&mut self, event: &Event) {
        (**self).observe(event)
    }
}

/// Forwards events to the [`log`] facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn observe(&mut self, event: &Event) {
        log::log!(event.level(), "{event}");
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Observer for Silent {
    fn observe(&mut self, _: &Event) {}
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    /// Events seen so far, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl Observer for Recorder {
    fn observe(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
