//! Sentinels and default tuning values shared by both engines.

/// Marks a terminal-to-site connection as disallowed. Any sufficiently large finite value (the
/// classic choice is `2^32 - 1`) behaves the same way.
pub const NO_LINK: f64 = f64::INFINITY;

/// Default capacity of a concentrator, in terminal weight units.
pub const DEFAULT_CAPACITY_LIMIT: f64 = 10.0;

/// Default radius as a fraction of the largest cost in the matrix.
pub const DEFAULT_RADIUS_FRACTION: f64 = 0.5;

/// Default distance-versus-load blend in the figure of merit.
pub const DEFAULT_MERIT_FRACTION: f64 = 0.5;

/// Default blend between a minimum spanning tree (0) and a shortest-path tree (1).
pub const DEFAULT_TREE_BLEND: f64 = 0.5;

/// Default usable capacity of a single channel.
pub const DEFAULT_CHANNEL_CAPACITY: f64 = 1.0;

/// Default share of a channel that may stay idle before leftover traffic is rerouted.
pub const DEFAULT_OVERFLOW_SLACK: f64 = 0.4;

// Relative tolerance for the post-run cost cross-check.
pub(crate) const COST_TOLERANCE: f64 = 1e-9;
