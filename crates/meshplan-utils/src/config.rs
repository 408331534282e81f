//! The flat tuning configuration shared by both engines.

use std::path::Path;

use meshplan_core::{
    constants::{
        DEFAULT_CAPACITY_LIMIT, DEFAULT_CHANNEL_CAPACITY, DEFAULT_MERIT_FRACTION,
        DEFAULT_OVERFLOW_SLACK, DEFAULT_RADIUS_FRACTION, DEFAULT_TREE_BLEND,
    },
    AddOpts, MentorOpts, SiteId,
};

use crate::Error;

/// Every tuning knob of both engines, each one independently defaulted.
///
/// Keys are camelCase in JSON, e.g. `{"weightThreshold": 0, "channelCapacity": 32}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Tuning {
    /// See [`MentorOpts::weight_threshold`].
    pub weight_threshold: f64,
    /// See [`MentorOpts::radius_fraction`].
    pub radius_fraction: f64,
    /// See [`MentorOpts::merit_fraction`].
    pub merit_fraction: f64,
    /// See [`MentorOpts::tree_blend`].
    pub tree_blend: f64,
    /// See [`MentorOpts::channel_capacity`].
    pub channel_capacity: f64,
    /// See [`MentorOpts::overflow_slack`].
    pub overflow_slack: f64,
    /// See [`AddOpts::move_threshold`].
    pub move_threshold: f64,
    /// See [`AddOpts::center`].
    pub center: usize,
    /// See [`AddOpts::capacity_limit`].
    pub capacity_limit: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            weight_threshold: 0.0,
            radius_fraction: DEFAULT_RADIUS_FRACTION,
            merit_fraction: DEFAULT_MERIT_FRACTION,
            tree_blend: DEFAULT_TREE_BLEND,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            overflow_slack: DEFAULT_OVERFLOW_SLACK,
            move_threshold: 0.0,
            center: 0,
            capacity_limit: DEFAULT_CAPACITY_LIMIT,
        }
    }
}

impl Tuning {
    /// The placement options.
    pub fn add_opts(&self) -> AddOpts {
        AddOpts::builder()
            .center(SiteId::new(self.center))
            .capacity_limit(self.capacity_limit)
            .move_threshold(self.move_threshold)
            .build()
    }

    /// The backbone options.
    pub fn mentor_opts(&self) -> MentorOpts {
        MentorOpts::builder()
            .weight_threshold(self.weight_threshold)
            .radius_fraction(self.radius_fraction)
            .merit_fraction(self.merit_fraction)
            .tree_blend(self.tree_blend)
            .channel_capacity(self.channel_capacity)
            .overflow_slack(self.overflow_slack)
            .build()
    }
}

/// Reads a [`Tuning`] from a JSON file.
pub fn read_tuning(path: impl AsRef<Path>) -> Result<Tuning, Error> {
    let path = path.as_ref();
    let tuning = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        _ => return Err(Error::UnknownFileType(path.into())),
    };
    Ok(tuning)
}
