use crate::{
    ident::NodeId,
    matrix::{self, Matrix},
    observe::{Event, Observer},
};

use super::MentorOpts;

#[derive(Debug)]
pub(super) struct Selection {
    /// Backbone nodes in the order they joined.
    pub(super) backbone: Vec<usize>,
    /// Backbone node of every node.
    pub(super) access: Vec<usize>,
    /// Total traffic sourced or sunk by every node.
    pub(super) weight: Vec<f64>,
}

/// Row sum plus column sum of `traffic` for every node.
pub(super) fn node_weights(traffic: &Matrix) -> Vec<f64> {
    traffic
        .rows()
        .into_iter()
        .zip(traffic.columns())
        .map(|(row, col)| row.sum() + col.sum())
        .collect()
}

/// The node with the smallest weighted moment `sum_j cost[i][j] * weight[j]` over all nodes.
pub(super) fn median(cost: &Matrix, weight: &[f64]) -> usize {
    let moments = cost
        .rows()
        .into_iter()
        .map(|row| row.iter().zip(weight).map(|(c, w)| c * w).sum::<f64>());
    matrix::argmin(moments).unwrap_or(0)
}

/// Like [`median`], but both the candidates and the moment terms are restricted to the
/// backbone. Ties go to the node that joined the backbone first.
pub(super) fn backbone_median(cost: &Matrix, backbone: &[usize], weight: &[f64]) -> usize {
    let moments = backbone
        .iter()
        .map(|&b| backbone.iter().map(|&j| cost[[b, j]] * weight[j]).sum::<f64>());
    matrix::argmin(moments)
        .map(|i| backbone[i])
        .unwrap_or(0)
}

/// Picks the backbone.
///
/// Nodes with enough traffic join outright. The rest attach to their cheapest backbone node
/// strictly within the radius. Whenever a whole round attaches nothing, the unattached node
/// with the largest figure of merit is promoted to the backbone and the next round retries
/// the rest. Every round either attaches or promotes a node, so this ends after at most N
/// rounds.
pub(super) fn select<O: Observer>(
    cost: &Matrix,
    traffic: &Matrix,
    opts: &MentorOpts,
    observer: &mut O,
) -> Selection {
    let n = cost.nrows();
    let weight = node_weights(traffic);
    let reference = median(cost, &weight);
    let max_weight = weight.iter().copied().fold(0.0, f64::max);
    let max_dist = matrix::max_entry(cost);
    let radius = max_dist * opts.radius_fraction;

    let (mut backbone, mut pending): (Vec<_>, Vec<_>) =
        (0..n).partition(|&i| weight[i] >= opts.weight_threshold);
    let mut access = (0..n).collect::<Vec<_>>();

    let ratio = |x: f64, max: f64| if max > 0.0 { x / max } else { 0.0 };
    let merit = |u: usize| {
        opts.merit_fraction * ratio(cost[[u, reference]], max_dist)
            + (1.0 - opts.merit_fraction) * ratio(weight[u], max_weight)
    };

    while !pending.is_empty() {
        let mut unattached = Vec::with_capacity(pending.len());
        for &c in &pending {
            match nearest_within(cost, c, &backbone, radius) {
                Some(b) => {
                    access[c] = b;
                    observer.observe(&Event::Attached {
                        node: NodeId::new(c),
                        to: NodeId::new(b),
                    });
                }
                None => unattached.push(c),
            }
        }
        let attached_any = unattached.len() < pending.len();
        pending = unattached;
        if attached_any || pending.is_empty() {
            continue;
        }
        let merits = pending.iter().map(|&u| merit(u)).collect::<Vec<_>>();
        let Some(i) = matrix::argmax(merits.iter().copied()) else {
            break;
        };
        let node = pending.remove(i);
        backbone.push(node);
        access[node] = node;
        observer.observe(&Event::Promoted {
            node: NodeId::new(node),
            merit: merits[i],
        });
    }

    Selection {
        backbone,
        access,
        weight,
    }
}

/// The cheapest backbone node strictly within `radius` of `c`, first one on ties.
fn nearest_within(cost: &Matrix, c: usize, backbone: &[usize], radius: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &b in backbone {
        let d = cost[[c, b]];
        if d < radius && best.map_or(true, |(_, lowest)| d < lowest) {
            best = Some((b, d));
        }
    }
    best.map(|(b, _)| b)
}
