//! Backbone synthesis with the MENTOR heuristic (Kershenbaum, _Telecommunications Network
//! Design Algorithms_, 1993).
//!
//! A run goes through five phases, each consuming only what the previous one produced:
//!
//! 1. [Backbone selection](select::select): heavy nodes join the backbone, light nodes attach
//!    to a nearby backbone node or get promoted on a figure of merit.
//! 2. [Median](select::backbone_median): the backbone node with the smallest weighted moment.
//! 3. [Tree](tree::blend_tree): a spanning tree rooted at the median, anywhere between a minimum
//!    spanning tree and a shortest-path tree.
//! 4. [Tree metric](tree::TreeMetric): path costs and next hops along the tree.
//! 5. [Sequencing](sequence::Sequence) and [compression](compress::compress): node pairs are
//!    ordered so that overflow is folded into a pair before that pair is sized, then every pair
//!    is sized in whole channels.

mod compress;
mod select;
mod sequence;
mod tree;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::{
    constants::{
        DEFAULT_CHANNEL_CAPACITY, DEFAULT_MERIT_FRACTION, DEFAULT_OVERFLOW_SLACK,
        DEFAULT_RADIUS_FRACTION, DEFAULT_TREE_BLEND,
    },
    ident::NodeId,
    matrix::Matrix,
    observe::{Event, LogObserver, Observer, Phase},
    validate::{self, PreconditionError},
};

use self::{sequence::Sequence, tree::TreeMetric};

/// Backbone synthesis options.
#[derive(Debug, Clone, PartialEq, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MentorOpts {
    /// Nodes whose total traffic reaches this threshold join the backbone outright.
    #[builder(default)]
    pub weight_threshold: f64,
    /// Attachment radius, as a fraction of the largest cost.
    #[builder(default = DEFAULT_RADIUS_FRACTION)]
    pub radius_fraction: f64,
    /// Weight of distance (versus traffic) in the figure of merit.
    #[builder(default = DEFAULT_MERIT_FRACTION)]
    pub merit_fraction: f64,
    /// 0 builds a minimum spanning tree, 1 a shortest-path tree.
    #[builder(default = DEFAULT_TREE_BLEND)]
    pub tree_blend: f64,
    /// Traffic units carried by one channel.
    #[builder(default = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: f64,
    /// Leftover traffic of at least `(1 - overflow_slack) * channel_capacity` gets its own
    /// channel instead of being rerouted.
    #[builder(default = DEFAULT_OVERFLOW_SLACK)]
    pub overflow_slack: f64,
}

impl Default for MentorOpts {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MentorOpts {
    fn validate(&self) -> Result<(), PreconditionError> {
        validate::non_negative("weight_threshold", self.weight_threshold)?;
        validate::fraction("radius_fraction", self.radius_fraction)?;
        validate::fraction("merit_fraction", self.merit_fraction)?;
        validate::fraction("tree_blend", self.tree_blend)?;
        validate::positive("channel_capacity", self.channel_capacity)?;
        validate::fraction("overflow_slack", self.overflow_slack)?;
        Ok(())
    }
}

/// A synthesized backbone network.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Design {
    /// Backbone nodes, in the order they joined.
    pub backbone: Vec<NodeId>,
    /// The backbone median, root of the tree.
    pub median: NodeId,
    /// The backbone node each node is homed on. Backbone nodes are homed on themselves.
    pub access: Vec<NodeId>,
    /// Tree parent of every node. The median is its own parent.
    pub pred: Vec<NodeId>,
    /// Tree edges as `(node, parent)`, one per node other than the median.
    pub tree: Vec<(NodeId, NodeId)>,
    /// Links that carry at least one channel, in the order they were sized.
    pub mesh: Vec<(NodeId, NodeId)>,
    /// Channels on each link of `mesh`.
    pub channels: Vec<u32>,
    /// Every node pair, in the order the pairs were sized.
    pub sequence: Vec<(NodeId, NodeId)>,
    /// The node each pair of `sequence` reroutes its overflow through. Tree links have none.
    pub homes: Vec<Option<NodeId>>,
    #[serde(skip)]
    tree_dist: Matrix,
}

impl Design {
    /// Number of nodes in the design.
    pub fn nr_nodes(&self) -> usize {
        self.pred.len()
    }

    /// Cost of the path between `a` and `b` along the tree.
    pub fn tree_distance(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.tree_dist.get([a.inner(), b.inner()]).copied()
    }

    /// Iterates over `(a, b, channels)` for every realized link.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId, u32)> + '_ {
        self.mesh
            .iter()
            .zip(&self.channels)
            .map(|(&(a, b), &ch)| (a, b, ch))
    }

    /// Total cost of the mesh, paying `cost[a][b]` once per channel.
    pub fn link_cost(&self, cost: &Matrix) -> f64 {
        self.links()
            .map(|(a, b, ch)| cost[[a.inner(), b.inner()]] * f64::from(ch))
            .sum()
    }

    /// The tree as a graph weighted with edge costs. Node `i` has index `i`.
    pub fn tree_graph(&self, cost: &Matrix) -> UnGraph<NodeId, f64> {
        let mut g = self.empty_graph();
        for &(n, p) in &self.tree {
            g.add_edge(
                NodeIndex::new(n.inner()),
                NodeIndex::new(p.inner()),
                cost[[n.inner(), p.inner()]],
            );
        }
        g
    }

    /// The mesh as a graph weighted with channel counts. Node `i` has index `i`.
    pub fn mesh_graph(&self) -> UnGraph<NodeId, u32> {
        let mut g = self.empty_graph();
        for (a, b, ch) in self.links() {
            g.add_edge(NodeIndex::new(a.inner()), NodeIndex::new(b.inner()), ch);
        }
        g
    }

    fn empty_graph<E>(&self) -> UnGraph<NodeId, E> {
        let mut g = UnGraph::with_capacity(self.nr_nodes(), self.nr_nodes());
        for i in 0..self.nr_nodes() {
            g.add_node(NodeId::new(i));
        }
        g
    }
}

/// Runs MENTOR, reporting progress through the [`log`] facade.
///
/// `cost` and `traffic` are N x N; `traffic[i][j]` is the demand from `i` to `j`.
pub fn run(cost: &Matrix, traffic: &Matrix, opts: &MentorOpts) -> Result<Design, Error> {
    run_with(cost, traffic, opts, LogObserver)
}

/// Runs MENTOR, reporting progress to `observer`.
pub fn run_with<O: Observer>(
    cost: &Matrix,
    traffic: &Matrix,
    opts: &MentorOpts,
    mut observer: O,
) -> Result<Design, Error> {
    let n = validate_inputs(cost, traffic, opts)?;

    observer.observe(&Event::Started(Phase::BackboneSelection));
    let selection = select::select(cost, traffic, opts, &mut observer);
    observer.observe(&Event::Finished(Phase::BackboneSelection));

    observer.observe(&Event::Started(Phase::Median));
    let median = select::backbone_median(cost, &selection.backbone, &selection.weight);
    observer.observe(&Event::Finished(Phase::Median));

    observer.observe(&Event::Started(Phase::Tree));
    let pred = tree::blend_tree(cost, median, opts.tree_blend);
    observer.observe(&Event::Finished(Phase::Tree));

    observer.observe(&Event::Started(Phase::TreeMetric));
    let metric = TreeMetric::new(cost, median, &pred);
    observer.observe(&Event::Finished(Phase::TreeMetric));

    observer.observe(&Event::Started(Phase::Sequencing));
    let sequence = Sequence::new(cost, &metric);
    observer.observe(&Event::Finished(Phase::Sequencing));

    observer.observe(&Event::Started(Phase::Compression));
    let mesh = compress::compress(traffic, &sequence, opts)?;
    observer.observe(&Event::Finished(Phase::Compression));

    let ids = |v: &[usize]| v.iter().copied().map(NodeId::new).collect::<Vec<_>>();
    let pairs = |v: &[(usize, usize)]| {
        v.iter()
            .map(|&(a, b)| (NodeId::new(a), NodeId::new(b)))
            .collect::<Vec<_>>()
    };
    let tree = (0..n)
        .filter(|&i| i != median)
        .map(|i| (NodeId::new(i), NodeId::new(pred[i])))
        .collect();
    Ok(Design {
        backbone: ids(&selection.backbone),
        median: NodeId::new(median),
        access: ids(&selection.access),
        pred: ids(&pred),
        tree,
        mesh: pairs(&mesh.links),
        channels: mesh.channels,
        sequence: pairs(&sequence.pairs()),
        homes: sequence.homes().map(|h| h.map(NodeId::new)).collect(),
        tree_dist: metric.into_distances(),
    })
}

/// Correctness properties:
///
/// - `cost` and `traffic` are non-empty, square, and the same size.
/// - Neither matrix has negative or non-finite entries.
/// - Every option lies in its range.
fn validate_inputs(
    cost: &Matrix,
    traffic: &Matrix,
    opts: &MentorOpts,
) -> Result<usize, PreconditionError> {
    validate::non_empty("cost", cost)?;
    let n = validate::square("cost", cost)?;
    let m = validate::square("traffic", traffic)?;
    validate::same_len("traffic", n, m)?;
    validate::entries("cost", cost, false)?;
    validate::entries("traffic", traffic, false)?;
    opts.validate()?;
    Ok(n)
}

/// Backbone synthesis error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The inputs are malformed.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}
