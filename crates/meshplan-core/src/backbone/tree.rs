use ndarray::Array2;
use ordered_float::OrderedFloat;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::Dfs,
};

use crate::matrix::Matrix;

/// Grows a spanning tree over every node from `root` and returns each node's parent (the root
/// is its own parent).
///
/// A node outside the tree is labeled with the cost of reaching it, `blend * label[parent] +
/// cost[node][parent]`. With `blend = 0` only the last edge counts (Prim); with `blend = 1`
/// the whole path counts (Dijkstra). The cheapest label joins next, lowest index first.
pub(super) fn blend_tree(cost: &Matrix, root: usize, blend: f64) -> Vec<usize> {
    let n = cost.nrows();
    let mut pred = vec![root; n];
    let mut label = cost.row(root).to_vec();
    let mut outside = (0..n).filter(|&i| i != root).collect::<Vec<_>>();
    while let Some(pos) = outside
        .iter()
        .enumerate()
        .min_by_key(|&(_, &o)| OrderedFloat(label[o]))
        .map(|(pos, _)| pos)
    {
        let joined = outside.remove(pos);
        let base = blend * label[joined];
        for &o in &outside {
            let candidate = base + cost[[o, joined]];
            if candidate < label[o] {
                label[o] = candidate;
                pred[o] = joined;
            }
        }
    }
    pred
}

/// Costs and next hops along a tree.
#[derive(Debug)]
pub(super) struct TreeMetric {
    /// `dist[[i, j]]` is the cost of the tree path between `i` and `j`.
    dist: Matrix,
    /// `toward[[i, j]]` is the neighbor of `j` on the tree path from `j` to `i`.
    toward: Array2<usize>,
}

impl TreeMetric {
    pub(super) fn new(cost: &Matrix, root: usize, pred: &[usize]) -> Self {
        let n = pred.len();
        let order = preorder(root, pred);

        let mut dist = Matrix::zeros((n, n));
        for (k, &j) in order.iter().enumerate().skip(1) {
            let p = pred[j];
            let edge = cost[[j, p]];
            for &l in &order[..k] {
                let d = dist[[p, l]] + edge;
                dist[[j, l]] = d;
                dist[[l, j]] = d;
            }
        }

        // Off the path to the root, the way toward `i` goes through the parent. On it, it goes
        // through the child we came from.
        let mut toward = Array2::from_shape_fn((n, n), |(i, j)| if i == j { i } else { pred[j] });
        for i in (0..n).filter(|&i| i != root) {
            let mut child = i;
            let mut p = pred[i];
            loop {
                toward[[i, p]] = child;
                if p == root {
                    break;
                }
                child = p;
                p = pred[p];
            }
        }
        Self { dist, toward }
    }

    pub(super) fn nr_nodes(&self) -> usize {
        self.toward.nrows()
    }

    /// The neighbor of `j` on the tree path from `j` to `i`.
    pub(super) fn toward(&self, i: usize, j: usize) -> usize {
        self.toward[[i, j]]
    }

    pub(super) fn into_distances(self) -> Matrix {
        self.dist
    }
}

/// Tree nodes ordered so that every node comes after its parent.
fn preorder(root: usize, pred: &[usize]) -> Vec<usize> {
    let n = pred.len();
    let mut g = DiGraph::<(), ()>::with_capacity(n, n.saturating_sub(1));
    for _ in 0..n {
        g.add_node(());
    }
    for (i, &p) in pred.iter().enumerate().filter(|&(i, _)| i != root) {
        g.add_edge(NodeIndex::new(p), NodeIndex::new(i), ());
    }
    let mut dfs = Dfs::new(&g, NodeIndex::new(root));
    let mut order = Vec::with_capacity(n);
    while let Some(nx) = dfs.next(&g) {
        order.push(nx.index());
    }
    order
}
