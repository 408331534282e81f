use std::collections::VecDeque;

use crate::matrix::Matrix;

use super::tree::TreeMetric;

/// A node pair to size, and where its overflow goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Pair {
    pub(super) a: usize,
    pub(super) b: usize,
    /// Overflow from `a` to `b` is rerouted `a -> home -> b`. Tree links have no home.
    pub(super) home: Option<usize>,
}

/// Every node pair, ordered so that a pair comes before the two pairs it overflows into.
#[derive(Debug)]
pub(super) struct Sequence {
    order: Vec<Pair>,
}

impl Sequence {
    pub(super) fn new(cost: &Matrix, metric: &TreeMetric) -> Self {
        let n = metric.nr_nodes();
        let key = |x: usize, y: usize| n * x.min(y) + x.max(y);

        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in a + 1..n {
                pairs.push(Pair {
                    a,
                    b,
                    home: home(cost, metric, a, b),
                });
            }
        }

        // `waiting[key(x, y)]` counts the pairs that overflow into `(x, y)` and have not been
        // sized yet.
        let mut waiting = vec![0_usize; n * n];
        let mut slot = vec![usize::MAX; n * n];
        for (idx, pair) in pairs.iter().enumerate() {
            slot[key(pair.a, pair.b)] = idx;
            if let Some(h) = pair.home {
                waiting[key(pair.a, h)] += 1;
                waiting[key(h, pair.b)] += 1;
            }
        }

        let mut queue = pairs
            .iter()
            .filter(|p| waiting[key(p.a, p.b)] == 0)
            .copied()
            .collect::<VecDeque<_>>();
        let mut order = Vec::with_capacity(pairs.len());
        while let Some(pair) = queue.pop_front() {
            order.push(pair);
            let Some(h) = pair.home else {
                continue;
            };
            for k in [key(pair.a, h), key(h, pair.b)] {
                waiting[k] -= 1;
                if waiting[k] == 0 {
                    queue.push_back(pairs[slot[k]]);
                }
            }
        }
        Self { order }
    }

    /// Pairs in sizing order.
    pub(super) fn iter(&self) -> impl Iterator<Item = &Pair> + '_ {
        self.order.iter()
    }

    pub(super) fn pairs(&self) -> Vec<(usize, usize)> {
        self.order.iter().map(|p| (p.a, p.b)).collect()
    }

    pub(super) fn homes(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.order.iter().map(|p| p.home)
    }
}

/// The tree neighbor through which overflow from `a` to `b` is rerouted.
///
/// When `a` and `b` are tree neighbors there is none. Otherwise the candidates are the neighbor
/// of `b` toward `a` and the neighbor of `a` toward `b`; the one giving the cheaper two-hop
/// route wins, the former on ties.
fn home(cost: &Matrix, metric: &TreeMetric, a: usize, b: usize) -> Option<usize> {
    let near_b = metric.toward(a, b);
    if near_b == a {
        return None;
    }
    let near_a = metric.toward(b, a);
    if near_b == near_a {
        return Some(near_b);
    }
    let via = |h: usize| cost[[a, h]] + cost[[h, b]];
    if via(near_b) <= via(near_a) {
        Some(near_b)
    } else {
        Some(near_a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn line_sequence() -> Sequence {
        let cost = testing::four_node_costs();
        let metric = TreeMetric::new(&cost, 1, &[1, 1, 1, 2]);
        Sequence::new(&cost, &metric)
    }

    #[test]
    fn homes_on_a_line() {
        let cost = testing::four_node_costs();
        let metric = TreeMetric::new(&cost, 1, &[1, 1, 1, 2]);
        assert_eq!(home(&cost, &metric, 0, 1), None);
        assert_eq!(home(&cost, &metric, 2, 3), None);
        // Two hops apart, so both candidates agree.
        assert_eq!(home(&cost, &metric, 0, 2), Some(1));
        assert_eq!(home(&cost, &metric, 1, 3), Some(2));
        // 0 -> 1 -> 3 costs 6, 0 -> 2 -> 3 costs 7.
        assert_eq!(home(&cost, &metric, 0, 3), Some(1));
    }

    #[test]
    fn pairs_precede_their_overflow() {
        let sequence = line_sequence();
        assert_eq!(
            sequence.pairs(),
            vec![(0, 2), (0, 3), (0, 1), (1, 3), (1, 2), (2, 3)]
        );
        assert_eq!(
            sequence.homes().collect::<Vec<_>>(),
            vec![Some(1), Some(1), None, Some(2), None, None]
        );
    }

    #[test]
    fn star_tree_routes_through_the_hub() {
        let cost = testing::four_node_costs();
        let metric = TreeMetric::new(&cost, 0, &[0, 0, 0, 0]);
        let sequence = Sequence::new(&cost, &metric);
        let expected = vec![
            Pair { a: 1, b: 2, home: Some(0) },
            Pair { a: 1, b: 3, home: Some(0) },
            Pair { a: 2, b: 3, home: Some(0) },
            Pair { a: 0, b: 1, home: None },
            Pair { a: 0, b: 2, home: None },
            Pair { a: 0, b: 3, home: None },
        ];
        assert_eq!(sequence.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn single_node_has_no_pairs() {
        let cost = ndarray::array![[0.0]];
        let metric = TreeMetric::new(&cost, 0, &[0]);
        assert!(Sequence::new(&cost, &metric).pairs().is_empty());
    }
}
