use crate::{matrix::Matrix, validate::PreconditionError};

use super::{sequence::Sequence, MentorOpts};

/// Links sized in whole channels.
#[derive(Debug, Default)]
pub(super) struct Mesh {
    pub(super) links: Vec<(usize, usize)>,
    pub(super) channels: Vec<u32>,
}

/// Sizes every pair of `sequence` in turn.
///
/// A pair gets one channel per full `channel_capacity` of its heavier direction. The leftover
/// gets one more channel if it is at least `(1 - overflow_slack) * channel_capacity`, or if the
/// pair is a tree link with any leftover at all. Otherwise the leftover in each direction is added to the demand of the
/// two pairs on the route through the home node, which are sized later.
///
/// Fails if a link would need more channels than a `u32` holds.
pub(super) fn compress(
    traffic: &Matrix,
    sequence: &Sequence,
    opts: &MentorOpts,
) -> Result<Mesh, PreconditionError> {
    let cap = opts.channel_capacity;
    let keep = (1.0 - opts.overflow_slack) * cap;
    let mut req = traffic.clone();
    let mut mesh = Mesh::default();
    for pair in sequence.iter() {
        let (a, b) = (pair.a, pair.b);
        let load = req[[a, b]].max(req[[b, a]]);
        let mut full = (load / cap).floor();
        let rest = load - full * cap;
        match pair.home {
            Some(h) if rest < keep => {
                let ab = (req[[a, b]] - full * cap).max(0.0);
                let ba = (req[[b, a]] - full * cap).max(0.0);
                req[[a, h]] += ab;
                req[[h, b]] += ab;
                req[[b, h]] += ba;
                req[[h, a]] += ba;
            }
            Some(_) => full += 1.0,
            None if rest > 0.0 || rest >= keep => full += 1.0,
            None => {}
        }
        if full > f64::from(u32::MAX) {
            return Err(PreconditionError::TooManyChannels { a, b, channels: full });
        }
        if full > 0.0 {
            mesh.links.push((a, b));
            mesh.channels.push(full as u32);
        }
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backbone::tree::TreeMetric, testing};

    fn line(traffic: &Matrix, opts: &MentorOpts) -> Mesh {
        let cost = testing::four_node_costs();
        let metric = TreeMetric::new(&cost, 1, &[1, 1, 1, 2]);
        let sequence = Sequence::new(&cost, &metric);
        compress(traffic, &sequence, opts).unwrap()
    }

    #[test]
    fn overflow_moves_onto_the_tree() {
        let traffic = testing::uniform_traffic(4, 1.0);
        let opts = MentorOpts::builder().channel_capacity(2.0).build();
        let mesh = line(&traffic, &opts);
        assert_eq!(mesh.links, vec![(0, 1), (1, 3), (1, 2), (2, 3)]);
        assert_eq!(mesh.channels, vec![2, 1, 1, 1]);
    }

    #[test]
    fn large_leftover_keeps_a_channel() {
        // A leftover of 1 out of 2 clears the bar once the slack reaches one half.
        let traffic = testing::uniform_traffic(4, 1.0);
        let opts = MentorOpts::builder()
            .channel_capacity(2.0)
            .overflow_slack(0.5)
            .build();
        let mesh = line(&traffic, &opts);
        assert_eq!(
            mesh.links,
            vec![(0, 2), (0, 3), (0, 1), (1, 3), (1, 2), (2, 3)]
        );
        assert_eq!(mesh.channels, vec![1; 6]);
    }

    #[test]
    fn direct_demand_fills_whole_channels() {
        let mut traffic = Matrix::zeros((4, 4));
        traffic[[0, 3]] = 5.0;
        traffic[[3, 0]] = 1.0;
        let opts = MentorOpts::builder().channel_capacity(2.0).build();
        let mesh = line(&traffic, &opts);
        // Two full channels on 0-3; the leftover 1 and nothing back goes through 1, then on
        // toward 3 through 2.
        assert_eq!(mesh.links, vec![(0, 3), (0, 1), (1, 2), (2, 3)]);
        assert_eq!(mesh.channels, vec![2, 1, 1, 1]);
    }

    #[test]
    fn full_slack_keeps_every_pair() {
        // With the whole channel as slack even an empty pair rounds up, tree links included.
        let opts = MentorOpts::builder().overflow_slack(1.0).build();
        let mesh = line(&Matrix::zeros((4, 4)), &opts);
        assert_eq!(
            mesh.links,
            vec![(0, 2), (0, 3), (0, 1), (1, 3), (1, 2), (2, 3)]
        );
        assert_eq!(mesh.channels, vec![1; 6]);
    }

    #[test]
    fn uncountable_channels_fail() {
        let cost = testing::four_node_costs();
        let metric = TreeMetric::new(&cost, 1, &[1, 1, 1, 2]);
        let sequence = Sequence::new(&cost, &metric);
        let mut traffic = Matrix::zeros((4, 4));
        traffic[[0, 1]] = 1e10;
        let res = compress(&traffic, &sequence, &MentorOpts::default());
        assert_eq!(
            res.err(),
            Some(PreconditionError::TooManyChannels {
                a: 0,
                b: 1,
                channels: 1e10
            })
        );
    }

    #[test]
    fn no_demand_no_links() {
        let mesh = line(&Matrix::zeros((4, 4)), &MentorOpts::default());
        assert!(mesh.links.is_empty());
        assert!(mesh.channels.is_empty());
    }
}
