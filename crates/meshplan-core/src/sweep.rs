//! Parameter sweeps. Runs share the input matrices read-only and are otherwise independent, so
//! they are spread over the rayon thread pool.

use rayon::prelude::*;

use crate::{
    backbone::{self, Design, MentorOpts},
    matrix::Matrix,
    observe::Silent,
    placement::{self, AddOpts, Placement},
};

/// The options of one run and what came of them.
#[derive(Debug, Clone, derive_new::new)]
pub struct Trial<O, R> {
    /// Options the run was given.
    pub opts: O,
    /// The run's result.
    pub outcome: R,
}

/// A placement trial.
pub type PlacementTrial = Trial<AddOpts, Result<Placement, placement::Error>>;

/// A backbone trial.
pub type DesignTrial = Trial<MentorOpts, Result<Design, backbone::Error>>;

/// Runs ADD once per option set. Results come back in the order of `opts`.
pub fn placements(
    cost: &Matrix,
    site_cost: &[f64],
    weight: &[f64],
    opts: Vec<AddOpts>,
) -> Vec<PlacementTrial> {
    opts.into_par_iter()
        .map(|o| {
            let outcome = placement::run_with(cost, site_cost, weight, &o, Silent);
            Trial::new(o, outcome)
        })
        .collect()
}

/// Runs MENTOR once per option set. Results come back in the order of `opts`.
pub fn designs(cost: &Matrix, traffic: &Matrix, opts: Vec<MentorOpts>) -> Vec<DesignTrial> {
    opts.into_par_iter()
        .map(|o| {
            let outcome = backbone::run_with(cost, traffic, &o, Silent);
            Trial::new(o, outcome)
        })
        .collect()
}

/// The successful trial with the lowest cost, first one on ties.
pub fn cheapest<O, T, E, F>(trials: &[Trial<O, Result<T, E>>], cost: F) -> Option<(&O, &T)>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<(&O, &T, f64)> = None;
    for trial in trials {
        let Ok(result) = &trial.outcome else {
            continue;
        };
        let c = cost(result);
        if best.map_or(true, |(_, _, lowest)| c < lowest) {
            best = Some((&trial.opts, result, c));
        }
    }
    best.map(|(o, r, _)| (o, r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{testing, validate::PreconditionError};

    #[test]
    fn placement_sweep_matches_single_runs() -> anyhow::Result<()> {
        let (cost, site_cost, weight) = testing::six_terminal_config();
        let opts = [1.0, 2.0, 3.0, 6.0]
            .into_iter()
            .map(|cap| AddOpts::builder().capacity_limit(cap).build())
            .collect::<Vec<_>>();
        let trials = placements(&cost, &site_cost, &weight, opts.clone());
        assert_eq!(trials.len(), opts.len());
        for (trial, o) in trials.iter().zip(&opts) {
            assert_eq!(&trial.opts, o);
            let alone = placement::run_with(&cost, &site_cost, &weight, o, Silent)?;
            assert_eq!(trial.outcome.as_ref().ok(), Some(&alone));
        }
        Ok(())
    }

    #[test]
    fn failures_stay_with_their_options() {
        let (cost, site_cost, weight) = testing::six_terminal_config();
        let opts = vec![
            AddOpts::default(),
            AddOpts::builder().capacity_limit(0.0).build(),
        ];
        let trials = placements(&cost, &site_cost, &weight, opts);
        assert!(trials[0].outcome.is_ok());
        assert!(matches!(
            trials[1].outcome,
            Err(placement::Error::Precondition(
                PreconditionError::NonPositiveCapacity { .. }
            ))
        ));
    }

    #[test]
    fn design_sweep_picks_the_cheapest() -> anyhow::Result<()> {
        let cost = testing::four_node_costs();
        let traffic = testing::uniform_traffic(4, 1.0);
        let opts = [0.0, 0.5, 1.0]
            .into_iter()
            .map(|blend| {
                MentorOpts::builder()
                    .tree_blend(blend)
                    .channel_capacity(2.0)
                    .build()
            })
            .collect::<Vec<_>>();
        let trials = designs(&cost, &traffic, opts);
        for trial in &trials {
            let alone = backbone::run_with(&cost, &traffic, &trial.opts, Silent)?;
            assert_eq!(trial.outcome.as_ref().ok(), Some(&alone));
        }
        let (best_opts, best) =
            cheapest(&trials, |d: &Design| d.link_cost(&cost)).ok_or(anyhow::anyhow!("none"))?;
        for trial in &trials {
            if let Ok(d) = &trial.outcome {
                assert!(best.link_cost(&cost) <= d.link_cost(&cost));
            }
        }
        assert!(trials.iter().any(|t| &t.opts == best_opts));
        Ok(())
    }

    #[test]
    fn cheapest_skips_failures() {
        let trials: Vec<Trial<u8, Result<f64, ()>>> = vec![
            Trial::new(0, Err(())),
            Trial::new(1, Ok(3.0)),
            Trial::new(2, Ok(2.0)),
            Trial::new(3, Ok(2.0)),
        ];
        assert_eq!(cheapest(&trials, |&c| c), Some((&2, &2.0)));
        assert_eq!(cheapest::<u8, f64, (), _>(&[], |&c| c), None);
    }
}
