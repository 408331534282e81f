//! Concentrator placement with the ADD heuristic (Kershenbaum, _Telecommunications Network
//! Design Algorithms_, 1993).
//!
//! Every terminal starts out homed on the central site. Each round prices every unopened
//! site: the cost of opening it plus the savings obtained by moving terminals onto it, best
//! savings first, within the site's capacity. The most profitable site is opened and the round
//! repeats until no site yields a saving.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::{
    constants::{COST_TOLERANCE, DEFAULT_CAPACITY_LIMIT},
    ident::SiteId,
    matrix::Matrix,
    observe::{Event, LogObserver, Observer, Phase},
    validate::{self, PreconditionError},
};

/// Placement options.
#[derive(Debug, Clone, PartialEq, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AddOpts {
    /// The central site. It is always open and costs nothing to open.
    #[builder(default)]
    pub center: SiteId,
    /// Total terminal weight a single concentrator can take.
    #[builder(default = DEFAULT_CAPACITY_LIMIT)]
    pub capacity_limit: f64,
    /// A terminal already moved off the center only moves again if the extra saving exceeds
    /// this threshold.
    #[builder(default)]
    pub move_threshold: f64,
}

impl Default for AddOpts {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The outcome of a placement run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Connection costs plus the activation costs of the sites in use.
    pub total_cost: f64,
    /// The cost of homing every terminal on the center.
    pub baseline_cost: f64,
    /// The central site.
    pub center: SiteId,
    /// The site each terminal is homed on, indexed by terminal.
    pub association: Vec<SiteId>,
}

impl Placement {
    /// The sites with at least one terminal. The center is among them only if some terminal
    /// stayed on it.
    pub fn concentrators(&self) -> BTreeSet<SiteId> {
        self.association.iter().copied().collect()
    }

    /// The number of terminals homed on each site in use.
    pub fn terminals_per_site(&self) -> BTreeMap<SiteId, usize> {
        self.association.iter().copied().counts().into_iter().collect()
    }

    /// The total terminal weight homed on each site in use.
    pub fn load_per_site(&self, weight: &[f64]) -> FxHashMap<SiteId, f64> {
        let mut loads = FxHashMap::default();
        for (&site, &w) in self.association.iter().zip(weight) {
            *loads.entry(site).or_insert(0.0) += w;
        }
        loads
    }

    /// The terminals homed on `site`.
    pub fn terminals_at(&self, site: SiteId) -> impl Iterator<Item = usize> + '_ {
        self.association
            .iter()
            .positions(move |&s| s == site)
    }
}

/// Runs ADD, reporting progress through the [`log`] facade.
///
/// `cost` is an N x M terminal-to-site matrix, `site_cost` holds the M activation costs and
/// `weight` the N terminal loads.
pub fn run(
    cost: &Matrix,
    site_cost: &[f64],
    weight: &[f64],
    opts: &AddOpts,
) -> Result<Placement, Error> {
    run_with(cost, site_cost, weight, opts, LogObserver)
}

/// Runs ADD, reporting progress to `observer`.
pub fn run_with<O: Observer>(
    cost: &Matrix,
    site_cost: &[f64],
    weight: &[f64],
    opts: &AddOpts,
    mut observer: O,
) -> Result<Placement, Error> {
    let problem = Problem::new(cost, site_cost, weight, opts)?;
    observer.observe(&Event::Started(Phase::Placement));
    let mut state = State::new(&problem);
    let baseline_cost = state.total;

    let mut unopened = (0..problem.nr_sites())
        .map(SiteId::new)
        .filter(|&s| s != opts.center)
        .collect::<Vec<_>>();
    while !unopened.is_empty() {
        // The first site with the most negative expense wins.
        let mut best: Option<(usize, Plan)> = None;
        for (i, &site) in unopened.iter().enumerate() {
            let plan = state.plan(site);
            observer.observe(&Event::SiteEvaluated {
                site,
                expense: plan.expense,
            });
            let to_beat = best.as_ref().map_or(0.0, |(_, b)| b.expense);
            if plan.expense < to_beat {
                best = Some((i, plan));
            }
        }
        let Some((i, plan)) = best else {
            observer.observe(&Event::NoMoreSavings { total: state.total });
            break;
        };
        let site = unopened.remove(i);
        state.commit(plan);
        observer.observe(&Event::SiteOpened {
            site,
            total: state.total,
        });
    }

    state.check()?;
    observer.observe(&Event::Finished(Phase::Placement));
    Ok(Placement {
        total_cost: state.total,
        baseline_cost,
        center: opts.center,
        association: state.assoc,
    })
}

/// Validated inputs.
#[derive(Debug)]
struct Problem<'a> {
    cost: &'a Matrix,
    site_cost: &'a [f64],
    weight: &'a [f64],
    center: usize,
    capacity_limit: f64,
    move_threshold: f64,
}

impl<'a> Problem<'a> {
    /// Correctness properties:
    ///
    /// - `cost` is a non-empty N x M matrix with no negative or NaN entries.
    /// - `site_cost` has M non-negative entries and `weight` has N positive entries.
    /// - The center is a valid site, is free to open, and every terminal reaches it at a finite
    ///   cost.
    fn new(
        cost: &'a Matrix,
        site_cost: &'a [f64],
        weight: &'a [f64],
        opts: &AddOpts,
    ) -> Result<Self, PreconditionError> {
        validate::non_empty("cost", cost)?;
        validate::entries("cost", cost, true)?;
        let (nr_terminals, nr_sites) = cost.dim();
        validate::same_len("site_cost", nr_sites, site_cost.len())?;
        validate::values("site_cost", site_cost)?;
        validate::same_len("weight", nr_terminals, weight.len())?;
        if let Some((terminal, &weight)) = weight
            .iter()
            .enumerate()
            .find(|(_, &w)| !(w > 0.0 && w.is_finite()))
        {
            return Err(PreconditionError::NonPositiveWeight { terminal, weight });
        }
        validate::positive("capacity_limit", opts.capacity_limit)?;
        validate::non_negative("move_threshold", opts.move_threshold)?;

        let center = opts.center;
        if center.inner() >= nr_sites {
            return Err(PreconditionError::CenterOutOfRange { center, nr_sites });
        }
        if site_cost[center.inner()] != 0.0 {
            return Err(PreconditionError::CenterNotFree {
                center,
                cost: site_cost[center.inner()],
            });
        }
        if let Some(terminal) = cost
            .column(center.inner())
            .iter()
            .position(|c| !c.is_finite())
        {
            return Err(PreconditionError::CenterUnreachable { terminal, center });
        }
        Ok(Self {
            cost,
            site_cost,
            weight,
            center: center.inner(),
            capacity_limit: opts.capacity_limit,
            move_threshold: opts.move_threshold,
        })
    }

    fn nr_terminals(&self) -> usize {
        self.cost.nrows()
    }

    fn nr_sites(&self) -> usize {
        self.cost.ncols()
    }
}

/// The terminals a site would take if it were opened, and the net cost of opening it.
#[derive(Debug)]
struct Plan {
    site: SiteId,
    expense: f64,
    moves: Vec<usize>,
}

#[derive(Debug)]
struct State<'a> {
    problem: &'a Problem<'a>,
    assoc: Vec<SiteId>,
    total: f64,
}

impl<'a> State<'a> {
    fn new(problem: &'a Problem<'a>) -> Self {
        let center = problem.center;
        let total = problem.cost.column(center).sum() + problem.site_cost[center];
        Self {
            problem,
            assoc: vec![SiteId::new(center); problem.nr_terminals()],
            total,
        }
    }

    /// Prices `site` without touching the association. Evaluation and commit both go through
    /// here, so the terminals a site is credited with are exactly the ones it receives.
    fn plan(&self, site: SiteId) -> Plan {
        let Problem {
            cost,
            site_cost,
            weight,
            center,
            capacity_limit,
            move_threshold,
        } = *self.problem;
        let c = site.inner();
        let mut savings = self
            .assoc
            .iter()
            .enumerate()
            .filter_map(|(t, cur)| {
                let delta = cost[[t, c]] - cost[[t, cur.inner()]];
                (delta < 0.0).then_some((t, delta))
            })
            .collect::<Vec<_>>();
        // Stable, so equal savings keep terminal order.
        savings.sort_by_key(|&(_, delta)| OrderedFloat(delta));

        let mut expense = site_cost[c];
        let mut slack = capacity_limit;
        let mut moves = Vec::new();
        for (t, delta) in savings {
            let movable = self.assoc[t].inner() == center || delta + move_threshold < 0.0;
            // Too heavy for what is left; lighter terminals further down may still fit.
            if movable && weight[t] <= slack {
                expense += delta;
                slack -= weight[t];
                moves.push(t);
            }
        }

        // A site left without terminals no longer pays for itself.
        let mut remaining = self.assoc.iter().copied().counts();
        for &t in &moves {
            let from = self.assoc[t];
            if let Some(n) = remaining.get_mut(&from) {
                *n -= 1;
                if *n == 0 {
                    expense -= site_cost[from.inner()];
                }
            }
        }
        Plan {
            site,
            expense,
            moves,
        }
    }

    fn commit(&mut self, plan: Plan) {
        for t in plan.moves {
            self.assoc[t] = plan.site;
        }
        self.total += plan.expense;
    }

    /// Recomputes the total from scratch and compares it with the running total.
    fn check(&self) -> Result<(), Error> {
        let Problem {
            cost, site_cost, ..
        } = *self.problem;
        let connections = self
            .assoc
            .iter()
            .enumerate()
            .map(|(t, s)| cost[[t, s.inner()]])
            .sum::<f64>();
        let activations = self
            .assoc
            .iter()
            .unique()
            .map(|s| site_cost[s.inner()])
            .sum::<f64>();
        let recomputed = connections + activations;
        let scale = recomputed.abs().max(self.total.abs()).max(1.0);
        if (recomputed - self.total).abs() > COST_TOLERANCE * scale {
            return Err(Error::Consistency {
                tracked: self.total,
                recomputed,
            });
        }
        Ok(())
    }
}

/// Placement error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The inputs are malformed.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The running total drifted away from the cost of the final association.
    #[error("cost discrepancy: tracked {tracked}, recomputed {recomputed}")]
    Consistency {
        /// The incrementally maintained total.
        tracked: f64,
        /// The total recomputed from the association.
        recomputed: f64,
    },
}
