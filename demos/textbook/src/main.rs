use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use meshplan::{
    core::{backbone, placement, sweep, Matrix, MentorOpts},
    utils::{
        self,
        scenario::{AddScenario, MentorScenario, PonGrid},
        AddReport, MentorReport, Tuning,
    },
};
use rand::prelude::*;

mod data;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place concentrators. Runs the ten-terminal textbook example unless a cost matrix is given
    Add {
        /// Terminal-to-site cost matrix (.txt, .dat, .json or .msgpack)
        #[arg(short, long)]
        cost: Option<PathBuf>,

        /// Site activation costs; defaults to `--site-cost` everywhere but the center
        #[arg(long)]
        sites: Option<PathBuf>,

        /// Activation cost of every site but the center
        #[arg(long, default_value_t = 50.0)]
        site_cost: f64,

        /// Terminal weights; defaults to 1 each
        #[arg(short, long)]
        weights: Option<PathBuf>,

        /// Tuning file (JSON)
        #[arg(short, long)]
        tuning: Option<PathBuf>,
    },

    /// Synthesize a backbone. Runs the ten-city textbook example unless a cost matrix is given
    Mentor {
        /// Node-to-node cost matrix
        #[arg(short, long, requires = "traffic")]
        cost: Option<PathBuf>,

        /// Traffic matrix
        #[arg(short = 'r', long, requires = "cost")]
        traffic: Option<PathBuf>,

        /// Demand between every pair of cities in the textbook example
        #[arg(short, long, default_value_t = 8.0)]
        demand: f64,

        /// Tuning file (JSON)
        #[arg(short, long)]
        tuning: Option<PathBuf>,
    },

    /// Run the textbook example over a range of tree blends and report the cheapest mesh
    Sweep {
        /// Number of blends to try between 0 and 1
        #[arg(short, long, default_value_t = 11)]
        steps: usize,
    },

    /// Place splitters in a passive optical network over a grid of houses
    Pon {
        /// Number of houses
        #[arg(long, default_value_t = 256)]
        houses: usize,

        /// Houses per grid row
        #[arg(long, default_value_t = 16)]
        per_row: usize,

        /// Houses per splitter
        #[arg(long, default_value_t = 16)]
        splitter_size: usize,

        /// Distance between neighboring houses
        #[arg(long, default_value_t = 50.0)]
        spacing: f64,
    },

    /// Run an engine on randomly placed nodes
    Random {
        /// Number of nodes
        #[arg(short, long, default_value_t = 250)]
        nodes: usize,

        /// Random seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Extra cost of opening a concentrator
        #[arg(short, long, default_value_t = 100.0)]
        premium: f64,

        /// Synthesize a backbone instead of placing concentrators
        #[arg(short, long)]
        backbone: bool,

        /// Write the generated cost matrix to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match args.command {
        Command::Add {
            cost,
            sites,
            site_cost,
            weights,
            tuning,
        } => run_add(cost, sites, site_cost, weights, tuning),
        Command::Mentor {
            cost,
            traffic,
            demand,
            tuning,
        } => run_mentor(cost, traffic, demand, tuning),
        Command::Sweep { steps } => run_sweep(steps),
        Command::Pon {
            houses,
            per_row,
            splitter_size,
            spacing,
        } => {
            anyhow::ensure!(houses > 0 && per_row > 0, "the grid must not be empty");
            let grid = PonGrid::builder()
                .houses(houses)
                .per_row(per_row)
                .splitter_size(splitter_size)
                .spacing(spacing)
                .build();
            let s = grid.scenario();
            let p = placement::run(&s.cost, &s.site_cost, &s.weight, &s.opts)?;
            let splitters = p
                .concentrators()
                .into_iter()
                .filter(|&site| site != s.opts.center)
                .count();
            log::info!("{houses} houses share {splitters} splitters");
            println!("{}", AddReport::new(&p));
            Ok(())
        }
        Command::Random {
            nodes,
            seed,
            premium,
            backbone,
            save,
        } => run_random(nodes, seed, premium, backbone, save.as_deref()),
    }
}

fn run_add(
    cost: Option<PathBuf>,
    sites: Option<PathBuf>,
    site_cost: f64,
    weights: Option<PathBuf>,
    tuning: Option<PathBuf>,
) -> anyhow::Result<()> {
    let tuning = match tuning {
        Some(path) => utils::read_tuning(&path)
            .with_context(|| format!("failed to read tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let opts = tuning.add_opts();
    let cost = match cost {
        Some(path) => utils::read_matrix(&path)
            .with_context(|| format!("failed to read costs from {}", path.display()))?,
        None => data::ten_terminal_costs()?,
    };
    let site_cost = match sites {
        Some(path) => utils::read_vector(path)?,
        None => {
            let mut v = vec![site_cost; cost.ncols()];
            if let Some(c) = v.get_mut(opts.center.inner()) {
                *c = 0.0;
            }
            v
        }
    };
    let weight = match weights {
        Some(path) => utils::read_vector(path)?,
        None => vec![1.0; cost.nrows()],
    };
    let p = placement::run(&cost, &site_cost, &weight, &opts)?;
    println!("{}", AddReport::new(&p));
    Ok(())
}

fn run_mentor(
    cost: Option<PathBuf>,
    traffic: Option<PathBuf>,
    demand: f64,
    tuning: Option<PathBuf>,
) -> anyhow::Result<()> {
    let opts = match tuning {
        Some(path) => utils::read_tuning(&path)
            .with_context(|| format!("failed to read tuning from {}", path.display()))?
            .mentor_opts(),
        None => textbook_mentor_opts(),
    };
    let labels: Vec<String>;
    let (cost, traffic) = match (cost, traffic) {
        (Some(c), Some(t)) => {
            labels = Vec::new();
            let cost = utils::read_matrix(&c)
                .with_context(|| format!("failed to read costs from {}", c.display()))?;
            let traffic = utils::read_matrix(&t)
                .with_context(|| format!("failed to read traffic from {}", t.display()))?;
            (cost, traffic)
        }
        _ => {
            anyhow::ensure!(demand >= 0.0, "demand must not be negative");
            labels = data::CITIES.map(String::from).to_vec();
            let cost = data::ten_city_costs()?;
            let traffic = data::uniform_traffic(cost.nrows(), demand);
            (cost, traffic)
        }
    };
    let design = backbone::run(&cost, &traffic, &opts)?;
    log::info!(
        "backbone of {} nodes around median {}",
        design.backbone.len(),
        design.median
    );
    println!("{}", MentorReport::new(&design, &cost).with_labels(&labels));
    Ok(())
}

fn run_sweep(steps: usize) -> anyhow::Result<()> {
    anyhow::ensure!(steps >= 2, "need at least two steps");
    let cost = data::ten_city_costs()?;
    let traffic = data::uniform_traffic(cost.nrows(), 8.0);
    let base = textbook_mentor_opts();
    let opts = (0..steps)
        .map(|i| MentorOpts {
            tree_blend: i as f64 / (steps - 1) as f64,
            ..base.clone()
        })
        .collect();
    let trials = sweep::designs(&cost, &traffic, opts);
    for trial in &trials {
        if let Ok(design) = &trial.outcome {
            println!(
                "blend {:.2}: {} links, cost {}",
                trial.opts.tree_blend,
                design.mesh.len(),
                design.link_cost(&cost)
            );
        }
    }
    let (best_opts, best) = sweep::cheapest(&trials, |d: &backbone::Design| d.link_cost(&cost))
        .ok_or_else(|| anyhow::anyhow!("no run succeeded"))?;
    println!("cheapest at blend {:.2}", best_opts.tree_blend);
    let labels = data::CITIES.map(String::from);
    println!("{}", MentorReport::new(best, &cost).with_labels(&labels));
    Ok(())
}

fn run_random(
    nodes: usize,
    seed: u64,
    premium: f64,
    backbone: bool,
    save: Option<&Path>,
) -> anyhow::Result<()> {
    anyhow::ensure!(nodes > 0, "need at least one node");
    let mut rng = StdRng::seed_from_u64(seed);
    let cost: Matrix = if backbone {
        let s = MentorScenario::random(nodes, 1000.0, 10.0, &mut rng);
        let opts = MentorOpts::builder()
            .weight_threshold(0.95)
            .channel_capacity(1000.0)
            .overflow_slack(0.2)
            .build();
        let design = backbone::run(&s.cost, &s.traffic, &opts)?;
        println!("{}", MentorReport::new(&design, &s.cost));
        s.cost
    } else {
        let s = AddScenario::random(nodes, 1000.0, premium, &mut rng);
        log::info!("center is node {}", s.opts.center);
        let p = placement::run(&s.cost, &s.site_cost, &s.weight, &s.opts)?;
        println!("{}", AddReport::new(&p));
        s.cost
    };
    if let Some(path) = save {
        utils::write_matrix(path, &cost)?;
        log::info!("cost matrix written to {}", path.display());
    }
    Ok(())
}

/// Settings of the ten-city textbook run.
fn textbook_mentor_opts() -> MentorOpts {
    MentorOpts::builder()
        .tree_blend(0.0)
        .channel_capacity(32.0)
        .overflow_slack(0.2)
        .build()
}
