//! Synthetic inputs for both engines.

use meshplan_core::{constants::NO_LINK, AddOpts, Matrix, SiteId};
use rand::Rng;

/// A point in the plane.
pub type Point = (f64, f64);

/// `n` points drawn uniformly from the unit square.
pub fn random_positions(n: usize, rng: &mut impl Rng) -> Vec<Point> {
    (0..n).map(|_| (rng.gen(), rng.gen())).collect()
}

/// Costs that grow with the square root of the Manhattan distance:
/// `round(sqrt(|dx| + |dy|) * base)`.
pub fn sqrt_manhattan_costs(positions: &[Point], base: f64) -> Matrix {
    let n = positions.len();
    Matrix::from_shape_fn((n, n), |(i, j)| {
        let (x1, y1) = positions[i];
        let (x2, y2) = positions[j];
        (((x1 - x2).abs() + (y1 - y2).abs()).sqrt() * base).round()
    })
}

/// The position closest to `target`, first one on ties.
pub fn nearest_to(positions: &[Point], target: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &(x, y)) in positions.iter().enumerate() {
        let d = (x - target.0).powi(2) + (y - target.1).powi(2);
        if best.map_or(true, |(_, lowest)| d < lowest) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Site activation costs for sites co-located with the terminals: reaching the center from the
/// site plus a fixed premium. The center itself is free.
pub fn access_site_costs(cost: &Matrix, center: usize, premium: f64) -> Vec<f64> {
    (0..cost.nrows())
        .map(|i| {
            if i == center {
                0.0
            } else {
                cost[[i, center]] + premium
            }
        })
        .collect()
}

/// Everything a placement run needs.
#[derive(Debug, Clone)]
pub struct AddScenario {
    /// Where the terminals are.
    pub positions: Vec<Point>,
    /// Terminal-to-site costs.
    pub cost: Matrix,
    /// Site activation costs.
    pub site_cost: Vec<f64>,
    /// Terminal weights.
    pub weight: Vec<f64>,
    /// Placement options.
    pub opts: AddOpts,
}

impl AddScenario {
    /// `n` unit-weight terminals in the unit square, each a candidate site. The terminal nearest
    /// the middle of the square is the center.
    pub fn random(n: usize, base: f64, premium: f64, rng: &mut impl Rng) -> Self {
        let positions = random_positions(n, rng);
        let cost = sqrt_manhattan_costs(&positions, base);
        let center = nearest_to(&positions, (0.5, 0.5)).unwrap_or(0);
        let site_cost = access_site_costs(&cost, center, premium);
        Self {
            positions,
            cost,
            site_cost,
            weight: vec![1.0; n],
            opts: AddOpts::builder().center(SiteId::new(center)).build(),
        }
    }
}

/// A passive optical network laid over a grid of houses. Every house is a candidate splitter
/// site; an extra site in the middle stands for the central office.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct PonGrid {
    /// Number of houses.
    #[builder(default = 256)]
    pub houses: usize,
    /// Houses per grid row.
    #[builder(default = 16)]
    pub per_row: usize,
    /// Houses a splitter can serve.
    #[builder(default = 16)]
    pub splitter_size: usize,
    /// Distance between neighboring houses.
    #[builder(default = 50.0)]
    pub spacing: f64,
}

impl PonGrid {
    /// The farthest a house may be from its splitter.
    pub fn reach(&self) -> f64 {
        self.splitter_size as f64 * self.spacing
    }

    /// Builds the placement scenario.
    ///
    /// House-to-house costs are Manhattan distances, or [`NO_LINK`] beyond the splitter reach.
    /// Every house reaches the central office at twice the reach. Opening a splitter also costs
    /// twice the reach.
    pub fn scenario(&self) -> AddScenario {
        let n = self.houses;
        let per_row = self.per_row.max(1);
        let reach = self.reach();
        let mut positions = (0..n)
            .map(|i| ((i % per_row) as f64, (i / per_row) as f64))
            .collect::<Vec<_>>();
        let cost = Matrix::from_shape_fn((n, n + 1), |(i, j)| {
            if j == n {
                return 2.0 * reach;
            }
            let (x1, y1) = positions[i];
            let (x2, y2) = positions[j];
            let d = ((x1 - x2).abs() + (y1 - y2).abs()) * self.spacing;
            if d > reach {
                NO_LINK
            } else {
                d
            }
        });
        let half = per_row as f64 / 2.0;
        positions.push((half, half));
        let mut site_cost = vec![2.0 * reach; n + 1];
        site_cost[n] = 0.0;
        AddScenario {
            positions,
            cost,
            site_cost,
            weight: vec![1.0; n],
            opts: AddOpts::builder()
                .center(SiteId::new(n))
                .capacity_limit(self.splitter_size as f64)
                .build(),
        }
    }
}

/// Everything a backbone run needs.
#[derive(Debug, Clone)]
pub struct MentorScenario {
    /// Where the nodes are.
    pub positions: Vec<Point>,
    /// Node-to-node costs.
    pub cost: Matrix,
    /// Demands.
    pub traffic: Matrix,
}

impl MentorScenario {
    /// `n` nodes in the unit square with costs from [`sqrt_manhattan_costs`] and uniform random
    /// demands below `max_demand` between every ordered pair.
    pub fn random(n: usize, base: f64, max_demand: f64, rng: &mut impl Rng) -> Self {
        let positions = random_positions(n, rng);
        let cost = sqrt_manhattan_costs(&positions, base);
        let traffic = Matrix::from_shape_fn((n, n), |_| rng.gen::<f64>() * max_demand);
        Self {
            positions,
            cost,
            traffic,
        }
    }
}
