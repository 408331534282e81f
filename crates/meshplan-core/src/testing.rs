use ndarray::{array, Array2};

use crate::matrix::Matrix;

/// 6 terminals, 4 sites, unit weights. Site 0 is the center.
pub(crate) fn six_terminal_config() -> (Matrix, Vec<f64>, Vec<f64>) {
    let cost = array![
        [2.0, 1.0, 2.0, 4.0],
        [1.0, 0.0, 1.0, 2.0],
        [4.0, 1.0, 2.0, 2.0],
        [1.0, 2.0, 1.0, 2.0],
        [2.0, 3.0, 2.0, 0.0],
        [4.0, 4.0, 3.0, 2.0],
    ];
    (cost, vec![0.0, 2.0, 2.0, 2.0], vec![1.0; 6])
}

/// 10 terminals and 11 sites. Column 0 is the center; column `t + 1` sits on terminal `t`.
/// Every other site costs 50 to open.
pub(crate) fn ten_terminal_config() -> (Matrix, Vec<f64>, Vec<f64>) {
    let cost = array![
        [36., 0., 15., 78., 45., 65., 87., 80., 26., 19., 68.],
        [46., 15., 0., 80., 55., 58., 82., 72., 31., 30., 72.],
        [109., 78., 80., 0., 46., 45., 38., 48., 52., 62., 13.],
        [67., 45., 55., 46., 0., 64., 74., 76., 26., 26., 33.],
        [102., 65., 58., 45., 64., 0., 24., 14., 48., 61., 48.],
        [122., 87., 82., 38., 74., 24., 0., 15., 65., 78., 47.],
        [116., 80., 72., 48., 76., 14., 15., 0., 61., 75., 54.],
        [58., 26., 31., 52., 26., 48., 65., 61., 0., 13., 41.],
        [46., 19., 30., 62., 26., 61., 78., 75., 13., 0., 51.],
        [97., 68., 72., 13., 33., 48., 47., 54., 41., 51., 0.],
    ];
    let mut site_cost = vec![50.0; 11];
    site_cost[0] = 0.0;
    (cost, site_cost, vec![1.0; 10])
}

/// Four nodes on a rough line, 0 - 1 - 2 - 3.
pub(crate) fn four_node_costs() -> Matrix {
    array![
        [0.0, 1.0, 4.0, 6.0],
        [1.0, 0.0, 2.0, 5.0],
        [4.0, 2.0, 0.0, 3.0],
        [6.0, 5.0, 3.0, 0.0],
    ]
}

/// One unit of demand in each direction between every pair of distinct nodes.
pub(crate) fn uniform_traffic(n: usize, amount: f64) -> Matrix {
    Array2::from_shape_fn((n, n), |(i, j)| if i == j { 0.0 } else { amount })
}

/// Ten US cities. The diagonal holds a nominal 1000, as in the textbook data.
pub(crate) fn ten_city_costs() -> Matrix {
    array![
        [1000., 8308., 3130., 5242., 1231., 2440., 8275., 5101., 5731., 7396.],
        [8308., 1000., 6199., 5104., 8137., 6910., 1309., 4699., 4597., 2062.],
        [3130., 6199., 1000., 3802., 2989., 1708., 6187., 3394., 4129., 5332.],
        [5242., 5104., 3802., 1000., 5017., 4294., 4927., 1672., 1567., 4042.],
        [1231., 8137., 2989., 5017., 1000., 2320., 8098., 4888., 5509., 7213.],
        [2440., 6910., 1708., 4294., 2320., 1000., 6895., 3976., 4690., 6037.],
        [8275., 1309., 6187., 4927., 8098., 6895., 1000., 4558., 4402., 1915.],
        [5101., 4699., 3394., 1672., 4888., 3976., 4558., 1000., 1747., 3646.],
        [5731., 4597., 4129., 1567., 5509., 4690., 4402., 1747., 1000., 3538.],
        [7396., 2062., 5332., 4042., 7213., 6037., 1915., 3646., 3538., 1000.],
    ]
}

/// Five nodes whose minimum spanning tree and shortest-path tree from node 0 differ.
pub(crate) fn five_node_costs() -> Matrix {
    array![
        [0.0, 2.0, 3.0, 9.0, 9.0],
        [2.0, 0.0, 2.0, 9.0, 9.0],
        [3.0, 2.0, 0.0, 2.0, 4.0],
        [9.0, 9.0, 2.0, 0.0, 2.0],
        [9.0, 9.0, 4.0, 2.0, 0.0],
    ]
}
