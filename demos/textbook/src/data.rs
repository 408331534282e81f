use meshplan::core::{matrix, Matrix};

/// Ten terminals and eleven candidate sites. Site 0 is the center; site `t + 1` sits on
/// terminal `t`.
pub fn ten_terminal_costs() -> anyhow::Result<Matrix> {
    let rows = vec![
        vec![36., 0., 15., 78., 45., 65., 87., 80., 26., 19., 68.],
        vec![46., 15., 0., 80., 55., 58., 82., 72., 31., 30., 72.],
        vec![109., 78., 80., 0., 46., 45., 38., 48., 52., 62., 13.],
        vec![67., 45., 55., 46., 0., 64., 74., 76., 26., 26., 33.],
        vec![102., 65., 58., 45., 64., 0., 24., 14., 48., 61., 48.],
        vec![122., 87., 82., 38., 74., 24., 0., 15., 65., 78., 47.],
        vec![116., 80., 72., 48., 76., 14., 15., 0., 61., 75., 54.],
        vec![58., 26., 31., 52., 26., 48., 65., 61., 0., 13., 41.],
        vec![46., 19., 30., 62., 26., 61., 78., 75., 13., 0., 51.],
        vec![97., 68., 72., 13., 33., 48., 47., 54., 41., 51., 0.],
    ];
    Ok(matrix::from_rows(rows)?)
}

pub const CITIES: [&str; 10] = [
    "NYK", "LSA", "CHI", "HOU", "PHL", "DET", "SDG", "DAL", "SAN", "PHX",
];

/// Costs between ten US cities. The diagonal is a nominal 1000.
pub fn ten_city_costs() -> anyhow::Result<Matrix> {
    let rows = vec![
        vec![1000., 8308., 3130., 5242., 1231., 2440., 8275., 5101., 5731., 7396.],
        vec![8308., 1000., 6199., 5104., 8137., 6910., 1309., 4699., 4597., 2062.],
        vec![3130., 6199., 1000., 3802., 2989., 1708., 6187., 3394., 4129., 5332.],
        vec![5242., 5104., 3802., 1000., 5017., 4294., 4927., 1672., 1567., 4042.],
        vec![1231., 8137., 2989., 5017., 1000., 2320., 8098., 4888., 5509., 7213.],
        vec![2440., 6910., 1708., 4294., 2320., 1000., 6895., 3976., 4690., 6037.],
        vec![8275., 1309., 6187., 4927., 8098., 6895., 1000., 4558., 4402., 1915.],
        vec![5101., 4699., 3394., 1672., 4888., 3976., 4558., 1000., 1747., 3646.],
        vec![5731., 4597., 4129., 1567., 5509., 4690., 4402., 1747., 1000., 3538.],
        vec![7396., 2062., 5332., 4042., 7213., 6037., 1915., 3646., 3538., 1000.],
    ];
    Ok(matrix::from_rows(rows)?)
}

/// The same demand in both directions between every pair of distinct nodes.
pub fn uniform_traffic(n: usize, demand: f64) -> Matrix {
    Matrix::from_shape_fn((n, n), |(i, j)| if i == j { 0.0 } else { demand })
}
