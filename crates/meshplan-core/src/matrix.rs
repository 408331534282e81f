//! Dense matrices as handed over by collaborators.

use ndarray::Array2;

use crate::validate::PreconditionError;

/// A dense cost or traffic matrix.
pub type Matrix = Array2<f64>;

/// Builds a matrix from a row-of-rows representation. Fails if there are no rows, or if the
/// rows do not all have the same length.
pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix, PreconditionError> {
    let nr_rows = rows.len();
    let nr_cols = rows.first().map(Vec::len).unwrap_or(0);
    if nr_rows == 0 || nr_cols == 0 {
        return Err(PreconditionError::Empty { what: "matrix" });
    }
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != nr_cols) {
        return Err(PreconditionError::Ragged {
            row,
            expected: nr_cols,
            got: r.len(),
        });
    }
    let flat = rows.into_iter().flatten().collect::<Vec<_>>();
    Array2::from_shape_vec((nr_rows, nr_cols), flat).map_err(|_| PreconditionError::Empty {
        what: "matrix",
    })
}

/// Returns the largest entry of `m`, or zero if `m` is empty.
pub(crate) fn max_entry(m: &Matrix) -> f64 {
    m.iter().copied().fold(0.0, f64::max)
}

/// Index of the first minimum in `values`. NaNs are never picked unless they come first.
pub(crate) fn argmin(values: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first maximum in `values`.
pub(crate) fn argmax(values: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
