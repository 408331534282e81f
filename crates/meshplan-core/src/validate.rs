//! Input checks shared by both engines. Every check runs before any work is done, so a failed
//! precondition never leaves a partially computed result behind.

use ndarray::Array2;

use crate::ident::SiteId;

/// A malformed input or an out-of-range tuning parameter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreconditionError {
    /// A matrix or vector has no entries.
    #[error("{what} is empty")]
    Empty {
        /// The offending input.
        what: &'static str,
    },

    /// A row-of-rows matrix has rows of different lengths.
    #[error("row {row} has {got} entries (expected {expected})")]
    Ragged {
        /// The first row with the wrong length.
        row: usize,
        /// The length of the first row.
        expected: usize,
        /// The length of `row`.
        got: usize,
    },

    /// An input's length does not line up with another input.
    #[error("{what} has length {got} (expected {expected})")]
    DimensionMismatch {
        /// The offending input.
        what: &'static str,
        /// The required length.
        expected: usize,
        /// The actual length.
        got: usize,
    },

    /// A matrix that must be square is not.
    #[error("{what} is {rows}x{cols} (expected a square matrix)")]
    NotSquare {
        /// The offending matrix.
        what: &'static str,
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// A matrix entry is negative.
    #[error("{what}[{row}][{col}] is negative ({value})")]
    NegativeEntry {
        /// The offending matrix.
        what: &'static str,
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
        /// The entry.
        value: f64,
    },

    /// A matrix entry is NaN, or infinite where no sentinel is allowed.
    #[error("{what}[{row}][{col}] is not a finite number ({value})")]
    NonFiniteEntry {
        /// The offending matrix.
        what: &'static str,
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
        /// The entry.
        value: f64,
    },

    /// The center is not a column of the cost matrix.
    #[error("center {center} is out of range ({nr_sites} sites)")]
    CenterOutOfRange {
        /// The requested center.
        center: SiteId,
        /// Number of candidate sites.
        nr_sites: usize,
    },

    /// Some terminal cannot reach the center at a finite cost.
    #[error("terminal {terminal} has no finite cost to center {center}")]
    CenterUnreachable {
        /// The stranded terminal.
        terminal: usize,
        /// The center.
        center: SiteId,
    },

    /// A vector entry is negative or NaN.
    #[error("{what}[{index}] must be a non-negative number (got {value})")]
    InvalidValue {
        /// The offending input.
        what: &'static str,
        /// Index of the entry.
        index: usize,
        /// The entry.
        value: f64,
    },

    /// The demand on a link needs more channels than can be counted.
    #[error("link {a}-{b} needs {channels} channels")]
    TooManyChannels {
        /// One end of the link.
        a: usize,
        /// The other end.
        b: usize,
        /// The channels it would need.
        channels: f64,
    },

    /// The center must be free to open.
    #[error("center {center} has activation cost {cost} (expected 0)")]
    CenterNotFree {
        /// The center.
        center: SiteId,
        /// Its activation cost.
        cost: f64,
    },

    /// Terminal weights must be positive.
    #[error("terminal {terminal} has non-positive weight {weight}")]
    NonPositiveWeight {
        /// The terminal.
        terminal: usize,
        /// Its weight.
        weight: f64,
    },

    /// A capacity must be a positive, finite number.
    #[error("{what} must be positive (got {value})")]
    NonPositiveCapacity {
        /// The offending parameter.
        what: &'static str,
        /// Its value.
        value: f64,
    },

    /// A fraction lies outside `[0, 1]`.
    #[error("{what} must lie in [0, 1] (got {value})")]
    FractionOutOfRange {
        /// The offending parameter.
        what: &'static str,
        /// Its value.
        value: f64,
    },

    /// A threshold must be a non-negative number.
    #[error("{what} must be non-negative (got {value})")]
    NegativeThreshold {
        /// The offending parameter.
        what: &'static str,
        /// Its value.
        value: f64,
    },
}

pub(crate) fn non_empty(what: &'static str, m: &Array2<f64>) -> Result<(), PreconditionError> {
    if m.is_empty() {
        return Err(PreconditionError::Empty { what });
    }
    Ok(())
}

pub(crate) fn square(what: &'static str, m: &Array2<f64>) -> Result<usize, PreconditionError> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(PreconditionError::NotSquare { what, rows, cols });
    }
    Ok(rows)
}

pub(crate) fn same_len(
    what: &'static str,
    expected: usize,
    got: usize,
) -> Result<(), PreconditionError> {
    if expected != got {
        return Err(PreconditionError::DimensionMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

/// Every entry must be non-negative and not NaN. Infinite entries pass only when
/// `allow_infinite` is set.
pub(crate) fn entries(
    what: &'static str,
    m: &Array2<f64>,
    allow_infinite: bool,
) -> Result<(), PreconditionError> {
    for ((row, col), &value) in m.indexed_iter() {
        if value.is_nan() || (!allow_infinite && value.is_infinite()) {
            return Err(PreconditionError::NonFiniteEntry {
                what,
                row,
                col,
                value,
            });
        }
        if value < 0.0 {
            return Err(PreconditionError::NegativeEntry {
                what,
                row,
                col,
                value,
            });
        }
    }
    Ok(())
}

/// Every entry must be non-negative and not NaN. Infinities pass.
pub(crate) fn values(what: &'static str, v: &[f64]) -> Result<(), PreconditionError> {
    match v.iter().position(|&x| x.is_nan() || x < 0.0) {
        Some(index) => Err(PreconditionError::InvalidValue {
            what,
            index,
            value: v[index],
        }),
        None => Ok(()),
    }
}

pub(crate) fn positive(what: &'static str, value: f64) -> Result<(), PreconditionError> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(PreconditionError::NonPositiveCapacity { what, value });
    }
    Ok(())
}

pub(crate) fn fraction(what: &'static str, value: f64) -> Result<(), PreconditionError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(PreconditionError::FractionOutOfRange { what, value });
    }
    Ok(())
}

pub(crate) fn non_negative(what: &'static str, value: f64) -> Result<(), PreconditionError> {
    if value.is_nan() || value < 0.0 {
        return Err(PreconditionError::NegativeThreshold { what, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn nan_entry_fails() {
        let m = array![[0.0, f64::NAN], [1.0, 0.0]];
        let res = entries("cost", &m, true);
        assert!(matches!(
            res,
            Err(PreconditionError::NonFiniteEntry { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn infinite_entry_respects_flag() {
        let m = array![[0.0, f64::INFINITY], [1.0, 0.0]];
        assert!(entries("cost", &m, true).is_ok());
        assert!(matches!(
            entries("cost", &m, false),
            Err(PreconditionError::NonFiniteEntry { .. })
        ));
    }

    #[test]
    fn negative_entry_fails() {
        let m = array![[0.0, 2.0], [-1.0, 0.0]];
        assert!(matches!(
            entries("traffic", &m, false),
            Err(PreconditionError::NegativeEntry { row: 1, col: 0, .. })
        ));
    }

    #[test]
    fn vector_entries_checked() {
        assert!(values("site_cost", &[0.0, 2.0, f64::INFINITY]).is_ok());
        assert_eq!(
            values("site_cost", &[0.0, -1.0]),
            Err(PreconditionError::InvalidValue {
                what: "site_cost",
                index: 1,
                value: -1.0
            })
        );
        assert!(matches!(
            values("site_cost", &[f64::NAN]),
            Err(PreconditionError::InvalidValue { index: 0, .. })
        ));
    }

    #[test]
    fn ranges_checked() {
        assert!(fraction("tree_blend", 0.0).is_ok());
        assert!(fraction("tree_blend", 1.0).is_ok());
        assert!(fraction("tree_blend", 1.5).is_err());
        assert!(fraction("tree_blend", f64::NAN).is_err());
        assert!(positive("channel_capacity", 0.0).is_err());
        assert!(positive("channel_capacity", f64::INFINITY).is_err());
        assert!(non_negative("move_threshold", -0.1).is_err());
    }
}
