//! Utilities for interfacing with meshplan: reading matrices and tuning from files, printing
//! results, and generating synthetic scenarios.

#![warn(unreachable_pub, missing_debug_implementations, missing_docs)]

use std::path::PathBuf;

pub mod config;
pub mod load;
pub mod report;
pub mod scenario;

pub use config::{read_tuning, Tuning};
pub use load::{read_matrix, read_vector, write_matrix};
pub use report::{AddReport, MentorReport};

/// Error kinds for loading and saving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown file type.
    #[error("unknown file type: {0}")]
    UnknownFileType(PathBuf),

    /// A token in a text matrix is not a number.
    #[error("line {line}, column {column}: cannot parse {token:?} as a number")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// 1-based column number, counted in tokens.
        column: usize,
        /// The offending token.
        token: String,
    },

    /// Error serializing/deserializing JSON.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Error deserializing MsgPack.
    #[error("MsgPack error")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// Error serializing MsgPack.
    #[error("MsgPack error")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// I/O error.
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// The data does not form a valid matrix.
    #[error("invalid matrix")]
    Matrix(#[from] meshplan_core::PreconditionError),
}
