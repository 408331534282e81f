//! Reading and writing matrices and vectors.
//!
//! The format follows the file extension:
//!
//! - `.txt`, `.dat`: whitespace-delimited text, one row per line. Blank lines are skipped and
//!   `inf` marks a missing link.
//! - `.json`: an array of rows. `null` marks a missing link.
//! - `.msgpack`: an array of rows in MessagePack.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use meshplan_core::{constants::NO_LINK, matrix, Matrix};

use crate::Error;

enum Format {
    Text,
    Json,
    MsgPack,
}

impl Format {
    fn of(path: &Path) -> Result<Self, Error> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("txt" | "dat") => Ok(Self::Text),
            Some("json") => Ok(Self::Json),
            Some("msgpack") => Ok(Self::MsgPack),
            _ => Err(Error::UnknownFileType(path.into())),
        }
    }
}

/// Reads a matrix from a file.
pub fn read_matrix(path: impl AsRef<Path>) -> Result<Matrix, Error> {
    let path = path.as_ref();
    let rows = match Format::of(path)? {
        Format::Text => parse_rows(&std::fs::read_to_string(path)?)?,
        Format::Json => {
            let contents = std::fs::read_to_string(path)?;
            let rows: Vec<Vec<Option<f64>>> = serde_json::from_str(&contents)?;
            rows.into_iter()
                .map(|row| row.into_iter().map(|x| x.unwrap_or(NO_LINK)).collect())
                .collect()
        }
        Format::MsgPack => {
            let reader = BufReader::new(File::open(path)?);
            rmp_serde::decode::from_read(reader)?
        }
    };
    let m = matrix::from_rows(rows)?;
    log::debug!(
        "read a {}x{} matrix from {}",
        m.nrows(),
        m.ncols(),
        path.display()
    );
    Ok(m)
}

/// Reads a vector from a file. In text files the entries may be spread over any number of
/// lines.
pub fn read_vector(path: impl AsRef<Path>) -> Result<Vec<f64>, Error> {
    let path = path.as_ref();
    let v = match Format::of(path)? {
        Format::Text => parse_rows(&std::fs::read_to_string(path)?)?
            .into_iter()
            .flatten()
            .collect(),
        Format::Json => {
            let contents = std::fs::read_to_string(path)?;
            let v: Vec<Option<f64>> = serde_json::from_str(&contents)?;
            v.into_iter().map(|x| x.unwrap_or(NO_LINK)).collect()
        }
        Format::MsgPack => {
            let reader = BufReader::new(File::open(path)?);
            rmp_serde::decode::from_read(reader)?
        }
    };
    Ok(v)
}

/// Writes a matrix to a file, in the format given by the extension.
pub fn write_matrix(path: impl AsRef<Path>, m: &Matrix) -> Result<(), Error> {
    let path = path.as_ref();
    let format = Format::of(path)?;
    let rows = m
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect::<Vec<_>>();
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        Format::Text => {
            for row in &rows {
                let line = row.iter().map(f64::to_string).collect::<Vec<_>>();
                writeln!(writer, "{}", line.join(" "))?;
            }
        }
        Format::Json => serde_json::to_writer(&mut writer, &rows)?,
        Format::MsgPack => rmp_serde::encode::write(&mut writer, &rows)?,
    }
    writer.flush()?;
    Ok(())
}

/// Parses whitespace-delimited rows of numbers.
pub fn parse_rows(s: &str) -> Result<Vec<Vec<f64>>, Error> {
    s.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.split_whitespace()
                .enumerate()
                .map(|(j, token)| {
                    token.parse::<f64>().map_err(|_| Error::Parse {
                        line: i + 1,
                        column: j + 1,
                        token: token.to_owned(),
                    })
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use anyhow::Context;
    use ndarray::array;

    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) -> anyhow::Result<std::path::PathBuf> {
        let path = dir.join(name);
        let mut f = File::create(&path).context("failed to create file")?;
        f.write_all(contents.as_bytes())?;
        Ok(path)
    }

    #[test]
    fn text_skips_blank_lines_and_accepts_inf() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_file(dir.path(), "cost.txt", "1 2 inf\n\n  4 5 6  \n")?;
        let m = read_matrix(&path)?;
        assert_eq!(m, array![[1.0, 2.0, NO_LINK], [4.0, 5.0, 6.0]]);
        Ok(())
    }

    #[test]
    fn text_reports_bad_tokens() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_file(dir.path(), "cost.dat", "1 2\n3 x\n")?;
        match read_matrix(&path) {
            Err(Error::Parse {
                line,
                column,
                token,
            }) => {
                assert_eq!((line, column), (2, 2));
                assert_eq!(token, "x");
            }
            other => anyhow::bail!("expected a parse error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn ragged_rows_are_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_file(dir.path(), "cost.txt", "1 2 3\n4 5\n")?;
        assert!(matches!(read_matrix(&path), Err(Error::Matrix(_))));
        Ok(())
    }

    #[test]
    fn json_null_is_no_link() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_file(dir.path(), "cost.json", "[[0, null], [3.5, 0]]")?;
        assert_eq!(read_matrix(&path)?, array![[0.0, NO_LINK], [3.5, 0.0]]);
        Ok(())
    }

    #[test]
    fn written_matrices_read_back() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let m = array![[0.0, 1.5, NO_LINK], [2.0, 0.0, 7.0]];
        for name in ["m.txt", "m.json", "m.msgpack"] {
            let path = dir.path().join(name);
            write_matrix(&path, &m)?;
            assert_eq!(read_matrix(&path)?, m, "{name}");
        }
        Ok(())
    }

    #[test]
    fn vectors_span_lines() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_file(dir.path(), "w.txt", "1 2\n3\n")?;
        assert_eq!(read_vector(&path)?, vec![1.0, 2.0, 3.0]);
        let path = write_file(dir.path(), "w.json", "[0, 50, 50]")?;
        assert_eq!(read_vector(&path)?, vec![0.0, 50.0, 50.0]);
        Ok(())
    }

    #[test]
    fn unknown_extension_fails() {
        assert!(matches!(
            read_matrix("cost.csv"),
            Err(Error::UnknownFileType(_))
        ));
    }
}
