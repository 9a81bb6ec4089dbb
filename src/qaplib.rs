//! QAPLib instance and solution files.
//!
//! Instance files (`.dat`) hold the size `n` followed by two `n×n` integer
//! matrices. Rows may be wrapped over several text lines and blank lines are
//! insignificant. Which matrix comes first is not consistent across the
//! library, hence the `distances_first` switch.
//!
//! Solution files (`.sln`) hold `n` and the optimal cost, then the optimal
//! permutation, usually 1-based.
//!
//! See <https://coral.ise.lehigh.edu/data-sets/qaplib/>.

use crate::error::{QapError, Result};
use crate::problem::{validate_permutation, Matrix, QapProblem};
use std::path::Path;

/// A known optimal solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QapSolution {
    pub n: usize,
    pub cost: i64,
    /// 0-based permutation.
    pub permutation: Vec<usize>,
}

/// Non-blank lines with their 1-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_value<T: std::str::FromStr>(token: &str, line: usize) -> Result<T> {
    token.parse().map_err(|_| QapError::Parse {
        line,
        message: format!("not an integer: {token:?}"),
    })
}

/// Reads one `n×n` matrix from the line stream, joining wrapped rows.
fn read_matrix<'a, I>(n: usize, lines: &mut I) -> Result<Matrix>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut rows = Vec::with_capacity(n);
    let mut row: Vec<i64> = Vec::with_capacity(n);
    let mut last_line = 0;

    while rows.len() < n {
        let Some((line_no, line)) = lines.next() else {
            return Err(QapError::Parse {
                line: last_line,
                message: format!("expected {n} rows, found {}", rows.len()),
            });
        };
        last_line = line_no;
        for token in line.split_whitespace() {
            row.push(parse_value(token, line_no)?);
        }
        if row.len() > n {
            return Err(QapError::Parse {
                line: line_no,
                message: format!("row has more than {n} values"),
            });
        }
        if row.len() == n {
            rows.push(std::mem::replace(&mut row, Vec::with_capacity(n)));
        }
    }

    Matrix::from_rows(rows)
}

/// Parses instance text into `(n, distances, flows)`.
///
/// `distances_first` tells which of the two matrices holds distances.
pub fn parse_instance(text: &str, distances_first: bool) -> Result<(usize, Matrix, Matrix)> {
    let mut lines = content_lines(text);
    let (line_no, header) = lines.next().ok_or(QapError::Parse {
        line: 0,
        message: "empty instance".into(),
    })?;
    let n: usize = parse_value(header, line_no)?;

    let first = read_matrix(n, &mut lines)?;
    let second = read_matrix(n, &mut lines)?;

    if distances_first {
        Ok((n, first, second))
    } else {
        Ok((n, second, first))
    }
}

/// Parses solution text. 1-based permutations are shifted to 0-based.
pub fn parse_solution(text: &str) -> Result<QapSolution> {
    let mut lines = content_lines(text);
    let (line_no, header) = lines.next().ok_or(QapError::Parse {
        line: 0,
        message: "empty solution".into(),
    })?;
    let mut fields = header.split_whitespace();
    let (Some(n), Some(cost)) = (fields.next(), fields.next()) else {
        return Err(QapError::Parse {
            line: line_no,
            message: "expected `n cost` header".into(),
        });
    };
    let n: usize = parse_value(n, line_no)?;
    let cost: i64 = parse_value(cost, line_no)?;

    let mut permutation: Vec<usize> = Vec::with_capacity(n);
    for (line_no, line) in lines {
        for token in line.split_whitespace() {
            permutation.push(parse_value(token, line_no)?);
        }
    }
    if permutation.iter().max() == Some(&n) {
        for gene in &mut permutation {
            *gene = gene.checked_sub(1).ok_or_else(|| {
                QapError::InvalidPermutation("mixes 0-based and 1-based values".into())
            })?;
        }
    }
    validate_permutation(&permutation, n)?;

    Ok(QapSolution {
        n,
        cost,
        permutation,
    })
}

/// Loads an instance file into a problem using the default objective.
pub fn load_instance(path: impl AsRef<Path>, distances_first: bool) -> Result<QapProblem> {
    let text = std::fs::read_to_string(path)?;
    let (n, distances, flows) = parse_instance(&text, distances_first)?;
    QapProblem::new(n, distances, flows)
}

/// Loads a solution file.
pub fn load_solution(path: impl AsRef<Path>) -> Result<QapSolution> {
    let text = std::fs::read_to_string(path)?;
    parse_solution(&text)
}
