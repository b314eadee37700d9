//! Inline matrix and vector parsing.
//!
//! Rows are separated by `;`, entries by `,` or whitespace:
//! `"4, 1; 2, 3"` is a 2x2 matrix and `"1 2"` a 2-vector.

use anyhow::{Context, Result, bail};
use nalgebra::{DMatrix, DVector};

fn parse_row(row: &str, row_idx: usize) -> Result<Vec<f64>> {
    row.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .enumerate()
        .map(|(col, tok)| {
            tok.parse::<f64>()
                .with_context(|| format!("row {}, column {}: invalid number '{}'", row_idx + 1, col + 1, tok))
        })
        .collect()
}

/// Parse a matrix such as `"4,1;2,3"`.
pub fn parse_matrix(text: &str) -> Result<DMatrix<f64>> {
    let rows: Vec<Vec<f64>> = text
        .split(';')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .enumerate()
        .map(|(i, r)| parse_row(r, i))
        .collect::<Result<_>>()?;

    if rows.is_empty() {
        bail!("matrix is empty");
    }
    let ncols = rows[0].len();
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        bail!(
            "row {} has {} entries, expected {}",
            i + 1,
            row.len(),
            ncols
        );
    }

    Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}

/// Parse a vector such as `"1,2"`.
pub fn parse_vector(text: &str) -> Result<DVector<f64>> {
    let values = parse_row(text.trim(), 0)?;
    if values.is_empty() {
        bail!("vector is empty");
    }
    Ok(DVector::from_vec(values))
}
