use serde::{Deserialize, Serialize};

/// Row-major dense matrix of `f64`, stored flat.
///
/// Classifier weights are `fan_in × fan_out`; a 256×256 RGB input layer
/// has ~200k rows, so rows are kept contiguous instead of nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Builds a matrix from nested rows. Returns `None` when rows are ragged.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Matrix> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != n_cols) {
            return None;
        }
        Some(Matrix { rows: n_rows, cols: n_cols, data: rows.into_iter().flatten().collect() })
    }

    /// True when `data` holds exactly `rows * cols` values. Deserialized
    /// matrices are untrusted until this passes.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.rows * self.cols
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Row vector × matrix: `out[j] = Σ_i v[i] · self[i][j]`.
    ///
    /// Panics if `v.len() != self.rows`.
    pub fn left_mul(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "vector length must equal matrix rows");
        let mut out = vec![0.0; self.cols];
        for (i, &x) in v.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            for (acc, w) in out.iter_mut().zip(self.row(i)) {
                *acc += x * w;
            }
        }
        out
    }
}
