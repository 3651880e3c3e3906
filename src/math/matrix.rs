use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{check_dims, RangerError, Result};
use crate::math::random::sample_standard_normal;
use crate::math::vector::Vector;

/// Dense row-major matrix assembled from row or column vectors.
///
/// `data` holds `rows` rows of `cols` entries each; decoding rejects any
/// other shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    #[serde(serialize_with = "crate::math::finite::nested")]
    pub data: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = RangerError;

    fn try_from(raw: RawMatrix) -> Result<Matrix> {
        if raw.data.len() != raw.rows || raw.data.iter().any(|r| r.len() != raw.cols) {
            return Err(RangerError::MalformedSerializedForm(format!(
                "matrix declared {}x{} does not match its data",
                raw.rows, raw.cols
            )));
        }
        Ok(Matrix {
            rows: raw.rows,
            cols: raw.cols,
            data: raw.data,
        })
    }
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Samples every entry from N(0, std_dev).
    pub fn random_normal<R: Rng + ?Sized>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for x in row.iter_mut() {
                *x = sample_standard_normal(rng) * std_dev;
            }
        }
        res
    }

    /// Callers must pass rectangular data; use `add_row_vector` to build
    /// a matrix incrementally with size checks.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map(|r| r.len()).unwrap_or(0),
            data,
        }
    }

    pub fn add_row_vector(&mut self, row: &Vector) -> Result<&mut Matrix> {
        if self.rows > 0 {
            check_dims(self.cols, row.size())?;
        } else {
            self.cols = row.size();
        }
        self.data.push(row.entries().to_vec());
        self.rows += 1;
        Ok(self)
    }

    pub fn add_column_vector(&mut self, column: &Vector) -> Result<&mut Matrix> {
        if self.cols > 0 {
            check_dims(self.rows, column.size())?;
        } else {
            self.rows = column.size();
            self.data = vec![Vec::new(); column.size()];
        }
        for (row, x) in self.data.iter_mut().zip(column.entries()) {
            row.push(*x);
        }
        self.cols += 1;
        Ok(self)
    }

    pub fn row(&self, i: usize) -> Option<Vector> {
        self.data.get(i).map(|r| Vector::new(r.clone()))
    }

    pub fn column(&self, j: usize) -> Option<Vector> {
        if j >= self.cols {
            return None;
        }
        Some(Vector::new(self.data.iter().map(|r| r[j]).collect()))
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|x| functor(*x)).collect())
                .collect(),
        }
    }

    pub fn times_vector(&self, v: &Vector) -> Result<Vector> {
        check_dims(self.cols, v.size())?;
        Ok(Vector::new(
            self.data
                .iter()
                .map(|row| row.iter().zip(v.entries()).map(|(a, b)| a * b).sum())
                .collect(),
        ))
    }

    pub fn plus(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, |a, b| a + b)
    }

    pub fn minus(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, |a, b| a - b)
    }

    pub fn times(&self, rhs: &Matrix) -> Result<Matrix> {
        check_dims(self.cols, rhs.rows)?;

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        check_dims(self.rows, rhs.rows)?;
        check_dims(self.cols, rhs.cols)?;
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(ra, rb)| ra.iter().zip(rb.iter()).map(|(a, b)| op(*a, *b)).collect())
                .collect(),
        })
    }
}
