use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{check_dims, RangerError, Result};
use crate::math::matrix::Matrix;

/// An ordered sequence of reals. Arithmetic never mutates its operands.
///
/// Equality is exact, entry by entry. Use `approx_eq` when comparing the
/// output of numeric algorithms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    #[serde(serialize_with = "crate::math::finite::seq")]
    entries: Vec<f64>,
}

impl Vector {
    pub fn new(entries: Vec<f64>) -> Vector {
        Vector { entries }
    }

    pub fn zeros(size: usize) -> Vector {
        Vector::new(vec![0.0; size])
    }

    pub fn ones(size: usize) -> Vector {
        Vector::new(vec![1.0; size])
    }

    /// The `n`-th standard basis vector of the given size.
    pub fn basis_vector(n: usize, size: usize) -> Vector {
        Vector::from_function(size, |i| if i == n { 1.0 } else { 0.0 })
    }

    pub fn from_function<F>(size: usize, mapping: F) -> Vector
    where
        F: Fn(usize) -> f64,
    {
        Vector::new((0..size).map(mapping).collect())
    }

    /// Builds a vector by mapping each object to one entry.
    pub fn from_mapped<T, F>(objects: &[T], mapping: F) -> Vector
    where
        F: Fn(&T) -> f64,
    {
        Vector::new(objects.iter().map(mapping).collect())
    }

    pub fn scale(&self, c: f64) -> Vector {
        Vector::new(self.entries.iter().map(|x| x * c).collect())
    }

    pub fn plus(&self, that: &Vector) -> Result<Vector> {
        self.zip_with(that, |a, b| a + b)
    }

    pub fn minus(&self, that: &Vector) -> Result<Vector> {
        self.zip_with(that, |a, b| a - b)
    }

    /// Elementwise product.
    pub fn otimes(&self, that: &Vector) -> Result<Vector> {
        self.zip_with(that, |a, b| a * b)
    }

    pub fn dot(&self, that: &Vector) -> Result<f64> {
        check_dims(self.size(), that.size())?;
        Ok(self.entries.iter().zip(that.entries.iter()).map(|(a, b)| a * b).sum())
    }

    pub fn magnitude(&self) -> f64 {
        self.entries.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    pub fn distance(&self, that: &Vector) -> Result<f64> {
        Ok(self.minus(that)?.magnitude())
    }

    /// Converts a singleton vector to its sole entry.
    pub fn to_scalar(&self) -> Result<f64> {
        match self.entries.as_slice() {
            [only] => Ok(*only),
            _ => Err(RangerError::NotScalar(self.size())),
        }
    }

    /// True when both vectors have the same size and every entry differs
    /// by at most `eps`.
    pub fn approx_eq(&self, that: &Vector, eps: f64) -> bool {
        self.size() == that.size()
            && self.entries.iter().zip(that.entries.iter()).all(|(a, b)| (a - b).abs() <= eps)
    }

    pub fn add_entry(&mut self, d: f64) -> &mut Vector {
        self.entries.push(d);
        self
    }

    pub fn get_entry(&self, i: usize) -> Option<f64> {
        self.entries.get(i).copied()
    }

    pub fn set_entry(&mut self, i: usize, val: f64) -> Result<()> {
        let size = self.size();
        match self.entries.get_mut(i) {
            Some(slot) => {
                *slot = val;
                Ok(())
            }
            None => Err(RangerError::DimensionMismatch { left: size, right: i + 1 }),
        }
    }

    pub fn remove(&mut self, i: usize) -> Result<f64> {
        if i < self.size() {
            Ok(self.entries.remove(i))
        } else {
            Err(RangerError::DimensionMismatch { left: self.size(), right: i + 1 })
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[f64] {
        &self.entries
    }

    pub fn as_row_matrix(&self) -> Matrix {
        Matrix::from_data(vec![self.entries.clone()])
    }

    pub fn as_column_matrix(&self) -> Matrix {
        Matrix::from_data(self.entries.iter().map(|x| vec![*x]).collect())
    }

    fn zip_with<F>(&self, that: &Vector, op: F) -> Result<Vector>
    where
        F: Fn(f64, f64) -> f64,
    {
        check_dims(self.size(), that.size())?;
        Ok(Vector::new(
            self.entries.iter().zip(that.entries.iter()).map(|(a, b)| op(*a, *b)).collect(),
        ))
    }
}

impl From<Vec<f64>> for Vector {
    fn from(entries: Vec<f64>) -> Self {
        Vector::new(entries)
    }
}

impl From<&[f64]> for Vector {
    fn from(entries: &[f64]) -> Self {
        Vector::new(entries.to_vec())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body: Vec<String> = self.entries.iter().map(|x| format!("{:.2}", x)).collect();
        write!(f, "[{}]", body.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_json, to_json};

    fn v(entries: &[f64]) -> Vector {
        Vector::from(entries)
    }

    #[test]
    fn plus_then_minus_restores_operand() {
        let a = v(&[1.0, -2.0, 3.0, 40.0]);
        let b = v(&[5.0, 6.0, -7.0, 0.5]);
        assert_eq!(a.plus(&b).unwrap().minus(&b).unwrap(), a);
        assert_eq!(a.dot(&b).unwrap(), b.dot(&a).unwrap());
    }

    #[test]
    fn arithmetic_rejects_mismatched_sizes() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[1.0, 2.0, 3.0]);
        for result in [a.plus(&b), a.minus(&b), a.otimes(&b)] {
            assert!(matches!(
                result,
                Err(RangerError::DimensionMismatch { left: 2, right: 3 })
            ));
        }
        assert!(a.dot(&b).is_err());
        assert!(a.distance(&b).is_err());
    }

    #[test]
    fn constructors() {
        assert_eq!(Vector::zeros(3), v(&[0.0, 0.0, 0.0]));
        assert_eq!(Vector::ones(2), v(&[1.0, 1.0]));
        assert_eq!(Vector::basis_vector(1, 3), v(&[0.0, 1.0, 0.0]));
        assert_eq!(Vector::from_function(3, |i| i as f64 * 2.0), v(&[0.0, 2.0, 4.0]));
        assert_eq!(Vector::from_mapped(&["a", "bb"], |s| s.len() as f64), v(&[1.0, 2.0]));
    }

    #[test]
    fn scale_otimes_do_not_mutate() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[3.0, 4.0]);
        assert_eq!(a.scale(-2.0), v(&[-2.0, -4.0]));
        assert_eq!(a.otimes(&b).unwrap(), v(&[3.0, 8.0]));
        assert_eq!(a, v(&[1.0, 2.0]));
    }

    #[test]
    fn distance_and_magnitude() {
        let a = v(&[3.0, 4.0]);
        assert_eq!(a.magnitude(), 5.0);
        assert_eq!(a.distance(&a).unwrap(), 0.0);
        assert_eq!(a.distance(&Vector::zeros(2)).unwrap(), 5.0);
        assert!(Vector::zeros(0).magnitude() >= 0.0);
    }

    #[test]
    fn to_scalar_requires_exactly_one_entry() {
        assert_eq!(v(&[7.5]).to_scalar().unwrap(), 7.5);
        assert!(matches!(Vector::zeros(0).to_scalar(), Err(RangerError::NotScalar(0))));
        assert!(matches!(v(&[1.0, 2.0]).to_scalar(), Err(RangerError::NotScalar(2))));
    }

    #[test]
    fn exact_and_approximate_equality() {
        let a = v(&[0.1 + 0.2]);
        let b = v(&[0.3]);
        assert_ne!(a, b);
        assert!(a.approx_eq(&b, 1e-12));
        assert!(!a.approx_eq(&v(&[0.3, 0.0]), 1.0));
    }

    #[test]
    fn entry_mutation() {
        let mut a = Vector::zeros(0);
        a.add_entry(1.0).add_entry(2.0);
        a.set_entry(0, 5.0).unwrap();
        assert!(a.set_entry(2, 1.0).is_err());
        assert_eq!(a.remove(1).unwrap(), 2.0);
        assert_eq!(a.get_entry(0), Some(5.0));
        assert_eq!(a.get_entry(1), None);
    }

    #[test]
    fn display_format() {
        assert_eq!(Vector::zeros(0).to_string(), "[]");
        assert_eq!(v(&[1.0, 0.256]).to_string(), "[1.00, 0.26]");
    }

    #[test]
    fn serializes_as_plain_array() {
        let a = v(&[1.5, -2.0, 0.0]);
        let json = to_json(Some(&a)).unwrap();
        assert_eq!(json, serde_json::json!([1.5, -2.0, 0.0]));
        let back: Option<Vector> = from_json(Some(&json)).unwrap();
        assert_eq!(back, Some(a));
        let absent: Option<Vector> = from_json(Some(&serde_json::Value::Null)).unwrap();
        assert!(absent.is_none());
    }

    #[test]
    fn non_finite_entries_refuse_to_encode() {
        for x in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(
                to_json(Some(&v(&[x, 1.0]))),
                Err(RangerError::Unencodable(_))
            ));
        }
    }

    #[test]
    fn row_and_column_matrices() {
        let a = v(&[1.0, 2.0, 3.0]);
        let row = a.as_row_matrix();
        let col = a.as_column_matrix();
        assert_eq!((row.rows, row.cols), (1, 3));
        assert_eq!((col.rows, col.cols), (3, 1));
        assert_eq!(row.transpose(), col);
    }
}
