//! Symmetric pentadiagonal systems.
//!
//! Stores the main diagonal and the first two super-diagonals of a symmetric
//! matrix and solves `A y = b` through an `L D L^T` factorisation, where `L`
//! is unit lower triangular with bandwidth two. Factorisation and solve are
//! both O(n).

use crate::error::{DspError, DspResult};

/// Band storage of a symmetric pentadiagonal matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Pentadiagonal {
    /// `A[i][i]`, length n.
    pub diag: Vec<f64>,
    /// `A[i][i+1]`, length n (last entry unused).
    pub upper1: Vec<f64>,
    /// `A[i][i+2]`, length n (last two entries unused).
    pub upper2: Vec<f64>,
}

/// `L D L^T` factors of a [`Pentadiagonal`] matrix.
#[derive(Clone, Debug)]
pub struct LdlFactors {
    /// Pivots `D[i]`.
    d: Vec<f64>,
    /// `L[i][i-1]`, zero at i = 0.
    l1: Vec<f64>,
    /// `L[i][i-2]`, zero at i < 2.
    l2: Vec<f64>,
}

impl Pentadiagonal {
    /// Zero matrix of order `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            diag: vec![0.0; n],
            upper1: vec![0.0; n],
            upper2: vec![0.0; n],
        }
    }

    /// Identity matrix of order `n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        m.diag.iter_mut().for_each(|d| *d = 1.0);
        m
    }

    /// Order of the matrix.
    #[inline]
    pub fn order(&self) -> usize {
        self.diag.len()
    }

    /// Add `scale * r r^T` for a three-element row `r` placed at columns
    /// `col..col+3`.
    pub fn add_outer3(&mut self, col: usize, r: [f64; 3], scale: f64) {
        for i in 0..3 {
            self.diag[col + i] += scale * r[i] * r[i];
        }
        for i in 0..2 {
            self.upper1[col + i] += scale * r[i] * r[i + 1];
        }
        self.upper2[col] += scale * r[0] * r[2];
    }

    /// Factor as `L D L^T`.
    ///
    /// Fails with [`DspError::NumericalFailure`] on a non-positive or
    /// non-finite pivot, i.e. when the matrix is not positive definite.
    pub fn factor(&self) -> DspResult<LdlFactors> {
        let n = self.order();
        let mut d = vec![0.0; n];
        let mut l1 = vec![0.0; n];
        let mut l2 = vec![0.0; n];

        for i in 0..n {
            if i >= 2 {
                l2[i] = self.upper2[i - 2] / d[i - 2];
            }
            if i >= 1 {
                let mut a = self.upper1[i - 1];
                if i >= 2 {
                    a -= l2[i] * d[i - 2] * l1[i - 1];
                }
                l1[i] = a / d[i - 1];
            }

            let mut pivot = self.diag[i];
            if i >= 1 {
                pivot -= l1[i] * l1[i] * d[i - 1];
            }
            if i >= 2 {
                pivot -= l2[i] * l2[i] * d[i - 2];
            }
            if !(pivot.is_finite() && pivot > f64::EPSILON * self.diag[i].abs()) {
                return Err(DspError::NumericalFailure(format!(
                    "non-positive pivot {:e} at row {} of {}",
                    pivot, i, n
                )));
            }
            d[i] = pivot;
        }

        Ok(LdlFactors { d, l1, l2 })
    }

    /// Solve `A y = b`.
    pub fn solve(&self, b: &[f64]) -> DspResult<Vec<f64>> {
        if b.len() != self.order() {
            return Err(DspError::LengthMismatch {
                expected: self.order(),
                actual: b.len(),
            });
        }
        self.factor()?.solve(b)
    }
}

impl LdlFactors {
    /// Solve `L D L^T y = b` by forward and back substitution.
    pub fn solve(&self, b: &[f64]) -> DspResult<Vec<f64>> {
        let n = self.d.len();
        let mut y = b.to_vec();

        for i in 0..n {
            if i >= 1 {
                y[i] -= self.l1[i] * y[i - 1];
            }
            if i >= 2 {
                y[i] -= self.l2[i] * y[i - 2];
            }
        }
        for i in 0..n {
            y[i] /= self.d[i];
        }
        for i in (0..n).rev() {
            if i + 1 < n {
                y[i] -= self.l1[i + 1] * y[i + 1];
            }
            if i + 2 < n {
                y[i] -= self.l2[i + 2] * y[i + 2];
            }
        }

        if y.iter().any(|v| !v.is_finite()) {
            return Err(DspError::NumericalFailure(
                "banded solve produced a non-finite value".into(),
            ));
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mul_vec(m: &Pentadiagonal, x: &[f64]) -> Vec<f64> {
        let n = m.order();
        (0..n)
            .map(|i| {
                let mut acc = m.diag[i] * x[i];
                if i + 1 < n {
                    acc += m.upper1[i] * x[i + 1];
                }
                if i + 2 < n {
                    acc += m.upper2[i] * x[i + 2];
                }
                if i >= 1 {
                    acc += m.upper1[i - 1] * x[i - 1];
                }
                if i >= 2 {
                    acc += m.upper2[i - 2] * x[i - 2];
                }
                acc
            })
            .collect()
    }

    fn sample_matrix(n: usize) -> Pentadiagonal {
        let mut m = Pentadiagonal::identity(n);
        for col in 0..n.saturating_sub(2) {
            m.add_outer3(col, [1.0, -2.0, 1.0], 3.0);
        }
        m
    }

    #[test]
    fn test_outer_product_bands() {
        let m = sample_matrix(4);
        // Second-difference normal matrix, scaled by 3, plus identity.
        assert_eq!(m.diag, vec![4.0, 16.0, 16.0, 4.0]);
        assert_eq!(&m.upper1[..3], &[-6.0, -12.0, -6.0]);
        assert_eq!(&m.upper2[..2], &[3.0, 3.0]);
    }

    #[test]
    fn test_solve_recovers_rhs() {
        let m = sample_matrix(9);
        let x: Vec<f64> = (0..9).map(|i| (i as f64 * 0.7).sin() + 0.1 * i as f64).collect();
        let b = mul_vec(&m, &x);
        let y = m.solve(&b).unwrap();

        for (a, e) in y.iter().zip(&x) {
            assert_abs_diff_eq!(a, e, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_identity_and_tiny_orders() {
        assert_eq!(Pentadiagonal::identity(1).solve(&[2.5]).unwrap(), vec![2.5]);
        assert_eq!(Pentadiagonal::identity(2).solve(&[1.0, -1.0]).unwrap(), vec![1.0, -1.0]);
        assert!(Pentadiagonal::zeros(0).solve(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_indefinite_matrix_fails() {
        let mut m = Pentadiagonal::identity(3);
        m.diag[1] = -1.0;
        assert!(matches!(m.solve(&[1.0, 1.0, 1.0]), Err(DspError::NumericalFailure(_))));
    }
}
