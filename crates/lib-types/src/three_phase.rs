//! Three-phase component sets.
//!
//! A `ThreePhase` holds three aligned component arrays on one time base,
//! stored as a `3 x n` matrix so that column `i` is the triple at sample `i`.
//! The `Basis` tag records which coordinate system the rows are expressed in.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Coordinate system of a three-phase component set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Phase quantities (a, b, c).
    Abc,
    /// Stationary Clarke components (alpha, beta, zero).
    AlphaBetaZero,
    /// Rotating Park components (d, q, zero).
    Dq0,
    /// Symmetrical components (positive, negative, zero).
    Sequence,
}

impl Basis {
    /// Column labels for the three components.
    pub fn labels(&self) -> [&'static str; 3] {
        match self {
            Basis::Abc => ["a", "b", "c"],
            Basis::AlphaBetaZero => ["alpha", "beta", "zero"],
            Basis::Dq0 => ["d", "q", "zero"],
            Basis::Sequence => ["positive", "negative", "zero"],
        }
    }
}

/// Three component arrays aligned with a time base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreePhase {
    /// Sample times in seconds.
    pub time: Vec<f64>,

    /// Basis the components are expressed in.
    pub basis: Basis,

    /// Component matrix, shape `(3, time.len())`.
    pub components: Array2<f64>,
}

impl ThreePhase {
    /// Create a zero-valued component set on the given time base.
    pub fn zeros(time: Vec<f64>, basis: Basis) -> Self {
        let components = Array2::zeros((3, time.len()));
        Self { time, basis, components }
    }

    /// Assemble a component set from three equal-length arrays.
    ///
    /// Returns `None` if any array length differs from `time`.
    pub fn from_components(
        time: Vec<f64>,
        basis: Basis,
        first: &[f64],
        second: &[f64],
        third: &[f64],
    ) -> Option<Self> {
        let n = time.len();
        if first.len() != n || second.len() != n || third.len() != n {
            return None;
        }
        let mut set = Self::zeros(time, basis);
        for (row, values) in [first, second, third].into_iter().enumerate() {
            set.components
                .row_mut(row)
                .iter_mut()
                .zip(values)
                .for_each(|(dst, &v)| *dst = v);
        }
        Some(set)
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.ncols()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The triple at sample `i`.
    pub fn sample(&self, i: usize) -> [f64; 3] {
        let col = self.components.index_axis(Axis(1), i);
        [col[0], col[1], col[2]]
    }

    /// Write the triple at sample `i`.
    pub fn set_sample(&mut self, i: usize, value: [f64; 3]) {
        for (k, v) in value.into_iter().enumerate() {
            self.components[[k, i]] = v;
        }
    }

    /// Copy the three components out as plain vectors.
    pub fn to_vecs(&self) -> [Vec<f64>; 3] {
        [0, 1, 2].map(|k| self.components.row(k).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_components_layout() {
        let set = ThreePhase::from_components(
            vec![0.0, 1.0],
            Basis::Abc,
            &[1.0, 2.0],
            &[3.0, 4.0],
            &[5.0, 6.0],
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.sample(1), [2.0, 4.0, 6.0]);
        assert_eq!(set.to_vecs()[2], vec![5.0, 6.0]);
    }

    #[test]
    fn test_from_components_rejects_ragged() {
        let set = ThreePhase::from_components(
            vec![0.0, 1.0],
            Basis::Abc,
            &[1.0],
            &[3.0, 4.0],
            &[5.0, 6.0],
        );
        assert!(set.is_none());
    }

    #[test]
    fn test_set_sample_roundtrip() {
        let mut set = ThreePhase::zeros(vec![0.0, 0.1, 0.2], Basis::Dq0);
        set.set_sample(2, [1.0, -1.0, 0.5]);

        assert_eq!(set.sample(2), [1.0, -1.0, 0.5]);
        assert_eq!(set.to_vecs()[1], vec![0.0, 0.0, -1.0]);
        assert_eq!(set.basis.labels(), ["d", "q", "zero"]);
    }

    #[test]
    fn test_basis_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Basis::AlphaBetaZero).unwrap(), "\"alpha_beta_zero\"");
        let basis: Basis = serde_json::from_str("\"dq0\"").unwrap();
        assert_eq!(basis, Basis::Dq0);
    }
}
