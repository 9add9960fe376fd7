use nalgebra::{DMatrix, DVector};

use crate::{
    Error,
    linear::{check_length, pad_weights, resolve_n_components},
};

/// An affine subspace: an origin plus orthonormal directions.
///
/// Components are stored as the rows of a K×N matrix. Both models keep one
/// of these; they differ only in how the origin and components are found.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Basis {
    origin: DVector<f64>,
    components: DMatrix<f64>,
}

impl Basis {
    pub(crate) fn new(origin: DVector<f64>, components: DMatrix<f64>) -> Self {
        debug_assert_eq!(origin.len(), components.ncols());
        Self { origin, components }
    }

    /// Keeps the origin and the first `n_components` directions.
    pub(crate) fn truncated(self, n_components: usize) -> Self {
        Self {
            components: self.components.rows(0, n_components).into_owned(),
            origin: self.origin,
        }
    }

    pub(crate) fn origin(&self) -> &DVector<f64> {
        &self.origin
    }

    pub(crate) fn components(&self) -> &DMatrix<f64> {
        &self.components
    }

    pub(crate) fn n_components(&self) -> usize {
        self.components.nrows()
    }

    pub(crate) fn n_features(&self) -> usize {
        self.origin.len()
    }

    /// `origin + Σ wᵢ·componentᵢ`, with missing trailing weights taken as zero.
    pub(crate) fn instance(&self, weights: &[f64]) -> Result<DVector<f64>, Error> {
        let weights = pad_weights(weights, self.n_components())?;
        Ok(&self.origin + self.components.tr_mul(&weights))
    }

    /// Coordinates of `vector - origin` along each component.
    pub(crate) fn project(&self, vector: &DVector<f64>) -> Result<DVector<f64>, Error> {
        check_length(vector, self.n_features())?;
        Ok(&self.components * (vector - &self.origin))
    }

    /// `vector` minus its offset from the origin along the first `n` components.
    pub(crate) fn project_out(
        &self,
        vector: &DVector<f64>,
        n_components: usize,
    ) -> Result<DVector<f64>, Error> {
        check_length(vector, self.n_features())?;
        let n = resolve_n_components(Some(n_components), self.n_components())?;

        let leading = self.components.rows(0, n);
        let weights = &leading * (vector - &self.origin);
        Ok(vector - leading.tr_mul(&weights))
    }

    /// Components regrouped per point: one K×`n_dims` matrix for each run of
    /// `n_dims` consecutive features.
    ///
    /// Column order follows the flattened order of the sample.
    pub(crate) fn jacobian(&self, n_dims: usize) -> Result<Vec<DMatrix<f64>>, Error> {
        if n_dims == 0 {
            return Err(Error::InvalidConfig {
                reason: "n_dims must be positive",
            });
        }
        if self.n_features() % n_dims != 0 {
            return Err(Error::InvalidConfig {
                reason: "n_dims must divide the number of features",
            });
        }

        let n_points = self.n_features() / n_dims;
        let k = self.n_components();
        Ok((0..n_points)
            .map(|i| DMatrix::from_fn(k, n_dims, |c, d| self.components[(c, i * n_dims + d)]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// Plane z = 1 spanned by the x and y axes.
    fn plane() -> Basis {
        Basis::new(
            DVector::from_vec(vec![0.0, 0.0, 1.0]),
            DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        )
    }

    #[test]
    fn instance_pads_missing_weights() {
        let basis = plane();
        let short = basis.instance(&[2.0]).unwrap();
        let padded = basis.instance(&[2.0, 0.0]).unwrap();

        assert_eq!(short, padded);
        assert_eq!(short.as_slice(), &[2.0, 0.0, 1.0]);
    }

    #[test]
    fn truncation_keeps_leading_directions() {
        let basis = plane().truncated(1);

        assert_eq!(basis.n_components(), 1);
        assert_eq!(basis.n_features(), 3);
        assert_eq!(basis.components()[(0, 0)], 1.0);
        assert_eq!(basis.origin().as_slice(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn project_subtracts_origin() {
        let weights = plane()
            .project(&DVector::from_vec(vec![3.0, -1.0, 5.0]))
            .unwrap();
        assert_eq!(weights.as_slice(), &[3.0, -1.0]);
    }

    #[test]
    fn project_out_removes_leading_components_only() {
        let v = DVector::from_vec(vec![3.0, -1.0, 5.0]);
        let out = plane().project_out(&v, 1).unwrap();

        assert_relative_eq!(out, DVector::from_vec(vec![0.0, -1.0, 5.0]));
    }

    #[test]
    fn project_out_of_zero_components_is_identity() {
        let v = DVector::from_vec(vec![3.0, -1.0, 5.0]);
        assert_eq!(plane().project_out(&v, 0).unwrap(), v);
    }

    #[test]
    fn jacobian_groups_features_per_point() {
        let basis = Basis::new(
            DVector::zeros(4),
            DMatrix::from_row_slice(1, 4, &[1.0, 2.0, 3.0, 4.0]),
        );
        let jac = basis.jacobian(2).unwrap();

        assert_eq!(jac.len(), 2);
        assert_eq!(jac[1], DMatrix::from_row_slice(1, 2, &[3.0, 4.0]));
        assert!(matches!(
            basis.jacobian(3),
            Err(Error::InvalidConfig { .. })
        ));
    }
}
