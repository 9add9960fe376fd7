use nalgebra::{DMatrix, DVector, SVD, SymmetricEigen};

use crate::Error;

/// Principal directions of a centered data matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalComponents {
    /// Orthonormal directions as rows (K×N), by descending variance.
    pub components: DMatrix<f64>,
    /// Variance along each direction, non-negative and descending.
    pub variances: DVector<f64>,
}

/// Extracts principal directions from centered data.
///
/// Implementations receive an `n_samples × n_features` matrix whose columns
/// have zero mean and a component count no larger than
/// `min(n_samples, n_features)`. Variances use an `n_samples - 1` denominator.
pub trait Decomposition {
    /// Returns the top `n_components` directions of maximal variance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecompositionFailed`] if the underlying routine does
    /// not converge.
    fn decompose(
        &self,
        centered: &DMatrix<f64>,
        n_components: usize,
    ) -> Result<PrincipalComponents, Error>;
}

/// Decomposition via the thin SVD of the centered data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Svd;

impl Decomposition for Svd {
    fn decompose(
        &self,
        centered: &DMatrix<f64>,
        n_components: usize,
    ) -> Result<PrincipalComponents, Error> {
        let failed = Error::DecompositionFailed { method: "svd" };

        let svd = SVD::try_new(centered.clone(), false, true, f64::EPSILON, 0)
            .ok_or_else(|| failed.clone())?;
        let v_t = svd.v_t.ok_or(failed)?;

        let denom = dof(centered);
        let singular_values = svd.singular_values;
        Ok(rank_directions(
            singular_values.as_slice(),
            n_components,
            centered.ncols(),
            |i| v_t.row(i).transpose(),
            |i| singular_values[i] * singular_values[i] / denom,
        ))
    }
}

/// Decomposition via the symmetric eigendecomposition of the sample covariance.
///
/// Forms the full `n_features × n_features` covariance, so it suits
/// low-dimensional samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CovarianceEigen;

impl Decomposition for CovarianceEigen {
    fn decompose(
        &self,
        centered: &DMatrix<f64>,
        n_components: usize,
    ) -> Result<PrincipalComponents, Error> {
        let covariance = centered.tr_mul(centered) / dof(centered);

        let eigen = SymmetricEigen::try_new(covariance, f64::EPSILON, 0).ok_or(
            Error::DecompositionFailed {
                method: "covariance eigen",
            },
        )?;

        let eigenvalues = eigen.eigenvalues;
        let eigenvectors = eigen.eigenvectors;
        Ok(rank_directions(
            eigenvalues.as_slice(),
            n_components,
            centered.ncols(),
            |i| eigenvectors.column(i).into_owned(),
            |i| eigenvalues[i],
        ))
    }
}

/// Degrees of freedom of the variance estimate.
#[allow(clippy::cast_precision_loss)]
fn dof(centered: &DMatrix<f64>) -> f64 {
    centered.nrows().saturating_sub(1).max(1) as f64
}

/// Picks the `n_components` directions with the largest `keys`, normalizing
/// signs and clamping round-off in the variances.
fn rank_directions(
    keys: &[f64],
    n_components: usize,
    n_features: usize,
    direction: impl Fn(usize) -> DVector<f64>,
    variance: impl Fn(usize) -> f64,
) -> PrincipalComponents {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));
    order.truncate(n_components);

    let mut components = DMatrix::zeros(order.len(), n_features);
    for (row, &i) in order.iter().enumerate() {
        let mut d = direction(i);
        if leading_sign(&d) < 0.0 {
            d.neg_mut();
        }
        components.row_mut(row).copy_from(&d.transpose());
    }

    let variances =
        DVector::from_iterator(order.len(), order.iter().map(|&i| variance(i).max(0.0)));

    PrincipalComponents {
        components,
        variances,
    }
}

/// Sign of the entry with the largest magnitude.
fn leading_sign(direction: &DVector<f64>) -> f64 {
    direction
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best })
        .signum()
}
