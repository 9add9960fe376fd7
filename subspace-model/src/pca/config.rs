use nalgebra::DMatrix;

use crate::Error;

use super::{CovarianceEigen, Decomposition, PrincipalComponents, Svd};

/// Which decomposition extracts the principal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Thin SVD of the centered data.
    #[default]
    Svd,
    /// Eigendecomposition of the sample covariance.
    CovarianceEigen,
}

impl Decomposition for Method {
    fn decompose(
        &self,
        centered: &DMatrix<f64>,
        n_components: usize,
    ) -> Result<PrincipalComponents, Error> {
        match self {
            Self::Svd => Svd.decompose(centered, n_components),
            Self::CovarianceEigen => CovarianceEigen.decompose(centered, n_components),
        }
    }
}

/// Configuration for fitting a [`PcaModel`](super::PcaModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Number of components to keep.
    ///
    /// `None` keeps `min(n_samples, n_features) - 1`, leaving out the last
    /// direction, which carries only numerical noise when the centered data
    /// is rank deficient.
    pub n_components: Option<usize>,
    pub method: Method,
}

impl Config {
    /// Resolves the component count for data of the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyComponents`] if more components are requested
    /// than `min(n_samples, n_features)`.
    pub fn n_components_for(&self, n_samples: usize, n_features: usize) -> Result<usize, Error> {
        let max = n_samples.min(n_features);
        match self.n_components {
            None => Ok(max.saturating_sub(1)),
            Some(requested) if requested <= max => Ok(requested),
            Some(requested) => Err(Error::TooManyComponents { requested, max }),
        }
    }
}
