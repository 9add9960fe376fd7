//! Linear model with a principal-component basis learned from samples.

mod config;
mod decomposition;

pub use config::{Config, Method};
pub use decomposition::{CovarianceEigen, Decomposition, PrincipalComponents, Svd};

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use subspace_core::Vectorizable;

use crate::{Error, LinearModel, basis::Basis};

/// Smallest number of samples that has any variance to model.
const MIN_SAMPLES: usize = 2;

/// A linear model built by principal component analysis.
///
/// Samples are mean-centered; instances are the mean plus a weighted sum of
/// the principal components. Everything is computed at construction and the
/// model is immutable afterwards.
#[derive(Debug, Clone)]
pub struct PcaModel<S> {
    samples: Vec<S>,
    basis: Basis,
    explained_variance: DVector<f64>,
    explained_variance_ratio: DVector<f64>,
}

impl<S: Vectorizable> PcaModel<S> {
    /// Fits a model with the default [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two samples are given, the samples do
    /// not all flatten to the same length, or the decomposition fails.
    pub fn new(samples: Vec<S>) -> Result<Self, Error> {
        Self::with_config(samples, &Config::default())
    }

    /// Fits a model with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two samples are given, the samples do
    /// not all flatten to the same length, too many components are requested,
    /// or the decomposition fails.
    pub fn with_config(samples: Vec<S>, config: &Config) -> Result<Self, Error> {
        Self::with_decomposition(samples, config, &config.method)
    }

    /// Fits a model, extracting directions with a custom [`Decomposition`].
    ///
    /// `config.method` is ignored in favor of `decomposition`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two samples are given, the samples are
    /// empty or do not all flatten to the same length, too many components are
    /// requested, or the decomposition fails. A decomposition whose output is
    /// not `n_components × n_features` is reported as
    /// [`Error::DecompositionFailed`].
    pub fn with_decomposition(
        samples: Vec<S>,
        config: &Config,
        decomposition: &impl Decomposition,
    ) -> Result<Self, Error> {
        let n_samples = samples.len();
        if n_samples < MIN_SAMPLES {
            return Err(Error::InsufficientSamples {
                given: n_samples,
                required: MIN_SAMPLES,
            });
        }

        let n_features = samples[0].n_parameters();
        if n_features == 0 {
            return Err(Error::EmptySample);
        }
        if let Some((index, actual)) = samples
            .iter()
            .map(Vectorizable::n_parameters)
            .enumerate()
            .find(|&(_, n)| n != n_features)
        {
            return Err(Error::InconsistentSample {
                index,
                expected: n_features,
                actual,
            });
        }

        let vectors: Vec<DVector<f64>> = samples.iter().map(Vectorizable::as_vector).collect();

        let n_components = config.n_components_for(n_samples, n_features)?;

        #[allow(clippy::cast_precision_loss)]
        let mean = DVector::from_fn(n_features, |c, _| {
            vectors.iter().map(|v| v[c]).sum::<f64>() / n_samples as f64
        });
        let centered = DMatrix::from_fn(n_samples, n_features, |r, c| vectors[r][c] - mean[c]);

        #[allow(clippy::cast_precision_loss)]
        let total_variance = centered.norm_squared() / (n_samples - 1) as f64;

        let PrincipalComponents {
            components,
            variances,
        } = decomposition.decompose(&centered, n_components)?;
        if components.shape() != (n_components, n_features) || variances.len() != n_components {
            return Err(Error::DecompositionFailed { method: "custom" });
        }

        let explained_variance_ratio = if total_variance > 0.0 {
            &variances / total_variance
        } else {
            DVector::zeros(variances.len())
        };

        if let Some(k) = variances.iter().position(|&v| v <= f64::EPSILON * total_variance) {
            warn!("principal component {k} carries no variance; consider fewer components");
        }
        debug!(
            "fitted PCA model: {n_samples} samples, {n_features} features, \
             {n_components} components retaining {:.4} of the variance",
            explained_variance_ratio.sum()
        );

        Ok(Self {
            samples,
            basis: Basis::new(mean, components),
            explained_variance: variances,
            explained_variance_ratio,
        })
    }

    /// Returns a model that keeps only the leading `n_components` components.
    ///
    /// Variances and ratios are truncated alongside the components, so the
    /// result matches a model fitted with `n_components` in the first place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentsOutOfRange`] if `n_components` exceeds the
    /// number of components the model has.
    pub fn trim_components(self, n_components: usize) -> Result<Self, Error> {
        let available = self.n_components();
        if n_components > available {
            return Err(Error::ComponentsOutOfRange {
                requested: n_components,
                n_components: available,
            });
        }
        debug!("trimming PCA model from {available} to {n_components} components");

        Ok(Self {
            samples: self.samples,
            basis: self.basis.truncated(n_components),
            explained_variance: self.explained_variance.rows(0, n_components).into_owned(),
            explained_variance_ratio: self
                .explained_variance_ratio
                .rows(0, n_components)
                .into_owned(),
        })
    }

    /// Returns the samples the model was fitted to.
    #[must_use]
    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    /// Returns the number of samples the model was fitted to.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Returns the mean of the samples as a sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the template sample cannot rebuild the mean vector.
    pub fn mean(&self) -> Result<S, Error> {
        Ok(self.template().from_vector(self.basis.origin())?)
    }

    /// Returns the mean vector of the samples.
    #[must_use]
    pub fn mean_vector(&self) -> &DVector<f64> {
        self.basis.origin()
    }

    /// Returns the principal components as rows (K×N).
    #[must_use]
    pub fn components(&self) -> &DMatrix<f64> {
        self.basis.components()
    }

    /// Returns the variance explained by each component.
    #[must_use]
    pub fn explained_variance(&self) -> &DVector<f64> {
        &self.explained_variance
    }

    /// Returns the fraction of the total sample variance explained by each
    /// component.
    #[must_use]
    pub fn explained_variance_ratio(&self) -> &DVector<f64> {
        &self.explained_variance_ratio
    }

    /// Creates an instance from weights measured in standard deviations.
    ///
    /// Weight `i` is scaled by the square root of the variance of component
    /// `i` before building the instance, so a weight of `1.0` is one standard
    /// deviation along that component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyWeights`] if more than `n_components` weights
    /// are given.
    pub fn instance_standardized(&self, weights: &[f64]) -> Result<S, Error> {
        if weights.len() > self.n_components() {
            return Err(Error::TooManyWeights {
                given: weights.len(),
                n_components: self.n_components(),
            });
        }

        let scaled: Vec<f64> = weights
            .iter()
            .zip(self.explained_variance.iter())
            .map(|(w, var)| w * var.sqrt())
            .collect();
        self.instance(&scaled)
    }

    /// Returns the components regrouped per point: one K×`n_dims` matrix for
    /// each consecutive run of `n_dims` features.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `n_dims` is zero or does not divide
    /// the number of features.
    pub fn jacobian(&self, n_dims: usize) -> Result<Vec<DMatrix<f64>>, Error> {
        self.basis.jacobian(n_dims)
    }
}

impl<S: Vectorizable> LinearModel for PcaModel<S> {
    type Sample = S;

    fn n_components(&self) -> usize {
        self.basis.n_components()
    }

    fn n_features(&self) -> usize {
        self.basis.n_features()
    }

    fn template(&self) -> &S {
        &self.samples[0]
    }

    fn instance_vector(&self, weights: &[f64]) -> Result<DVector<f64>, Error> {
        self.basis.instance(weights)
    }

    fn project_vector(&self, vector: &DVector<f64>) -> Result<DVector<f64>, Error> {
        self.basis.project(vector)
    }

    /// Leaves the mean, the residual outside the model, and the components
    /// beyond `n_components`.
    fn project_out_vector(
        &self,
        vector: &DVector<f64>,
        n_components: usize,
    ) -> Result<DVector<f64>, Error> {
        self.basis.project_out(vector, n_components)
    }
}
