use nalgebra::DVector;
use subspace_core::Vectorizable;

use crate::Error;

/// A model whose instances are an origin plus a linear combination of basis
/// directions.
///
/// Implementors provide the vector-level operations; the object-level methods
/// (`instance`, `project`, `reconstruct`, `project_out`) flatten their inputs,
/// delegate, and rebuild a sample exactly once at the end.
///
/// Weight vectors may be shorter than [`n_components`](Self::n_components):
/// missing trailing weights are zero. They may never be longer.
pub trait LinearModel {
    /// The kind of sample this model describes.
    type Sample: Vectorizable;

    /// Returns the number of basis directions (K).
    fn n_components(&self) -> usize;

    /// Returns the length of the vectors the model works on (N).
    fn n_features(&self) -> usize;

    /// Returns the sample used as the template for [`instance`](Self::instance).
    fn template(&self) -> &Self::Sample;

    /// Builds the vector for the given weights.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyWeights`] if more than `n_components` weights
    /// are given.
    fn instance_vector(&self, weights: &[f64]) -> Result<DVector<f64>, Error>;

    /// Returns the optimal weights reproducing `vector`, one per component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `vector` is not `n_features` long.
    fn project_vector(&self, vector: &DVector<f64>) -> Result<DVector<f64>, Error>;

    /// Returns `vector` with the contribution of the first `n_components`
    /// directions removed.
    ///
    /// Models without a definition fail rather than pass `vector` through
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotImplemented`] unless the model overrides it.
    fn project_out_vector(
        &self,
        vector: &DVector<f64>,
        n_components: usize,
    ) -> Result<DVector<f64>, Error> {
        let _ = (vector, n_components);
        Err(Error::NotImplemented {
            operation: "project_out",
        })
    }

    /// Projects `vector` and rebuilds it from the first `n_components`
    /// weights (all of them when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if `vector` has the wrong length or `n_components`
    /// exceeds the model's component count.
    fn reconstruct_vector(
        &self,
        vector: &DVector<f64>,
        n_components: Option<usize>,
    ) -> Result<DVector<f64>, Error> {
        let n = resolve_n_components(n_components, self.n_components())?;
        let weights = self.project_vector(vector)?;
        self.instance_vector(&weights.as_slice()[..n])
    }

    /// Creates a new sample from the given weights.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyWeights`] if more than `n_components` weights
    /// are given.
    fn instance(&self, weights: &[f64]) -> Result<Self::Sample, Error> {
        let vector = self.instance_vector(weights)?;
        Ok(self.template().from_vector(&vector)?)
    }

    /// Returns the optimal weights reproducing `sample`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `sample` does not flatten to
    /// `n_features` values.
    fn project(&self, sample: &Self::Sample) -> Result<DVector<f64>, Error> {
        self.project_vector(&sample.as_vector())
    }

    /// Projects `sample` onto the model and rebuilds it from the first
    /// `n_components` weights (all of them when `None`).
    ///
    /// Same as `instance(&project(sample)?[..n])`, without the intermediate
    /// sample. The result is rebuilt with `sample` as its template.
    ///
    /// # Errors
    ///
    /// Returns an error if `sample` has the wrong length or `n_components`
    /// exceeds the model's component count.
    fn reconstruct(
        &self,
        sample: &Self::Sample,
        n_components: Option<usize>,
    ) -> Result<Self::Sample, Error> {
        let vector = self.reconstruct_vector(&sample.as_vector(), n_components)?;
        Ok(sample.from_vector(&vector)?)
    }

    /// Returns a copy of `sample` with everything the first `n_components`
    /// directions explain removed.
    ///
    /// # Errors
    ///
    /// Returns an error if `sample` has the wrong length, `n_components`
    /// exceeds the model's component count, or the model does not define
    /// projecting out.
    fn project_out(
        &self,
        sample: &Self::Sample,
        n_components: usize,
    ) -> Result<Self::Sample, Error> {
        let vector = self.project_out_vector(&sample.as_vector(), n_components)?;
        Ok(sample.from_vector(&vector)?)
    }
}

/// Zero-extends `weights` to `n_components`.
pub(crate) fn pad_weights(weights: &[f64], n_components: usize) -> Result<DVector<f64>, Error> {
    if weights.len() > n_components {
        return Err(Error::TooManyWeights {
            given: weights.len(),
            n_components,
        });
    }
    let mut full = DVector::zeros(n_components);
    full.as_mut_slice()[..weights.len()].copy_from_slice(weights);
    Ok(full)
}

/// Resolves an optional component count against the model's, defaulting to all.
pub(crate) fn resolve_n_components(
    requested: Option<usize>,
    n_components: usize,
) -> Result<usize, Error> {
    match requested {
        None => Ok(n_components),
        Some(n) if n <= n_components => Ok(n),
        Some(requested) => Err(Error::ComponentsOutOfRange {
            requested,
            n_components,
        }),
    }
}

pub(crate) fn check_length(vector: &DVector<f64>, expected: usize) -> Result<(), Error> {
    if vector.len() == expected {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            expected,
            actual: vector.len(),
        })
    }
}
