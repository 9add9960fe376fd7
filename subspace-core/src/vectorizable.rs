use nalgebra::DVector;

use crate::Error;

/// A sample that can be flattened to a vector and rebuilt from one.
///
/// Rebuilding needs a template: a flat vector carries no shape metadata
/// (point count, dimensionality, coordinate layout), so `from_vector` is
/// called on an existing sample of the same kind and borrows that structure.
///
/// Implementations must round-trip: `s.from_vector(&s.as_vector())` yields a
/// sample equal to `s`.
pub trait Vectorizable: Sized {
    /// Returns the flattened form of this sample.
    fn as_vector(&self) -> DVector<f64>;

    /// Builds a new sample with this sample's structure from `vector`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `vector` does not have the length
    /// this template flattens to.
    fn from_vector(&self, vector: &DVector<f64>) -> Result<Self, Error>;

    /// Returns the length of the flattened form.
    fn n_parameters(&self) -> usize {
        self.as_vector().len()
    }
}

/// A plain vector is its own flattened form.
impl Vectorizable for DVector<f64> {
    fn as_vector(&self) -> DVector<f64> {
        self.clone()
    }

    fn from_vector(&self, vector: &DVector<f64>) -> Result<Self, Error> {
        if vector.len() != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: vector.len(),
            });
        }
        Ok(vector.clone())
    }

    fn n_parameters(&self) -> usize {
        self.len()
    }
}
