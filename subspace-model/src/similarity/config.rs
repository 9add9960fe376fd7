/// The three point indices the equivalent-transform solve is anchored on.
///
/// The anchors must be distinct, inside the reference, and not collinear in
/// the reference; all three are checked when the model is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors(pub [usize; 3]);

impl Anchors {
    /// Anchors spread evenly over the point list: `[0, n/3, 2n/3]`.
    #[must_use]
    pub fn spread(n_points: usize) -> Self {
        Self([0, n_points / 3, 2 * n_points / 3])
    }

    /// Returns the anchor indices.
    #[must_use]
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }
}

/// Configuration for building a [`SimilarityModel`](super::SimilarityModel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Anchors for the equivalent-transform solve.
    ///
    /// `None` uses [`Anchors::spread`] over the reference.
    pub anchors: Option<Anchors>,
    /// Relative tolerance below which the anchor triangle or the similarity
    /// candidates count as degenerate.
    pub tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anchors: None,
            tolerance: 1e-10,
        }
    }
}

impl Config {
    /// Validates that the tolerance is finite and non-negative and that any
    /// explicit anchors are distinct.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err("tolerance must be finite and non-negative");
        }
        if let Some(Anchors([a, b, c])) = self.anchors {
            if a == b || b == c || a == c {
                return Err("anchor indices must be distinct");
            }
        }
        Ok(())
    }
}
