use nalgebra::{DVector, Point2};

use crate::{Error, Vectorizable};

/// The order in which a point's coordinates appear in the flattened vector.
///
/// Points are always interleaved (all coordinates of point 0, then point 1,
/// and so on). The layout only decides which axis comes first within a point.
/// Anything that builds vectors meant to line up with a point set's flattened
/// form must go through [`PointCloud::as_vector`] rather than assume an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointLayout {
    /// `[x0, y0, x1, y1, ...]`
    #[default]
    Xy,
    /// `[y0, x0, y1, x1, ...]`, the row/column order used for image coordinates.
    Yx,
}

impl PointLayout {
    /// Returns the flattened pair for `point` in this layout.
    fn flatten(self, point: &Point2<f64>) -> [f64; 2] {
        match self {
            Self::Xy => [point.x, point.y],
            Self::Yx => [point.y, point.x],
        }
    }

    /// Rebuilds a point from a flattened pair in this layout.
    fn unflatten(self, pair: &[f64]) -> Point2<f64> {
        match self {
            Self::Xy => Point2::new(pair[0], pair[1]),
            Self::Yx => Point2::new(pair[1], pair[0]),
        }
    }
}

/// An ordered set of 2D points.
///
/// Flattens to a vector of length `2 * n_points` according to its
/// [`PointLayout`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<Point2<f64>>,
    layout: PointLayout,
}

impl PointCloud {
    /// Creates a point cloud using the default [`PointLayout::Xy`] layout.
    #[must_use]
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self {
            points,
            layout: PointLayout::default(),
        }
    }

    /// Creates a point cloud from `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(coords: &[[f64; 2]]) -> Self {
        Self::new(coords.iter().map(|&[x, y]| Point2::new(x, y)).collect())
    }

    /// Returns the same points with the given flattening layout.
    #[must_use]
    pub fn with_layout(self, layout: PointLayout) -> Self {
        Self { layout, ..self }
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Returns the point at `index`, if any.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&Point2<f64>> {
        self.points.get(index)
    }

    /// Returns the number of points.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the flattening layout.
    #[must_use]
    pub fn layout(&self) -> PointLayout {
        self.layout
    }

    /// Returns a new cloud with `f` applied to every point, keeping the layout.
    #[must_use]
    pub fn map_points(&self, f: impl FnMut(&Point2<f64>) -> Point2<f64>) -> Self {
        Self {
            points: self.points.iter().map(f).collect(),
            layout: self.layout,
        }
    }
}

impl Vectorizable for PointCloud {
    fn as_vector(&self) -> DVector<f64> {
        DVector::from_iterator(
            2 * self.points.len(),
            self.points.iter().flat_map(|p| self.layout.flatten(p)),
        )
    }

    fn from_vector(&self, vector: &DVector<f64>) -> Result<Self, Error> {
        let expected = 2 * self.points.len();
        if vector.len() != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: vector.len(),
            });
        }

        let points = vector
            .as_slice()
            .chunks_exact(2)
            .map(|pair| self.layout.unflatten(pair))
            .collect();

        Ok(Self {
            points,
            layout: self.layout,
        })
    }

    fn n_parameters(&self) -> usize {
        2 * self.points.len()
    }
}
