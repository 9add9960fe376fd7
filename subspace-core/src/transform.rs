use std::fmt;

use nalgebra::{Matrix3, Point2, Vector2};

use crate::PointCloud;

/// A 2D affine map stored as a 3×3 homogeneous matrix.
///
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// | 0  0  1  |
/// ```
///
/// The first two columns are where the unit x and y vectors map to, the third
/// is the translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3<f64>,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    /// Creates the identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Creates a similarity transform: uniform `scale`, rotation by `angle`
    /// radians (counter-clockwise), then `translation`.
    #[must_use]
    pub fn similarity(scale: f64, angle: f64, translation: Vector2<f64>) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        let a = scale * cos_a;
        let b = scale * sin_a;
        Self {
            matrix: Matrix3::new(
                a, -b, translation.x, //
                b, a, translation.y, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Creates a transform from its homogeneous matrix.
    ///
    /// The bottom row is taken as given; callers are responsible for it being
    /// `[0, 0, 1]` if they want an affine map.
    #[must_use]
    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    /// Returns the homogeneous matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Returns the translation component.
    #[must_use]
    pub fn translation(&self) -> Vector2<f64> {
        Vector2::new(self.matrix[(0, 2)], self.matrix[(1, 2)])
    }

    /// Returns the scale factor, taken as the length of the mapped x axis.
    ///
    /// Exact for similarity transforms.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.matrix[(0, 0)].hypot(self.matrix[(1, 0)])
    }

    /// Returns the rotation angle in radians, taken from the mapped x axis.
    ///
    /// Exact for similarity transforms.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        self.matrix[(1, 0)].atan2(self.matrix[(0, 0)])
    }

    /// Maps a single point.
    #[must_use]
    pub fn apply_point(&self, point: &Point2<f64>) -> Point2<f64> {
        self.matrix.transform_point(point)
    }

    /// Maps every point of `cloud`, keeping its layout.
    #[must_use]
    pub fn apply(&self, cloud: &PointCloud) -> PointCloud {
        cloud.map_points(|p| self.apply_point(p))
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.translation();
        write!(
            f,
            "Affine(dx={:.4}, dy={:.4}, rot={:.4}°, scale={:.4})",
            t.x,
            t.y,
            self.rotation_angle().to_degrees(),
            self.scale_factor()
        )
    }
}
