//! Similarity transforms re-parametrized as a linear model.

mod config;

pub use config::{Anchors, Config};

use log::{debug, trace};
use nalgebra::{DMatrix, DVector, Matrix3, Point2};
use subspace_core::{AffineTransform, PointCloud, Vectorizable};

use crate::{Error, LinearModel, basis::Basis};

/// Degrees of freedom of a 2D similarity: scale, rotation, x and y translation.
const N_COMPONENTS: usize = 4;

/// Fewest points that can anchor the equivalent-transform solve.
const MIN_POINTS: usize = 3;

/// A linear model whose instances are similarity transforms of a reference
/// point set.
///
/// The basis is analytic rather than learned: the four directions in which a
/// uniform scale, a rotation, and the two translations move the reference,
/// orthonormalized. The reference is the zero-weight instance.
#[derive(Debug, Clone)]
pub struct SimilarityModel {
    reference: PointCloud,
    anchors: Anchors,
    source: [Point2<f64>; 3],
    tolerance: f64,
    basis: Basis,
}

impl SimilarityModel {
    /// Builds a model around `reference` with the default [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the reference has fewer than three points, the
    /// default anchors are collinear, or the reference is degenerate.
    pub fn new(reference: PointCloud) -> Result<Self, Error> {
        Self::with_config(reference, &Config::default())
    }

    /// Builds a model around `reference` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the reference has fewer
    /// than three points, an anchor is out of range, the anchors are
    /// collinear, or the reference is degenerate.
    pub fn with_config(reference: PointCloud, config: &Config) -> Result<Self, Error> {
        config
            .validate()
            .map_err(|reason| Error::InvalidConfig { reason })?;

        let n_points = reference.n_points();
        if n_points < MIN_POINTS {
            return Err(Error::InsufficientPoints {
                given: n_points,
                required: MIN_POINTS,
            });
        }

        let anchors = config
            .anchors
            .unwrap_or_else(|| Anchors::spread(n_points));
        let source = anchor_points(&reference, anchors)?;
        if is_collinear(&source, config.tolerance) {
            return Err(Error::DegenerateAnchors {
                anchors: anchors.indices(),
            });
        }

        let components = similarity_components(&reference, config.tolerance)?;
        debug!(
            "built similarity model: {n_points} points, anchors {:?}",
            anchors.indices()
        );

        Ok(Self {
            basis: Basis::new(reference.as_vector(), components),
            reference,
            anchors,
            source,
            tolerance: config.tolerance,
        })
    }

    /// Returns the reference point set.
    #[must_use]
    pub fn reference(&self) -> &PointCloud {
        &self.reference
    }

    /// Returns the anchors used by
    /// [`equivalent_similarity_transform`](Self::equivalent_similarity_transform).
    #[must_use]
    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    /// Returns the orthonormal components as rows (4×N).
    #[must_use]
    pub fn components(&self) -> &DMatrix<f64> {
        self.basis.components()
    }

    /// Returns the components regrouped per point: one 4×2 matrix per point,
    /// columns in the reference's flattening order.
    ///
    /// # Errors
    ///
    /// Infallible for a model built from a point set; the `Result` mirrors
    /// [`PcaModel::jacobian`](crate::PcaModel::jacobian).
    pub fn jacobian(&self) -> Result<Vec<DMatrix<f64>>, Error> {
        self.basis.jacobian(2)
    }

    /// Returns the transform that does to the reference exactly what building
    /// an instance from `weights` does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyWeights`] if more than four weights are given.
    pub fn equivalent_similarity_transform(
        &self,
        weights: &[f64],
    ) -> Result<AffineTransform, Error> {
        let instance = self.instance(weights)?;
        let target = anchor_points(&instance, self.anchors)?;
        solve_three_point(&self.source, &target, self.tolerance).ok_or(
            Error::DegenerateAnchors {
                anchors: self.anchors.indices(),
            },
        )
    }
}

impl LinearModel for SimilarityModel {
    type Sample = PointCloud;

    fn n_components(&self) -> usize {
        N_COMPONENTS
    }

    fn n_features(&self) -> usize {
        self.basis.n_features()
    }

    fn template(&self) -> &PointCloud {
        &self.reference
    }

    fn instance_vector(&self, weights: &[f64]) -> Result<DVector<f64>, Error> {
        self.basis.instance(weights)
    }

    fn project_vector(&self, vector: &DVector<f64>) -> Result<DVector<f64>, Error> {
        self.basis.project(vector)
    }

    fn project_out_vector(
        &self,
        vector: &DVector<f64>,
        n_components: usize,
    ) -> Result<DVector<f64>, Error> {
        self.basis.project_out(vector, n_components)
    }
}

/// Orthonormalized similarity directions of `reference`, as rows.
///
/// Candidates are built as point sets and flattened by the reference itself,
/// so they always follow its layout.
fn similarity_components(reference: &PointCloud, tolerance: f64) -> Result<DMatrix<f64>, Error> {
    let candidates = [
        reference.as_vector(),
        // Counter-clockwise: a positive rotation weight has the opposite sign
        // of one taken against the clockwise `(y, -x)` direction.
        reference.map_points(|p| Point2::new(-p.y, p.x)).as_vector(),
        reference.map_points(|_| Point2::new(1.0, 0.0)).as_vector(),
        reference.map_points(|_| Point2::new(0.0, 1.0)).as_vector(),
    ];
    let stacked = DMatrix::from_columns(&candidates);

    let largest = candidates.iter().map(DVector::norm).fold(0.0, f64::max);
    let qr = stacked.qr();
    let r = qr.r();
    if (0..N_COMPONENTS).any(|i| r[(i, i)].abs() <= tolerance * largest) {
        return Err(Error::DegenerateReference);
    }

    // Fix the sign so each direction points along its own candidate.
    let mut components = qr.q().transpose();
    for i in 0..N_COMPONENTS {
        if r[(i, i)] < 0.0 {
            components.row_mut(i).neg_mut();
        }
    }
    Ok(components)
}

fn anchor_points(cloud: &PointCloud, anchors: Anchors) -> Result<[Point2<f64>; 3], Error> {
    let n_points = cloud.n_points();
    let point = |index: usize| {
        cloud
            .point(index)
            .copied()
            .ok_or(Error::AnchorOutOfRange { index, n_points })
    };
    let [i, j, k] = anchors.indices();
    Ok([point(i)?, point(j)?, point(k)?])
}

fn is_collinear(points: &[Point2<f64>; 3], tolerance: f64) -> bool {
    let sij = points[1] - points[0];
    let sik = points[2] - points[0];
    sij.perp(&sik).abs() <= tolerance * sij.norm() * sik.norm()
}

/// Solves for the affine map taking each `source` point to its `target`.
///
/// Three correspondences fix the six affine parameters exactly. Returns
/// `None` when the source points are collinear.
fn solve_three_point(
    source: &[Point2<f64>; 3],
    target: &[Point2<f64>; 3],
    tolerance: f64,
) -> Option<AffineTransform> {
    if is_collinear(source, tolerance) {
        return None;
    }

    let [si, sj, sk] = source;
    let ti = target[0];
    let (sij, sik) = (sj - si, sk - si);
    let (tij, tik) = (target[1] - ti, target[2] - ti);

    // Signed area of the parallelogram spanned by the source edges.
    let d = sij.x * sik.y - sij.y * sik.x;

    let c_x = (sik.y * tij - sij.y * tik) / d;
    let c_y = (sij.x * tik - sik.x * tij) / d;
    let c_t = ti.coords
        + (tij * (si.y * sik.x - si.x * sik.y) + tik * (si.x * sij.y - si.y * sij.x)) / d;

    trace!("three-point solve: d = {d}, c_x = {c_x:?}, c_y = {c_y:?}, c_t = {c_t:?}");

    Some(AffineTransform::from_matrix(Matrix3::new(
        c_x.x, c_y.x, c_t.x, //
        c_x.y, c_y.y, c_t.y, //
        0.0, 0.0, 1.0,
    )))
}
