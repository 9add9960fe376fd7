//! Samples that flatten to vectors, 2D point sets, and affine transforms.
//!
//! These are the collaborators a linear subspace model consumes: anything
//! [`Vectorizable`] can be modeled, [`PointCloud`] is the usual shape sample,
//! and [`AffineTransform`] is what a geometric model hands back.

mod error;
mod point_cloud;
mod transform;
mod vectorizable;

pub use error::Error;
pub use point_cloud::{PointCloud, PointLayout};
pub use transform::AffineTransform;
pub use vectorizable::Vectorizable;
