//! Linear subspace models for shapes and appearances.
//!
//! A [`LinearModel`] describes samples as an origin plus a weighted sum of
//! orthonormal basis directions. Two models are provided:
//!
//! - [`PcaModel`] learns its basis from samples by principal component
//!   analysis.
//! - [`SimilarityModel`] builds an exact basis for the similarity transforms
//!   of a reference point set and can turn its weights back into an
//!   [`AffineTransform`](subspace_core::AffineTransform).

mod basis;
mod error;
mod linear;

pub mod pca;
pub mod similarity;

pub use error::{Error, ErrorKind};
pub use linear::LinearModel;
pub use pca::PcaModel;
pub use similarity::SimilarityModel;
