//! Behavior both models share through the `LinearModel` trait.

use std::thread;

use approx::assert_relative_eq;
use integration_tests::{shape_family, star};
use subspace_core::{PointCloud, Vectorizable};
use subspace_model::{LinearModel, PcaModel, SimilarityModel};

/// Distance from `sample` to its reconstruction from `n` components.
fn residual<M: LinearModel<Sample = PointCloud>>(model: &M, sample: &PointCloud, n: usize) -> f64 {
    let rebuilt = model.reconstruct(sample, Some(n)).expect("n in range");
    (rebuilt.as_vector() - sample.as_vector()).norm()
}

fn assert_contract<M: LinearModel<Sample = PointCloud>>(model: &M, novel: &PointCloud) {
    let k = model.n_components();

    let weights = model.project(novel).expect("same length");
    assert_eq!(weights.len(), k);

    let via_objects = model.instance(&weights.as_slice()[..k - 1]).expect("fits");
    let via_vectors = model.reconstruct(novel, Some(k - 1)).expect("fits");
    assert_relative_eq!(via_objects.as_vector(), via_vectors.as_vector(), epsilon = 1e-10);

    let unchanged = model.project_out(novel, 0).expect("zero components");
    assert_relative_eq!(unchanged.as_vector(), novel.as_vector());

    assert!(residual(model, novel, k) <= residual(model, novel, 0) + 1e-12);
    assert!(model.project_out(novel, k + 1).is_err());
    assert!(model.instance(&vec![0.0; k + 1]).is_err());
}

#[test]
fn pca_model_meets_the_contract() {
    let shapes = shape_family(&star(10), 8);
    let model = PcaModel::new(shapes[..7].to_vec()).expect("valid shapes");
    assert_contract(&model, &shapes[7]);
}

#[test]
fn similarity_model_meets_the_contract() {
    let base = star(10);
    let model = SimilarityModel::new(base.clone()).expect("valid reference");
    assert_contract(&model, &shape_family(&base, 4)[3]);
}

#[test]
fn models_can_be_shared_across_threads() {
    let base = star(12);
    let shapes = shape_family(&base, 12);
    let pca = PcaModel::new(shapes.clone()).expect("valid shapes");
    let similarity = SimilarityModel::new(base).expect("valid reference");

    let serial: Vec<_> = shapes
        .iter()
        .map(|s| (pca.project(s).expect("fits"), similarity.project(s).expect("fits")))
        .collect();

    let parallel: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = shapes
            .iter()
            .map(|s| {
                let (pca, similarity) = (&pca, &similarity);
                scope.spawn(move || {
                    (pca.project(s).expect("fits"), similarity.project(s).expect("fits"))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("no panic"))
            .collect()
    });

    assert_eq!(serial, parallel);
}
