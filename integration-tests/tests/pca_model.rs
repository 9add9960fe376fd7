use approx::assert_relative_eq;
use integration_tests::{shape_family, star};
use nalgebra::DVector;
use subspace_core::{PointLayout, Vectorizable};
use subspace_model::{
    ErrorKind, LinearModel, PcaModel,
    pca::{Config, Method},
};

#[allow(clippy::cast_precision_loss)]
fn samples(n_samples: usize, n_features: usize) -> Vec<DVector<f64>> {
    (0..n_samples)
        .map(|i| {
            DVector::from_fn(n_features, |j, _| {
                let (i, j) = (i as f64, j as f64);
                (0.9 * i + 1.7 * j).sin() + 0.3 * (i * j).cos()
            })
        })
        .collect()
}

#[test]
fn ten_samples_of_dimension_five_keep_four_components() {
    let model = PcaModel::new(samples(10, 5)).expect("valid samples");
    assert_eq!(model.n_components(), 4);
}

#[test]
fn training_shapes_round_trip() {
    let shapes = shape_family(&star(12), 6);
    let model = PcaModel::new(shapes.clone()).expect("valid shapes");

    // Six shapes span a five-dimensional affine subspace.
    assert_eq!(model.n_components(), 5);
    for shape in &shapes {
        let rebuilt = model
            .reconstruct(shape, Some(model.n_components()))
            .expect("same length");
        assert_relative_eq!(rebuilt.as_vector(), shape.as_vector(), epsilon = 1e-9);
    }
}

#[test]
fn short_weights_are_zero_padded() {
    let model = PcaModel::new(shape_family(&star(12), 8)).expect("valid shapes");
    let k = model.n_components();

    let short = model.instance(&[0.4, -0.2]).expect("fits");
    let mut padded = vec![0.0; k];
    padded[..2].copy_from_slice(&[0.4, -0.2]);
    let full = model.instance(&padded).expect("fits");

    assert_relative_eq!(short.as_vector(), full.as_vector());
}

#[test]
fn residual_shrinks_as_components_are_added() {
    let shapes = shape_family(&star(16), 10);
    let model = PcaModel::new(shapes[..8].to_vec()).expect("valid shapes");
    let novel = &shapes[9];

    let residuals: Vec<f64> = (0..=model.n_components())
        .map(|k| {
            let rebuilt = model.reconstruct(novel, Some(k)).expect("k in range");
            (rebuilt.as_vector() - novel.as_vector()).norm()
        })
        .collect();

    for pair in residuals.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-12, "residuals {residuals:?}");
    }
}

#[test]
fn project_out_clears_leading_weights_only() {
    let shapes = shape_family(&star(12), 9);
    let model = PcaModel::new(shapes[..8].to_vec()).expect("valid shapes");
    let novel = &shapes[8];
    let n = 3;

    let before = model.project(novel).expect("same length");
    let after = model
        .project(&model.project_out(novel, n).expect("n in range"))
        .expect("same length");

    for i in 0..model.n_components() {
        let expected = if i < n { 0.0 } else { before[i] };
        assert_relative_eq!(after[i], expected, epsilon = 1e-9);
    }
}

#[test]
fn mean_keeps_the_template_layout() {
    let shapes: Vec<_> = shape_family(&star(8), 5)
        .into_iter()
        .map(|s| s.with_layout(PointLayout::Yx))
        .collect();
    let model = PcaModel::new(shapes).expect("valid shapes");

    let mean = model.mean().expect("template rebuilds");
    assert_eq!(mean.layout(), PointLayout::Yx);
    assert_eq!(mean.n_points(), 8);
}

#[test]
fn both_methods_reconstruct_alike() {
    let shapes = shape_family(&star(10), 7);
    let svd = PcaModel::new(shapes.clone()).expect("valid shapes");
    let eig = PcaModel::with_config(
        shapes.clone(),
        &Config {
            method: Method::CovarianceEigen,
            ..Config::default()
        },
    )
    .expect("valid shapes");

    let novel = star(10);
    let a = svd.reconstruct(&novel, None).expect("same length");
    let b = eig.reconstruct(&novel, None).expect("same length");
    assert_relative_eq!(a.as_vector(), b.as_vector(), epsilon = 1e-8);
}

#[test]
fn overflowing_weights_are_invalid_arguments() {
    let model = PcaModel::new(samples(10, 5)).expect("valid samples");
    let err = model
        .instance(&vec![1.0; model.n_components() + 1])
        .expect_err("too many weights");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn mismatched_shapes_are_precondition_violations() {
    let model = PcaModel::new(shape_family(&star(8), 4)).expect("valid shapes");
    let err = model.project(&star(9)).expect_err("wrong point count");
    assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
}
