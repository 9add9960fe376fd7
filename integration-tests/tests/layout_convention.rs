//! The flattening layout of a point set is a private detail of the model:
//! swapping it changes the vectors but not the geometry.

use approx::relative_eq;
use integration_tests::star;
use nalgebra::Vector2;
use proptest::prelude::*;
use subspace_core::{AffineTransform, PointLayout};
use subspace_model::{LinearModel, SimilarityModel};

fn recovered(layout: PointLayout, transform: &AffineTransform) -> AffineTransform {
    let reference = star(15).with_layout(layout);
    let model = SimilarityModel::new(reference.clone()).expect("valid reference");
    let weights = model
        .project(&transform.apply(&reference))
        .expect("same length");
    model
        .equivalent_similarity_transform(weights.as_slice())
        .expect("non-degenerate anchors")
}

proptest! {
    #[test]
    fn layout_does_not_change_the_equivalent_transform(
        scale in 0.2_f64..5.0,
        angle in -3.1_f64..3.1,
        tx in -50.0_f64..50.0,
        ty in -50.0_f64..50.0,
    ) {
        let transform = AffineTransform::similarity(scale, angle, Vector2::new(tx, ty));

        let xy = recovered(PointLayout::Xy, &transform);
        let yx = recovered(PointLayout::Yx, &transform);

        prop_assert!(
            relative_eq!(xy.matrix(), yx.matrix(), epsilon = 1e-8),
            "xy: {xy}, yx: {yx}"
        );
        prop_assert!(relative_eq!(xy.matrix(), transform.matrix(), epsilon = 1e-8));
    }

    #[test]
    fn same_weights_give_the_same_transform(
        weights in proptest::collection::vec(-3.0_f64..3.0, 4),
    ) {
        let xy = SimilarityModel::new(star(9)).expect("valid reference");
        let yx = SimilarityModel::new(star(9).with_layout(PointLayout::Yx))
            .expect("valid reference");

        let a = xy.equivalent_similarity_transform(&weights).expect("four weights");
        let b = yx.equivalent_similarity_transform(&weights).expect("four weights");
        prop_assert!(relative_eq!(a.matrix(), b.matrix(), epsilon = 1e-9));

        let instance = yx.instance(&weights).expect("four weights");
        prop_assert_eq!(instance.layout(), PointLayout::Yx);
        for (p, q) in instance.points().iter().zip(b.apply(&star(9)).points()) {
            prop_assert!(relative_eq!(p, q, epsilon = 1e-9));
        }
    }
}
