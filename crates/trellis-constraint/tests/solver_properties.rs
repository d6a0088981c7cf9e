//! Property tests for the constraint solver.

use proptest::prelude::*;
use trellis_constraint::{resolve, Constraint, LayoutFrame, Placement};
use trellis_core::Vec2;

fn any_value() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => -2000.0f32..2000.0,
        1 => Just(0.0f32),
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
    ]
}

fn leaf_constraint() -> impl Strategy<Value = Constraint> {
    prop_oneof![
        any_value().prop_map(Constraint::Pixels),
        any_value().prop_map(Constraint::PercentOfParent),
        Just(Constraint::Center),
    ]
}

fn size_constraint() -> impl Strategy<Value = Constraint> {
    leaf_constraint().prop_recursive(2, 4, 1, |inner| {
        prop_oneof![
            (inner.clone(), any_value()).prop_map(|(c, b)| c.at_least(b)),
            (inner, any_value()).prop_map(|(c, b)| c.at_most(b)),
        ]
    })
}

fn placement() -> impl Strategy<Value = Placement> {
    (
        prop::option::of(size_constraint()),
        prop::option::of(size_constraint()),
        prop::option::of(size_constraint()),
        prop::option::of(size_constraint()),
        prop::option::of(any_value()),
        any::<bool>(),
    )
        .prop_map(|(width, height, x, y, ratio, link_width)| {
            let mut builder = Placement::builder();
            match (ratio, link_width) {
                (Some(r), true) => builder = builder.width(Constraint::aspect(r)),
                (Some(r), false) => builder = builder.height(Constraint::aspect(r)),
                (None, _) => {}
            }
            if let Some(w) = width.filter(|_| !(ratio.is_some() && link_width)) {
                builder = builder.width(w);
            }
            if let Some(h) = height.filter(|_| !(ratio.is_some() && !link_width)) {
                builder = builder.height(h);
            }
            if let Some(x) = x {
                builder = builder.x(x);
            }
            if let Some(y) = y {
                builder = builder.y(y);
            }
            builder.build().expect("single-axis linking is always valid")
        })
}

fn finite_frame() -> impl Strategy<Value = LayoutFrame> {
    (
        0.0f32..4000.0,
        0.0f32..4000.0,
        -500.0f32..4000.0,
        -500.0f32..4000.0,
        -2000.0f32..2000.0,
        -2000.0f32..2000.0,
    )
        .prop_map(|(aw, ah, cw, ch, tx, ty)| {
            LayoutFrame::new(Vec2::new(aw, ah), Vec2::new(cw, ch), Vec2::new(tx, ty))
        })
}

proptest! {
    #[test]
    fn resolve_is_pure(placement in placement(), frame in finite_frame()) {
        let first = resolve(&placement, &frame);
        let second = resolve(&placement, &frame);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn resolve_is_sanitized(placement in placement(), frame in finite_frame()) {
        let result = resolve(&placement, &frame);
        prop_assert!(result.x.is_finite());
        prop_assert!(result.y.is_finite());
        prop_assert!(result.width.is_finite() && result.width >= 0.0);
        prop_assert!(result.height.is_finite() && result.height >= 0.0);
    }

    #[test]
    fn aspect_width_follows_height(h in 0.0f32..2000.0, r in 0.01f32..16.0, frame in finite_frame()) {
        let placement = Placement::builder()
            .width(Constraint::aspect(r))
            .height(h)
            .build()
            .unwrap();
        let result = resolve(&placement, &frame);
        prop_assert_eq!(result.height, h);
        prop_assert!((result.width - h * r).abs() <= f32::EPSILON * (h * r).max(1.0));
    }
}
