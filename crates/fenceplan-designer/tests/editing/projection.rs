use fenceplan_designer::{closest_point_on_segment, Point};
use proptest::prelude::*;

#[test]
fn test_degenerate_segment_projects_onto_its_point() {
    let a = Point::new(120.0, -40.0);
    let p = Point::new(123.0, -36.0);
    let proj = closest_point_on_segment(p, a, a);

    assert_eq!(proj.point, a);
    assert_eq!(proj.t, 0.0);
    assert!((proj.distance() - 5.0).abs() < 1e-12);
}

#[test]
fn test_projection_clamps_past_either_end() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1000.0, 0.0);

    let before = closest_point_on_segment(Point::new(-300.0, 400.0), a, b);
    assert_eq!(before.point, a);
    assert_eq!(before.t, 0.0);
    assert!((before.distance() - 500.0).abs() < 1e-9);

    let after = closest_point_on_segment(Point::new(1600.0, 0.0), a, b);
    assert_eq!(after.point, b);
    assert_eq!(after.t, 1.0);
}

#[test]
fn test_projection_inside_segment() {
    let proj = closest_point_on_segment(
        Point::new(250.0, 80.0),
        Point::new(0.0, 0.0),
        Point::new(1000.0, 0.0),
    );
    assert_eq!(proj.point, Point::new(250.0, 0.0));
    assert!((proj.t - 0.25).abs() < 1e-12);
    assert!((proj.distance_sq - 6400.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn prop_projection_is_never_farther_than_an_endpoint(
        px in -5000.0f64..5000.0, py in -5000.0f64..5000.0,
        ax in -5000.0f64..5000.0, ay in -5000.0f64..5000.0,
        bx in -5000.0f64..5000.0, by in -5000.0f64..5000.0,
    ) {
        let (p, a, b) = (Point::new(px, py), Point::new(ax, ay), Point::new(bx, by));
        let proj = closest_point_on_segment(p, a, b);

        prop_assert!((0.0..=1.0).contains(&proj.t));
        prop_assert!(proj.distance_sq <= p.distance_sq_to(&a) + 1e-6);
        prop_assert!(proj.distance_sq <= p.distance_sq_to(&b) + 1e-6);
    }
}
