use fenceplan_designer::{edge_lengths, move_vertex, set_edge_length, EdgeConstraint, Point};

fn square(side: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(side, 0.0),
        Point::new(side, side),
        Point::new(0.0, side),
    ]
}

#[test]
fn test_edge_lengths_wrap() {
    assert_eq!(edge_lengths(&square(100.0)), vec![100.0; 4]);
    assert!(edge_lengths(&[Point::new(1.0, 1.0)]).is_empty());
}

#[test]
fn test_set_edge_length_moves_end_vertex() {
    let out = set_edge_length(&square(100.0), 0, 250.0).unwrap();
    assert_eq!(out[1], Point::new(250.0, 0.0));
    assert_eq!(out[0], Point::new(0.0, 0.0));
    assert_eq!(out[2], Point::new(100.0, 100.0));
}

#[test]
fn test_set_edge_length_rejects_bad_input() {
    assert!(set_edge_length(&square(100.0), 4, 10.0).is_none());
    assert!(set_edge_length(&square(100.0), 0, 0.0).is_none());
    assert!(set_edge_length(&square(100.0), 0, f64::NAN).is_none());
}

#[test]
fn test_move_free_vertex() {
    let constraints = vec![EdgeConstraint::free(); 4];
    let out = move_vertex(&square(100.0), &constraints, 2, Point::new(150.0, 120.0));
    assert_eq!(out[2], Point::new(150.0, 120.0));
}

#[test]
fn test_move_vertex_keeps_locked_length() {
    let constraints = vec![
        EdgeConstraint::locked(100.0),
        EdgeConstraint::free(),
        EdgeConstraint::free(),
        EdgeConstraint::free(),
    ];
    let out = move_vertex(&square(100.0), &constraints, 1, Point::new(300.0, 400.0));
    assert!(out[1].approx_eq(&Point::new(60.0, 80.0), 1e-9));
    assert!((out[0].distance_to(&out[1]) - 100.0).abs() < 1e-9);
}

#[test]
fn test_vertex_between_locked_edges_stays() {
    let constraints = vec![
        EdgeConstraint::locked(100.0),
        EdgeConstraint::locked(100.0),
        EdgeConstraint::free(),
        EdgeConstraint::free(),
    ];
    let poly = square(100.0);
    assert_eq!(move_vertex(&poly, &constraints, 1, Point::new(500.0, 500.0)), poly);
}

#[test]
fn test_locked_without_length_acts_free() {
    let constraints = vec![EdgeConstraint::locked(0.0); 4];
    let out = move_vertex(&square(100.0), &constraints, 0, Point::new(-10.0, -10.0));
    assert_eq!(out[0], Point::new(-10.0, -10.0));
}
