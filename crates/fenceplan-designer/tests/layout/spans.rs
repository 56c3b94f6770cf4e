use fenceplan_designer::{derive_posts, derive_spans, Line, Point};
use std::collections::BTreeMap;

fn lengths(lines: &[Line], positions: &BTreeMap<String, Vec<f64>>) -> Vec<f64> {
    let posts = derive_posts(lines, positions, 1.0);
    derive_spans(lines, &posts, 1.0)
        .iter()
        .map(|s| s.length)
        .collect()
}

#[test]
fn test_corner_post_counted_once() {
    let lines = vec![
        Line::new("l1", Point::new(0.0, 0.0), Point::new(5000.0, 0.0)),
        Line::new("l2", Point::new(5000.0, 0.0), Point::new(5000.0, 3000.0)),
    ];
    let mut positions = BTreeMap::new();
    positions.insert("l1".to_string(), vec![0.0, 2390.0, 4780.0, 5000.0]);

    let posts = derive_posts(&lines, &positions, 1.0);
    let spans = derive_spans(&lines, &posts, 1.0);
    let got: Vec<f64> = spans.iter().map(|s| s.length).collect();
    assert_eq!(got, vec![2390.0, 2390.0, 220.0, 3000.0]);

    assert_eq!(spans[2].to_post, "post-v2");
    assert_eq!(spans[3].from_post, "post-v2");
    assert!(spans.iter().all(|s| s.chain == 0));
}

#[test]
fn test_reversed_line_in_chain() {
    let lines = vec![
        Line::new("l1", Point::new(5000.0, 0.0), Point::new(0.0, 0.0)),
        Line::new("l2", Point::new(5000.0, 0.0), Point::new(5000.0, 3000.0)),
    ];
    assert_eq!(lengths(&lines, &BTreeMap::new()), vec![5000.0, 3000.0]);
}

#[test]
fn test_closed_loop_gets_closing_span() {
    let lines = vec![
        Line::new("s1", Point::new(0.0, 0.0), Point::new(1000.0, 0.0)),
        Line::new("s2", Point::new(1000.0, 0.0), Point::new(1000.0, 1000.0)),
        Line::new("s3", Point::new(1000.0, 1000.0), Point::new(0.0, 1000.0)),
        Line::new("s4", Point::new(0.0, 1000.0), Point::new(0.0, 0.0)),
    ];
    let posts = derive_posts(&lines, &BTreeMap::new(), 1.0);
    let spans = derive_spans(&lines, &posts, 1.0);
    assert_eq!(spans.len(), 4);
    assert!(spans.iter().all(|s| (s.length - 1000.0).abs() < 1e-9));
    assert_eq!(spans[3].to_post, spans[0].from_post);
}

#[test]
fn test_separate_runs_are_separate_chains() {
    let lines = vec![
        Line::new("a", Point::new(0.0, 0.0), Point::new(2000.0, 0.0)),
        Line::new("b", Point::new(0.0, 5000.0), Point::new(1500.0, 5000.0)),
    ];
    let posts = derive_posts(&lines, &BTreeMap::new(), 1.0);
    let spans = derive_spans(&lines, &posts, 1.0);
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].chain, 0);
    assert_eq!(spans[1].chain, 1);
    assert_eq!(spans[1].length, 1500.0);
}

#[test]
fn test_span_total_matches_chain_length() {
    let lines = vec![
        Line::new("a", Point::new(0.0, 0.0), Point::new(3000.0, 0.0)),
        Line::new("b", Point::new(3000.0, 0.0), Point::new(3000.0, 4000.0)),
        Line::new("c", Point::new(3000.0, 4000.0), Point::new(8000.0, 4000.0)),
    ];
    let mut positions = BTreeMap::new();
    positions.insert("b".to_string(), vec![0.0, 1333.0, 2666.0, 4000.0]);
    let total: f64 = lengths(&lines, &positions).iter().sum();
    assert!((total - 12000.0).abs() < 1e-9);
}

#[test]
fn test_no_posts_no_spans() {
    let lines = vec![Line::new("a", Point::new(0.0, 0.0), Point::new(3000.0, 0.0))];
    assert!(derive_spans(&lines, &[], 1.0).is_empty());
}
