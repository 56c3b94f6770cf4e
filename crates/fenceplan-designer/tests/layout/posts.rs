use fenceplan_designer::{derive_posts, Line, Point, PostCategory, PostSource};
use std::collections::BTreeMap;

fn l_shape() -> Vec<Line> {
    vec![
        Line::new("l1", Point::new(0.0, 0.0), Point::new(5000.0, 0.0)),
        Line::new("l2", Point::new(5000.0, 0.0), Point::new(5000.0, 3000.0)),
    ]
}

#[test]
fn test_vertex_categories_on_l_shape() {
    let posts = derive_posts(&l_shape(), &BTreeMap::new(), 1.0);
    let categories: Vec<PostCategory> = posts.iter().map(|p| p.category).collect();
    assert_eq!(
        categories,
        vec![PostCategory::End, PostCategory::Corner, PostCategory::End]
    );
    assert_eq!(posts[1].id, "post-v2");
    assert_eq!(posts[1].pos, Point::new(5000.0, 0.0));
}

#[test]
fn test_straight_through_is_line_post() {
    let lines = vec![
        Line::new("a", Point::new(0.0, 0.0), Point::new(3000.0, 0.0)),
        Line::new("b", Point::new(3000.0, 0.5), Point::new(6000.0, 0.0)),
    ];
    let posts = derive_posts(&lines, &BTreeMap::new(), 5.0);
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[1].category, PostCategory::Line);
}

#[test]
fn test_three_way_junction_is_t_post() {
    let lines = vec![
        Line::new("a", Point::new(0.0, 0.0), Point::new(3000.0, 0.0)),
        Line::new("b", Point::new(3000.0, 0.0), Point::new(6000.0, 0.0)),
        Line::new("c", Point::new(3000.0, 0.0), Point::new(3000.0, 2000.0)),
    ];
    let posts = derive_posts(&lines, &BTreeMap::new(), 1.0);
    let t_posts: Vec<_> = posts
        .iter()
        .filter(|p| p.category == PostCategory::T)
        .collect();
    assert_eq!(t_posts.len(), 1);
    assert_eq!(t_posts[0].pos, Point::new(3000.0, 0.0));
}

#[test]
fn test_panel_posts_at_interior_boundaries() {
    let mut positions = BTreeMap::new();
    positions.insert("l1".to_string(), vec![0.0, 2390.0, 4780.0, 5000.0]);

    let posts = derive_posts(&l_shape(), &positions, 1.0);
    let panel: Vec<_> = posts
        .iter()
        .filter(|p| p.source == PostSource::Panel)
        .collect();
    assert_eq!(panel.len(), 2);
    assert_eq!(panel[0].id, "post-p1");
    assert_eq!(panel[0].pos, Point::new(2390.0, 0.0));
    assert_eq!(panel[1].pos, Point::new(4780.0, 0.0));
    assert!(panel.iter().all(|p| p.category == PostCategory::Line));
}

#[test]
fn test_unknown_line_positions_ignored() {
    let mut positions = BTreeMap::new();
    positions.insert("nope".to_string(), vec![100.0]);
    assert_eq!(derive_posts(&l_shape(), &positions, 1.0).len(), 3);
}
