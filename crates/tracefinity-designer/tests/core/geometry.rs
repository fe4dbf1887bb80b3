use tracefinity_core::model::{Outline, Point};
use tracefinity_designer::geometry::{
    build_lyon_path, build_path, in_filled_area, inside_cutout_area, outline_path, point_in_ring,
    simplify, smooth_default, smoothing_epsilon, svg_path_data,
};

fn square(min: f64, max: f64) -> Vec<Point> {
    vec![
        Point::new(min, min),
        Point::new(max, min),
        Point::new(max, max),
        Point::new(min, max),
    ]
}

fn donut() -> Outline {
    let mut outline = Outline::new(square(0.0, 30.0));
    outline.interior_rings.push(square(10.0, 20.0));
    outline
}

#[test]
fn test_build_path_outer_then_islands() {
    let d = build_path(&square(0.0, 2.0), &[square(0.5, 1.0)], 2.0);
    assert_eq!(
        d,
        "M 0 0 L 4 0 L 4 4 L 0 4 Z M 1 1 L 2 1 L 2 2 L 1 2 Z"
    );
}

#[test]
fn test_build_path_empty() {
    assert_eq!(build_path(&[], &[], 1.0), "");
}

#[test]
fn test_island_excluded_from_cutout_area() {
    let outline = donut();
    assert!(in_filled_area(&Point::new(5.0, 5.0), &outline));
    assert!(!in_filled_area(&Point::new(15.0, 15.0), &outline));
    assert!(!in_filled_area(&Point::new(35.0, 15.0), &outline));

    let other = Outline::new(square(12.0, 18.0));
    // an island of one tool can still be covered by another tool
    assert!(inside_cutout_area(&Point::new(15.0, 15.0), [&outline, &other]));
    assert!(!inside_cutout_area(&Point::new(15.0, 15.0), [&outline]));
}

#[test]
fn test_lyon_path_keeps_one_subpath_per_ring() {
    let outline = donut();
    let path = build_lyon_path(&outline.points, &outline.interior_rings, 1.0);
    let closed = path
        .iter()
        .filter(|e| matches!(e, lyon::path::Event::End { close: true, .. }))
        .count();
    assert_eq!(closed, 2);
    assert_eq!(
        svg_path_data(&path),
        "M 0 0 L 30 0 L 30 30 L 0 30 Z M 10 10 L 20 10 L 20 20 L 10 20 Z"
    );
}

#[test]
fn test_point_in_concave_ring() {
    // U shape opening upwards
    let ring = vec![
        Point::new(0.0, 0.0),
        Point::new(30.0, 0.0),
        Point::new(30.0, 30.0),
        Point::new(20.0, 30.0),
        Point::new(20.0, 10.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 30.0),
        Point::new(0.0, 30.0),
    ];
    assert!(point_in_ring(&Point::new(5.0, 20.0), &ring));
    assert!(!point_in_ring(&Point::new(15.0, 20.0), &ring));
    assert!(point_in_ring(&Point::new(15.0, 5.0), &ring));
}

#[test]
fn test_simplify_removes_near_collinear_points() {
    let mut ring = square(0.0, 10.0);
    ring.insert(1, Point::new(5.0, 0.01));
    let out = simplify(&ring, 0.1);
    assert_eq!(out, square(0.0, 10.0));
}

#[test]
fn test_simplify_sliver_falls_back_to_input() {
    let ring = vec![
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.01),
        Point::new(10.0, 0.0),
        Point::new(5.0, -0.01),
    ];
    assert_eq!(simplify(&ring, 1.0), ring);
}

#[test]
fn test_smoothing_epsilon_floor_and_scale() {
    assert_eq!(smoothing_epsilon(&square(0.0, 10.0), 0.5), 0.3);
    let big = square(0.0, 300.0);
    let diag = (2.0f64).sqrt() * 300.0;
    assert!((smoothing_epsilon(&big, 1.0) - diag * 0.008).abs() < 1e-9);
    assert!(smoothing_epsilon(&big, 1.0) > smoothing_epsilon(&big, 0.0));
}

#[test]
fn test_smooth_rounds_corners() {
    let ring = square(0.0, 40.0);
    let smoothed = smooth_default(&ring);
    assert!(smoothed.len() > ring.len());
    assert!(!smoothed.contains(&Point::new(0.0, 0.0)));
    for p in &smoothed {
        assert!(p.x >= 0.0 && p.x <= 40.0 && p.y >= 0.0 && p.y <= 40.0);
    }
}

#[test]
fn test_outline_path_smoothing_switch() {
    let outline = donut();
    let plain = outline_path(&outline, None, 1.0);
    assert_eq!(plain, build_path(&outline.points, &outline.interior_rings, 1.0));
    let smoothed = outline_path(&outline, Some(0.5), 1.0);
    assert_ne!(plain, smoothed);
    assert_eq!(smoothed.matches('M').count(), 2);
}
