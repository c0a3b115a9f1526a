// Boolean operations on concave outlines, the case convex clipping gets wrong.

use super::*;
use crate::geometry::{Point2, Polygon, Shape};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
    Shape::from(Polygon::new(vec![p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)]))
}

/// U-shaped slab: 30 wide, 20 tall, with a 10x15 notch open at the top.
fn u_shape() -> Shape {
    Shape::from(Polygon::new(vec![
        p(0.0, 0.0),
        p(30.0, 0.0),
        p(30.0, 20.0),
        p(20.0, 20.0),
        p(20.0, 5.0),
        p(10.0, 5.0),
        p(10.0, 20.0),
        p(0.0, 20.0),
    ]))
}

#[test]
fn test_intersection_of_concave_and_convex() {
    let kernel = GeoKernel::new();
    let slab = u_shape();
    assert!((slab.area() - 450.0).abs() < 1e-9);

    // Band across the top of both arms, over the notch
    let band = rect(-5.0, 10.0, 35.0, 30.0);
    let result = kernel.intersection(&slab, &band).unwrap();

    assert_eq!(result.parts().len(), 2, "band should cut the two arms apart");
    assert!((kernel.area(&result) - 200.0).abs() < 1e-6);
    for part in result.parts() {
        assert!(part.is_simple());
        assert_eq!(part.len(), 4);
    }
}

#[test]
fn test_intersection_disjoint_is_empty() {
    let kernel = GeoKernel::new();
    let result = kernel.intersection(&rect(0.0, 0.0, 1.0, 1.0), &rect(5.0, 5.0, 6.0, 6.0)).unwrap();
    assert!(result.is_empty());

    let result = kernel.intersection(&Shape::empty(), &rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_union_of_overlapping_rectangles() {
    let kernel = GeoKernel::new();
    let result = kernel.union(&rect(0.0, 0.0, 2.0, 2.0), &rect(1.0, 0.0, 3.0, 2.0)).unwrap();
    assert_eq!(result.parts().len(), 1);
    assert!((result.area() - 6.0).abs() < 1e-6);
}

#[test]
fn test_convex_hull() {
    let kernel = GeoKernel::new();
    let hull = kernel
        .convex_hull(&[p(0.0, 0.0), p(4.0, 0.0), p(2.0, 1.0), p(4.0, 4.0), p(0.0, 4.0)])
        .unwrap();
    assert_eq!(hull.len(), 4);
    assert!((hull.area() - 16.0).abs() < 1e-9);

    // Collinear input has no area
    let hull = kernel.convex_hull(&[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)]).unwrap();
    assert!(hull.is_empty());
}

#[test]
fn test_non_finite_input_is_rejected() {
    let kernel = GeoKernel::new();
    let bad = kernel.convex_hull(&[p(0.0, 0.0), p(f64::NAN, 1.0), p(2.0, 0.0)]);
    assert!(matches!(bad, Err(KernelOpError::InvalidGeometry(_))));
}

#[test]
fn test_centroid_matches_shape_centroid() {
    let kernel = GeoKernel::new();
    let slab = u_shape();
    let a = kernel.centroid(&slab).unwrap();
    let b = slab.centroid().unwrap();
    assert!((a - b).norm() < 1e-9);
}
