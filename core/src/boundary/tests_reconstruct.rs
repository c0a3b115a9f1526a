use super::*;
use crate::geometry::{Point2, Polygon};
use crate::kernel::GeoKernel;
use crate::tributary::{TributaryConfig, TributaryError};

fn no_closing() -> TributaryConfig {
    TributaryConfig {
        closing_tolerance: 0.0,
        ..Default::default()
    }
}

fn square_records(x0: f64, y0: f64, size: f64, first_id: u64) -> Vec<BoundaryRecord> {
    vec![
        BoundaryRecord::segment(first_id, [x0, y0], [x0 + size, y0]),
        BoundaryRecord::segment(first_id + 1, [x0 + size, y0], [x0 + size, y0 + size]),
        BoundaryRecord::segment(first_id + 2, [x0 + size, y0 + size], [x0, y0 + size]),
        BoundaryRecord::segment(first_id + 3, [x0, y0 + size], [x0, y0]),
    ]
}

#[test]
fn test_unit_square_in_any_order_and_direction() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let shuffled = vec![
        BoundaryRecord::segment(0, [1.0, 1.0], [1.0, 0.0]),
        BoundaryRecord::segment(1, [0.0, 0.0], [0.0, 1.0]),
        BoundaryRecord::segment(2, [1.0, 0.0], [0.0, 0.0]),
        BoundaryRecord::segment(3, [0.0, 1.0], [1.0, 1.0]),
    ];

    for records in [square_records(0.0, 0.0, 1.0, 0), shuffled] {
        let outline = reconstructor.reconstruct(&records).expect("square should reconstruct");
        assert_eq!(outline.ring.len(), 4);
        assert!((outline.ring.area() - 1.0).abs() < 1e-9);
        assert!((outline.area() - 1.0).abs() < 1e-9);
        assert!(outline.discarded.is_empty());
        assert_eq!(outline.interior_faces, 1);
    }
}

#[test]
fn test_closing_tolerance_grows_outline() {
    let kernel = GeoKernel::new();
    let config = TributaryConfig {
        closing_tolerance: 0.01,
        ..Default::default()
    };
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let outline = reconstructor.reconstruct(&square_records(0.0, 0.0, 1.0, 0)).unwrap();
    assert!((outline.ring.area() - 1.0).abs() < 1e-9);

    let grown = outline.clip.largest_part().unwrap();
    assert_eq!(grown.len(), 4);
    assert!((outline.area() - 1.02 * 1.02).abs() < 1e-6);
    let (min, max) = outline.clip.bounds().unwrap();
    assert!((min.x + 0.01).abs() < 1e-6);
    assert!((max.y - 1.01).abs() < 1e-6);
}

#[test]
fn test_no_closed_ring_is_fatal() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let open = vec![
        BoundaryRecord::segment(0, [0.0, 0.0], [1.0, 0.0]),
        BoundaryRecord::segment(1, [1.0, 0.0], [1.0, 1.0]),
    ];
    match reconstructor.reconstruct(&open) {
        Err(TributaryError::NoClosedBoundary { primitives }) => assert_eq!(primitives, 2),
        other => panic!("expected NoClosedBoundary, got {:?}", other.map(|o| o.ring)),
    }

    assert!(matches!(
        reconstructor.reconstruct(&[]),
        Err(TributaryError::NoClosedBoundary { primitives: 0 })
    ));
}

#[test]
fn test_largest_of_disjoint_rings_wins() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let mut records = square_records(100.0, 100.0, 2.0, 0);
    records.extend(square_records(0.0, 0.0, 10.0, 10));

    let outline = reconstructor.reconstruct(&records).unwrap();
    assert!((outline.ring.area() - 100.0).abs() < 1e-9);
    assert_eq!(outline.discarded.len(), 1);
    assert!((outline.discarded[0].area() - 4.0).abs() < 1e-9);
}

#[test]
fn test_internal_walls_keep_outer_outline() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let mut records = square_records(0.0, 0.0, 10.0, 0);
    records.push(BoundaryRecord::segment(4, [5.0, -1.0], [5.0, 11.0]));

    let outline = reconstructor.reconstruct(&records).unwrap();
    assert_eq!(outline.ring.len(), 4, "split points on the outline are collinear and removed");
    assert!((outline.ring.area() - 100.0).abs() < 1e-9);
    assert_eq!(outline.interior_faces, 2);
    assert!(outline.discarded.is_empty());
}

#[test]
fn test_degenerate_primitives_are_dropped() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let mut records = square_records(0.0, 0.0, 4.0, 0);
    records.push(BoundaryRecord::segment(4, [2.0, 2.0], [2.0, 2.0]));
    records.push(BoundaryRecord::new(
        5,
        BoundaryGeometry::Polyline { vertices: vec![Point2::new(1.0, 1.0)], closed: false },
    ));

    assert_eq!(reconstructor.flatten(&records).len(), 4);
    let outline = reconstructor.reconstruct(&records).unwrap();
    assert!((outline.ring.area() - 16.0).abs() < 1e-9);
}

#[test]
fn test_circle_outline() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let records = vec![BoundaryRecord::new(
        0,
        BoundaryGeometry::Circle { center: Point2::new(3.0, 4.0), radius: 5.0 },
    )];
    let outline = reconstructor.reconstruct(&records).unwrap();

    let n = config.curve_segments as f64;
    let expected = 0.5 * n * 25.0 * (2.0 * std::f64::consts::PI / n).sin();
    assert_eq!(outline.ring.len(), config.curve_segments);
    assert!((outline.ring.area() - expected).abs() < 1e-6);
}

#[test]
fn test_arc_and_chord_outline() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    // Half disk: arc over the top plus the diameter
    let records = vec![
        BoundaryRecord::new(
            0,
            BoundaryGeometry::Arc {
                center: Point2::origin(),
                radius: 5.0,
                start_angle: 0.0,
                end_angle: 180.0,
            },
        ),
        BoundaryRecord::segment(1, [-5.0, 0.0], [5.0, 0.0]),
    ];
    let outline = reconstructor.reconstruct(&records).unwrap();

    let half_disk = 0.5 * std::f64::consts::PI * 25.0;
    assert!((outline.ring.area() - half_disk).abs() / half_disk < 0.01);
    assert!(outline.ring.vertices().iter().all(|v| v.y >= -1e-9));
}

#[test]
fn test_closed_polyline_outline() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    // L-shaped slab as one closed polyline
    let records = vec![BoundaryRecord::new(
        0,
        BoundaryGeometry::Polyline {
            vertices: vec![
                Point2::new(0.0, 0.0),
                Point2::new(20.0, 0.0),
                Point2::new(20.0, 10.0),
                Point2::new(10.0, 10.0),
                Point2::new(10.0, 20.0),
                Point2::new(0.0, 20.0),
            ],
            closed: true,
        },
    )];
    let outline = reconstructor.reconstruct(&records).unwrap();
    assert_eq!(outline.ring.len(), 6);
    assert!((outline.ring.area() - 300.0).abs() < 1e-9);
    assert!(outline.ring.is_simple());
}

#[test]
fn test_select_outline_ties_keep_first() {
    let a = Polygon::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)]);
    let b = Polygon::new(vec![Point2::new(5.0, 5.0), Point2::new(6.0, 5.0), Point2::new(5.0, 6.0)]);

    let (outline, rest) = select_outline(vec![a.clone(), b.clone()]).unwrap();
    assert_eq!(outline, a);
    assert_eq!(rest, vec![b]);

    assert!(select_outline(Vec::new()).is_none());
}

#[test]
fn test_squares_touching_at_a_corner() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    // Figure eight: the small square hangs off the top right corner
    let mut records = square_records(0.0, 0.0, 10.0, 0);
    records.extend(square_records(10.0, 10.0, 4.0, 10));

    let outline = reconstructor.reconstruct(&records).unwrap();
    assert!(outline.ring.is_simple());
    assert_eq!(outline.ring.len(), 4);
    assert!((outline.ring.area() - 100.0).abs() < 1e-9);
    assert_eq!(outline.discarded.len(), 1);
    assert!((outline.discarded[0].area() - 16.0).abs() < 1e-9);
    assert!(outline.discarded[0].is_simple());
}

#[test]
fn test_squares_joined_by_bridge() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let mut records = square_records(0.0, 0.0, 10.0, 0);
    records.extend(square_records(20.0, 0.0, 4.0, 10));
    records.push(BoundaryRecord::segment(20, [10.0, 2.0], [20.0, 2.0]));

    let outline = reconstructor.reconstruct(&records).unwrap();
    assert!(outline.ring.is_simple());
    assert_eq!(outline.ring.len(), 4);
    assert!((outline.ring.area() - 100.0).abs() < 1e-9);
    assert_eq!(outline.discarded.len(), 1);
    assert!((outline.discarded[0].area() - 16.0).abs() < 1e-9);
    assert_eq!(outline.interior_faces, 2);
}

#[test]
fn test_small_circle_keeps_its_vertices() {
    let kernel = GeoKernel::new();
    let config = no_closing();
    let reconstructor = BoundaryReconstructor::new(&kernel, &config);

    let radius = 0.01;
    let records = vec![BoundaryRecord::new(
        0,
        BoundaryGeometry::Circle { center: Point2::new(1.0, 1.0), radius },
    )];
    let outline = reconstructor.reconstruct(&records).unwrap();

    let n = config.curve_segments as f64;
    let expected = 0.5 * n * radius * radius * (2.0 * std::f64::consts::PI / n).sin();
    assert_eq!(outline.ring.len(), config.curve_segments);
    assert!((outline.ring.area() - expected).abs() < expected * 1e-9);
}
