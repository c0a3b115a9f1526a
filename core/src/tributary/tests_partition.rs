use super::*;
use crate::boundary::{BoundaryGeometry, BoundaryRecord};
use crate::geometry::Point2;
use crate::units::LengthUnit;

fn exact() -> TributaryConfig {
    TributaryConfig {
        closing_tolerance: 0.0,
        ..Default::default()
    }
}

fn polyline_slab(corners: &[(f64, f64)]) -> Vec<BoundaryRecord> {
    vec![BoundaryRecord::new(
        0,
        BoundaryGeometry::Polyline {
            vertices: corners.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            closed: true,
        },
    )]
}

fn square_slab(size: f64) -> Vec<BoundaryRecord> {
    polyline_slab(&[(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)])
}

fn points(coords: &[(f64, f64)]) -> Vec<PointRecord> {
    coords
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| PointRecord::new(i as u64, x, y))
        .collect()
}

#[test]
fn test_regions_partition_the_slab() {
    let input = TributaryInput::new(
        points(&[(2.0, 3.0), (17.0, 4.0), (9.0, 11.0), (4.0, 18.0), (15.0, 16.0), (10.0, 2.0)]),
        square_slab(20.0),
    );
    let report = run(&input, &exact()).unwrap();

    assert_eq!(report.regions.len(), 6);
    let total: f64 = report.regions.iter().map(|r| r.area).sum();
    assert!((total - 400.0).abs() / 400.0 < 1e-6, "covered {}", total);
    assert!(report.diagnostics.partition_error < 1e-6);
    assert!(report.diagnostics.empty_regions.is_empty());

    for region in &report.regions {
        assert!(region.shape.contains(&region.point), "point {} outside its own region", region.owner);
        for part in region.shape.parts() {
            assert!(part.len() >= 3);
            assert!(part.is_simple());
        }
    }
}

#[test]
fn test_symmetric_points_split_in_half() {
    let input = TributaryInput::new(points(&[(2.5, 5.0), (7.5, 5.0)]), square_slab(10.0));
    let report = run(&input, &exact()).unwrap();

    for region in &report.regions {
        assert!((region.area - 50.0).abs() < 1e-6);
    }
    // Shared boundary on the bisector x = 5
    let (_, left_max) = report.regions[0].shape.bounds().unwrap();
    let (right_min, _) = report.regions[1].shape.bounds().unwrap();
    assert!((left_max.x - 5.0).abs() < 1e-6);
    assert!((right_min.x - 5.0).abs() < 1e-6);

    let c = report.regions[0].centroid.unwrap();
    assert!((c.x - 2.5).abs() < 1e-6 && (c.y - 5.0).abs() < 1e-6);
}

#[test]
fn test_single_point_owns_whole_slab() {
    let input = TributaryInput::new(points(&[(3.0, 3.0)]), square_slab(10.0));
    let report = run(&input, &exact()).unwrap();

    assert_eq!(report.regions[0].shape, report.outline.clip);
    assert!((report.regions[0].area - 100.0).abs() < 1e-6);
    assert_eq!(report.ranking.len(), 1);
    assert_eq!(report.ranking[0].rank, 1);
}

#[test]
fn test_duplicate_points_are_treated_alike() {
    let input = TributaryInput::new(points(&[(2.0, 5.0), (2.0, 5.0), (8.0, 5.0)]), square_slab(10.0));
    let report = run(&input, &exact()).unwrap();

    assert_eq!(report.regions[0].shape, report.regions[1].shape);
    assert!((report.regions[0].area - 50.0).abs() < 1e-6);
    assert!((report.regions[2].area - 50.0).abs() < 1e-6);
    assert_eq!(report.diagnostics.coincident_points, vec![(0, 1)]);
    // The duplicate is counted twice
    assert!((report.diagnostics.covered_area - 150.0).abs() < 1e-6);
}

#[test]
fn test_runs_are_bit_identical() {
    let input = TributaryInput::new(
        points(&[(1.3, 7.7), (8.1, 2.2), (5.5, 5.5), (9.4, 9.1)]),
        square_slab(10.0),
    );
    let first = run(&input, &TributaryConfig::default()).unwrap();
    let second = run(&input, &TributaryConfig::default().sequential()).unwrap();

    assert_eq!(first.regions, second.regions);
    assert_eq!(first.ranking, second.ranking);
}

#[test]
fn test_l_shaped_slab() {
    let slab = polyline_slab(&[(0.0, 0.0), (20.0, 0.0), (20.0, 10.0), (10.0, 10.0), (10.0, 20.0), (0.0, 20.0)]);
    let input = TributaryInput::new(points(&[(5.0, 5.0), (15.0, 5.0), (5.0, 15.0)]), slab);
    let report = run(&input, &exact()).unwrap();

    for region in &report.regions {
        assert!((region.area - 100.0).abs() < 1e-6, "region {} has area {}", region.owner, region.area);
    }
    assert!((report.diagnostics.slab_area - 300.0).abs() < 1e-6);
}

#[test]
fn test_point_outside_slab() {
    let input = TributaryInput::new(points(&[(5.0, 5.0), (30.0, 5.0)]), square_slab(10.0));
    let report = run(&input, &exact()).unwrap();

    assert_eq!(report.diagnostics.points_outside_slab, vec![1]);
    assert_eq!(report.diagnostics.empty_regions, vec![1]);
    assert_eq!(report.regions[1].area, 0.0);
    assert!(report.regions[1].centroid.is_none());
    assert_eq!(report.ranking.len(), 1);
    assert_eq!(report.ranking[0].owner, 0);
}

#[test]
fn test_no_points() {
    let input = TributaryInput::new(Vec::new(), square_slab(10.0));
    let report = run(&input, &exact()).unwrap();
    assert!(report.regions.is_empty());
    assert!(report.ranking.is_empty());
    assert_eq!(report.summary_lines(), vec!["Largest 0 tributary areas:".to_string()]);
}

#[test]
fn test_inch_drawing_reports_square_feet() {
    let input = TributaryInput::new(points(&[(30.0, 60.0), (96.0, 60.0)]), square_slab(120.0));
    let config = exact().with_units(LengthUnit::Inch, LengthUnit::Foot);
    let report = run(&input, &config).unwrap();

    // 120 in = 10 ft; area scales by the square of the factor
    assert!((report.diagnostics.slab_area - 100.0).abs() < 1e-6);
    assert!((report.regions[0].area - 52.5).abs() < 1e-6);
    assert!((report.regions[0].point.x - 2.5).abs() < 1e-12);
    assert!((report.regions[0].point.y - 5.0).abs() < 1e-12);
    assert_eq!(report.summary_lines()[1], "1. Column 0 at (2.50, 5.00): 52.50 sq ft");
    assert_eq!(report.summary_lines()[2], "2. Column 1 at (8.00, 5.00): 47.50 sq ft");
}

#[test]
fn test_closing_tolerance_included_in_partition() {
    let input = TributaryInput::new(points(&[(2.0, 5.0), (8.0, 5.0)]), square_slab(10.0));
    let report = run(&input, &TributaryConfig::default()).unwrap();

    let grown = 10.012 * 10.012;
    assert!((report.diagnostics.slab_area - grown).abs() < 1e-6);
    assert!(report.diagnostics.partition_error < 1e-6);
}

#[test]
fn test_top_k_limits_ranking() {
    let input = TributaryInput::new(
        points(&[(1.0, 1.0), (9.0, 1.0), (1.0, 9.0), (9.0, 9.0), (5.0, 5.0)]),
        square_slab(10.0),
    );
    let report = run(&input, &exact().with_top_k(2)).unwrap();
    assert_eq!(report.ranking.len(), 2);
    assert_eq!(report.regions.len(), 5);
    assert!(report.ranking[0].area >= report.ranking[1].area);
}

#[test]
fn test_fatal_and_invalid_inputs() {
    let open = TributaryInput::new(points(&[(0.0, 0.0)]), vec![BoundaryRecord::segment(0, [0.0, 0.0], [1.0, 0.0])]);
    assert!(matches!(run(&open, &exact()), Err(TributaryError::NoClosedBoundary { .. })));

    let nan = TributaryInput::new(points(&[(f64::NAN, 0.0)]), square_slab(10.0));
    assert!(matches!(run(&nan, &exact()), Err(TributaryError::InvalidInput(_))));

    let config = TributaryConfig { curve_segments: 0, ..Default::default() };
    let input = TributaryInput::new(points(&[(1.0, 1.0)]), square_slab(10.0));
    assert!(matches!(run(&input, &config), Err(TributaryError::InvalidConfig(_))));
}
