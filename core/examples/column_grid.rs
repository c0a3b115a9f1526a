use tributary_core::boundary::BoundaryRecord;
use tributary_core::tributary::PointRecord;
use tributary_core::{run, TributaryConfig, TributaryInput};

// Tributary areas of a 4 x 3 column grid on a 36 x 24 ft slab drawn in inches.
fn main() {
    let w = 36.0 * 12.0;
    let h = 24.0 * 12.0;
    let boundaries = vec![
        BoundaryRecord::segment(0, [0.0, 0.0], [w, 0.0]),
        BoundaryRecord::segment(1, [w, 0.0], [w, h]),
        BoundaryRecord::segment(2, [w, h], [0.0, h]),
        BoundaryRecord::segment(3, [0.0, h], [0.0, 0.0]),
    ];

    let mut points = Vec::new();
    for (row, y) in [24.0, 144.0, 264.0].into_iter().enumerate() {
        for (col, x) in [24.0, 150.0, 282.0, 408.0].into_iter().enumerate() {
            points.push(PointRecord::new((row * 4 + col) as u64, x, y));
        }
    }

    let config = TributaryConfig::default().with_units(
        tributary_core::units::LengthUnit::Inch,
        tributary_core::units::LengthUnit::Foot,
    );

    match run(&TributaryInput::new(points, boundaries), &config) {
        Ok(report) => {
            for line in report.summary_lines() {
                println!("{}", line);
            }
            println!(
                "Slab {:.2} sq ft, covered {:.2} sq ft",
                report.diagnostics.slab_area, report.diagnostics.covered_area
            );
        }
        Err(e) => eprintln!("Tributary run failed: {}", e),
    }
}
