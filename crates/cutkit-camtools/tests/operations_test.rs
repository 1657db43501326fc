use cutkit_camtools::operations::{OperationPlanner, OutlineSide};
use cutkit_camtools::CamPath;
use cutkit_core::geometry::{Point, Polygon};
use cutkit_core::{CamOp, OperationSpec, ToolSpec, Units};

fn square(size: f64) -> Polygon {
    vec![
        Point::new(0.0, 0.0),
        Point::new(size, 0.0),
        Point::new(size, size),
        Point::new(0.0, size),
    ]
}

/// Number of closed rings in merged paths (each ring ends on its start point).
fn ring_count(paths: &[CamPath]) -> usize {
    paths
        .iter()
        .map(|p| {
            let pts = p.points();
            let mut count = 0;
            let mut start = 0;
            for i in 1..pts.len() {
                if pts[i] == pts[start] && i > start + 1 {
                    count += 1;
                    start = i + 1;
                }
            }
            count
        })
        .sum()
}

#[test]
fn test_pocket_ring_count_shrinks_with_larger_step() {
    let planner = OperationPlanner::new();
    let geometry = vec![square(10_000.0)];
    let mut previous = usize::MAX;
    for overlap in [0.9, 0.7, 0.5, 0.3, 0.1] {
        let rings = ring_count(&planner.pocket(&geometry, 1_000.0, overlap, false).unwrap());
        assert!(rings <= previous, "overlap {} gave {} rings", overlap, rings);
        previous = rings;
    }
}

#[test]
fn test_outline_never_exceeds_width() {
    let planner = OperationPlanner::new();
    let geometry = vec![square(10_000.0)];
    for width in [1_000.0, 1_300.0, 2_000.0, 2_750.0] {
        let paths = planner
            .outline(&geometry, 1_000.0, OutlineSide::Inside, width, 0.5, false)
            .unwrap();
        let deepest = paths
            .iter()
            .flat_map(|p| p.path.iter())
            .map(|p| p.x.min(p.y).min(10_000.0 - p.x).min(10_000.0 - p.y))
            .fold(f64::NEG_INFINITY, f64::max);
        // Cutter centers stay within width - radius of the edge.
        assert!(deepest <= width - 500.0 + 1e-6, "width {}", width);
        assert!((deepest - (width - 500.0)).abs() < 1e-6, "width {}", width);
    }
}

#[test]
fn test_climb_reverses_pocket_rings() {
    let planner = OperationPlanner::new();
    let geometry = vec![square(10_000.0)];
    let conventional = planner.pocket(&geometry, 2_000.0, 0.5, false).unwrap();
    let climb = planner.pocket(&geometry, 2_000.0, 0.5, true).unwrap();
    let area = |p: &CamPath| cutkit_core::geometry::signed_area(&p.points()[..4]);
    assert!(area(&conventional[0]) > 0.0);
    assert!(area(&climb[0]) < 0.0);
}

#[test]
fn test_plan_in_millimeters() {
    let planner = OperationPlanner::new();
    let op = OperationSpec {
        units: Units::Mm,
        ..OperationSpec::new(CamOp::Outside)
    }
    .with_geometry(vec![square(25.4)]);
    let tool = ToolSpec {
        units: Units::Mm,
        diameter: 2.54,
        ..ToolSpec::default()
    };
    let paths = planner.plan(&op, &tool).unwrap();
    assert_eq!(paths.len(), 1);
    let min_x = paths[0]
        .path
        .iter()
        .map(|p| p.x)
        .fold(f64::INFINITY, f64::min);
    assert!((min_x + 500.0).abs() < 1.0);
}

#[test]
fn test_preview_of_pocket_is_region() {
    let planner = OperationPlanner::new();
    let op = OperationSpec::new(CamOp::Pocket).with_geometry(vec![square(1.0)]);
    let preview = planner.preview_geometry(&op, &ToolSpec::default()).unwrap();
    assert_eq!(preview.len(), 1);
    assert_eq!(preview[0].len(), 4);
}
