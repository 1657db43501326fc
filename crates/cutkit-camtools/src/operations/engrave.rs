//! Engraving: the cutter follows the source rings exactly.

use cutkit_core::geometry::Polygon;
use tracing::debug;

use crate::merge::merge_paths;
use crate::toolpath::CamPath;

/// Plans an engrave pass over every ring of `geometry`.
///
/// Rings are reversed for conventional milling. Merging runs without a
/// safe-crossing boundary, so each ring stays a separate path. Every
/// resulting path is then marked safe to close regardless of the merge.
pub fn engrave(geometry: &[Polygon], climb: bool) -> Vec<CamPath> {
    let rings: Vec<Polygon> = geometry
        .iter()
        .map(|ring| {
            let mut ring = ring.clone();
            if !climb {
                ring.reverse();
            }
            ring
        })
        .collect();

    let mut paths = merge_paths(None, &rings);
    for path in &mut paths {
        path.safe_to_close = true;
    }
    debug!("Engrave planned {} paths", paths.len());
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutkit_core::geometry::Point;

    #[test]
    fn test_two_strokes_stay_separate() {
        let geometry = vec![
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            vec![Point::new(0.0, 50.0), Point::new(100.0, 50.0)],
        ];
        let paths = engrave(&geometry, true);
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.safe_to_close));
        assert_eq!(paths[0].len(), 3);
    }

    #[test]
    fn test_conventional_reverses_ring() {
        let geometry = vec![vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]];
        let paths = engrave(&geometry, false);
        let pts = paths[0].points();
        assert_eq!(pts[0], Point::new(10.0, 10.0));
        assert_eq!(pts[1], Point::new(10.0, 0.0));
        assert_eq!(pts[3], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_empty_geometry() {
        assert!(engrave(&[], false).is_empty());
    }
}
