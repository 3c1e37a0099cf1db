use usvg::tiny_skia_path::{self, PathSegment};

use super::types::{MachineSpace, Point, Polyline};

/// Recursion cap for curve subdivision (at most 2^16 segments per curve)
const MAX_DEPTH: u32 = 16;

/// Flatten every path in the tree into machine-space polylines, in document order.
pub fn collect_polylines(tree: &usvg::Tree, dpi: f64, tolerance: f64) -> Vec<Polyline> {
    let space = MachineSpace::new(dpi, tree.size().height() as f64);
    let mut polylines = Vec::new();
    walk_group(tree.root(), &space, tolerance, &mut polylines);
    polylines
}

fn walk_group(
    group: &usvg::Group,
    space: &MachineSpace,
    tolerance: f64,
    polylines: &mut Vec<Polyline>,
) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => {
                walk_group(g, space, tolerance, polylines);
            }
            usvg::Node::Path(path) => {
                flatten_path(path, space, tolerance, polylines);
            }
            usvg::Node::Image(_) => {
                tracing::debug!("skipping embedded image");
            }
            usvg::Node::Text(_) => {
                tracing::debug!("skipping text node");
            }
        }
    }
}

fn flatten_path(
    path: &usvg::Path,
    space: &MachineSpace,
    tolerance: f64,
    polylines: &mut Vec<Polyline>,
) {
    let ts = path.abs_transform();
    let to_machine = |pt: tiny_skia_path::Point| {
        let x = (ts.sx * pt.x + ts.kx * pt.y + ts.tx) as f64;
        let y = (ts.ky * pt.x + ts.sy * pt.y + ts.ty) as f64;
        space.map(x, y)
    };

    let mut current = Polyline::default();
    let mut last = Point::new(0.0, 0.0);

    for seg in path.data().segments() {
        match seg {
            PathSegment::MoveTo(pt) => {
                finish(&mut current, polylines);
                last = to_machine(pt);
                current.push(last);
            }
            PathSegment::LineTo(pt) => {
                last = to_machine(pt);
                current.push(last);
            }
            PathSegment::QuadTo(ctrl, end) => {
                let ctrl = to_machine(ctrl);
                let end = to_machine(end);
                flatten_quad(last, ctrl, end, tolerance, &mut current);
                last = end;
            }
            PathSegment::CubicTo(ctrl1, ctrl2, end) => {
                let ctrl1 = to_machine(ctrl1);
                let ctrl2 = to_machine(ctrl2);
                let end = to_machine(end);
                flatten_cubic(last, ctrl1, ctrl2, end, tolerance, &mut current);
                last = end;
            }
            PathSegment::Close => {
                if let Some(&start) = current.start() {
                    current.push(start);
                    current.closed = true;
                    finish(&mut current, polylines);
                    // A segment following a close starts from the subpath start
                    current.push(start);
                    last = start;
                }
            }
        }
    }

    finish(&mut current, polylines);
}

fn finish(current: &mut Polyline, polylines: &mut Vec<Polyline>) {
    let done = std::mem::take(current);
    if done.is_cuttable() {
        polylines.push(done);
    }
}

/// Append points approximating a quadratic Bezier, excluding `p0`.
pub fn flatten_quad(p0: Point, ctrl: Point, p2: Point, tolerance: f64, out: &mut Polyline) {
    // Degree elevation: the same curve as a cubic
    let c1 = p0.lerp(&ctrl, 2.0 / 3.0);
    let c2 = p2.lerp(&ctrl, 2.0 / 3.0);
    flatten_cubic(p0, c1, c2, p2, tolerance, out);
}

/// Append points approximating a cubic Bezier, excluding `p0`.
///
/// The curve is split in half until both control points are within
/// `tolerance` of the chord; the curve stays inside the hull of its control
/// points, so the chord is then within `tolerance` of the curve.
pub fn flatten_cubic(p0: Point, c1: Point, c2: Point, p3: Point, tolerance: f64, out: &mut Polyline) {
    subdivide_cubic(p0, c1, c2, p3, tolerance, 0, out);
}

fn subdivide_cubic(
    p0: Point,
    c1: Point,
    c2: Point,
    p3: Point,
    tolerance: f64,
    depth: u32,
    out: &mut Polyline,
) {
    let flat = c1.distance_to_segment(&p0, &p3) <= tolerance
        && c2.distance_to_segment(&p0, &p3) <= tolerance;

    if flat || depth >= MAX_DEPTH {
        out.push(p3);
        return;
    }

    // de Casteljau split at t = 0.5
    let p01 = p0.lerp(&c1, 0.5);
    let p12 = c1.lerp(&c2, 0.5);
    let p23 = c2.lerp(&p3, 0.5);
    let p012 = p01.lerp(&p12, 0.5);
    let p123 = p12.lerp(&p23, 0.5);
    let mid = p012.lerp(&p123, 0.5);

    subdivide_cubic(p0, p01, p012, mid, tolerance, depth + 1, out);
    subdivide_cubic(mid, p123, p23, p3, tolerance, depth + 1, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    const KAPPA: f64 = 0.552_284_749_8;

    fn quarter_arc(tolerance: f64) -> Polyline {
        let mut line = Polyline::default();
        let p0 = Point::new(10.0, 0.0);
        line.push(p0);
        flatten_cubic(
            p0,
            Point::new(10.0, 10.0 * KAPPA),
            Point::new(10.0 * KAPPA, 10.0),
            Point::new(0.0, 10.0),
            tolerance,
            &mut line,
        );
        line
    }

    #[test]
    fn test_straight_cubic_is_one_segment() {
        let mut line = Polyline::default();
        let p0 = Point::new(0.0, 0.0);
        line.push(p0);
        flatten_cubic(
            p0,
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
            0.1,
            &mut line,
        );
        assert_eq!(line.points, vec![p0, Point::new(3.0, 0.0)]);
    }

    #[test]
    fn test_arc_stays_within_tolerance() {
        let tolerance = 0.05;
        let line = quarter_arc(tolerance);

        assert_eq!(line.points.last(), Some(&Point::new(0.0, 10.0)));
        for pair in line.points.windows(2) {
            let mid = pair[0].lerp(&pair[1], 0.5);
            let r = mid.distance(&Point::new(0.0, 0.0));
            // Chord sag plus the cubic's own deviation from a true circle
            assert!(10.0 - r <= tolerance + 0.01, "sag {} too large", 10.0 - r);
        }
    }

    #[test]
    fn test_tighter_tolerance_gives_more_points() {
        let coarse = quarter_arc(1.0);
        let fine = quarter_arc(0.001);
        assert!(fine.len() > coarse.len());
    }

    #[test]
    fn test_quad_endpoints() {
        let mut line = Polyline::default();
        let p0 = Point::new(0.0, 0.0);
        line.push(p0);
        flatten_quad(p0, Point::new(5.0, 10.0), Point::new(10.0, 0.0), 0.1, &mut line);

        assert_eq!(line.points.first(), Some(&p0));
        assert_eq!(line.points.last(), Some(&Point::new(10.0, 0.0)));
        assert!(line.len() > 2);
    }

    #[test]
    fn test_collect_rect_and_flip() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <rect x="10" y="10" width="20" height="20"/>
</svg>"#;
        let tree = usvg::Tree::from_str(svg, &usvg::Options::default()).unwrap();
        let polylines = collect_polylines(&tree, 25.4, 0.1);

        assert_eq!(polylines.len(), 1);
        let rect = &polylines[0];
        assert!(rect.closed);
        assert_eq!(rect.len(), 5);
        assert_eq!(rect.points.first(), rect.points.last());
        assert!(rect.points.contains(&Point::new(10.0, 90.0)));
        assert!(rect.points.contains(&Point::new(30.0, 70.0)));
    }

    #[test]
    fn test_collect_applies_group_transform() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <g transform="translate(50 0)">
    <path d="M0 0 L10 0 L10 10" stroke="black" fill="none"/>
  </g>
</svg>"#;
        let tree = usvg::Tree::from_str(svg, &usvg::Options::default()).unwrap();
        let polylines = collect_polylines(&tree, 25.4, 0.1);

        assert_eq!(polylines.len(), 1);
        assert_eq!(
            polylines[0].points,
            vec![
                Point::new(50.0, 100.0),
                Point::new(60.0, 100.0),
                Point::new(60.0, 90.0)
            ]
        );
        assert!(!polylines[0].closed);
    }
}
