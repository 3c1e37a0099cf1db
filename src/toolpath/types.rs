/// Point in machine space (millimetres, Y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Distance from this point to the segment `a`-`b`.
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f64 {
        let d = *b - *a;
        let len_sq = d.x * d.x + d.y * d.y;
        if len_sq < 1e-24 {
            return self.distance(a);
        }
        let v = *self - *a;
        let t = ((v.x * d.x + v.y * d.y) / len_sq).clamp(0.0, 1.0);
        self.distance(&a.lerp(b, t))
    }
}

impl std::ops::Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Maps SVG user units (Y down) to machine millimetres (Y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineSpace {
    /// Millimetres per user unit
    pub scale: f64,
    /// Document height in user units
    pub height: f64,
}

impl MachineSpace {
    pub fn new(dpi: f64, height: f64) -> Self {
        Self {
            scale: 25.4 / dpi,
            height,
        }
    }

    pub fn map(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.scale, (self.height - y) * self.scale)
    }
}

/// Connected run of points the tool follows without lifting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    pub fn start(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Append `p` unless it coincides with the last point.
    pub fn push(&mut self, p: Point) {
        if let Some(last) = self.points.last()
            && last.distance(&p) < 1e-9
        {
            return;
        }
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A polyline needs at least two points to cut anything.
    pub fn is_cuttable(&self) -> bool {
        self.points.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);

        let above = Point::new(5.0, 2.0).distance_to_segment(&a, &b);
        assert!((above - 2.0).abs() < 1e-9);

        // Beyond the end the nearest point is the endpoint itself
        let past_end = Point::new(13.0, 4.0).distance_to_segment(&a, &b);
        assert!((past_end - 5.0).abs() < 1e-9);

        let degenerate = Point::new(5.0, 2.0).distance_to_segment(&b, &b);
        assert!((degenerate - 5.0f64.hypot(2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_machine_space_flips_and_scales() {
        let space = MachineSpace::new(25.4, 100.0);
        assert_eq!(space.map(10.0, 10.0), Point::new(10.0, 90.0));

        let space = MachineSpace::new(96.0, 96.0);
        let p = space.map(96.0, 0.0);
        assert!((p.x - 25.4).abs() < 1e-9);
        assert!((p.y - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_push_skips_duplicates() {
        let mut line = Polyline::default();
        line.push(Point::new(1.0, 1.0));
        line.push(Point::new(1.0, 1.0));
        line.push(Point::new(2.0, 1.0));
        assert_eq!(line.len(), 2);
        assert!(line.is_cuttable());
    }
}
