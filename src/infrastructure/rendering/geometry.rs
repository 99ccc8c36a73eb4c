//! Path flattening shared by every backend.

use crate::domain::chart::{Curve, Point};

const EPSILON: f64 = 1e-12;

/// Drawing instruction for a path, in content-box coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
}

/// Turn a polyline into drawing commands for the requested curve.
pub fn path_commands(points: &[Point], curve: Curve) -> Vec<PathCommand> {
    match curve {
        Curve::Linear => linear(points),
        Curve::CatmullRom { alpha } => catmull_rom(points, alpha),
    }
}

fn linear(points: &[Point]) -> Vec<PathCommand> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| if i == 0 { PathCommand::MoveTo(*p) } else { PathCommand::LineTo(*p) })
        .collect()
}

/// Sliding window over the last three points plus the chord lengths
/// raised to `alpha` between them.
struct CatmullRom {
    alpha: f64,
    p0: Point,
    p1: Point,
    p2: Point,
    l01_a: f64,
    l12_a: f64,
    l23_a: f64,
    l01_2a: f64,
    l12_2a: f64,
    l23_2a: f64,
    seen: usize,
    out: Vec<PathCommand>,
}

impl CatmullRom {
    fn new(alpha: f64, capacity: usize) -> Self {
        let nan = Point::new(f64::NAN, f64::NAN);
        Self {
            alpha,
            p0: nan,
            p1: nan,
            p2: nan,
            l01_a: 0.0,
            l12_a: 0.0,
            l23_a: 0.0,
            l01_2a: 0.0,
            l12_2a: 0.0,
            l23_2a: 0.0,
            seen: 0,
            out: Vec::with_capacity(capacity),
        }
    }

    /// Cubic segment from `p1` to `p2`, with `next` as the look-ahead point.
    fn segment(&mut self, next: Point) {
        let mut c1 = self.p1;
        let mut c2 = self.p2;

        if self.l01_a > EPSILON {
            let a = 2.0 * self.l01_2a + 3.0 * self.l01_a * self.l12_a + self.l12_2a;
            let n = 3.0 * self.l01_a * (self.l01_a + self.l12_a);
            c1 = Point::new(
                (self.p1.x * a - self.p0.x * self.l12_2a + self.p2.x * self.l01_2a) / n,
                (self.p1.y * a - self.p0.y * self.l12_2a + self.p2.y * self.l01_2a) / n,
            );
        }
        if self.l23_a > EPSILON {
            let b = 2.0 * self.l23_2a + 3.0 * self.l23_a * self.l12_a + self.l12_2a;
            let m = 3.0 * self.l23_a * (self.l23_a + self.l12_a);
            c2 = Point::new(
                (self.p2.x * b + self.p1.x * self.l23_2a - next.x * self.l12_2a) / m,
                (self.p2.y * b + self.p1.y * self.l23_2a - next.y * self.l12_2a) / m,
            );
        }
        self.out.push(PathCommand::CubicTo { c1, c2, to: self.p2 });
    }

    fn point(&mut self, p: Point) {
        if self.seen > 0 {
            let dx = self.p2.x - p.x;
            let dy = self.p2.y - p.y;
            self.l23_2a = (dx * dx + dy * dy).powf(self.alpha);
            self.l23_a = self.l23_2a.sqrt();
        }

        match self.seen {
            0 => {
                self.seen = 1;
                self.out.push(PathCommand::MoveTo(p));
            }
            1 => self.seen = 2,
            _ => {
                self.seen = 3;
                self.segment(p);
            }
        }

        self.l01_a = self.l12_a;
        self.l12_a = self.l23_a;
        self.l01_2a = self.l12_2a;
        self.l12_2a = self.l23_2a;
        self.p0 = self.p1;
        self.p1 = self.p2;
        self.p2 = p;
    }

    fn finish(mut self) -> Vec<PathCommand> {
        match self.seen {
            2 => self.out.push(PathCommand::LineTo(self.p2)),
            3 => {
                let last = self.p2;
                self.point(last);
            }
            _ => {}
        }
        self.out
    }
}

fn catmull_rom(points: &[Point], alpha: f64) -> Vec<PathCommand> {
    let mut curve = CatmullRom::new(alpha, points.len() + 1);
    for p in points {
        curve.point(*p);
    }
    curve.finish()
}
