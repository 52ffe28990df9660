//! Points with exact coordinates and the 2×2 solve behind circle-through-points.

use crate::fraction::Fraction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Fraction,
    pub y: Fraction,
}

impl Point {
    pub fn new(x: Fraction, y: Fraction) -> Self {
        Self { x, y }
    }

    pub fn lattice(x: i64, y: i64) -> Self {
        Self::new(Fraction::from_integer(x), Fraction::from_integer(y))
    }

    pub fn is_origin(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// Integer coordinates, when both are integral.
    pub fn as_lattice(&self) -> Option<(i64, i64)> {
        Some((self.x.to_integer()?, self.y.to_integer()?))
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        let half = Fraction::new(1, 2);
        Point::new(
            ((self.x + other.x) * half).simplify(),
            ((self.y + other.y) * half).simplify(),
        )
    }

    /// `|PQ|²`, reduced.
    pub fn squared_distance(&self, other: &Point) -> Fraction {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).simplify()
    }

    pub fn translate(&self, dx: i64, dy: i64) -> Point {
        Point::new(
            (self.x + Fraction::from_integer(dx)).simplify(),
            (self.y + Fraction::from_integer(dy)).simplify(),
        )
    }

    /// Same point with both coordinate signs flipped as requested.
    pub fn reflect(&self, flip_x: bool, flip_y: bool) -> Point {
        Point::new(
            if flip_x { -self.x } else { self.x },
            if flip_y { -self.y } else { self.y },
        )
    }
}

/// `a·h + b·k = c` and `d·h + e·k = f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearSystem2 {
    pub a: Fraction,
    pub b: Fraction,
    pub c: Fraction,
    pub d: Fraction,
    pub e: Fraction,
    pub f: Fraction,
}

impl LinearSystem2 {
    pub fn determinant(&self) -> Fraction {
        (self.a * self.e - self.b * self.d).simplify()
    }

    /// Cramer's rule in exact arithmetic. `None` when the determinant is zero.
    pub fn solve(&self) -> Option<(Fraction, Fraction)> {
        let det = self.determinant();
        if det.is_zero() {
            return None;
        }
        let h = (self.c * self.e - self.f * self.b).simplify() / det;
        let k = (self.a * self.f - self.c * self.d).simplify() / det;
        Some((h.simplify(), k.simplify()))
    }
}

/// The linear system for the center of the circle through three points.
///
/// Equates `|C-P1|² = |C-P2|²` and `|C-P2|² = |C-P3|²`; the quadratic terms
/// cancel, leaving two equations linear in the center.
pub fn circumcenter_system(p1: &Point, p2: &Point, p3: &Point) -> LinearSystem2 {
    let two = Fraction::from_integer(2);
    let sq = |p: &Point| (p.x * p.x + p.y * p.y).simplify();
    LinearSystem2 {
        a: (two * (p2.x - p1.x)).simplify(),
        b: (two * (p2.y - p1.y)).simplify(),
        c: (sq(p2) - sq(p1)).simplify(),
        d: (two * (p3.x - p2.x)).simplify(),
        e: (two * (p3.y - p2.y)).simplify(),
        f: (sq(p3) - sq(p2)).simplify(),
    }
}

/// Center of the circle through three points; `None` for collinear (or
/// repeated) points.
pub fn circumcenter(p1: &Point, p2: &Point, p3: &Point) -> Option<Point> {
    circumcenter_system(p1, p2, p3)
        .solve()
        .map(|(h, k)| Point::new(h, k))
}

/// Whether the angle at `vertex` between the other two points is right,
/// checked through the Pythagorean relation on squared side lengths.
pub fn is_right_angle_at(vertex: &Point, p: &Point, q: &Point) -> bool {
    let legs = vertex.squared_distance(p) + vertex.squared_distance(q);
    legs.value_eq(&p.squared_distance(q))
}
