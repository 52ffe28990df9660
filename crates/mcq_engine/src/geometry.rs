//! Lattice right triangles that are not aligned with the axes.

use mcq_math::{is_right_angle_at, Point};
use mcq_sampling::{random_int, random_nonzero_int, sample_until, Attempted, RandomSource};

/// Known-good triangles, right angle at the first vertex.
pub const FALLBACK_TRIANGLES: [[(i64, i64); 3]; 3] = [
    [(1, -2), (3, 2), (-1, -1)],
    [(-2, 3), (1, 2), (0, 9)],
    [(2, -1), (5, -7), (4, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RightTriangle {
    pub vertices: [Point; 3],
    /// Index into `vertices` of the right angle.
    pub right_angle: usize,
}

impl RightTriangle {
    fn from_lattice(points: [(i64, i64); 3], right_angle: usize) -> Self {
        Self {
            vertices: points.map(|(x, y)| Point::lattice(x, y)),
            right_angle,
        }
    }

    /// The two vertices at the ends of the hypotenuse.
    pub fn hypotenuse(&self) -> (Point, Point) {
        let i = (self.right_angle + 1) % 3;
        let j = (self.right_angle + 2) % 3;
        (self.vertices[i], self.vertices[j])
    }

    /// Center of the circumscribed circle: the midpoint of the hypotenuse.
    pub fn circumcenter(&self) -> Point {
        let (p, q) = self.hypotenuse();
        p.midpoint(&q)
    }

    fn is_valid(&self, bounds: (i64, i64)) -> bool {
        let Some(coords) = self
            .vertices
            .iter()
            .map(Point::as_lattice)
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };
        let in_box = coords
            .iter()
            .all(|&(x, y)| (bounds.0..=bounds.1).contains(&x) && (bounds.0..=bounds.1).contains(&y));
        let distinct = |a: i64, b: i64, c: i64| a != b && b != c && a != c;
        let (p, q) = self.hypotenuse();
        let vertex = &self.vertices[self.right_angle];
        in_box
            && distinct(coords[0].0, coords[1].0, coords[2].0)
            && distinct(coords[0].1, coords[1].1, coords[2].1)
            && p.x != q.x
            && p.y != q.y
            && is_right_angle_at(vertex, &p, &q)
    }
}

/// A right triangle with lattice vertices inside `bounds` (inclusive, both
/// axes), all x's and all y's pairwise distinct, no side parallel to an
/// axis.
///
/// The legs are perpendicular integer vectors `s·(p, q)` and `t·(-q, p)`
/// from a random right-angle vertex, which is then placed at a random
/// position among the three. Falls back to a curated triangle when no
/// candidate passes within `max_attempts`.
pub fn right_triangle_points(
    src: &mut dyn RandomSource,
    bounds: (i64, i64),
    max_attempts: usize,
) -> RightTriangle {
    let attempt = sample_until(
        max_attempts,
        || {
            let (p, q) = (random_int(src, 1, 3), random_nonzero_int(src, -3, 3));
            let (s, t) = (random_int(src, 1, 3), random_int(src, 1, 3));
            let (rx, ry) = (random_int(src, bounds.0, bounds.1), random_int(src, bounds.0, bounds.1));
            let corner = (rx, ry);
            let a = (rx + s * p, ry + s * q);
            let b = (rx - t * q, ry + t * p);
            let right_angle = random_int(src, 0, 2) as usize;
            let mut points = [corner, a, b];
            points.rotate_right(right_angle);
            RightTriangle::from_lattice(points, right_angle)
        },
        |triangle| triangle.is_valid(bounds),
    );
    match attempt {
        Attempted::Accepted { value, .. } => value,
        Attempted::Exhausted { attempts } => {
            let choice = random_int(src, 0, FALLBACK_TRIANGLES.len() as i64 - 1) as usize;
            tracing::warn!(
                target: "sampling",
                sampler = "right_triangle_points",
                attempts,
                fallback = choice,
                "retry budget exhausted, using curated triangle"
            );
            RightTriangle::from_lattice(FALLBACK_TRIANGLES[choice], 0)
        }
    }
}
