//! Equation of a circle determined by given points, levels 1–4.
//!
//! 1. Endpoints of a diameter.
//! 2. The center and two points on the circle.
//! 3. Three points on the circle.
//! 4. The vertices of a right triangle, which first has to be shown to be
//!    right-angled.

use mcq_api_models::GeneratorOutput;
use mcq_formatter::{fraction_latex, point_latex, FractionStyle};
use mcq_math::{circumcenter, circumcenter_system, Fraction, Point};
use mcq_sampling::{
    random_distinct, random_element, random_int, sample_or_fallback, RandomSource,
};

use super::circle_common::{
    bracketed, either_form, equation_answer, explain_equation, linear_equation, perturbed_circle,
    radius_step, squared_distance_working, Circle, EquationForm,
};
use crate::config::GeneratorConfig;
use crate::distractor::{Candidate, DistractorSet};
use crate::explanation::Explanation;
use crate::generator::{resolve_level, QuestionGenerator};
use crate::geometry::{right_triangle_points, RightTriangle};

pub const QUESTION_ID: &str = "F5L7.1_Q4_F_MQ";
pub const LEVELS: u32 = 4;

const LABELS: [char; 3] = ['A', 'B', 'C'];

/// Curated diameters. Some are centered at the origin and get replaced by
/// random endpoints.
const DIAMETERS: [[(i64, i64); 2]; 5] = [
    [(1, 3), (5, 7)],
    [(2, 7), (-6, -1)],
    [(-4, 0), (4, 0)],
    [(0, -5), (0, 5)],
    [(3, -2), (-4, 5)],
];

/// Used when random three-point circles keep failing.
const THREE_POINT_FALLBACK: [(i64, i64); 3] = [(0, 0), (8, 0), (0, 6)];

/// Radii with many lattice points.
const LATTICE_RADII: [i64; 3] = [5, 10, 13];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Given {
    Diameter([Point; 2]),
    CenterAndPoints { center: Point, points: [Point; 2] },
    ThreePoints([Point; 3]),
    RightTriangle(RightTriangle),
}

impl Given {
    fn points(&self) -> &[Point] {
        match self {
            Given::Diameter(points) | Given::CenterAndPoints { points, .. } => &points[..],
            Given::ThreePoints(points) => &points[..],
            Given::RightTriangle(t) => &t.vertices[..],
        }
    }
}

/// Which forms the four options are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStyle {
    Standard,
    General,
    /// Answer in either form, distractors alternating between the two.
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThroughPointsProblem {
    pub given: Given,
    pub circle: Circle,
    pub style: AnswerStyle,
    pub form: EquationForm,
}

impl ThroughPointsProblem {
    fn distractor_form(&self, index: usize) -> EquationForm {
        match self.style {
            AnswerStyle::Standard => EquationForm::Standard,
            AnswerStyle::General => EquationForm::General,
            AnswerStyle::Mixed if index % 2 == 0 => EquationForm::General,
            AnswerStyle::Mixed => EquationForm::Standard,
        }
    }
}

fn lattice(points: [(i64, i64); 3]) -> [Point; 3] {
    points.map(|(x, y)| Point::lattice(x, y))
}

fn in_box(p: &Point, bound: i64) -> bool {
    p.as_lattice()
        .is_some_and(|(x, y)| x.abs() <= bound && y.abs() <= bound)
}

/// Lattice vectors of length `r`.
fn lattice_vectors(r: i64) -> Vec<(i64, i64)> {
    (-r..=r)
        .flat_map(|x| (-r..=r).map(move |y| (x, y)))
        .filter(|(x, y)| x * x + y * y == r * r)
        .collect()
}

#[derive(Debug, Clone)]
pub struct CircleThroughPoints {
    difficulty: u32,
    level: u32,
    config: GeneratorConfig,
}

impl CircleThroughPoints {
    pub fn new(difficulty: u32) -> Self {
        Self::with_config(difficulty, GeneratorConfig::default())
    }

    pub fn with_config(difficulty: u32, config: GeneratorConfig) -> Self {
        Self {
            difficulty,
            level: resolve_level(difficulty, LEVELS),
            config,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    fn label(&self) -> String {
        format!("{QUESTION_ID}/level{}", self.level)
    }

    fn sample_given(&self, src: &mut dyn RandomSource) -> (Given, Circle) {
        let max_attempts = self.config.max_attempts;
        match self.level {
            2 => {
                let (center, points) = sample_or_fallback(
                    &self.label(),
                    max_attempts,
                    || {
                        let center = Point::lattice(random_int(src, -8, 8), random_int(src, -8, 8));
                        let (p, q) = (random_int(src, -5, 5), random_int(src, -5, 5));
                        let turned = *random_element(src, &[(q, p), (-p, q), (p, -q), (-q, p), (q, -p)]);
                        (
                            center,
                            [center.translate(p, q), center.translate(turned.0, turned.1)],
                        )
                    },
                    |(center, [a, b])| {
                        !center.is_origin()
                            && a != center
                            && a != b
                            && a.midpoint(b) != *center
                            && in_box(a, 10)
                            && in_box(b, 10)
                    },
                    || {
                        let center = Point::lattice(2, -1);
                        (center, [center.translate(3, 4), center.translate(4, -3)])
                    },
                );
                (
                    Given::CenterAndPoints { center, points },
                    Circle::through(center, &points[0]),
                )
            }
            3 => {
                let points = sample_or_fallback(
                    &self.label(),
                    max_attempts,
                    || {
                        let center = (random_int(src, -6, 6), random_int(src, -6, 6));
                        let radius = *random_element(src, &LATTICE_RADII);
                        let picked = random_distinct(src, &lattice_vectors(radius), 3);
                        [0, 1, 2].map(|i| Point::lattice(center.0 + picked[i].0, center.1 + picked[i].1))
                    },
                    |points| {
                        points.iter().all(|p| in_box(p, 12))
                            && circumcenter(&points[0], &points[1], &points[2])
                                .is_some_and(|c| !c.is_origin())
                    },
                    || lattice(THREE_POINT_FALLBACK),
                );
                let center = circumcenter(&points[0], &points[1], &points[2])
                    .unwrap_or_else(|| points[0].midpoint(&points[1]));
                (Given::ThreePoints(points), Circle::through(center, &points[0]))
            }
            4 => {
                let triangle = sample_or_fallback(
                    &self.label(),
                    max_attempts,
                    || right_triangle_points(src, (-10, 10), max_attempts),
                    |t| !t.circumcenter().is_origin(),
                    || RightTriangle {
                        vertices: lattice(crate::geometry::FALLBACK_TRIANGLES[0]),
                        right_angle: 0,
                    },
                );
                let center = triangle.circumcenter();
                (
                    Given::RightTriangle(triangle),
                    Circle::through(center, &triangle.vertices[0]),
                )
            }
            _ => {
                let curated = (*random_element(src, &DIAMETERS)).map(|(x, y)| Point::lattice(x, y));
                let endpoints = if curated[0].midpoint(&curated[1]).is_origin() {
                    sample_or_fallback(
                        &self.label(),
                        max_attempts,
                        || {
                            [0, 1].map(|_| Point::lattice(random_int(src, -8, 8), random_int(src, -8, 8)))
                        },
                        |[a, b]| a != b && !a.midpoint(b).is_origin(),
                        || [Point::lattice(1, 3), Point::lattice(5, 7)],
                    )
                } else {
                    curated
                };
                let center = endpoints[0].midpoint(&endpoints[1]);
                (Given::Diameter(endpoints), Circle::through(center, &endpoints[0]))
            }
        }
    }

    pub fn sample_problem(&self, src: &mut dyn RandomSource) -> ThroughPointsProblem {
        let (given, circle) = self.sample_given(src);
        let (style, form) = match random_int(src, 1, 3) {
            1 => (AnswerStyle::General, EquationForm::General),
            2 => (AnswerStyle::Standard, EquationForm::Standard),
            _ => (AnswerStyle::Mixed, either_form(src)),
        };
        ThroughPointsProblem {
            given,
            circle,
            style,
            form,
        }
    }

    fn content(problem: &ThroughPointsProblem) -> String {
        let named: Vec<String> = problem
            .given
            .points()
            .iter()
            .zip(LABELS)
            .map(|(p, label)| format!("\\({label}{}\\)", point_latex(p)))
            .collect();
        match &problem.given {
            Given::Diameter(_) => format!(
                "{} and {} are the endpoints of a diameter of a circle. Find the equation of the circle.",
                named[0], named[1]
            ),
            Given::CenterAndPoints { center, .. } => format!(
                "A circle with center \\({}\\) passes through {} and {}. Find the equation of the circle.",
                point_latex(center),
                named[0],
                named[1]
            ),
            Given::ThreePoints(_) => format!(
                "Find the equation of the circle passing through {}, {} and {}.",
                named[0], named[1], named[2]
            ),
            Given::RightTriangle(_) => format!(
                "The points {}, {} and {} are given.<br><br>a) Show that \\(\\triangle ABC\\) is a right-angled triangle.<br>b) Find the equation of the circle passing through \\(A\\), \\(B\\) and \\(C\\).",
                named[0], named[1], named[2]
            ),
        }
    }

    /// Wrong circles, each distinct from the answer and from each other,
    /// then rendered in the forms the answer style asks for.
    fn distractors(&self, problem: &ThroughPointsProblem, src: &mut dyn RandomSource) -> [String; 3] {
        let circle = problem.circle;
        let mut wrong: Vec<Circle> = Vec::with_capacity(3);
        let push = |candidate: Circle, wrong: &mut Vec<Circle>| {
            let fresh = !candidate.same_as(&circle)
                && !candidate.radius_sq.is_negative()
                && !candidate.radius_sq.is_zero()
                && !wrong.iter().any(|w| w.same_as(&candidate));
            if fresh && wrong.len() < 3 {
                wrong.push(candidate);
            }
        };

        let center = circle.center;
        push(circle.with_center(center.reflect(true, false)), &mut wrong);
        push(circle.with_center(center.reflect(false, true)), &mut wrong);
        // diameter used as the radius
        push(
            circle.with_radius_sq(circle.radius_sq * Fraction::from_integer(4)),
            &mut wrong,
        );
        for _ in 0..self.config.max_attempts {
            if wrong.len() == 3 {
                break;
            }
            push(perturbed_circle(src, &circle), &mut wrong);
        }

        let mut set = DistractorSet::new(Candidate::text(equation_answer(&circle, problem.form)));
        set.offer_all(
            wrong
                .iter()
                .enumerate()
                .map(|(i, w)| Candidate::text(equation_answer(w, problem.distractor_form(i)))),
        );
        let form = problem.distractor_form(set.len());
        set.finish(|k| Candidate::text(equation_answer(&radius_step(&circle, k), form)))
    }

    fn explain(problem: &ThroughPointsProblem) -> String {
        let circle = &problem.circle;
        let mut e = Explanation::new();
        match &problem.given {
            Given::Diameter([a, b]) => {
                e.step_math(
                    "The center is the midpoint of the diameter \\(AB\\)",
                    midpoint_working(a, b),
                );
                e.step_math(
                    "The radius is the distance from the center to \\(A\\)",
                    format!("r^2 = {}", squared_distance_working(&circle.center, a)),
                );
            }
            Given::CenterAndPoints { center, points: [a, b] } => {
                e.step_math(
                    "The radius is the distance from the center to \\(A\\)",
                    format!("r^2 = {}", squared_distance_working(center, a)),
                );
                e.step_math(
                    "Check: \\(B\\) is at the same distance from the center",
                    format!("OB^2 = {}", squared_distance_working(center, b)),
                );
            }
            Given::ThreePoints([a, b, c]) => {
                let system = circumcenter_system(a, b, c);
                e.step_lines(
                    "Let the center be \\(O(h, k)\\). It is equally far from \\(A\\), \\(B\\) and \\(C\\), and expanding \\(OA^2 = OB^2\\) and \\(OB^2 = OC^2\\) gives two linear equations",
                    vec![
                        linear_equation(system.a, system.b, system.c),
                        linear_equation(system.d, system.e, system.f),
                    ],
                );
                e.step_math(
                    "Solve the pair of equations",
                    format!(
                        "h = {},\\ k = {}",
                        fraction_latex(circle.center.x, FractionStyle::Improper),
                        fraction_latex(circle.center.y, FractionStyle::Improper)
                    ),
                );
                e.step_math(
                    "The radius is the distance from the center to \\(A\\)",
                    format!("r^2 = {}", squared_distance_working(&circle.center, a)),
                );
            }
            Given::RightTriangle(triangle) => explain_right_triangle(&mut e, triangle, circle),
        }
        explain_equation(&mut e, circle, problem.form);
        e.conclude("Therefore,", circle.equation(problem.form));
        e.render()
    }
}

/// `\left(\frac{1 + 5}{2}, \frac{3 + 7}{2}\right) = (3, 5)`
fn midpoint_working(a: &Point, b: &Point) -> String {
    let half = |p: Fraction, q: Fraction| {
        format!(
            "\\frac{{{} + {}}}{{2}}",
            fraction_latex(p, FractionStyle::Improper),
            bracketed(q)
        )
    };
    format!(
        "\\left({}, {}\\right) = {}",
        half(a.x, b.x),
        half(a.y, b.y),
        point_latex(&a.midpoint(b))
    )
}

fn explain_right_triangle(e: &mut Explanation, triangle: &RightTriangle, circle: &Circle) {
    let v = &triangle.vertices;
    let side = |i: usize, j: usize| {
        let (p, q) = if i < j { (i, j) } else { (j, i) };
        format!("{}{}", LABELS[p], LABELS[q])
    };
    let sq = |i: usize, j: usize| v[i].squared_distance(&v[j]);
    let r = triangle.right_angle;
    let (i, j) = ((r + 1) % 3, (r + 2) % 3);
    let latex = |f: Fraction| fraction_latex(f, FractionStyle::Improper);

    e.step_lines(
        "Compare the squares of the side lengths",
        [(0, 1), (1, 2), (0, 2)]
            .iter()
            .map(|&(p, q)| format!("{}^2 = {}", side(p, q), squared_distance_working(&v[p], &v[q])))
            .collect::<Vec<_>>(),
    );
    e.step_math(
        format!(
            "By the converse of Pythagoras' theorem the angle at \\({}\\) is a right angle",
            LABELS[r]
        ),
        format!(
            "{}^2 + {}^2 = {} + {} = {} = {}^2",
            side(r, i),
            side(r, j),
            latex(sq(r, i)),
            latex(sq(r, j)),
            latex(sq(i, j)),
            side(i, j)
        ),
    );
    e.step_math(
        format!(
            "The hypotenuse \\({}\\) subtends a right angle, so it is a diameter and the center is its midpoint",
            side(i, j)
        ),
        midpoint_working(&v[i], &v[j]),
    );
    let quarter = format!("\\frac{{{}}}{{4}}", latex(sq(i, j)));
    let reduced = latex(circle.radius_sq);
    let working = if quarter == reduced {
        format!("r^2 = \\frac{{{}^2}}{{4}} = {quarter}", side(i, j))
    } else {
        format!("r^2 = \\frac{{{}^2}}{{4}} = {quarter} = {reduced}", side(i, j))
    };
    e.step_math("The radius is half the hypotenuse", working);
}

impl QuestionGenerator for CircleThroughPoints {
    fn question_id(&self) -> &'static str {
        QUESTION_ID
    }

    fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn generate_with(&self, src: &mut dyn RandomSource) -> GeneratorOutput {
        let problem = self.sample_problem(src);
        let correct = equation_answer(&problem.circle, problem.form);
        let wrong = self.distractors(&problem, src);
        tracing::debug!(
            target: "generate",
            question_id = QUESTION_ID,
            difficulty = self.difficulty,
            level = self.level,
            "generated question"
        );
        GeneratorOutput::new(Self::content(&problem), correct, wrong, Self::explain(&problem))
    }
}
