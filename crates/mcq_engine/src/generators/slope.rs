//! Slope of the line through two points, levels 1–6.
//!
//! Coordinates at levels 4 and 5 are drawn on a one- or two-decimal grid
//! as exact fractions, so the slope never suffers from float error.

use mcq_api_models::GeneratorOutput;
use mcq_formatter::{block, decimal_latex, fraction_latex, inline, text, FractionStyle};
use mcq_math::{Fraction, Point};
use mcq_sampling::{random_bool, random_decimal_exact, random_int, sample_or_fallback, RandomSource};

use crate::config::GeneratorConfig;
use crate::distractor::{Candidate, DistractorSet};
use crate::explanation::Explanation;
use crate::generator::{resolve_level, QuestionGenerator};

pub const QUESTION_ID: &str = "F3L8.2.1_Q1_F_MQ";
pub const LEVELS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slope {
    /// Vertical line.
    Undefined,
    Value(Fraction),
}

impl Slope {
    pub fn between(a: &Point, b: &Point) -> Self {
        let run = b.x - a.x;
        if run.is_zero() {
            Slope::Undefined
        } else {
            Slope::Value(((b.y - a.y) / run).simplify())
        }
    }

    fn candidate(self) -> Candidate {
        match self {
            Slope::Undefined => Candidate::text(inline(&text("undefined"))),
            Slope::Value(v) => value_candidate(v),
        }
    }
}

fn value_candidate(v: Fraction) -> Candidate {
    Candidate::valued(inline(&fraction_latex(v, FractionStyle::Improper)), v)
}

fn whole(n: i64) -> Fraction {
    Fraction::from_integer(n)
}

/// Common wrong answers, offered once the misconceptions run out.
const CATALOGUE: [Option<(i64, i64)>; 10] = [
    None,
    Some((0, 1)),
    Some((2, 1)),
    Some((-2, 1)),
    Some((1, 2)),
    Some((-1, 2)),
    Some((1, 1)),
    Some((-1, 1)),
    Some((3, 1)),
    Some((-3, 1)),
];

#[derive(Debug, Clone, Copy)]
enum Coordinates {
    Integers(i64, i64),
    Decimals { places: u32 },
    SpecialLine,
}

#[derive(Debug, Clone, Copy)]
struct LevelSpec {
    coordinates: Coordinates,
    fallback: [(i64, i64, i64); 2],
}

/// Fallback points are `(numerator_x, numerator_y, denominator)`.
const LEVEL_SPECS: [LevelSpec; LEVELS as usize] = [
    LevelSpec {
        coordinates: Coordinates::Integers(0, 5),
        fallback: [(1, 1, 1), (2, 3, 1)],
    },
    LevelSpec {
        coordinates: Coordinates::Integers(-5, 5),
        fallback: [(-1, 2, 1), (1, -2, 1)],
    },
    LevelSpec {
        coordinates: Coordinates::Integers(-6, 6),
        fallback: [(-2, 1, 1), (3, 4, 1)],
    },
    LevelSpec {
        coordinates: Coordinates::Decimals { places: 1 },
        fallback: [(-15, 5, 10), (25, 13, 10)],
    },
    LevelSpec {
        coordinates: Coordinates::Decimals { places: 2 },
        fallback: [(25, -150, 100), (175, 75, 100)],
    },
    LevelSpec {
        coordinates: Coordinates::SpecialLine,
        fallback: [(2, 1, 1), (2, 4, 1)],
    },
];

const DECIMAL_BOUND: i64 = 5;
const SPECIAL_BOUND: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlopeProblem {
    pub a: Point,
    pub b: Point,
    pub slope: Slope,
}

#[derive(Debug, Clone)]
pub struct SlopeBetweenPoints {
    difficulty: u32,
    level: u32,
    config: GeneratorConfig,
}

impl SlopeBetweenPoints {
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

    fn accepts(&self, slope: Slope) -> bool {
        match (self.level, slope) {
            (6, _) => true,
            (_, Slope::Undefined) => false,
            (1, Slope::Value(v)) => v.is_integer() && !v.is_zero() && !v.is_negative(),
            (2, Slope::Value(v)) => v.is_integer() && !v.is_zero(),
            (_, Slope::Value(v)) => !v.is_zero(),
        }
    }

    fn draw_points(spec: &LevelSpec, src: &mut dyn RandomSource) -> (Point, Point) {
        match spec.coordinates {
            Coordinates::Integers(lo, hi) => {
                let mut point = || Point::lattice(random_int(src, lo, hi), random_int(src, lo, hi));
                let a = point();
                (a, point())
            }
            Coordinates::Decimals { places } => {
                let mut point = || {
                    Point::new(
                        random_decimal_exact(src, -DECIMAL_BOUND, DECIMAL_BOUND, places),
                        random_decimal_exact(src, -DECIMAL_BOUND, DECIMAL_BOUND, places),
                    )
                };
                let a = point();
                (a, point())
            }
            Coordinates::SpecialLine => {
                let kind = src.next_unit();
                let a = Point::lattice(
                    random_int(src, -SPECIAL_BOUND, SPECIAL_BOUND),
                    random_int(src, -SPECIAL_BOUND, SPECIAL_BOUND),
                );
                let step = random_int(src, 1, 5);
                let b = if kind < 0.33 {
                    a.translate(0, step)
                } else if kind < 0.66 {
                    a.translate(step, 0)
                } else if random_bool(src, 0.5) {
                    a.translate(step, step)
                } else {
                    a.translate(step, -step)
                };
                (a, b)
            }
        }
    }

    pub fn sample_problem(&self, src: &mut dyn RandomSource) -> SlopeProblem {
        let spec = &LEVEL_SPECS[(self.level - 1) as usize];
        let label = format!("{QUESTION_ID}/level{}", self.level);
        let (a, b) = sample_or_fallback(
            &label,
            self.config.max_attempts,
            || Self::draw_points(spec, src),
            |(a, b)| self.accepts(Slope::between(a, b)),
            || {
                let [p, q] = spec.fallback.map(|(x, y, d)| Point::new(Fraction::new(x, d), Fraction::new(y, d)));
                (p, q)
            },
        );
        SlopeProblem {
            a,
            b,
            slope: Slope::between(&a, &b),
        }
    }

    fn content(problem: &SlopeProblem) -> String {
        format!(
            "Find the slope of the straight line passing through the points {}",
            block(&format!(
                "A{},\\ B{}",
                coordinates(&problem.a),
                coordinates(&problem.b)
            ))
        )
    }

    fn distractors(problem: &SlopeProblem) -> [String; 3] {
        let rise = problem.b.y - problem.a.y;
        let run = problem.b.x - problem.a.x;
        let mut set = DistractorSet::new(problem.slope.candidate());
        let mut slips = Vec::new();
        if !rise.is_zero() {
            slips.push(value_candidate((run / rise).simplify()));
        }
        if !run.is_zero() {
            slips.push(value_candidate((-rise / run).simplify()));
            slips.push(value_candidate((rise.abs() / run.abs()).simplify()));
        }
        if let Slope::Value(m) = problem.slope {
            if !m.is_zero() {
                slips.push(value_candidate(m.reciprocal()));
            }
        }
        set.offer_all(slips);
        set.offer_all(CATALOGUE.iter().map(|entry| match entry {
            None => Slope::Undefined.candidate(),
            Some((n, d)) => value_candidate(Fraction::new(*n, *d)),
        }));
        set.finish(|k| value_candidate(whole(3 + k)))
    }

    fn explain(problem: &SlopeProblem) -> String {
        let SlopeProblem { a, b, slope } = problem;
        let run = b.x - a.x;
        let rise = b.y - a.y;
        let mut e = Explanation::new();
        e.step_math(
            "Use the slope formula",
            "m = \\frac{y_2 - y_1}{x_2 - x_1}",
        );
        e.step_lines(
            "Find the changes in \\(x\\) and \\(y\\)",
            vec![
                format!(
                    "x_2 - x_1 = {} - {} = {}",
                    decimal_latex(b.x),
                    bracketed(a.x),
                    decimal_latex(run)
                ),
                format!(
                    "y_2 - y_1 = {} - {} = {}",
                    decimal_latex(b.y),
                    bracketed(a.y),
                    decimal_latex(rise)
                ),
            ],
        );
        match slope {
            Slope::Undefined => {
                e.step("The run \\(x_2 - x_1\\) is zero, so the line is vertical and its slope is undefined.");
                e.conclude("Therefore, the slope is", text("undefined"));
            }
            Slope::Value(m) => {
                let quotient = format!(
                    "m = \\frac{{{}}}{{{}}}",
                    decimal_latex(rise),
                    decimal_latex(run)
                );
                let answer = fraction_latex(*m, FractionStyle::Improper);
                let working = if run.value_eq(&whole(1)) {
                    quotient
                } else {
                    format!("{quotient} = {answer}")
                };
                e.step_math("Divide the rise by the run", working);
                e.conclude("Therefore, the slope is", answer);
            }
        }
        e.render()
    }
}

/// `(1.5, -2)`
fn coordinates(p: &Point) -> String {
    format!("({}, {})", decimal_latex(p.x), decimal_latex(p.y))
}

fn bracketed(v: Fraction) -> String {
    if v.is_negative() {
        format!("({})", decimal_latex(v))
    } else {
        decimal_latex(v)
    }
}

impl QuestionGenerator for SlopeBetweenPoints {
    fn question_id(&self) -> &'static str {
        QUESTION_ID
    }

    fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn generate_with(&self, src: &mut dyn RandomSource) -> GeneratorOutput {
        let problem = self.sample_problem(src);
        let correct = problem.slope.candidate().rendered;
        let wrong = Self::distractors(&problem);
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
