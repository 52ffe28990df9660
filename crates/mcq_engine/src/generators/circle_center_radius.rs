//! Center and radius read off a circle equation, levels 1–4.
//!
//! The equation is shown in standard, scaled standard, general or scaled
//! general form; scaled forms multiply the whole equation through so the
//! radius is unchanged.

use mcq_api_models::GeneratorOutput;
use mcq_formatter::{fraction_latex, inline, FractionStyle};
use mcq_math::{Fraction, Point};
use mcq_sampling::{random_bool, random_int, random_nonzero_int, RandomSource};

use super::circle_common::{
    bracketed, center_radius_answer, radius_working, Circle, EquationForm,
};
use crate::config::GeneratorConfig;
use crate::distractor::{Candidate, DistractorSet};
use crate::explanation::Explanation;
use crate::generator::{resolve_level, QuestionGenerator};

pub const QUESTION_ID: &str = "F5L7.1_Q3_F_MQ";
pub const LEVELS: u32 = 4;

#[derive(Debug, Clone, Copy)]
enum RadiusDraw {
    /// Integer radius.
    Radius(i64, i64),
    /// `r^2` drawn directly, so the radius may be a surd.
    Squared(i64, i64),
}

#[derive(Debug, Clone, Copy)]
enum FormMix {
    Standard,
    /// Scaled standard form 70 % of the time.
    MostlyScaledStandard,
    General,
    /// Scaled general 70 %, otherwise standard (usually scaled) or general.
    Any,
}

#[derive(Debug, Clone, Copy)]
struct LevelSpec {
    coordinates: (i64, i64),
    radius: RadiusDraw,
    forms: FormMix,
}

const LEVEL_SPECS: [LevelSpec; LEVELS as usize] = [
    LevelSpec {
        coordinates: (1, 5),
        radius: RadiusDraw::Radius(2, 10),
        forms: FormMix::Standard,
    },
    LevelSpec {
        coordinates: (-10, 10),
        radius: RadiusDraw::Radius(3, 12),
        forms: FormMix::MostlyScaledStandard,
    },
    LevelSpec {
        coordinates: (-10, 10),
        radius: RadiusDraw::Radius(3, 12),
        forms: FormMix::General,
    },
    LevelSpec {
        coordinates: (-15, 15),
        radius: RadiusDraw::Squared(5, 150),
        forms: FormMix::Any,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterRadiusProblem {
    pub circle: Circle,
    pub form: EquationForm,
}

impl FormMix {
    fn draw(self, src: &mut dyn RandomSource) -> EquationForm {
        match self {
            FormMix::Standard => EquationForm::Standard,
            FormMix::General => EquationForm::General,
            FormMix::MostlyScaledStandard => {
                if random_bool(src, 0.7) {
                    EquationForm::ScaledStandard(random_int(src, 2, 5))
                } else {
                    EquationForm::Standard
                }
            }
            FormMix::Any => {
                if random_bool(src, 0.7) {
                    EquationForm::ScaledGeneral(random_int(src, 2, 9))
                } else if random_bool(src, 0.5) {
                    if random_bool(src, 0.8) {
                        EquationForm::ScaledStandard(random_int(src, 2, 5))
                    } else {
                        EquationForm::Standard
                    }
                } else {
                    EquationForm::General
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CircleCenterRadius {
    difficulty: u32,
    level: u32,
    config: GeneratorConfig,
}

impl CircleCenterRadius {
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

    pub fn sample_problem(&self, src: &mut dyn RandomSource) -> CenterRadiusProblem {
        let spec = LEVEL_SPECS[(self.level - 1) as usize];
        let (lo, hi) = spec.coordinates;
        let center = Point::lattice(random_int(src, lo, hi), random_int(src, lo, hi));
        let circle = match spec.radius {
            RadiusDraw::Radius(r_lo, r_hi) => Circle::with_radius(center, random_int(src, r_lo, r_hi)),
            RadiusDraw::Squared(lo, hi) => {
                Circle::new(center, Fraction::from_integer(random_int(src, lo, hi)))
            }
        };
        CenterRadiusProblem {
            circle,
            form: spec.forms.draw(src),
        }
    }

    fn answer(center: &Point, radius_sq: Fraction) -> Candidate {
        Candidate::text(center_radius_answer(
            center,
            &Circle::new(*center, radius_sq).radius_latex(),
        ))
    }

    fn distractors(&self, problem: &CenterRadiusProblem, src: &mut dyn RandomSource) -> [String; 3] {
        let CenterRadiusProblem { circle, form } = *problem;
        let Circle { center, radius_sq } = circle;
        let mut set = DistractorSet::new(Self::answer(&center, radius_sq));

        let a = form.scale();
        if a != 1 {
            let unscaled = Point::new(
                center.x * Fraction::from_integer(a),
                center.y * Fraction::from_integer(a),
            );
            // Read the brackets without dividing out the factor.
            let radius_sq = if form.is_general() {
                radius_sq
            } else {
                radius_sq * Fraction::from_integer(a * a)
            };
            set.offer(Self::answer(&unscaled, radius_sq));
        }
        set.offer(Self::answer(&center.reflect(true, false), radius_sq));
        set.offer(Self::answer(&center.reflect(false, true), radius_sq));
        // r^2 reported as the radius
        set.offer(Candidate::text(center_radius_answer(
            &center,
            &fraction_latex(radius_sq, FractionStyle::Improper),
        )));
        if form.is_general() {
            let doubled = Point::new(
                center.x * Fraction::from_integer(2),
                center.y * Fraction::from_integer(2),
            );
            set.offer(Self::answer(&doubled, radius_sq));
            set.offer(Self::answer(&center.reflect(true, true), radius_sq));
        }

        set.fill_with(self.config.max_attempts, || {
            let wrong = if random_bool(src, 0.5) {
                let shift = random_nonzero_int(src, -2, 2);
                let moved = if random_bool(src, 0.5) {
                    center.translate(shift, 0)
                } else {
                    center.translate(0, shift)
                };
                Self::answer(&moved, radius_sq)
            } else {
                let delta = Fraction::from_integer(random_int(src, 1, 5));
                Self::answer(&center, radius_sq + delta)
            };
            Some(wrong)
        });
        set.finish(|k| Self::answer(&center, radius_sq + Fraction::from_integer(k)))
    }

    fn content(problem: &CenterRadiusProblem) -> String {
        format!(
            "Find the center and the radius of the circle {}. Give the radius in simplest surd form where needed.",
            inline(&problem.circle.equation(problem.form))
        )
    }

    fn explain(problem: &CenterRadiusProblem) -> String {
        let CenterRadiusProblem { circle, form } = *problem;
        let Circle { center, radius_sq } = circle;
        let a = form.scale();
        let mut e = Explanation::new();

        match form {
            EquationForm::ScaledStandard(_) => {
                e.step_math(
                    format!(
                        "Each bracket is {a} times \\((x-h)\\) or \\((y-k)\\), so divide both sides by \\({a}^2 = {}\\)",
                        a * a
                    ),
                    circle.equation(EquationForm::Standard),
                );
            }
            EquationForm::ScaledGeneral(_) => {
                e.step_math(
                    format!("Divide every term by {a} so that \\(x^2\\) and \\(y^2\\) have coefficient 1"),
                    circle.equation(EquationForm::General),
                );
            }
            _ => {}
        }

        if form.is_general() {
            let coefficients = circle.coefficients();
            let sq = |v: Fraction| fraction_latex(v * v, FractionStyle::Improper);
            e.step_lines(
                "Compare with \\(x^2 + y^2 + Dx + Ey + F = 0\\)",
                vec![format!(
                    "D = {},\\ E = {},\\ F = {}",
                    fraction_latex(coefficients.d, FractionStyle::Improper),
                    fraction_latex(coefficients.e, FractionStyle::Improper),
                    fraction_latex(coefficients.f, FractionStyle::Improper)
                )],
            );
            e.step_math(
                "The center is \\(\\left(-\\frac{D}{2}, -\\frac{E}{2}\\right)\\)",
                format!(
                    "h = {},\\ k = {}",
                    fraction_latex(center.x, FractionStyle::Improper),
                    fraction_latex(center.y, FractionStyle::Improper)
                ),
            );
            e.step_lines(
                "The radius satisfies \\(r^2 = h^2 + k^2 - F\\)",
                vec![
                    format!(
                        "r^2 = {} + {} - {} = {}",
                        sq(center.x),
                        sq(center.y),
                        bracketed(coefficients.f),
                        fraction_latex(radius_sq, FractionStyle::Improper)
                    ),
                    radius_working(radius_sq),
                ],
            );
        } else {
            e.step_math(
                "Compare with \\((x-h)^2 + (y-k)^2 = r^2\\)",
                format!(
                    "h = {},\\ k = {},\\ r^2 = {}",
                    fraction_latex(center.x, FractionStyle::Improper),
                    fraction_latex(center.y, FractionStyle::Improper),
                    fraction_latex(radius_sq, FractionStyle::Improper)
                ),
            );
            e.step_math("Take the square root for the radius", radius_working(radius_sq));
        }
        e.conclude(
            "Therefore,",
            format!(
                "\\text{{Center }} {},\\ r = {}",
                circle.center_latex(),
                circle.radius_latex()
            ),
        );
        e.render()
    }
}

impl QuestionGenerator for CircleCenterRadius {
    fn question_id(&self) -> &'static str {
        QUESTION_ID
    }

    fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn generate_with(&self, src: &mut dyn RandomSource) -> GeneratorOutput {
        let problem = self.sample_problem(src);
        let correct = Self::answer(&problem.circle.center, problem.circle.radius_sq).rendered;
        let wrong = self.distractors(&problem, src);
        tracing::debug!(
            target: "generate",
            question_id = QUESTION_ID,
            difficulty = self.difficulty,
            level = self.level,
            form = problem.form.name(),
            "generated question"
        );
        GeneratorOutput::new(Self::content(&problem), correct, wrong, Self::explain(&problem))
    }
}
