//! Equation of a circle from its center and radius, levels 1–4.
//!
//! Levels 1–3 give the radius directly; level 4 gives a point on the
//! circle instead, so `r^2` is a squared distance and need not be a
//! perfect square.

use mcq_api_models::GeneratorOutput;
use mcq_formatter::{fraction_latex, point_latex, FractionStyle};
use mcq_math::Point;
use mcq_sampling::{random_int, sample_or_fallback, RandomSource};

use super::circle_common::{
    either_form, equation_answer, explain_equation, perturbed_circle, radius_step,
    radius_working, squared_distance_working, wrong_circle, Circle, EquationForm, EquationSlip,
};
use crate::config::GeneratorConfig;
use crate::distractor::{Candidate, DistractorSet};
use crate::explanation::Explanation;
use crate::generator::{resolve_level, QuestionGenerator};

pub const QUESTION_ID: &str = "F5L7.1_Q1_F_MQ";
pub const LEVELS: u32 = 4;

#[derive(Debug, Clone, Copy)]
enum FormChoice {
    Standard,
    General,
    Either,
}

#[derive(Debug, Clone, Copy)]
struct LevelSpec {
    coordinates: (i64, i64),
    /// `None` when the radius comes from a point on the circle.
    radius: Option<(i64, i64)>,
    form: FormChoice,
}

const LEVEL_SPECS: [LevelSpec; LEVELS as usize] = [
    LevelSpec {
        coordinates: (1, 5),
        radius: Some((2, 10)),
        form: FormChoice::Standard,
    },
    LevelSpec {
        coordinates: (-10, 10),
        radius: Some((3, 12)),
        form: FormChoice::Standard,
    },
    LevelSpec {
        coordinates: (-10, 10),
        radius: Some((3, 12)),
        form: FormChoice::General,
    },
    LevelSpec {
        coordinates: (-15, 15),
        radius: None,
        form: FormChoice::Either,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleFromCenterProblem {
    pub circle: Circle,
    /// The point the circle passes through, when the radius is not given.
    pub through: Option<Point>,
    pub form: EquationForm,
}

#[derive(Debug, Clone)]
pub struct CircleFromCenter {
    difficulty: u32,
    level: u32,
    config: GeneratorConfig,
}

impl CircleFromCenter {
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

    pub fn sample_problem(&self, src: &mut dyn RandomSource) -> CircleFromCenterProblem {
        let spec = LEVEL_SPECS[(self.level - 1) as usize];
        let (lo, hi) = spec.coordinates;
        let (circle, through) = match spec.radius {
            Some((r_lo, r_hi)) => {
                let center = Point::lattice(random_int(src, lo, hi), random_int(src, lo, hi));
                (Circle::with_radius(center, random_int(src, r_lo, r_hi)), None)
            }
            None => {
                let label = format!("{QUESTION_ID}/level{}", self.level);
                let (center, point) = sample_or_fallback(
                    &label,
                    self.config.max_attempts,
                    || {
                        let center =
                            Point::lattice(random_int(src, lo, hi), random_int(src, lo, hi));
                        let point =
                            Point::lattice(random_int(src, lo, hi), random_int(src, lo, hi));
                        (center, point)
                    },
                    |(center, point)| center != point,
                    || (Point::lattice(2, 3), Point::lattice(5, 7)),
                );
                (Circle::through(center, &point), Some(point))
            }
        };
        let form = match spec.form {
            FormChoice::Standard => EquationForm::Standard,
            FormChoice::General => EquationForm::General,
            FormChoice::Either => either_form(src),
        };
        CircleFromCenterProblem {
            circle,
            through,
            form,
        }
    }

    fn content(problem: &CircleFromCenterProblem) -> String {
        let circle = &problem.circle;
        let given = match &problem.through {
            Some(point) => format!(
                "A circle has center \\(C{}\\) and passes through the point \\(P{}\\).",
                circle.center_latex(),
                point_latex(point)
            ),
            None => format!(
                "A circle has center \\({}\\) and radius \\({}\\).",
                circle.center_latex(),
                circle.radius_latex()
            ),
        };
        let form = if problem.form.is_general() {
            "general form \\(x^2 + y^2 + Dx + Ey + F = 0\\)"
        } else {
            "standard form"
        };
        format!("{given} Find the equation of the circle in {form}.")
    }

    fn distractors(&self, problem: &CircleFromCenterProblem, src: &mut dyn RandomSource) -> [String; 3] {
        let CircleFromCenterProblem { circle, form, .. } = *problem;
        let mut set = DistractorSet::new(Candidate::text(equation_answer(&circle, form)));
        let slips = if form.is_general() {
            EquationSlip::GENERAL
        } else {
            EquationSlip::STANDARD
        };
        set.offer_all(slips.iter().filter_map(|slip| slip.apply(&circle, form)));
        set.fill_with(self.config.max_attempts, || {
            wrong_circle(&circle, perturbed_circle(src, &circle), form)
        });
        set.finish(|k| Candidate::text(equation_answer(&radius_step(&circle, k), form)))
    }

    fn explain(problem: &CircleFromCenterProblem) -> String {
        let circle = &problem.circle;
        let mut e = Explanation::new();
        e.step_math(
            "A circle with center \\((h, k)\\) and radius \\(r\\) has the standard equation",
            "(x-h)^2 + (y-k)^2 = r^2",
        );
        if let Some(point) = &problem.through {
            e.step_lines(
                "The radius is the distance from the center to \\(P\\), so",
                vec![
                    format!(
                        "r^2 = {}",
                        squared_distance_working(&circle.center, point)
                    ),
                    radius_working(circle.radius_sq),
                ],
            );
        } else {
            e.step_math(
                "Square the radius",
                format!(
                    "r^2 = {}^2 = {}",
                    circle.radius_latex(),
                    fraction_latex(circle.radius_sq, FractionStyle::Improper)
                ),
            );
        }
        explain_equation(&mut e, circle, problem.form);
        e.conclude("Therefore,", circle.equation(problem.form));
        e.render()
    }
}

impl QuestionGenerator for CircleFromCenter {
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

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_math::Fraction;
    use mcq_sampling::{RngSource, ScriptedSource};

    /// Level 4 draws the center, then the point, then the form.
    fn center_two_three_through_five_seven(unit: f64) -> ScriptedSource {
        ScriptedSource::new([2, 3, 5, 7], [unit])
    }

    #[test]
    fn center_and_point_give_standard_equation() {
        let gen = CircleFromCenter::new(4);
        let out = gen.generate_with(&mut center_two_three_through_five_seven(0.25));
        assert_eq!(out.correct_answer, "\\((x-2)^2 + (y-3)^2 = 25\\)");
        assert!(out.content.contains("\\(C(2, 3)\\)"));
        assert!(out.content.contains("\\(P(5, 7)\\)"));
        assert!(out.explanation.contains("r = \\sqrt{25} = 5"));
        assert!(out
            .wrong_answers
            .contains(&"\\((x-2)^2 + (y-3)^2 = 5\\)".to_string()));
        assert!(out.has_distinct_options());
    }

    #[test]
    fn center_and_point_give_general_equation() {
        let gen = CircleFromCenter::new(4);
        let problem = gen.sample_problem(&mut center_two_three_through_five_seven(0.75));
        assert_eq!(problem.circle.radius_sq, Fraction::from_integer(25));
        assert_eq!(problem.form, EquationForm::General);
        let out = gen.generate_with(&mut center_two_three_through_five_seven(0.75));
        assert_eq!(out.correct_answer, "\\(x^2 + y^2 - 4x - 6y - 12 = 0\\)");
        assert!(out.explanation.ends_with("\\[x^2 + y^2 - 4x - 6y - 12 = 0\\]"));
    }

    #[test]
    fn level_one_stays_in_the_first_quadrant() {
        let gen = CircleFromCenter::new(1);
        let mut rng = RngSource::seeded(3);
        for _ in 0..200 {
            let p = gen.sample_problem(&mut rng);
            let (h, k) = p.circle.center.as_lattice().expect("lattice center");
            assert!((1..=5).contains(&h) && (1..=5).contains(&k));
            assert_eq!(p.form, EquationForm::Standard);
            assert!(p.through.is_none());
        }
    }

    #[test]
    fn level_four_point_differs_from_center() {
        let gen = CircleFromCenter::new(4);
        let mut rng = RngSource::seeded(11);
        for _ in 0..300 {
            let p = gen.sample_problem(&mut rng);
            assert!(!p.circle.radius_sq.is_zero());
            assert_ne!(p.through, Some(p.circle.center));
        }
    }

    #[test]
    fn general_distractors_use_named_slips_first() {
        let gen = CircleFromCenter::new(3);
        // center (2, 3), radius 5
        let out = gen.generate_with(&mut ScriptedSource::ints([2, 3, 5]));
        assert_eq!(
            out.wrong_answers,
            [
                "\\(x^2 + y^2 + 4x - 6y - 12 = 0\\)",
                "\\(x^2 + y^2 - 2x - 3y - 12 = 0\\)",
                "\\(x^2 + y^2 - 4x - 6y + 38 = 0\\)",
            ]
        );
    }
}
