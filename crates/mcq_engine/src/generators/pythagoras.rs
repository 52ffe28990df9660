//! Pythagoras' theorem on a drawn right triangle, levels 1–3.
//!
//! Legs are always integers. The hypotenuse is kept as its square so that
//! level 3 can give or ask for an irrational length exactly.

use mcq_api_models::GeneratorOutput;
use mcq_formatter::{inline, radical_latex};
use mcq_math::{isqrt_exact, simplify_radical, Radical};
use mcq_sampling::{
    random_bool, random_element, random_int, random_nonzero_int, sample_or_fallback, RandomSource,
};

use crate::config::GeneratorConfig;
use crate::distractor::{Candidate, DistractorSet};
use crate::explanation::Explanation;
use crate::generator::{resolve_level, QuestionGenerator};

pub const QUESTION_ID: &str = "F2L10.2.1_Q1_F_MQ";
pub const LEVELS: u32 = 3;

const TRIPLES: [(i64, i64); 7] = [(3, 4), (5, 12), (8, 15), (7, 24), (9, 40), (6, 8), (12, 16)];
const LEVEL_TWO_LEGS: (i64, i64) = (10, 30);
const LEVEL_THREE_LEGS: (i64, i64) = (5, 20);
const LEVEL_THREE_FALLBACK: (i64, i64) = (5, 6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    Base,
    Height,
    Hypotenuse,
}

impl Unknown {
    fn from_index(i: i64) -> Self {
        match i {
            1 => Unknown::Base,
            2 => Unknown::Height,
            _ => Unknown::Hypotenuse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythagorasProblem {
    pub base: i64,
    pub height: i64,
    pub unknown: Unknown,
}

impl PythagorasProblem {
    pub fn hypotenuse_sq(&self) -> i64 {
        self.base * self.base + self.height * self.height
    }

    /// Square of the side marked `x`.
    pub fn answer_sq(&self) -> i64 {
        match self.unknown {
            Unknown::Base => self.base * self.base,
            Unknown::Height => self.height * self.height,
            Unknown::Hypotenuse => self.hypotenuse_sq(),
        }
    }

    /// The leg that is given when a leg is asked for.
    fn known_leg(&self) -> i64 {
        match self.unknown {
            Unknown::Base => self.height,
            _ => self.base,
        }
    }
}

/// Drawing of the triangle: polygon, right-angle mark and where the labels
/// of the base, height and hypotenuse go.
struct Layout {
    polygon: &'static str,
    right_angle: &'static str,
    base: (u32, u32),
    height: (u32, u32),
    hypotenuse: (u32, u32),
}

const LAYOUTS: [Layout; 4] = [
    Layout {
        polygon: "100,200 300,200 100,50",
        right_angle: "M 120,200 L 120,180 L 100,180",
        base: (200, 225),
        height: (75, 125),
        hypotenuse: (210, 110),
    },
    Layout {
        polygon: "100,50 300,50 300,200",
        right_angle: "M 300,70 L 280,70 L 280,50",
        base: (200, 35),
        height: (325, 125),
        hypotenuse: (190, 140),
    },
    Layout {
        polygon: "100,50 300,200 100,200",
        right_angle: "M 100,180 L 120,180 L 120,200",
        base: (200, 225),
        height: (75, 125),
        hypotenuse: (210, 110),
    },
    Layout {
        polygon: "100,200 350,200 100,100",
        right_angle: "M 120,200 L 120,180 L 100,180",
        base: (225, 225),
        height: (75, 150),
        hypotenuse: (235, 135),
    },
];

fn root(n: i64) -> Radical {
    simplify_radical(n)
}

fn length_answer(sq: i64) -> String {
    inline(&radical_latex(root(sq)))
}

/// `√61`, `2√5` for SVG text, which cannot typeset LaTeX.
fn plain_length(sq: i64) -> String {
    match root(sq) {
        Radical { coefficient, radicand: 1 } => coefficient.to_string(),
        Radical { coefficient: 1, radicand } => format!("√{radicand}"),
        Radical {
            coefficient,
            radicand,
        } => format!("{coefficient}√{radicand}"),
    }
}

/// `10^2` or `\left(\sqrt{61}\right)^2`
fn squared_side(sq: i64) -> String {
    match isqrt_exact(sq) {
        Some(n) => format!("{n}^2"),
        None => format!("\\left({}\\right)^2", radical_latex(root(sq))),
    }
}

fn label(at: (u32, u32), body: &str, bold: bool) -> String {
    let weight = if bold { " font-weight=\"bold\"" } else { "" };
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"Arial\" font-size=\"18px\"{weight}>{body}</text>",
        at.0, at.1
    )
}

fn side_label(at: (u32, u32), sq: i64, unknown: bool) -> String {
    if unknown {
        label(at, "x", true)
    } else {
        label(at, &format!("{} cm", plain_length(sq)), false)
    }
}

fn triangle_svg(problem: &PythagorasProblem, layout: &Layout) -> String {
    let labels = [
        side_label(layout.base, problem.base * problem.base, problem.unknown == Unknown::Base),
        side_label(
            layout.height,
            problem.height * problem.height,
            problem.unknown == Unknown::Height,
        ),
        side_label(
            layout.hypotenuse,
            problem.hypotenuse_sq(),
            problem.unknown == Unknown::Hypotenuse,
        ),
    ];
    format!(
        "<div style=\"text-align: center; margin: 20px 0;\">\
         <svg width=\"400\" height=\"300\" viewBox=\"0 0 400 300\">\
         <polygon points=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"2\"/>\
         <path d=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"1.5\"/>\
         {}</svg></div>",
        layout.polygon,
        layout.right_angle,
        labels.concat()
    )
}

#[derive(Debug, Clone)]
pub struct Pythagoras {
    difficulty: u32,
    level: u32,
    config: GeneratorConfig,
}

impl Pythagoras {
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

    pub fn sample_problem(&self, src: &mut dyn RandomSource) -> PythagorasProblem {
        match self.level {
            2 => {
                let (base, height) = sorted_legs(src, LEVEL_TWO_LEGS);
                let problem = PythagorasProblem {
                    base,
                    height,
                    unknown: Unknown::Hypotenuse,
                };
                // a leg can only be asked for when the hypotenuse is a whole number
                if isqrt_exact(problem.hypotenuse_sq()).is_some() {
                    PythagorasProblem {
                        unknown: Unknown::from_index(random_int(src, 1, 3)),
                        ..problem
                    }
                } else {
                    problem
                }
            }
            3 => {
                let label = format!("{QUESTION_ID}/level3");
                let (base, height) = sample_or_fallback(
                    &label,
                    self.config.max_attempts,
                    || sorted_legs(src, LEVEL_THREE_LEGS),
                    |&(a, b)| isqrt_exact(a * a + b * b).is_none(),
                    || LEVEL_THREE_FALLBACK,
                );
                let unknown = if random_bool(src, 0.7) {
                    Unknown::Hypotenuse
                } else {
                    Unknown::from_index(random_int(src, 1, 2))
                };
                PythagorasProblem {
                    base,
                    height,
                    unknown,
                }
            }
            _ => {
                let &(base, height) = random_element(src, &TRIPLES);
                PythagorasProblem {
                    base,
                    height,
                    unknown: Unknown::from_index(random_int(src, 1, 3)),
                }
            }
        }
    }

    fn content(problem: &PythagorasProblem, layout: &Layout) -> String {
        let given = match problem.unknown {
            Unknown::Hypotenuse => format!(
                "the two shorter sides are \\({}\\) cm and \\({}\\) cm. Find the length \\(x\\) of the hypotenuse.",
                problem.base, problem.height
            ),
            _ => format!(
                "the hypotenuse is \\({}\\) cm and one of the shorter sides is \\({}\\) cm. Find the length \\(x\\) of the other side.",
                radical_latex(root(problem.hypotenuse_sq())),
                problem.known_leg()
            ),
        };
        format!(
            "{}In the right-angled triangle shown, {given}",
            triangle_svg(problem, layout)
        )
    }

    fn distractors(&self, problem: &PythagorasProblem, src: &mut dyn RandomSource) -> [String; 3] {
        let answer_sq = problem.answer_sq();
        let mut set = DistractorSet::new(Candidate::text(length_answer(answer_sq)));
        let whole = |n: i64| (n > 0).then(|| Candidate::text(inline(&n.to_string())));
        let rooted = |sq: i64| (sq > 0).then(|| Candidate::text(length_answer(sq)));
        let candidates = match problem.unknown {
            Unknown::Hypotenuse => {
                let (a, b) = (problem.base, problem.height);
                vec![
                    whole(a + b),
                    whole(a * a + b * b),
                    rooted(a + b),
                    rooted((b * b - a * a).abs()),
                    whole((b - a).abs()),
                ]
            }
            Unknown::Base | Unknown::Height => {
                let k = problem.known_leg();
                let h = problem.hypotenuse_sq();
                let c = isqrt_exact(h);
                vec![
                    c.and_then(|c| whole(c - k)),
                    whole(h - k * k),
                    rooted(h + k * k),
                    c.and_then(|c| whole(c + k)),
                    c.and_then(|c| rooted(c - k)),
                ]
            }
        };
        set.offer_all(candidates.into_iter().flatten());
        set.fill_with(self.config.max_attempts, || {
            rooted(answer_sq + random_nonzero_int(src, -5, 5))
        });
        set.finish(|k| Candidate::text(length_answer(answer_sq + k)))
    }

    fn explain(problem: &PythagorasProblem) -> String {
        let mut e = Explanation::new();
        e.step_math(
            "By Pythagoras' theorem, the square of the hypotenuse equals the sum of the squares of the other two sides",
            "a^2 + b^2 = c^2",
        );
        let answer_sq = problem.answer_sq();
        match problem.unknown {
            Unknown::Hypotenuse => {
                let (a, b) = (problem.base, problem.height);
                e.step_lines(
                    "The two shorter sides are known, so",
                    vec![
                        format!("x^2 = {a}^2 + {b}^2"),
                        format!("x^2 = {} + {}", a * a, b * b),
                        format!("x^2 = {answer_sq}"),
                    ],
                );
            }
            Unknown::Base | Unknown::Height => {
                let k = problem.known_leg();
                let h = problem.hypotenuse_sq();
                let c = squared_side(h);
                e.step_lines(
                    "The hypotenuse and one shorter side are known, so",
                    vec![
                        format!("x^2 + {k}^2 = {c}"),
                        format!("x^2 = {c} - {k}^2"),
                        format!("x^2 = {h} - {}", k * k),
                        format!("x^2 = {answer_sq}"),
                    ],
                );
            }
        }
        let length = radical_latex(root(answer_sq));
        let working = if length == format!("\\sqrt{{{answer_sq}}}") {
            format!("x = {length}")
        } else {
            format!("x = \\sqrt{{{answer_sq}}} = {length}")
        };
        e.step_math("A length is positive, so take the positive square root", working);
        e.conclude("Therefore,", format!("x = {length}\\text{{ cm}}"));
        e.render()
    }
}

fn sorted_legs(src: &mut dyn RandomSource, range: (i64, i64)) -> (i64, i64) {
    let a = random_int(src, range.0, range.1);
    let b = random_int(src, range.0, range.1);
    (a.min(b), a.max(b))
}

impl QuestionGenerator for Pythagoras {
    fn question_id(&self) -> &'static str {
        QUESTION_ID
    }

    fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn generate_with(&self, src: &mut dyn RandomSource) -> GeneratorOutput {
        let problem = self.sample_problem(src);
        let layout = random_element(src, &LAYOUTS);
        let correct = length_answer(problem.answer_sq());
        let wrong = self.distractors(&problem, src);
        tracing::debug!(
            target: "generate",
            question_id = QUESTION_ID,
            difficulty = self.difficulty,
            level = self.level,
            "generated question"
        );
        GeneratorOutput::new(
            Self::content(&problem, layout),
            correct,
            wrong,
            Self::explain(&problem),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_sampling::{RngSource, ScriptedSource};

    #[test]
    fn three_four_five_hypotenuse() {
        let gen = Pythagoras::new(1);
        // triple (3, 4), hypotenuse unknown, first layout
        let out = gen.generate_with(&mut ScriptedSource::ints([0, 3, 0]));
        assert_eq!(out.correct_answer, "\\(5\\)");
        assert_eq!(out.wrong_answers, ["\\(7\\)", "\\(25\\)", "\\(\\sqrt{7}\\)"]);
        assert!(out.content.contains(">3 cm</text>"));
        assert!(out.content.contains("font-weight=\"bold\">x</text>"));
        assert!(out.explanation.contains("\\[x^2 = 9 + 16\\]"));
        assert!(out.explanation.contains("\\[x = \\sqrt{25} = 5\\]"));
    }

    #[test]
    fn three_four_five_missing_leg() {
        let gen = Pythagoras::new(1);
        let out = gen.generate_with(&mut ScriptedSource::ints([0, 1, 2]));
        assert_eq!(out.correct_answer, "\\(3\\)");
        assert_eq!(out.wrong_answers, ["\\(1\\)", "\\(9\\)", "\\(\\sqrt{41}\\)"]);
        assert!(out.explanation.contains("\\[x^2 = 5^2 - 4^2\\]"));
        assert!(out.content.contains(">5 cm</text>"));
    }

    #[test]
    fn level_two_asks_for_hypotenuse_when_it_is_irrational() {
        let gen = Pythagoras::new(2);
        // legs 11 and 10 are sorted; 221 is not a square
        let problem = gen.sample_problem(&mut ScriptedSource::ints([11, 10]));
        assert_eq!((problem.base, problem.height), (10, 11));
        assert_eq!(problem.unknown, Unknown::Hypotenuse);
        assert_eq!(length_answer(problem.answer_sq()), "\\(\\sqrt{221}\\)");
    }

    #[test]
    fn level_two_whole_hypotenuse_may_hide_a_leg() {
        let gen = Pythagoras::new(2);
        let problem = gen.sample_problem(&mut ScriptedSource::ints([20, 15, 2]));
        assert_eq!(problem.hypotenuse_sq(), 625);
        assert_eq!(problem.unknown, Unknown::Height);
        assert_eq!(problem.answer_sq(), 400);
    }

    #[test]
    fn level_three_irrational_hypotenuse_in_simplest_form() {
        let gen = Pythagoras::new(3);
        // legs 6 and 12: 180 = 36 * 5
        let out = gen.generate_with(&mut ScriptedSource::new([6, 12, 0], [0.1]));
        assert_eq!(out.correct_answer, "\\(6\\sqrt{5}\\)");
        assert!(out.explanation.contains("\\[x = \\sqrt{180} = 6\\sqrt{5}\\]"));
        assert!(out.content.contains(">12 cm</text>"));
    }

    #[test]
    fn level_three_given_irrational_hypotenuse() {
        let gen = Pythagoras::new(3);
        // legs 5 and 6, base unknown
        let out = gen.generate_with(&mut ScriptedSource::new([5, 6, 1, 0], [0.9]));
        assert_eq!(out.correct_answer, "\\(5\\)");
        assert!(out.content.contains("the hypotenuse is \\(\\sqrt{61}\\) cm"));
        assert!(out.content.contains(">√61 cm</text>"));
        assert!(out
            .explanation
            .contains("\\[x^2 = \\left(\\sqrt{61}\\right)^2 - 6^2\\]"));
    }

    #[test]
    fn level_three_never_has_a_whole_hypotenuse() {
        let gen = Pythagoras::new(3);
        let mut rng = RngSource::seeded(8);
        for _ in 0..500 {
            let p = gen.sample_problem(&mut rng);
            assert!(isqrt_exact(p.hypotenuse_sq()).is_none(), "{p:?}");
            assert!(p.base <= p.height);
        }
    }

    #[test]
    fn every_level_yields_distinct_options() {
        let mut rng = RngSource::seeded(21);
        for level in 1..=LEVELS {
            let gen = Pythagoras::new(level);
            for _ in 0..300 {
                let out = gen.generate_with(&mut rng);
                assert!(out.has_distinct_options(), "{out:?}");
            }
        }
    }
}
