//! Theoretical probability of drawing one favourable item.

use mcq_api_models::GeneratorOutput;
use mcq_formatter::{fraction_latex, inline, raw_fraction_latex, FractionStyle};
use mcq_math::Fraction;
use mcq_sampling::{random_element, random_int, random_nonzero_int, RandomSource};

use crate::config::GeneratorConfig;
use crate::distractor::{Candidate, DistractorSet};
use crate::explanation::Explanation;
use crate::generator::{resolve_level, QuestionGenerator};

pub const QUESTION_ID: &str = "F3L12.1_Q1_F_MQ";
pub const LEVELS: u32 = 1;

const TOTAL: (i64, i64) = (10, 50);
const MIN_FAVOURABLE: i64 = 2;
const MAX_FAVOURABLE: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKind {
    pub plural: &'static str,
    pub singular: &'static str,
    pub place: &'static str,
    /// Predicate for the favourable items, plural and singular.
    pub are: &'static str,
    pub is: &'static str,
}

pub const ITEM_KINDS: [ItemKind; 5] = [
    ItemKind {
        plural: "banknotes",
        singular: "banknote",
        place: "a wallet",
        are: "are fifty-dollar notes",
        is: "is a fifty-dollar note",
    },
    ItemKind {
        plural: "pieces of fruit",
        singular: "piece of fruit",
        place: "a basket",
        are: "are apples",
        is: "is an apple",
    },
    ItemKind {
        plural: "students",
        singular: "student",
        place: "a class",
        are: "are left-handed",
        is: "is left-handed",
    },
    ItemKind {
        plural: "balls",
        singular: "ball",
        place: "a bag",
        are: "are red",
        is: "is red",
    },
    ItemKind {
        plural: "cards",
        singular: "card",
        place: "a box",
        are: "are marked with a star",
        is: "is marked with a star",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbabilityProblem {
    pub total: i64,
    pub favourable: i64,
    pub kind: ItemKind,
}

impl ProbabilityProblem {
    pub fn probability(&self) -> Fraction {
        Fraction::new(self.favourable, self.total).simplify()
    }
}

fn answer(value: Fraction) -> Candidate {
    Candidate::valued(inline(&fraction_latex(value, FractionStyle::Improper)), value)
}

#[derive(Debug, Clone)]
pub struct Probability {
    difficulty: u32,
    level: u32,
    config: GeneratorConfig,
}

impl Probability {
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

    pub fn sample_problem(&self, src: &mut dyn RandomSource) -> ProbabilityProblem {
        let total = random_int(src, TOTAL.0, TOTAL.1);
        let favourable = random_int(src, MIN_FAVOURABLE, MAX_FAVOURABLE.min(total - 1));
        let kind = *random_element(src, &ITEM_KINDS);
        ProbabilityProblem {
            total,
            favourable,
            kind,
        }
    }

    fn content(problem: &ProbabilityProblem) -> String {
        let ProbabilityProblem {
            total,
            favourable,
            kind,
        } = problem;
        format!(
            "There are {total} {} in {}, and {favourable} of them {}. One {} is chosen at random. What is the probability that it {}?",
            kind.plural, kind.place, kind.are, kind.singular, kind.is
        )
    }

    fn distractors(&self, problem: &ProbabilityProblem, src: &mut dyn RandomSource) -> [String; 3] {
        let (m, n) = (problem.favourable, problem.total);
        let mut set = DistractorSet::new(answer(problem.probability()));
        set.offer_all([
            answer(Fraction::new(n, m)),
            answer(Fraction::new(m, n - 1)),
            answer(Fraction::new(m + 1, n)),
        ]);
        set.fill_with(self.config.max_attempts, || {
            let numer = m + random_nonzero_int(src, -3, 3);
            (1..n).contains(&numer).then(|| answer(Fraction::new(numer, n)))
        });
        set.finish(|k| answer(Fraction::new(m, n + k)))
    }

    fn explain(problem: &ProbabilityProblem) -> String {
        let (m, n) = (problem.favourable, problem.total);
        let raw = Fraction::new(m, n);
        let reduced = problem.probability();
        let kind = &problem.kind;
        let mut e = Explanation::new();
        e.step(format!(
            "Each of the \\({n}\\) {} is equally likely to be chosen, and \\({m}\\) of them {}.",
            kind.plural, kind.are
        ));
        e.step_math(
            "The probability of an event is the number of favourable outcomes divided by the number of possible outcomes",
            "P = \\frac{\\text{favourable outcomes}}{\\text{possible outcomes}}",
        );
        let value = if reduced == raw {
            format!("P = {}", raw_fraction_latex(raw))
        } else {
            format!(
                "P = {} = {}",
                raw_fraction_latex(raw),
                fraction_latex(reduced, FractionStyle::Improper)
            )
        };
        e.step_math("Substitute and simplify", value);
        e.conclude(
            "Therefore, the probability is",
            fraction_latex(reduced, FractionStyle::Improper),
        );
        e.render()
    }
}

impl QuestionGenerator for Probability {
    fn question_id(&self) -> &'static str {
        QUESTION_ID
    }

    fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn generate_with(&self, src: &mut dyn RandomSource) -> GeneratorOutput {
        let problem = self.sample_problem(src);
        let correct = answer(problem.probability()).rendered;
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
    use mcq_sampling::{RngSource, ScriptedSource};

    #[test]
    fn six_red_balls_out_of_thirty() {
        let out = Probability::new(1).generate_with(&mut ScriptedSource::ints([30, 6, 3]));
        assert_eq!(
            out.content,
            "There are 30 balls in a bag, and 6 of them are red. One ball is chosen at random. What is the probability that it is red?"
        );
        assert_eq!(out.correct_answer, "\\(\\frac{1}{5}\\)");
        assert_eq!(
            out.wrong_answers,
            ["\\(5\\)", "\\(\\frac{6}{29}\\)", "\\(\\frac{7}{30}\\)"]
        );
        assert!(out.explanation.contains("\\[P = \\frac{6}{30} = \\frac{1}{5}\\]"));
    }

    #[test]
    fn distractors_equal_in_value_are_dropped() {
        // 9/9 and 10/10 are both 1
        let out = Probability::new(1).generate_with(&mut ScriptedSource::ints([10, 9, 0]));
        assert_eq!(out.correct_answer, "\\(\\frac{9}{10}\\)");
        assert_eq!(out.wrong_answers[0], "\\(\\frac{10}{9}\\)");
        assert_eq!(out.wrong_answers[1], "\\(1\\)");
        assert_ne!(out.wrong_answers[2], "\\(1\\)");
        assert!(out.has_distinct_options());
    }

    #[test]
    fn favourable_count_stays_below_total() {
        let gen = Probability::new(1);
        let mut rng = RngSource::seeded(13);
        for _ in 0..1000 {
            let p = gen.sample_problem(&mut rng);
            assert!((10..=50).contains(&p.total));
            assert!(p.favourable >= 2 && p.favourable <= 20.min(p.total - 1));
        }
    }

    #[test]
    fn any_difficulty_uses_the_single_level() {
        assert_eq!(Probability::new(4).level(), 1);
    }
}
