//! Expanding `(a + b)^2`, levels 1–5.

use mcq_api_models::GeneratorOutput;
use mcq_formatter::{block, coefficient_latex, inline, signed_term};
use mcq_math::Fraction;
use mcq_sampling::{random_bool, random_element, random_int, random_nonzero_int, RandomSource};

use crate::config::GeneratorConfig;
use crate::distractor::{Candidate, DistractorSet};
use crate::explanation::Explanation;
use crate::generator::{resolve_level, QuestionGenerator};

pub const QUESTION_ID: &str = "F2L2.2.3_Q1_F_MQ";
pub const LEVELS: u32 = 5;

const SMALL_COEFFICIENTS: [i64; 2] = [2, 3];
const DENOMINATORS: [i64; 6] = [2, 3, 5, 6, 7, 15];

/// A monomial `c·x^i·y^j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub coeff: Fraction,
    pub x: u32,
    pub y: u32,
}

impl Term {
    pub fn constant(c: i64) -> Self {
        Self {
            coeff: Fraction::from_integer(c),
            x: 0,
            y: 0,
        }
    }

    pub fn x(coeff: Fraction) -> Self {
        Self { coeff, x: 1, y: 0 }
    }

    pub fn y(coeff: Fraction) -> Self {
        Self { coeff, x: 0, y: 1 }
    }

    pub fn times(&self, other: &Term) -> Term {
        Term {
            coeff: (self.coeff * other.coeff).simplify(),
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    fn scaled(&self, k: i64) -> Term {
        Term {
            coeff: (self.coeff * Fraction::from_integer(k)).simplify(),
            ..*self
        }
    }

    fn has_variable(&self) -> bool {
        self.x + self.y > 0
    }

    /// `x^2`, `xy`, `y`, or empty for a constant.
    fn variables(&self) -> String {
        let power = |var: &str, n: u32| match n {
            0 => String::new(),
            1 => var.to_string(),
            n => format!("{var}^{n}"),
        };
        format!("{}{}", power("x", self.x), power("y", self.y))
    }

    fn latex(&self) -> String {
        coefficient_latex(self.coeff, &self.variables())
    }

    /// How the term is written inside the bracket: `3x`, `\frac{y}{5}`.
    fn bracket_latex(&self) -> String {
        let c = self.coeff.simplify();
        if c.is_integer() {
            return self.latex();
        }
        let numerator = coefficient_latex(Fraction::from_integer(c.numer()), &self.variables());
        format!("\\frac{{{numerator}}}{{{}}}", c.denom())
    }
}

/// `9x^2 + 12x + 4`
pub fn polynomial_latex(terms: &[Term]) -> String {
    let mut live = terms.iter().filter(|t| !t.coeff.is_zero());
    let Some(first) = live.next() else {
        return "0".to_string();
    };
    let mut out = first.latex();
    for t in live {
        out.push_str(&signed_term(t.coeff, &t.variables()));
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareOfSumProblem {
    pub first: Term,
    pub second: Term,
}

impl SquareOfSumProblem {
    /// `[a^2, 2ab, b^2]`
    pub fn expansion(&self) -> [Term; 3] {
        [
            self.first.times(&self.first),
            self.first.times(&self.second).scaled(2),
            self.second.times(&self.second),
        ]
    }

    pub fn bracket(&self) -> String {
        format!(
            "\\left({} + {}\\right)^2",
            self.first.bracket_latex(),
            self.second.bracket_latex()
        )
    }
}

/// Square of the variable part only: `3x` becomes `3x^2`. Constants are
/// squared as usual.
fn variable_only_square(t: &Term) -> Term {
    if t.has_variable() {
        Term {
            coeff: t.coeff,
            x: 2 * t.x,
            y: 2 * t.y,
        }
    } else {
        t.times(t)
    }
}

fn unit_fraction(d: i64) -> Fraction {
    Fraction::new(1, d)
}

fn whole(n: i64) -> Fraction {
    Fraction::from_integer(n)
}

#[derive(Debug, Clone)]
pub struct SquareOfSum {
    difficulty: u32,
    level: u32,
    config: GeneratorConfig,
}

impl SquareOfSum {
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

    pub fn sample_problem(&self, src: &mut dyn RandomSource) -> SquareOfSumProblem {
        let (first, second) = match self.level {
            2 => {
                let a = *random_element(src, &SMALL_COEFFICIENTS);
                (Term::x(whole(a)), Term::constant(random_int(src, 1, 5)))
            }
            3 => {
                if random_bool(src, 0.3) {
                    (Term::x(Fraction::ONE), Term::y(Fraction::ONE))
                } else {
                    let a = *random_element(src, &SMALL_COEFFICIENTS);
                    let b = *random_element(src, &SMALL_COEFFICIENTS);
                    (Term::x(whole(a)), Term::y(whole(b)))
                }
            }
            4 => {
                let k = whole(random_int(src, 2, 4));
                let d = unit_fraction(*random_element(src, &DENOMINATORS));
                if random_bool(src, 0.5) {
                    (Term::x(k), Term::y(d))
                } else {
                    (Term::x(d), Term::y(k))
                }
            }
            5 => {
                if random_bool(src, 0.5) {
                    let d = unit_fraction(*random_element(src, &DENOMINATORS));
                    (Term::x(d), Term::constant(1))
                } else {
                    let d1 = unit_fraction(*random_element(src, &DENOMINATORS));
                    let d2 = unit_fraction(*random_element(src, &DENOMINATORS));
                    (Term::x(d1), Term::y(d2))
                }
            }
            _ => (Term::x(Fraction::ONE), Term::constant(random_int(src, 1, 5))),
        };
        SquareOfSumProblem { first, second }
    }

    fn distractors(&self, problem: &SquareOfSumProblem, src: &mut dyn RandomSource) -> [String; 3] {
        let [aa, ab2, bb] = problem.expansion();
        let render = |terms: &[Term]| Candidate::text(inline(&polynomial_latex(terms)));
        let ab = problem.first.times(&problem.second);
        let negated = |t: Term| t.scaled(-1);
        let mut set = DistractorSet::new(render(&[aa, ab2, bb]));
        set.offer_all([
            render(&[aa, bb]),
            render(&[aa, ab, bb]),
            render(&[aa, negated(ab2), bb]),
            render(&[
                variable_only_square(&problem.first),
                ab2,
                variable_only_square(&problem.second),
            ]),
            render(&[aa, negated(ab2), negated(bb)]),
            render(&[aa.scaled(2), ab2.scaled(2), bb.scaled(2)]),
        ]);
        let nudged = |k: i64| Term {
            coeff: ab2.coeff + whole(k),
            ..ab2
        };
        set.fill_with(self.config.max_attempts, || {
            Some(render(&[aa, nudged(random_nonzero_int(src, -3, 3)), bb]))
        });
        set.finish(|k| render(&[aa, nudged(k), bb]))
    }

    fn explain(problem: &SquareOfSumProblem) -> String {
        let a = problem.first.bracket_latex();
        let b = problem.second.bracket_latex();
        let [aa, ab2, bb] = problem.expansion();
        let mut e = Explanation::new();
        e.step_math("Use the identity", "(a + b)^2 = a^2 + 2ab + b^2");
        e.step_lines(
            format!("Substitute \\(a = {a}\\) and \\(b = {b}\\)"),
            vec![
                format!(
                    "{} = \\left({a}\\right)^2 + 2\\left({a}\\right)\\left({b}\\right) + \\left({b}\\right)^2",
                    problem.bracket()
                ),
                format!("= {} + {} + {}", aa.latex(), ab2.latex(), bb.latex()),
            ],
        );
        e.conclude(
            "Therefore,",
            format!("{} = {}", problem.bracket(), polynomial_latex(&[aa, ab2, bb])),
        );
        e.render()
    }
}

impl QuestionGenerator for SquareOfSum {
    fn question_id(&self) -> &'static str {
        QUESTION_ID
    }

    fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn generate_with(&self, src: &mut dyn RandomSource) -> GeneratorOutput {
        let problem = self.sample_problem(src);
        let correct = inline(&polynomial_latex(&problem.expansion()));
        let wrong = self.distractors(&problem, src);
        tracing::debug!(
            target: "generate",
            question_id = QUESTION_ID,
            difficulty = self.difficulty,
            level = self.level,
            "generated question"
        );
        let content = format!("Expand {}", block(&problem.bracket()));
        GeneratorOutput::new(content, correct, wrong, Self::explain(&problem))
    }
}
