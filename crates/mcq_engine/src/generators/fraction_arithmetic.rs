//! Fraction arithmetic, levels 1–7.
//!
//! | Level | Expression                        | Operands                                   |
//! |-------|-----------------------------------|--------------------------------------------|
//! | 1     | `a/b ± c/d`                       | two different curated denominators         |
//! | 2     | `a/b ± c/d`                       | denominators 2..=25                        |
//! | 3     | `n ± a/b ± c/d`                   | n in 1..=10, denominators 2..=21           |
//! | 4     | `m1 ± m2 ± m3`                    | mixed numbers, whole 1..=12, den 2..=12    |
//! | 5     | `a/b × c/d`                       | numerators 1..=36, denominators 2..=36     |
//! | 6     | `a/b ÷ (m1 + m2)`                 | a 1..=30, b 2..=30, mixed whole 1..=3      |
//! | 7     | `m1 + m2 × m3`                    | mixed numbers, multiplication first        |
//!
//! Subtraction at levels 1–2 orders the operands so the result is not
//! negative; levels 3–4 resample until it is.

use mcq_api_models::GeneratorOutput;
use mcq_formatter::{fraction_latex, inline, raw_fraction_latex, FractionStyle};
use mcq_math::{gcd, CommonDenominator, Fraction};
use mcq_sampling::{
    random_bool, random_distinct, random_element, random_int, random_nonzero_int,
    sample_or_fallback, RandomSource,
};

use super::fraction_expr::{ArithmeticPolicy, EvalStep, FractionExpr, Op, Operand};
use crate::config::GeneratorConfig;
use crate::distractor::{Candidate, DistractorSet};
use crate::explanation::Explanation;
use crate::generator::{ask_for_value, resolve_level, QuestionGenerator};

pub const QUESTION_ID: &str = "F1L0.1.3_Q1_F_MQ";
pub const LEVELS: u32 = 7;

const CURATED_DENOMINATORS: &[i64] = &[2, 3, 4, 5, 6, 8, 9, 12, 15, 16];

type Span = (i64, i64);

#[derive(Debug, Clone, Copy)]
struct MixedSpan {
    whole: Span,
    denominators: Span,
}

#[derive(Debug, Clone, Copy)]
enum Denominators {
    /// Two different entries of a curated list.
    CuratedDistinct(&'static [i64]),
    Span(Span),
}

#[derive(Debug, Clone, Copy)]
enum Template {
    TwoFractions(Denominators),
    IntegerThenFractions { integer: Span, denominators: Span },
    ThreeMixed(MixedSpan),
    Product { numerators: Span, denominators: Span },
    QuotientOfSum { numerators: Span, denominators: Span, mixed: MixedSpan },
    SumWithProduct([MixedSpan; 3]),
}

#[derive(Debug, Clone, Copy)]
struct LevelSpec {
    template: Template,
    policy: ArithmeticPolicy,
    non_negative: bool,
}

const KEEP_INTERMEDIATES: ArithmeticPolicy = ArithmeticPolicy {
    common_denominator: CommonDenominator::Lcm,
    reduce_intermediates: false,
};

const REDUCE_INTERMEDIATES: ArithmeticPolicy = ArithmeticPolicy {
    common_denominator: CommonDenominator::Lcm,
    reduce_intermediates: true,
};

static LEVEL_SPECS: [LevelSpec; LEVELS as usize] = [
    LevelSpec {
        template: Template::TwoFractions(Denominators::CuratedDistinct(CURATED_DENOMINATORS)),
        policy: KEEP_INTERMEDIATES,
        non_negative: true,
    },
    LevelSpec {
        template: Template::TwoFractions(Denominators::Span((2, 25))),
        policy: KEEP_INTERMEDIATES,
        non_negative: true,
    },
    LevelSpec {
        template: Template::IntegerThenFractions {
            integer: (1, 10),
            denominators: (2, 21),
        },
        policy: KEEP_INTERMEDIATES,
        non_negative: true,
    },
    LevelSpec {
        template: Template::ThreeMixed(MixedSpan {
            whole: (1, 12),
            denominators: (2, 12),
        }),
        policy: KEEP_INTERMEDIATES,
        non_negative: true,
    },
    LevelSpec {
        template: Template::Product {
            numerators: (1, 36),
            denominators: (2, 36),
        },
        policy: KEEP_INTERMEDIATES,
        non_negative: false,
    },
    LevelSpec {
        template: Template::QuotientOfSum {
            numerators: (1, 30),
            denominators: (2, 30),
            mixed: MixedSpan {
                whole: (1, 3),
                denominators: (2, 15),
            },
        },
        policy: REDUCE_INTERMEDIATES,
        non_negative: false,
    },
    LevelSpec {
        template: Template::SumWithProduct([
            MixedSpan {
                whole: (1, 2),
                denominators: (2, 28),
            },
            MixedSpan {
                whole: (1, 2),
                denominators: (2, 35),
            },
            MixedSpan {
                whole: (2, 3),
                denominators: (2, 13),
            },
        ]),
        policy: REDUCE_INTERMEDIATES,
        non_negative: false,
    },
];

fn proper_in_lowest_terms(src: &mut dyn RandomSource, denom: i64) -> Fraction {
    let numerators: Vec<i64> = (1..denom).filter(|n| gcd(*n, denom) == 1).collect();
    Fraction::new(*random_element(src, &numerators), denom)
}

fn plain(f: Fraction) -> FractionExpr {
    FractionExpr::leaf(Operand::Plain(f))
}

fn mixed(src: &mut dyn RandomSource, span: MixedSpan) -> FractionExpr {
    let whole = random_int(src, span.whole.0, span.whole.1);
    let denom = random_int(src, span.denominators.0, span.denominators.1);
    let part = proper_in_lowest_terms(src, denom);
    FractionExpr::leaf(Operand::Mixed(Fraction::from_mixed(whole, part.numer(), denom)))
}

fn fixed_mixed(whole: i64, numer: i64, denom: i64) -> FractionExpr {
    FractionExpr::leaf(Operand::Mixed(Fraction::from_mixed(whole, numer, denom)))
}

fn add_or_sub(src: &mut dyn RandomSource) -> Op {
    if random_bool(src, 0.5) {
        Op::Add
    } else {
        Op::Sub
    }
}

impl Template {
    fn sample(&self, src: &mut dyn RandomSource) -> FractionExpr {
        match *self {
            Template::TwoFractions(denominators) => {
                let (d1, d2) = match denominators {
                    Denominators::CuratedDistinct(pool) => {
                        let picked = random_distinct(src, pool, 2);
                        (picked[0], picked[1])
                    }
                    Denominators::Span((lo, hi)) => (random_int(src, lo, hi), random_int(src, lo, hi)),
                };
                let mut a = proper_in_lowest_terms(src, d1);
                let mut b = proper_in_lowest_terms(src, d2);
                let op = add_or_sub(src);
                if op == Op::Sub && a.cmp_value(&b).is_lt() {
                    std::mem::swap(&mut a, &mut b);
                }
                FractionExpr::binary(op, plain(a), plain(b))
            }
            Template::IntegerThenFractions {
                integer,
                denominators,
            } => {
                let n = random_int(src, integer.0, integer.1);
                let d1 = random_int(src, denominators.0, denominators.1);
                let a = proper_in_lowest_terms(src, d1);
                let d2 = random_int(src, denominators.0, denominators.1);
                let b = proper_in_lowest_terms(src, d2);
                let (op1, op2) = (add_or_sub(src), add_or_sub(src));
                FractionExpr::binary(
                    op2,
                    FractionExpr::binary(op1, FractionExpr::leaf(Operand::Integer(n)), plain(a)),
                    plain(b),
                )
            }
            Template::ThreeMixed(span) => {
                let (m1, m2, m3) = (mixed(src, span), mixed(src, span), mixed(src, span));
                let (op1, op2) = (add_or_sub(src), add_or_sub(src));
                FractionExpr::binary(op2, FractionExpr::binary(op1, m1, m2), m3)
            }
            Template::Product {
                numerators,
                denominators,
            } => {
                let a = Fraction::new(
                    random_int(src, numerators.0, numerators.1),
                    random_int(src, denominators.0, denominators.1),
                );
                let b = Fraction::new(
                    random_int(src, numerators.0, numerators.1),
                    random_int(src, denominators.0, denominators.1),
                );
                FractionExpr::binary(Op::Mul, plain(a), plain(b))
            }
            Template::QuotientOfSum {
                numerators,
                denominators,
                mixed: span,
            } => {
                let n = random_nonzero_int(src, numerators.0, numerators.1);
                let d = random_int(src, denominators.0, denominators.1);
                let (m1, m2) = (mixed(src, span), mixed(src, span));
                FractionExpr::binary(
                    Op::Div,
                    plain(Fraction::new(n, d)),
                    FractionExpr::group(FractionExpr::binary(Op::Add, m1, m2)),
                )
            }
            Template::SumWithProduct(spans) => {
                let m1 = mixed(src, spans[0]);
                let m2 = mixed(src, spans[1]);
                let m3 = mixed(src, spans[2]);
                FractionExpr::binary(Op::Add, m1, FractionExpr::binary(Op::Mul, m2, m3))
            }
        }
    }

    /// Known-good instance used when sampling keeps failing.
    fn fallback(&self) -> FractionExpr {
        match self {
            Template::TwoFractions(_) => FractionExpr::binary(
                Op::Add,
                plain(Fraction::new(1, 3)),
                plain(Fraction::new(1, 4)),
            ),
            Template::IntegerThenFractions { .. } => FractionExpr::binary(
                Op::Sub,
                FractionExpr::binary(
                    Op::Add,
                    FractionExpr::leaf(Operand::Integer(3)),
                    plain(Fraction::new(1, 2)),
                ),
                plain(Fraction::new(1, 3)),
            ),
            Template::ThreeMixed(_) => FractionExpr::binary(
                Op::Sub,
                FractionExpr::binary(Op::Add, fixed_mixed(2, 1, 2), fixed_mixed(1, 1, 3)),
                fixed_mixed(1, 1, 4),
            ),
            Template::Product { .. } => FractionExpr::binary(
                Op::Mul,
                plain(Fraction::new(2, 3)),
                plain(Fraction::new(9, 10)),
            ),
            Template::QuotientOfSum { .. } => FractionExpr::binary(
                Op::Div,
                plain(Fraction::new(3, 4)),
                FractionExpr::group(FractionExpr::binary(
                    Op::Add,
                    fixed_mixed(1, 1, 2),
                    fixed_mixed(1, 1, 4),
                )),
            ),
            Template::SumWithProduct(_) => FractionExpr::binary(
                Op::Add,
                fixed_mixed(1, 1, 2),
                FractionExpr::binary(Op::Mul, fixed_mixed(1, 1, 3), fixed_mixed(2, 1, 2)),
            ),
        }
    }
}

/// A sampled expression together with its evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractionProblem {
    pub expr: FractionExpr,
    pub trace: Vec<EvalStep>,
    /// Result of the last operation, before the final reduction.
    pub raw_answer: Fraction,
    /// `raw_answer` in lowest terms.
    pub answer: Fraction,
}

#[derive(Debug, Clone)]
pub struct FractionArithmetic {
    difficulty: u32,
    level: u32,
    config: GeneratorConfig,
}

impl FractionArithmetic {
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

    fn spec(&self) -> &'static LevelSpec {
        &LEVEL_SPECS[(self.level - 1) as usize]
    }

    fn policy(&self) -> ArithmeticPolicy {
        let mut policy = self.spec().policy;
        if let Some(strategy) = self.config.common_denominator {
            policy.common_denominator = strategy;
        }
        policy
    }

    pub fn sample_problem(&self, src: &mut dyn RandomSource) -> FractionProblem {
        let spec = self.spec();
        let label = format!("{QUESTION_ID}/level{}", self.level);
        let expr = sample_or_fallback(
            &label,
            self.config.max_attempts,
            || spec.template.sample(src),
            |expr| !spec.non_negative || expr.value().is_some_and(|v| !v.is_negative()),
            || spec.template.fallback(),
        );
        let mut trace = Vec::new();
        let raw_answer = expr.evaluate(&self.policy(), &mut trace);
        FractionProblem {
            expr,
            trace,
            raw_answer,
            answer: raw_answer.simplify(),
        }
    }

    fn render(&self, value: Fraction) -> Candidate {
        Candidate::valued(inline(&fraction_latex(value, self.config.fraction_style)), value)
    }

    fn distractors(&self, problem: &FractionProblem, src: &mut dyn RandomSource) -> [String; 3] {
        let answer = problem.answer;
        let mut set = DistractorSet::new(self.render(answer));

        let misreadings = [
            problem.expr.numerators_and_denominators_combined(),
            problem.expr.left_to_right().and_then(|e| e.value()),
            problem.expr.with_root_confused().and_then(|e| e.value()),
            problem.expr.with_inner_confused().and_then(|e| e.value()),
            answer.checked_reciprocal().ok(),
        ];
        set.offer_all(
            misreadings
                .into_iter()
                .flatten()
                .filter(|v| !v.is_zero() && !v.is_negative())
                .map(|v| self.render(v)),
        );

        let (n, d) = (answer.numer(), answer.denom());
        set.fill_with(self.config.max_attempts, || {
            let wrong = match random_int(src, 0, 3) {
                0 => Fraction::new(n + random_nonzero_int(src, -3, 3), d),
                1 => Fraction::new(n, (d + random_int(src, 1, 3)).max(2)),
                2 if n > 1 && d > n => Fraction::new(d, n),
                _ => Fraction::new(n + random_nonzero_int(src, -2, 2), d),
            };
            (!wrong.is_zero() && !wrong.is_negative()).then(|| self.render(wrong))
        });
        set.finish(|k| self.render(answer + Fraction::new(k, d)))
    }

    fn explain(&self, problem: &FractionProblem) -> String {
        let style = self.config.fraction_style;
        let mut e = Explanation::new();

        let operands = problem.expr.operands();
        let conversions: Vec<String> = operands
            .iter()
            .filter_map(|o| match o {
                Operand::Mixed(f) => Some(format!("{} = {}", o.latex(), raw_fraction_latex(*f))),
                _ => None,
            })
            .collect();
        if !conversions.is_empty() {
            e.step_lines("Write each mixed number as an improper fraction", conversions);
        }
        for o in &operands {
            if let Operand::Integer(n) = o {
                e.step_math(
                    "Write the whole number as a fraction",
                    format!("{n} = \\frac{{{n}}}{{1}}"),
                );
            }
        }

        for step in &problem.trace {
            narrate(&mut e, step);
        }

        let (raw, answer) = (problem.raw_answer, problem.answer);
        if raw != answer {
            e.step_math(
                format!(
                    "Divide the numerator and the denominator by their greatest common divisor, {}",
                    gcd(raw.numer(), raw.denom())
                ),
                format!("{} = {}", raw_fraction_latex(raw), raw_fraction_latex(answer)),
            );
        }
        if style == FractionStyle::Mixed && !answer.is_integer() && !answer.is_proper() {
            e.step_math(
                "Write the improper fraction as a mixed number",
                format!(
                    "{} = {}",
                    raw_fraction_latex(answer),
                    fraction_latex(answer, FractionStyle::Mixed)
                ),
            );
        }
        e.conclude(
            "Therefore,",
            format!("{} = {}", problem.expr.latex(), fraction_latex(answer, style)),
        );
        e.render()
    }
}

/// `a + b`, parenthesizing a negative right operand.
fn numerator_sum(left: i64, right: i64, subtract: bool) -> String {
    let op = if subtract { '-' } else { '+' };
    if right < 0 {
        format!("{left} {op} ({right})")
    } else {
        format!("{left} {op} {right}")
    }
}

fn narrate(e: &mut Explanation, step: &EvalStep) {
    match step {
        EvalStep::AddSub(t) => {
            let verb = if t.subtract { "subtract" } else { "add" };
            let sign = if t.subtract { " - " } else { " + " };
            let l = t.common_denom;
            let head = format!(
                "{}{sign}{}",
                raw_fraction_latex(t.left),
                raw_fraction_latex(t.right)
            );
            let combined = format!(
                "\\frac{{{}}}{{{l}}}",
                numerator_sum(t.left_scaled, t.right_scaled, t.subtract)
            );
            let result = raw_fraction_latex(t.result);
            if t.left.denom() == l && t.right.denom() == l {
                e.step_math(
                    format!("The denominators already match, so {verb} the numerators"),
                    format!("{head} = {combined} = {result}"),
                );
                return;
            }
            let description = match t.strategy {
                CommonDenominator::Lcm => format!(
                    "Rewrite both fractions over the lowest common denominator \\(\\operatorname{{lcm}}({}, {}) = {l}\\), then {verb} the numerators",
                    t.left.denom(),
                    t.right.denom()
                ),
                CommonDenominator::CrossMultiply => format!(
                    "Multiply the denominators to get a common denominator \\({} \\times {} = {l}\\), then {verb} the numerators",
                    t.left.denom(),
                    t.right.denom()
                ),
            };
            e.step_math(
                description,
                format!(
                    "{head} = {}{sign}{} = {combined} = {result}",
                    raw_fraction_latex(Fraction::new(t.left_scaled, l)),
                    raw_fraction_latex(Fraction::new(t.right_scaled, l)),
                ),
            );
        }
        EvalStep::Product {
            left,
            right,
            result,
        } => {
            e.step_math(
                "Multiply the numerators together and the denominators together",
                format!(
                    "{} \\times {} = \\frac{{{} \\times {}}}{{{} \\times {}}} = {}",
                    raw_fraction_latex(*left),
                    raw_fraction_latex(*right),
                    left.numer(),
                    right.numer(),
                    left.denom(),
                    right.denom(),
                    raw_fraction_latex(*result)
                ),
            );
        }
        EvalStep::Quotient {
            left,
            right,
            result,
        } => {
            e.step_math(
                "Dividing by a fraction is the same as multiplying by its reciprocal",
                format!(
                    "{l} \\div {} = {l} \\times {} = {}",
                    raw_fraction_latex(*right),
                    raw_fraction_latex(right.reciprocal()),
                    raw_fraction_latex(*result),
                    l = raw_fraction_latex(*left),
                ),
            );
        }
        EvalStep::Reduce { from, to } => {
            e.step_math(
                "Simplify before continuing",
                format!("{} = {}", raw_fraction_latex(*from), raw_fraction_latex(*to)),
            );
        }
    }
}

impl QuestionGenerator for FractionArithmetic {
    fn question_id(&self) -> &'static str {
        QUESTION_ID
    }

    fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn generate_with(&self, src: &mut dyn RandomSource) -> GeneratorOutput {
        let problem = self.sample_problem(src);
        let correct = self.render(problem.answer).rendered;
        let wrong = self.distractors(&problem, src);
        let explanation = self.explain(&problem);
        tracing::debug!(
            target: "generate",
            question_id = QUESTION_ID,
            difficulty = self.difficulty,
            level = self.level,
            "generated question"
        );
        GeneratorOutput::new(ask_for_value(&problem.expr.latex()), correct, wrong, explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_sampling::{RngSource, ScriptedSource};

    /// Level 1 draws: two pool positions, one numerator index per
    /// denominator, then add/sub.
    fn one_third_plus_one_quarter() -> ScriptedSource {
        ScriptedSource::new([1, 2, 0, 0], [0.25])
    }

    #[test]
    fn scripted_sum_of_thirds_and_quarters() {
        let gen = FractionArithmetic::new(1);
        let out = gen.generate_with(&mut one_third_plus_one_quarter());
        assert_eq!(out.content, "\\[\\frac{1}{3} + \\frac{1}{4} = \\text{?}\\]");
        assert_eq!(out.correct_answer, "\\(\\frac{7}{12}\\)");
        assert!(out.has_distinct_options());
        // (1 + 1) / (3 + 4)
        assert!(out.wrong_answers.contains(&"\\(\\frac{2}{7}\\)".to_string()));
        assert!(out.explanation.contains("\\operatorname{lcm}(3, 4) = 12"));
        assert!(out
            .explanation
            .contains("\\frac{1}{3} + \\frac{1}{4} = \\frac{4}{12} + \\frac{3}{12} = \\frac{4 + 3}{12} = \\frac{7}{12}"));
        assert!(out.explanation.ends_with("\\[\\frac{1}{3} + \\frac{1}{4} = \\frac{7}{12}\\]"));
    }

    #[test]
    fn cross_multiply_changes_only_the_narration() {
        let config = GeneratorConfig {
            common_denominator: Some(CommonDenominator::CrossMultiply),
            ..GeneratorConfig::default()
        };
        let gen = FractionArithmetic::with_config(1, config);
        let out = gen.generate_with(&mut one_third_plus_one_quarter());
        assert_eq!(out.correct_answer, "\\(\\frac{7}{12}\\)");
        assert!(out.explanation.contains("3 \\times 4 = 12"));
    }

    #[test]
    fn subtraction_is_ordered_to_stay_non_negative() {
        let gen = FractionArithmetic::new(2);
        let mut rng = RngSource::seeded(17);
        for _ in 0..500 {
            let p = gen.sample_problem(&mut rng);
            assert!(!p.answer.is_negative(), "{}", p.expr.latex());
        }
    }

    #[test]
    fn level_one_uses_two_different_curated_denominators() {
        let gen = FractionArithmetic::new(1);
        let mut rng = RngSource::seeded(23);
        for _ in 0..300 {
            let p = gen.sample_problem(&mut rng);
            let ops = p.expr.operands();
            let dens: Vec<i64> = ops.iter().map(|o| o.value().denom()).collect();
            assert_ne!(dens[0], dens[1]);
            assert!(dens.iter().all(|d| CURATED_DENOMINATORS.contains(d)));
        }
    }

    #[test]
    fn mixed_answers_by_default_and_improper_on_request() {
        let mut rng = RngSource::seeded(5);
        let gen = FractionArithmetic::new(7);
        let p = (0..100)
            .map(|_| gen.sample_problem(&mut rng))
            .find(|p| !p.answer.is_integer())
            .expect("a non-integer answer within 100 draws");
        assert!(!p.answer.is_proper());
        let mixed = gen.render(p.answer).rendered;
        let improper = FractionArithmetic::with_config(
            7,
            GeneratorConfig {
                fraction_style: FractionStyle::Improper,
                ..GeneratorConfig::default()
            },
        )
        .render(p.answer)
        .rendered;
        assert_ne!(mixed, improper);
        assert!(improper.starts_with("\\(\\frac{"));
    }

    #[test]
    fn level_six_reduces_the_bracket_before_dividing() {
        let gen = FractionArithmetic::new(6);
        let p = gen.sample_problem(&mut RngSource::seeded(8));
        assert!(matches!(p.trace.last(), Some(EvalStep::Quotient { .. })));
        if let EvalStep::Quotient { right, .. } = p.trace[p.trace.len() - 1] {
            assert!(right.is_simplified());
        }
    }

    #[test]
    fn fallback_instances_satisfy_their_level() {
        for spec in &LEVEL_SPECS {
            let v = spec.template.fallback().value().expect("defined");
            assert!(!v.is_negative());
        }
    }

    #[test]
    fn perturbed_distractors_stay_positive() {
        // 1/2 - 1/3 = 1/6, whose numerator perturbations reach zero and below
        let problem =
            FractionArithmetic::new(1).sample_problem(&mut ScriptedSource::new([0, 1, 0, 0], [0.75]));
        assert_eq!(problem.answer, Fraction::new(1, 6));
        let mut rng = RngSource::seeded(29);
        for level in 1..=LEVELS {
            let gen = FractionArithmetic::new(level);
            for _ in 0..300 {
                let problem = gen.sample_problem(&mut rng);
                let wrong = gen.distractors(&problem, &mut rng);
                for w in &wrong {
                    assert!(!w.contains('-'), "level {level}: {w} for {}", problem.expr.latex());
                    assert_ne!(w, "\\(0\\)", "level {level}: {}", problem.expr.latex());
                }
            }
        }
        let gen = FractionArithmetic::new(1);
        let wrong = gen.distractors(&problem, &mut RngSource::seeded(3));
        assert!(wrong.iter().all(|w| !w.contains('-') && w != "\\(0\\)"), "{wrong:?}");
    }

    #[test]
    fn unknown_difficulty_uses_level_one() {
        assert_eq!(FractionArithmetic::new(0).level(), 1);
        assert_eq!(FractionArithmetic::new(99).level(), 1);
        assert_eq!(FractionArithmetic::new(99).difficulty(), 99);
    }
}
