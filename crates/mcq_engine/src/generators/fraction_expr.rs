//! Small arithmetic expression trees over fractions.
//!
//! Evaluation records every operation it performs so the explanation can
//! narrate the same numbers that produced the answer.

use mcq_formatter::{fraction_latex, raw_fraction_latex, FractionStyle};
use mcq_math::{AddTrace, CommonDenominator, Fraction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn latex(self) -> &'static str {
        match self {
            Op::Add => " + ",
            Op::Sub => " - ",
            Op::Mul => " \\times ",
            Op::Div => " \\div ",
        }
    }

    fn binds_tighter_than(self, other: Op) -> bool {
        matches!(self, Op::Mul | Op::Div) && matches!(other, Op::Add | Op::Sub)
    }

    /// The operation a careless reader confuses this one with.
    fn confused(self) -> Op {
        match self {
            Op::Add => Op::Sub,
            Op::Sub => Op::Add,
            Op::Mul => Op::Div,
            Op::Div => Op::Mul,
        }
    }
}

/// A leaf, remembering how it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Integer(i64),
    /// Shown exactly as drawn: `\frac{n}{d}`.
    Plain(Fraction),
    /// Improper value shown as a mixed number.
    Mixed(Fraction),
}

impl Operand {
    pub fn value(&self) -> Fraction {
        match *self {
            Operand::Integer(n) => Fraction::from_integer(n),
            Operand::Plain(f) | Operand::Mixed(f) => f,
        }
    }

    pub fn latex(&self) -> String {
        match *self {
            Operand::Integer(n) => n.to_string(),
            Operand::Plain(f) => raw_fraction_latex(f),
            Operand::Mixed(f) => fraction_latex(f, FractionStyle::Mixed),
        }
    }
}

/// When the evaluator brings operands over a common denominator, and
/// whether it reduces results before feeding them to the next operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticPolicy {
    pub common_denominator: CommonDenominator,
    pub reduce_intermediates: bool,
}

/// One operation performed during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalStep {
    AddSub(AddTrace),
    Product {
        left: Fraction,
        right: Fraction,
        result: Fraction,
    },
    Quotient {
        left: Fraction,
        right: Fraction,
        result: Fraction,
    },
    Reduce {
        from: Fraction,
        to: Fraction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FractionExpr {
    Leaf(Operand),
    Binary(Op, Box<FractionExpr>, Box<FractionExpr>),
    Group(Box<FractionExpr>),
}

impl FractionExpr {
    pub fn leaf(operand: Operand) -> Self {
        FractionExpr::Leaf(operand)
    }

    pub fn binary(op: Op, left: FractionExpr, right: FractionExpr) -> Self {
        FractionExpr::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn group(inner: FractionExpr) -> Self {
        FractionExpr::Group(Box::new(inner))
    }

    pub fn latex(&self) -> String {
        match self {
            FractionExpr::Leaf(operand) => operand.latex(),
            FractionExpr::Binary(op, l, r) => format!("{}{}{}", l.latex(), op.latex(), r.latex()),
            FractionExpr::Group(inner) => format!("({})", inner.latex()),
        }
    }

    /// Leaves in display order.
    pub fn operands(&self) -> Vec<Operand> {
        let mut out = Vec::new();
        self.collect_operands(&mut out);
        out
    }

    fn collect_operands(&self, out: &mut Vec<Operand>) {
        match self {
            FractionExpr::Leaf(operand) => out.push(*operand),
            FractionExpr::Binary(_, l, r) => {
                l.collect_operands(out);
                r.collect_operands(out);
            }
            FractionExpr::Group(inner) => inner.collect_operands(out),
        }
    }

    /// Evaluate, appending each operation to `trace`. The returned value
    /// is the unreduced result of the outermost operation.
    ///
    /// # Panics
    ///
    /// Panics when a divisor evaluates to zero.
    pub fn evaluate(&self, policy: &ArithmeticPolicy, trace: &mut Vec<EvalStep>) -> Fraction {
        self.eval_traced(policy, trace, true)
    }

    fn eval_traced(&self, policy: &ArithmeticPolicy, trace: &mut Vec<EvalStep>, root: bool) -> Fraction {
        let result = match self {
            FractionExpr::Leaf(operand) => return operand.value(),
            FractionExpr::Group(inner) => return inner.eval_traced(policy, trace, root),
            FractionExpr::Binary(op, l, r) => {
                let left = l.eval_traced(policy, trace, false);
                let right = r.eval_traced(policy, trace, false);
                match op {
                    Op::Add | Op::Sub => {
                        let step = if *op == Op::Add {
                            left.add_with(right, policy.common_denominator)
                        } else {
                            left.sub_with(right, policy.common_denominator)
                        };
                        trace.push(EvalStep::AddSub(step));
                        step.result
                    }
                    Op::Mul => {
                        let result = left * right;
                        trace.push(EvalStep::Product {
                            left,
                            right,
                            result,
                        });
                        result
                    }
                    Op::Div => {
                        let result = left / right;
                        trace.push(EvalStep::Quotient {
                            left,
                            right,
                            result,
                        });
                        result
                    }
                }
            }
        };
        if !root && policy.reduce_intermediates && !result.is_simplified() {
            let to = result.simplify();
            trace.push(EvalStep::Reduce { from: result, to });
            return to;
        }
        result
    }

    /// Value without a trace; `None` on division by zero.
    pub fn value(&self) -> Option<Fraction> {
        match self {
            FractionExpr::Leaf(operand) => Some(operand.value()),
            FractionExpr::Group(inner) => inner.value(),
            FractionExpr::Binary(op, l, r) => {
                let (left, right) = (l.value()?, r.value()?);
                let result = match op {
                    Op::Add => left + right,
                    Op::Sub => left - right,
                    Op::Mul => left * right,
                    Op::Div => left.checked_div(right).ok()?,
                };
                Some(result.simplify())
            }
        }
    }

    /// Same tree with the outermost operation confused (`+`↔`-`,
    /// `×`↔`÷`).
    pub fn with_root_confused(&self) -> Option<FractionExpr> {
        match self {
            FractionExpr::Binary(op, l, r) => Some(FractionExpr::Binary(op.confused(), l.clone(), r.clone())),
            _ => None,
        }
    }

    /// Same tree with the first (left-nested) operation confused.
    pub fn with_inner_confused(&self) -> Option<FractionExpr> {
        match self {
            FractionExpr::Binary(op, l, r) => {
                let inner = l.with_root_confused()?;
                Some(FractionExpr::Binary(*op, Box::new(inner), r.clone()))
            }
            _ => None,
        }
    }

    /// `a + b × c` read as `(a + b) × c`.
    pub fn left_to_right(&self) -> Option<FractionExpr> {
        match self {
            FractionExpr::Binary(outer, a, rest) => match rest.as_ref() {
                FractionExpr::Binary(inner, b, c) if inner.binds_tighter_than(*outer) => {
                    Some(FractionExpr::binary(
                        *inner,
                        FractionExpr::group(FractionExpr::Binary(*outer, a.clone(), b.clone())),
                        (**c).clone(),
                    ))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// `a/b ± c/d` computed as `(a ± c)/(b ± d)`.
    pub fn numerators_and_denominators_combined(&self) -> Option<Fraction> {
        match self {
            FractionExpr::Binary(op @ (Op::Add | Op::Sub), l, r) => {
                let (FractionExpr::Leaf(Operand::Plain(a)), FractionExpr::Leaf(Operand::Plain(b))) =
                    (l.as_ref(), r.as_ref())
                else {
                    return None;
                };
                let (numer, denom) = if *op == Op::Add {
                    (a.numer() + b.numer(), a.denom() + b.denom())
                } else {
                    (a.numer() - b.numer(), a.denom() - b.denom())
                };
                Fraction::try_new(numer, denom).ok().map(|f| f.simplify())
            }
            _ => None,
        }
    }
}
