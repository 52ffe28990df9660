//! Collecting three distinct wrong answers.
//!
//! Families offer candidates in order: named misconceptions first, then
//! bounded random perturbations, then a deterministic sequence that is
//! guaranteed to complete the set. A candidate is dropped when its rendered
//! string, or its value when one is given, matches the correct answer or an
//! already accepted distractor.

use mcq_api_models::WRONG_ANSWER_COUNT;
use mcq_math::Fraction;

/// A rendered candidate with an optional exact value used for dedupe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub rendered: String,
    pub value: Option<Fraction>,
}

impl Candidate {
    pub fn text(rendered: impl Into<String>) -> Self {
        Self {
            rendered: rendered.into(),
            value: None,
        }
    }

    pub fn valued(rendered: impl Into<String>, value: Fraction) -> Self {
        Self {
            rendered: rendered.into(),
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DistractorSet {
    correct: Candidate,
    accepted: Vec<Candidate>,
}

impl DistractorSet {
    pub fn new(correct: Candidate) -> Self {
        Self {
            correct,
            accepted: Vec::with_capacity(WRONG_ANSWER_COUNT),
        }
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.accepted.len() == WRONG_ANSWER_COUNT
    }

    fn collides(&self, candidate: &Candidate) -> bool {
        std::iter::once(&self.correct)
            .chain(self.accepted.iter())
            .any(|existing| {
                existing.rendered == candidate.rendered
                    || matches!(
                        (existing.value, candidate.value),
                        (Some(a), Some(b)) if a.value_eq(&b)
                    )
            })
    }

    /// Accept `candidate` unless it collides or the set is already full.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        if self.is_full() || self.collides(&candidate) {
            return false;
        }
        self.accepted.push(candidate);
        true
    }

    /// Offer each candidate in order until the set is full.
    pub fn offer_all(&mut self, candidates: impl IntoIterator<Item = Candidate>) {
        for candidate in candidates {
            if self.is_full() {
                break;
            }
            self.offer(candidate);
        }
    }

    /// Bounded random fallback: call `perturb` at most `max_attempts` times
    /// while the set is not full.
    pub fn fill_with(&mut self, max_attempts: usize, mut perturb: impl FnMut() -> Option<Candidate>) {
        if self.is_full() {
            return;
        }
        tracing::debug!(
            target: "distractor",
            accepted = self.accepted.len(),
            "misconception candidates exhausted, perturbing"
        );
        for _ in 0..max_attempts {
            if self.is_full() {
                return;
            }
            if let Some(candidate) = perturb() {
                self.offer(candidate);
            }
        }
    }

    /// Complete the set from `deterministic(1)`, `deterministic(2)`, … and
    /// return the three distractors in acceptance order.
    ///
    /// `deterministic` must yield infinitely many distinct candidates; a
    /// numbered placeholder is used if it fails to within a large bound.
    pub fn finish(mut self, mut deterministic: impl FnMut(i64) -> Candidate) -> [String; WRONG_ANSWER_COUNT] {
        const MAX_STEPS: i64 = 10_000;
        if !self.is_full() {
            tracing::warn!(
                target: "distractor",
                accepted = self.accepted.len(),
                correct = %self.correct.rendered,
                "completing distractors deterministically"
            );
        }
        let mut k = 1;
        while !self.is_full() && k <= MAX_STEPS {
            self.offer(deterministic(k));
            k += 1;
        }
        if !self.is_full() {
            tracing::warn!(
                target: "distractor",
                accepted = self.accepted.len(),
                steps = MAX_STEPS,
                correct = %self.correct.rendered,
                "deterministic completion stuck, using numbered placeholders"
            );
        }
        while !self.is_full() {
            self.offer(Candidate::text(format!("\\(\\text{{option {k}}}\\)")));
            k += 1;
        }
        let mut wrong = self.accepted.into_iter().map(|c| c.rendered);
        std::array::from_fn(|_| wrong.next().unwrap_or_default())
    }
}
