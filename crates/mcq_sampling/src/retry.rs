//! Bounded reject-and-resample.
//!
//! Samplers never loop without a cap: after `max_attempts` rejections the
//! caller substitutes a known-good instance.

/// Outcome of [`sample_until`].
#[derive(Debug, Clone, PartialEq)]
pub enum Attempted<T> {
    Accepted { value: T, attempts: usize },
    Exhausted { attempts: usize },
}

impl<T> Attempted<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Attempted::Accepted { value, .. } => Some(value),
            Attempted::Exhausted { .. } => None,
        }
    }

    pub fn attempts(&self) -> usize {
        match self {
            Attempted::Accepted { attempts, .. } | Attempted::Exhausted { attempts } => *attempts,
        }
    }
}

/// Draw with `sample` until `accept` holds, at most `max_attempts` times.
pub fn sample_until<T>(
    max_attempts: usize,
    mut sample: impl FnMut() -> T,
    mut accept: impl FnMut(&T) -> bool,
) -> Attempted<T> {
    for attempt in 1..=max_attempts {
        let candidate = sample();
        if accept(&candidate) {
            return Attempted::Accepted {
                value: candidate,
                attempts: attempt,
            };
        }
        tracing::trace!(target: "sampling", attempt, "candidate rejected");
    }
    Attempted::Exhausted {
        attempts: max_attempts,
    }
}

/// [`sample_until`], falling back to `fallback()` on exhaustion.
///
/// `label` identifies the sampler in the warning logged on fallback.
pub fn sample_or_fallback<T>(
    label: &str,
    max_attempts: usize,
    sample: impl FnMut() -> T,
    accept: impl FnMut(&T) -> bool,
    fallback: impl FnOnce() -> T,
) -> T {
    match sample_until(max_attempts, sample, accept) {
        Attempted::Accepted { value, .. } => value,
        Attempted::Exhausted { attempts } => {
            tracing::warn!(
                target: "sampling",
                sampler = label,
                attempts,
                "retry budget exhausted, using fallback instance"
            );
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_first_accepted_candidate() {
        let mut n = 0;
        let result = sample_until(
            10,
            || {
                n += 1;
                n
            },
            |v| *v == 3,
        );
        assert_eq!(
            result,
            Attempted::Accepted {
                value: 3,
                attempts: 3
            }
        );
    }

    #[test]
    fn exhaustion_is_bounded() {
        let mut calls = 0;
        let result = sample_until(
            5,
            || {
                calls += 1;
            },
            |_| false,
        );
        assert_eq!(result.attempts(), 5);
        assert_eq!(result.value(), None);
        assert_eq!(calls, 5);
    }

    #[test]
    fn fallback_used_only_on_exhaustion() {
        assert_eq!(sample_or_fallback("test", 3, || 1, |_| true, || 99), 1);
        assert_eq!(sample_or_fallback("test", 3, || 1, |_| false, || 99), 99);
    }
}
