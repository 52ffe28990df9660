//! The generator contract.

use mcq_api_models::{GeneratorOutput, ShuffledOptions};
use mcq_formatter::{block, text};
use mcq_sampling::{shuffle, RandomSource, RngSource};

/// A question family bound to one difficulty.
///
/// Generators are immutable; every call samples a fresh instance and shares
/// no state with other calls.
pub trait QuestionGenerator: Send + Sync {
    /// Stable identifier of the question family.
    fn question_id(&self) -> &'static str;

    /// Difficulty as requested by the caller (before level resolution).
    fn difficulty(&self) -> u32;

    /// Generate one question, drawing all randomness from `src`.
    fn generate_with(&self, src: &mut dyn RandomSource) -> GeneratorOutput;

    /// Generate one question from the thread-local RNG.
    fn generate(&self) -> GeneratorOutput {
        self.generate_with(&mut RngSource::thread())
    }
}

/// Map a requested difficulty onto `1..=levels`. Anything outside falls
/// back to level 1.
pub fn resolve_level(difficulty: u32, levels: u32) -> u32 {
    if (1..=levels).contains(&difficulty) {
        difficulty
    } else {
        1
    }
}

/// Widen a base range with difficulty: `×(1 + (d − 1)·0.5)`.
pub fn adjust_range(range: (i64, i64), difficulty: u32) -> (i64, i64) {
    let factor = 1.0 + (difficulty.max(1) - 1) as f64 * 0.5;
    (
        (range.0 as f64 * factor).round() as i64,
        (range.1 as f64 * factor).round() as i64,
    )
}

/// `\[expression = \text{?}\]`
pub fn ask_for_value(expression: &str) -> String {
    block(&format!("{expression} = {}", text("?")))
}

/// Put the four options in random display order.
pub fn shuffled_options(output: &GeneratorOutput, src: &mut dyn RandomSource) -> ShuffledOptions {
    let options: Vec<String> = shuffle(src, &output.options())
        .into_iter()
        .map(str::to_string)
        .collect();
    let correct_index = options
        .iter()
        .position(|o| *o == output.correct_answer)
        .unwrap_or(0);
    ShuffledOptions {
        options,
        correct_index,
    }
}
