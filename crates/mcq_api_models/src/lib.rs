//! Wire model for generated questions.
//!
//! Field names serialize in camelCase (`correctAnswer`, `wrongAnswers`,
//! `displayOptions`) to match what the rendering front end consumes.

use serde::{Deserialize, Serialize};

/// Number of distractors every question carries.
pub const WRONG_ANSWER_COUNT: usize = 3;

/// Content kind of a question.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    #[default]
    Text,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Front end should typeset `\( \)` / `\[ \]` math.
    pub latex: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { latex: true }
    }
}

/// One generated multiple-choice question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOutput {
    /// Question statement; may embed inline SVG.
    pub content: String,
    pub correct_answer: String,
    pub wrong_answers: [String; WRONG_ANSWER_COUNT],
    pub explanation: String,
    #[serde(rename = "type")]
    pub kind: OutputType,
    pub display_options: DisplayOptions,
}

impl GeneratorOutput {
    pub fn new(
        content: impl Into<String>,
        correct_answer: impl Into<String>,
        wrong_answers: [String; WRONG_ANSWER_COUNT],
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            correct_answer: correct_answer.into(),
            wrong_answers,
            explanation: explanation.into(),
            kind: OutputType::Text,
            display_options: DisplayOptions::default(),
        }
    }

    /// Correct answer followed by the distractors.
    pub fn options(&self) -> [&str; WRONG_ANSWER_COUNT + 1] {
        [
            self.correct_answer.as_str(),
            self.wrong_answers[0].as_str(),
            self.wrong_answers[1].as_str(),
            self.wrong_answers[2].as_str(),
        ]
    }

    /// No two options render the same.
    pub fn has_distinct_options(&self) -> bool {
        let options = self.options();
        options
            .iter()
            .enumerate()
            .all(|(i, a)| options[i + 1..].iter().all(|b| a != b))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The four options in display order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShuffledOptions {
    pub options: Vec<String>,
    pub correct_index: usize,
}
