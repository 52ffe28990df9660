//! Lookup of question families by id.

use std::path::Path;

use crate::config::GeneratorConfig;
use crate::error::EngineError;
use crate::generator::QuestionGenerator;
use crate::generators::{
    circle_center_radius, circle_from_center, circle_through_points, fraction_arithmetic,
    probability, pythagoras, slope, square_of_sum, CircleCenterRadius, CircleFromCenter,
    CircleThroughPoints, FractionArithmetic, Probability, Pythagoras, SlopeBetweenPoints,
    SquareOfSum,
};

type Build = fn(u32, GeneratorConfig) -> Box<dyn QuestionGenerator>;

/// One registered family.
#[derive(Clone, Copy)]
pub struct Family {
    pub question_id: &'static str,
    pub levels: u32,
    build: Build,
}

impl std::fmt::Debug for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Family")
            .field("question_id", &self.question_id)
            .field("levels", &self.levels)
            .finish()
    }
}

macro_rules! family {
    ($module:ident, $generator:ident) => {
        Family {
            question_id: $module::QUESTION_ID,
            levels: $module::LEVELS,
            build: |difficulty, config| -> Box<dyn QuestionGenerator> {
                Box::new($generator::with_config(difficulty, config))
            },
        }
    };
}

static FAMILIES: [Family; 8] = [
    family!(fraction_arithmetic, FractionArithmetic),
    family!(circle_from_center, CircleFromCenter),
    family!(circle_center_radius, CircleCenterRadius),
    family!(circle_through_points, CircleThroughPoints),
    family!(pythagoras, Pythagoras),
    family!(square_of_sum, SquareOfSum),
    family!(probability, Probability),
    family!(slope, SlopeBetweenPoints),
];

/// Every registered family, in a stable order.
pub fn catalog() -> &'static [Family] {
    &FAMILIES
}

pub fn find(question_id: &str) -> Option<&'static Family> {
    FAMILIES.iter().find(|f| f.question_id == question_id)
}

/// Build the generator for `question_id` with the default config.
pub fn create(question_id: &str, difficulty: u32) -> Result<Box<dyn QuestionGenerator>, EngineError> {
    create_with_config(question_id, difficulty, GeneratorConfig::default())
}

pub fn create_with_config(
    question_id: &str,
    difficulty: u32,
    config: GeneratorConfig,
) -> Result<Box<dyn QuestionGenerator>, EngineError> {
    let family =
        find(question_id).ok_or_else(|| EngineError::UnknownQuestion(question_id.to_string()))?;
    Ok((family.build)(difficulty, config))
}

/// Build the generator for `question_id` with the config stored at `path`.
/// A missing file means the defaults.
pub fn create_from_config_path(
    question_id: &str,
    difficulty: u32,
    path: impl AsRef<Path>,
) -> Result<Box<dyn QuestionGenerator>, EngineError> {
    let config = GeneratorConfig::load(path)?;
    create_with_config(question_id, difficulty, config)
}
