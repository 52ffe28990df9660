//! Procedural multiple-choice math questions.
//!
//! A [`QuestionGenerator`] is bound to one question family and one
//! difficulty. Each call samples a fresh instance, computes the answer
//! exactly, collects three distinct distractors through a
//! [`DistractorSet`] and narrates the working with an [`Explanation`].
//! Families are looked up by id through [`registry`].

pub mod config;
pub mod distractor;
pub mod error;
pub mod explanation;
pub mod generator;
pub mod generators;
pub mod geometry;
pub mod registry;

pub use config::{ConfigError, GeneratorConfig, DEFAULT_MAX_ATTEMPTS};
pub use distractor::{Candidate, DistractorSet};
pub use error::EngineError;
pub use explanation::{Explanation, Step};
pub use generator::{adjust_range, resolve_level, shuffled_options, QuestionGenerator};
pub use registry::{catalog, create, create_from_config_path, create_with_config, Family};

pub use mcq_api_models::{GeneratorOutput, ShuffledOptions};
pub use mcq_sampling::{RandomSource, RngSource, ScriptedSource};
