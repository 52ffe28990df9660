//! Question families. Each module exposes `QUESTION_ID`, `LEVELS` and a
//! generator type implementing [`QuestionGenerator`](crate::QuestionGenerator).

pub mod circle_center_radius;
pub mod circle_common;
pub mod circle_from_center;
pub mod circle_through_points;
pub mod fraction_arithmetic;
pub mod fraction_expr;
pub mod probability;
pub mod pythagoras;
pub mod slope;
pub mod square_of_sum;

pub use circle_center_radius::CircleCenterRadius;
pub use circle_from_center::CircleFromCenter;
pub use circle_through_points::CircleThroughPoints;
pub use fraction_arithmetic::FractionArithmetic;
pub use probability::Probability;
pub use pythagoras::Pythagoras;
pub use slope::SlopeBetweenPoints;
pub use square_of_sum::SquareOfSum;
