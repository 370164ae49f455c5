//! Table-driven eco score: per-category points, tier, strengths and estimated impact.

mod calculator;
pub mod domain;
mod tables;

pub use calculator::{calculate_eco_score, trees_equivalent, EcoAnswers, TREE_ABSORPTION_KG};
pub use domain::{CategoryScore, EcoBreakdown, EcoCategory, EcoScoreResult, ScoreTier};
