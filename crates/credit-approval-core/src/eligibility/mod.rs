pub mod directory;
pub mod engine;
pub mod policy;
pub mod score;

pub use engine::{evaluate, evaluate_with_policy, EligibilityDecision};
