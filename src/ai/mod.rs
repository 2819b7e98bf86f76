//! Heuristic move evaluation for the automated opponent.

mod evaluator;

pub use evaluator::MoveEvaluator;
