//! Glue between the match simulator and the evolutionary algorithm.
//!
//! [`NetworkController`] wraps a compiled network as a paddle controller,
//! [`MatchEvaluator`] plays one headless match between two controllers, and
//! [`Trainer`] runs the round-robin evaluation that assigns fitness to a
//! whole generation.

pub use self::{controller::NetworkController, evaluator::MatchEvaluator, trainer::Trainer};

mod controller;
mod evaluator;
mod trainer;
