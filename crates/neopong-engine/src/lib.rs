//! Deterministic Pong simulation engine.
//!
//! This crate provides the authoritative game state for a two-paddle, one-ball
//! match:
//!
//! - [`Ball`] / [`Paddle`] - Physics entities (pure state + motion rules)
//! - [`PongMatch`] - Match simulator advancing one tick per call
//! - [`MatchState`] - Cumulative per-match hit/score counters
//! - [`Controller`] - Decision seam mapping an [`Observation`] to an [`Action`]
//! - [`LaunchSeed`] - Seed for deterministic ball launches
//!
//! # Simulation Flow
//!
//! A match progresses as follows:
//!
//! 1. Build a [`PongMatch`] (randomly seeded or via [`PongMatch::with_seed`])
//! 2. Callers request paddle moves through [`PongMatch::move_paddle`], which
//!    rejects moves that would leave the court
//! 3. [`PongMatch::tick`] advances the ball, resolves wall and paddle
//!    collisions, and detects scoring
//! 4. The returned [`MatchState`] tells the caller when to stop or
//!    [`PongMatch::reset`]
//!
//! The simulation is single-threaded and synchronous; the tick rate is fixed
//! entirely by the caller's clock.

pub use self::{ball::*, controller::*, paddle::*, pong_match::*};

mod ball;
mod controller;
mod paddle;
mod pong_match;
