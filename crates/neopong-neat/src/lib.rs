//! Neuroevolution engine for fixed-topology feed-forward controllers.
//!
//! This crate supplies the evolutionary-algorithm side of training:
//! population management, the genome representation, network construction
//! from a genome, and the generational evolution step. The caller supplies
//! only a per-generation evaluation function that assigns fitness to each
//! genome as a side effect.
//!
//! # How Evolution Works
//!
//! 1. **Population** - Create a population of genomes with random weights
//! 2. **Evaluation** - The caller's evaluation function plays matches and
//!    accumulates fitness on each genome
//! 3. **Speciation** - Genomes are grouped by weight-space compatibility
//!    distance; species stagnant for too long stop reproducing
//! 4. **Reproduction** - Offspring slots are allocated across species by
//!    mean fitness; elites are preserved, the rest come from tournament
//!    selection, BLX-α crossover, and Gaussian mutation
//! 5. **Repeat** - Continue for a fixed number of generations; the best
//!    genome ever evaluated is tracked as the champion
//!
//! # Architecture
//!
//! ```text
//! Population
//!     ↓ owns
//! Genomes (weight vectors + fitness accumulators)
//!     ↓ compiled into
//! FeedForwardNetwork
//!     ↓ activated by
//! Evaluation callback (caller-supplied fitness function)
//!     ↓ guides
//! Speciation, Selection & Reproduction
//! ```
//!
//! Genome fitness is an explicit accumulator ([`Genome::add_fitness`])
//! mutated only by the caller's evaluation function; the engine itself
//! never invents fitness values.

pub use self::{
    config::{ConfigError, EvolutionConfig},
    genome::Genome,
    network::FeedForwardNetwork,
    population::Population,
    stats::DescriptiveStats,
};

mod config;
mod genome;
mod network;
mod population;
mod stats;
pub mod weights;
