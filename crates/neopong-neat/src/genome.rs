use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{config::EvolutionConfig, weights};

/// A single evolvable candidate: a network weight vector plus an externally
/// accumulated fitness scalar.
///
/// Fitness starts out unset (`None`). The evaluation callback owns fitness
/// semantics entirely: it decides when to reset the accumulator
/// ([`Genome::reset_fitness`]) and how much to add per match
/// ([`Genome::add_fitness`]). Evolution only ever reads the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genome {
    key: u64,
    weights: Vec<f32>,
    fitness: Option<f32>,
}

impl Genome {
    /// Creates a genome with uniformly random weights for the configured
    /// topology.
    pub fn random<R>(key: u64, config: &EvolutionConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            key,
            weights: weights::random(rng, config.max_weight, config.weight_count()),
            fitness: None,
        }
    }

    /// Creates a genome from an explicit weight vector (champion replay).
    #[must_use]
    pub fn from_weights(key: u64, weights: Vec<f32>) -> Self {
        Self {
            key,
            weights,
            fitness: None,
        }
    }

    /// Stable identity of this genome across a training run.
    #[must_use]
    pub fn key(&self) -> u64 {
        self.key
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Accumulated fitness, or `None` if this genome has not been evaluated
    /// yet in the current generation.
    #[must_use]
    pub fn fitness(&self) -> Option<f32> {
        self.fitness
    }

    /// Resets the fitness accumulator to zero.
    pub fn reset_fitness(&mut self) {
        self.fitness = Some(0.0);
    }

    /// Adds to the fitness accumulator, initializing it to zero first if it
    /// was unset.
    pub fn add_fitness(&mut self, amount: f32) {
        *self.fitness.get_or_insert(0.0) += amount;
    }

    /// Fitness as seen by selection; unevaluated genomes count as zero.
    #[must_use]
    pub(crate) fn selection_fitness(&self) -> f32 {
        self.fitness.unwrap_or(0.0)
    }

    /// Produces an offspring of two parents via BLX-α crossover followed by
    /// Gaussian mutation.
    pub fn crossover<R>(
        key: u64,
        p1: &Genome,
        p2: &Genome,
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut child = weights::blx_alpha(
            &p1.weights,
            &p2.weights,
            config.blx_alpha,
            config.max_weight,
            rng,
        );
        weights::mutate(
            &mut child,
            config.mutation_sigma,
            config.max_weight,
            config.mutation_rate,
            rng,
        );
        Self {
            key,
            weights: child,
            fitness: None,
        }
    }

    /// Compatibility distance used for speciation: mean absolute weight
    /// difference.
    ///
    /// # Panics
    ///
    /// Panics if the genomes have different topologies.
    #[must_use]
    pub fn compatibility_distance(&self, other: &Genome) -> f32 {
        weights::mean_abs_distance(&self.weights, &other.weights)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn config() -> EvolutionConfig {
        EvolutionConfig::default()
    }

    #[test]
    fn random_genome_has_configured_length_and_no_fitness() {
        let config = config();
        let mut rng = Pcg32::seed_from_u64(7);
        let genome = Genome::random(1, &config, &mut rng);
        assert_eq!(genome.weights().len(), config.weight_count());
        assert_eq!(genome.fitness(), None);
    }

    #[test]
    fn add_fitness_initializes_then_accumulates() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut genome = Genome::random(1, &config(), &mut rng);
        genome.add_fitness(3.0);
        genome.add_fitness(4.0);
        assert_eq!(genome.fitness(), Some(7.0));
    }

    #[test]
    fn reset_fitness_discards_prior_accumulation() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut genome = Genome::random(1, &config(), &mut rng);
        genome.add_fitness(10.0);
        genome.reset_fitness();
        assert_eq!(genome.fitness(), Some(0.0));
    }

    #[test]
    fn compatibility_distance_is_zero_for_identical_genomes() {
        let mut rng = Pcg32::seed_from_u64(7);
        let genome = Genome::random(1, &config(), &mut rng);
        assert!(genome.compatibility_distance(&genome) < 1e-6);
    }

    #[test]
    fn compatibility_distance_grows_with_weight_difference() {
        let a = Genome::from_weights(1, vec![0.0; 10]);
        let b = Genome::from_weights(2, vec![1.0; 10]);
        let c = Genome::from_weights(3, vec![3.0; 10]);
        assert!((a.compatibility_distance(&b) - 1.0).abs() < 1e-6);
        assert!(a.compatibility_distance(&c) > a.compatibility_distance(&b));
    }

    #[test]
    fn crossover_respects_weight_bounds() {
        let config = config();
        let mut rng = Pcg32::seed_from_u64(99);
        let p1 = Genome::random(1, &config, &mut rng);
        let p2 = Genome::random(2, &config, &mut rng);
        let child = Genome::crossover(3, &p1, &p2, &config, &mut rng);
        assert_eq!(child.key(), 3);
        assert_eq!(child.fitness(), None);
        assert!(
            child
                .weights()
                .iter()
                .all(|w| w.abs() <= config.max_weight)
        );
    }
}
