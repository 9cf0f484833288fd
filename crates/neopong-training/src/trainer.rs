use neopong_neat::{EvolutionConfig, Genome, Population};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{controller::NetworkController, evaluator::MatchEvaluator};

/// Assigns fitness to a generation by round-robin self-play.
///
/// Every unordered pair of genomes plays exactly one match, the first genome
/// on the left paddle and the second on the right. A genome's fitness is the
/// number of paddle hits it scored, accumulated sequentially: a genome's
/// accumulator is reset when it first takes the left paddle, and hits earned
/// earlier on the right paddle carry over until then.
#[derive(Debug)]
pub struct Trainer {
    evaluator: MatchEvaluator,
    rng: Pcg32,
}

impl Trainer {
    /// Creates a trainer with default match limits.
    ///
    /// The seed drives ball launches for every training match, so a trainer
    /// seed plus a population seed reproduces a whole run.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_evaluator(MatchEvaluator::new(), seed)
    }

    #[must_use]
    pub fn with_evaluator(evaluator: MatchEvaluator, seed: u64) -> Self {
        Self {
            evaluator,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Evaluates one generation in place.
    ///
    /// Usable directly as the evaluation callback of
    /// [`Population::evaluate`] and [`Population::run`].
    pub fn evaluate_generation(&mut self, genomes: &mut [Genome], config: &EvolutionConfig) {
        for i in 0..genomes.len() {
            if i + 1 < genomes.len() {
                genomes[i].reset_fitness();
            }
            let left = NetworkController::new(&genomes[i], config);
            for j in (i + 1)..genomes.len() {
                // Keep fitness carried over from earlier pairings, but make
                // sure the accumulator is initialized.
                genomes[j].add_fitness(0.0);
                let right = NetworkController::new(&genomes[j], config);

                let state = self.evaluator.play(&left, &right, self.rng.random());
                genomes[i].add_fitness(hit_fitness(state.left_hits));
                genomes[j].add_fitness(hit_fitness(state.right_hits));
            }
        }
    }

    /// Runs the full generational loop on a population and returns the
    /// champion genome.
    pub fn train(&mut self, population: &mut Population, generations: usize) -> Genome {
        population.run(generations, |genomes, config| {
            self.evaluate_generation(genomes, config);
        })
    }
}

#[expect(clippy::cast_precision_loss)]
fn hit_fitness(hits: u32) -> f32 {
    hits as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EvolutionConfig {
        EvolutionConfig {
            population_size: 4,
            num_hidden: 2,
            ..EvolutionConfig::default()
        }
    }

    fn genomes(config: &EvolutionConfig, seed: u64) -> Vec<Genome> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut key = 0;
        std::iter::repeat_with(|| {
            let genome = Genome::random(key, config, &mut rng);
            key += 1;
            genome
        })
        .take(config.population_size)
        .collect()
    }

    #[test]
    fn every_genome_is_evaluated() {
        let config = config();
        let mut genomes = genomes(&config, 1);
        let mut trainer = Trainer::new(10);

        trainer.evaluate_generation(&mut genomes, &config);

        assert!(genomes.iter().all(|g| g.fitness().is_some()));
        assert!(genomes.iter().all(|g| g.fitness().unwrap() >= 0.0));
    }

    #[test]
    fn same_seeds_reproduce_the_same_fitness() {
        let config = config();
        let original = genomes(&config, 2);

        let mut a = original.clone();
        Trainer::new(10).evaluate_generation(&mut a, &config);
        let mut b = original.clone();
        Trainer::new(10).evaluate_generation(&mut b, &config);

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.fitness(), y.fitness());
        }
    }

    #[test]
    fn left_turn_resets_but_trailing_genome_accumulates() {
        let config = config();
        let mut genomes = genomes(&config, 3);
        genomes.first_mut().unwrap().add_fitness(1000.0);
        genomes.last_mut().unwrap().add_fitness(1000.0);

        let mut trainer = Trainer::new(10);
        trainer.evaluate_generation(&mut genomes, &config);

        // The first genome's prior fitness is wiped when it takes the left
        // paddle; hit counts alone cannot reach it again here.
        assert!(genomes.first().unwrap().fitness().unwrap() < 1000.0);
        // The last genome never takes the left paddle, so it only ever
        // accumulates on top of what it already had.
        assert!(genomes.last().unwrap().fitness().unwrap() >= 1000.0);
    }

    #[test]
    fn pair_fitness_equals_the_match_hit_counts() {
        let config = EvolutionConfig {
            population_size: 2,
            num_hidden: 2,
            ..EvolutionConfig::default()
        };
        let mut genomes = genomes(&config, 4);

        let mut trainer = Trainer::new(10);
        trainer.evaluate_generation(&mut genomes, &config);

        // Replay the single pairing with the same launch seed and compare.
        let mut rng = Pcg32::seed_from_u64(10);
        let left = NetworkController::new(&genomes[0], &config);
        let right = NetworkController::new(&genomes[1], &config);
        let state = MatchEvaluator::new().play(&left, &right, rng.random());

        assert_eq!(genomes[0].fitness(), Some(hit_fitness(state.left_hits)));
        assert_eq!(genomes[1].fitness(), Some(hit_fitness(state.right_hits)));
    }

    #[test]
    fn train_runs_generations_and_returns_champion() {
        let config = config();
        let mut population = Population::new(config.clone(), 4).unwrap();
        let mut trainer = Trainer::new(11);

        let champion = trainer.train(&mut population, 3);

        assert_eq!(population.generation(), 2);
        assert!(champion.fitness().is_some());
        assert_eq!(champion.weights().len(), config.weight_count());
    }
}
