use std::iter;

use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use crate::{
    config::{ConfigError, EvolutionConfig},
    genome::Genome,
    stats::DescriptiveStats,
    weights,
};

/// A group of genomes within compatibility distance of a shared
/// representative.
///
/// Species persist across generations so stagnation can be tracked: a
/// species whose best fitness has not improved within the configured window
/// stops reproducing.
#[derive(Debug, Clone)]
struct Species {
    representative: Vec<f32>,
    members: Vec<usize>,
    best_fitness: f32,
    last_improvement: usize,
}

/// A population of genomes evolved across generations.
///
/// The population owns the generation's genome list; callers evaluate it by
/// mutating each genome's fitness accumulator inside the evaluation
/// callback, then [`Population::evolve`] produces the next generation.
#[derive(Debug, Clone)]
pub struct Population {
    config: EvolutionConfig,
    genomes: Vec<Genome>,
    species: Vec<Species>,
    generation: usize,
    next_key: u64,
    champion: Option<Genome>,
    rng: Pcg32,
}

impl Population {
    /// Creates a population of random genomes.
    ///
    /// The configuration is validated first; evolution never runs with a
    /// malformed configuration.
    pub fn new(config: EvolutionConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut next_key = 0;
        let genomes: Vec<Genome> = iter::repeat_with(|| {
            let genome = Genome::random(next_key, &config, &mut rng);
            next_key += 1;
            genome
        })
        .take(config.population_size)
        .collect();

        Ok(Self {
            config,
            genomes,
            species: Vec::new(),
            generation: 0,
            next_key,
            champion: None,
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    #[must_use]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Zero-based index of the current generation.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Number of species after the most recent evaluation.
    #[must_use]
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Best genome seen across all evaluations so far.
    #[must_use]
    pub fn champion(&self) -> Option<&Genome> {
        self.champion.as_ref()
    }

    /// Fitness statistics for the current generation.
    #[must_use]
    pub fn fitness_stats(&self) -> DescriptiveStats {
        DescriptiveStats::new(self.genomes.iter().map(Genome::selection_fitness))
            .expect("population is never empty")
    }

    /// Evaluates the current generation.
    ///
    /// Runs the caller's evaluation function over the genome list (the
    /// function must assign fitness as a side effect), then updates the
    /// champion and regroups genomes into species.
    pub fn evaluate<F>(&mut self, mut eval_fn: F)
    where
        F: FnMut(&mut [Genome], &EvolutionConfig),
    {
        eval_fn(&mut self.genomes, &self.config);
        self.update_champion();
        self.speciate();
    }

    /// Produces the next generation from the evaluated current one.
    ///
    /// Stagnant species are excluded from reproduction (the best species is
    /// always kept), offspring slots are allocated by species mean fitness,
    /// per-species elites are copied unchanged, and the remaining slots are
    /// filled by tournament selection, crossover, and mutation.
    pub fn evolve(&mut self) {
        assert!(
            !self.species.is_empty(),
            "evolve requires an evaluated generation"
        );
        let reproducing = self.reproducing_species();
        let counts = self.allocate_offspring(&reproducing);

        let mut next = Vec::with_capacity(self.config.population_size);
        for (&si, &count) in iter::zip(&reproducing, &counts) {
            if count == 0 {
                continue;
            }
            let mut ranked = self.species[si].members.clone();
            ranked.sort_by(|&a, &b| {
                self.genomes[b]
                    .selection_fitness()
                    .partial_cmp(&self.genomes[a].selection_fitness())
                    .unwrap()
            });

            let elite_count = self.config.elitism.min(count).min(ranked.len());
            let mut produced = 0;
            for &gi in &ranked[..elite_count] {
                next.push(self.genomes[gi].clone());
                produced += 1;
            }
            while produced < count {
                let p1 = tournament_select(
                    &self.genomes,
                    &ranked,
                    self.config.tournament_size,
                    &mut self.rng,
                );
                let p2 = tournament_select(
                    &self.genomes,
                    &ranked,
                    self.config.tournament_size,
                    &mut self.rng,
                );
                let child = Genome::crossover(self.next_key, p1, p2, &self.config, &mut self.rng);
                self.next_key += 1;
                next.push(child);
                produced += 1;
            }
        }

        self.genomes = next;
        self.generation += 1;
    }

    /// Runs the full generational loop and returns the champion.
    ///
    /// The last generation is evaluated but not evolved, so the returned
    /// champion reflects every evaluation.
    pub fn run<F>(&mut self, generations: usize, mut eval_fn: F) -> Genome
    where
        F: FnMut(&mut [Genome], &EvolutionConfig),
    {
        for g in 0..generations {
            self.evaluate(&mut eval_fn);
            if g + 1 < generations {
                self.evolve();
            }
        }
        self.champion
            .clone()
            .expect("at least one generation was evaluated")
    }

    fn update_champion(&mut self) {
        let best = self
            .genomes
            .iter()
            .max_by(|a, b| {
                a.selection_fitness()
                    .partial_cmp(&b.selection_fitness())
                    .unwrap()
            })
            .expect("population is never empty");
        let improved = self
            .champion
            .as_ref()
            .is_none_or(|c| best.selection_fitness() > c.selection_fitness());
        if improved {
            self.champion = Some(best.clone());
        }
    }

    /// Regroups the current genomes into species by compatibility distance.
    fn speciate(&mut self) {
        for species in &mut self.species {
            species.members.clear();
        }

        for (i, genome) in self.genomes.iter().enumerate() {
            let matching = self.species.iter_mut().find(|s| {
                weights::mean_abs_distance(&s.representative, genome.weights())
                    < self.config.compatibility_threshold
            });
            match matching {
                Some(species) => species.members.push(i),
                None => self.species.push(Species {
                    representative: genome.weights().to_vec(),
                    members: vec![i],
                    best_fitness: f32::MIN,
                    last_improvement: self.generation,
                }),
            }
        }
        self.species.retain(|s| !s.members.is_empty());

        for species in &mut self.species {
            let best = species
                .members
                .iter()
                .map(|&i| self.genomes[i].selection_fitness())
                .fold(f32::MIN, f32::max);
            if best > species.best_fitness {
                species.best_fitness = best;
                species.last_improvement = self.generation;
            }
            species.representative = self.genomes[species.members[0]].weights().to_vec();
        }
    }

    /// Species allowed to reproduce this generation.
    ///
    /// Stagnant species are dropped; if every species is stagnant, the one
    /// with the highest recorded fitness survives so the population never
    /// dies out.
    fn reproducing_species(&self) -> Vec<usize> {
        let alive: Vec<usize> = (0..self.species.len())
            .filter(|&i| {
                self.generation - self.species[i].last_improvement <= self.config.max_stagnation
            })
            .collect();
        if !alive.is_empty() {
            return alive;
        }

        let best = (0..self.species.len())
            .max_by(|&a, &b| {
                self.species[a]
                    .best_fitness
                    .partial_cmp(&self.species[b].best_fitness)
                    .unwrap()
            })
            .expect("speciation leaves no empty species list");
        vec![best]
    }

    /// Allocates offspring slots across species, proportional to each
    /// species' mean fitness (largest-remainder rounding). Negative means
    /// count as zero so they cannot inflate other species' shares; an even
    /// split is used when total fitness is zero.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn allocate_offspring(&self, species_indices: &[usize]) -> Vec<usize> {
        let population_size = self.config.population_size;
        let means: Vec<f32> = species_indices
            .iter()
            .map(|&i| {
                let species = &self.species[i];
                let total: f32 = species
                    .members
                    .iter()
                    .map(|&g| self.genomes[g].selection_fitness())
                    .sum();
                (total / species.members.len() as f32).max(0.0)
            })
            .collect();
        let total: f32 = means.iter().sum();

        if total <= 0.0 {
            let n = species_indices.len();
            let mut counts = vec![population_size / n; n];
            for count in counts.iter_mut().take(population_size % n) {
                *count += 1;
            }
            return counts;
        }

        let shares: Vec<f32> = means
            .iter()
            .map(|m| m / total * population_size as f32)
            .collect();
        let mut counts: Vec<usize> = shares.iter().map(|s| s.floor() as usize).collect();
        let mut assigned: usize = counts.iter().sum();

        let mut order: Vec<usize> = (0..counts.len()).collect();
        order.sort_by(|&a, &b| {
            (shares[b] - shares[b].floor())
                .partial_cmp(&(shares[a] - shares[a].floor()))
                .unwrap()
        });
        let mut cursor = 0;
        while assigned < population_size {
            counts[order[cursor % order.len()]] += 1;
            assigned += 1;
            cursor += 1;
        }
        counts
    }
}

/// Selects a parent by tournament among a species' members.
fn tournament_select<'a, R>(
    genomes: &'a [Genome],
    members: &[usize],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Genome
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    members
        .choose_multiple(rng, tournament_size)
        .map(|&i| &genomes[i])
        .max_by(|a, b| {
            a.selection_fitness()
                .partial_cmp(&b.selection_fitness())
                .unwrap()
        })
        .unwrap()
}
