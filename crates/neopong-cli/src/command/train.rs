use std::path::PathBuf;

use anyhow::Context as _;
use neopong_neat::{EvolutionConfig, Population};
use neopong_training::Trainer;
use rand::Rng as _;

use crate::{
    model::champion::Champion,
    util::{self, Output},
};

const DEFAULT_GENERATIONS: usize = 50;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Evolution configuration file (JSON); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of generations to evolve
    #[arg(long, default_value_t = DEFAULT_GENERATIONS)]
    generations: usize,
    /// Seed for population initialization and training matches
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        config,
        generations,
        seed,
        output,
    } = arg;

    let config: EvolutionConfig = match config {
        Some(path) => util::read_json_file("evolution config", path)?,
        None => EvolutionConfig::default(),
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let mut population = Population::new(config.clone(), seed)?;
    let mut trainer = Trainer::new(seed);
    eprintln!("Seed: {seed}");

    for generation in 0..*generations {
        eprintln!("Generation #{generation}:");
        population.evaluate(|genomes, config| trainer.evaluate_generation(genomes, config));

        let fitness_stats = population.fitness_stats();
        eprintln!("  Species: {}", population.species_count());
        eprintln!("  Fitness Stats:");
        eprintln!("    Min:  {:.3}", fitness_stats.min);
        eprintln!("    Max:  {:.3}", fitness_stats.max);
        eprintln!("    Mean: {:.3}", fitness_stats.mean);
        eprintln!("    Std:  {:.3}", fitness_stats.std_dev);

        if generation + 1 < *generations {
            population.evolve();
        }
    }

    let champion = population
        .champion()
        .context("Training produced no champion (ran zero generations)")?;
    eprintln!();
    eprintln!("Training completed.");

    let model = Champion::from_genome(champion, &config, *generations);
    Output::save_json(&model, output.clone())?;

    eprintln!();
    eprintln!("Champion saved successfully");
    if let Some(path) = output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Fitness: {:.3}", model.fitness);
    eprintln!("  Weights: {} genes", model.weights.len());

    Ok(())
}
