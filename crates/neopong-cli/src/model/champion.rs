use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use neopong_neat::{EvolutionConfig, Genome};
use serde::{Deserialize, Serialize};

use crate::util;

/// Persisted training result: the best genome of a run plus everything
/// needed to replay it.
///
/// The evolution configuration is embedded so the network topology can be
/// rebuilt without the original config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Champion {
    pub trained_at: DateTime<Utc>,
    pub generations: usize,
    pub fitness: f32,
    pub config: EvolutionConfig,
    pub weights: Vec<f32>,
}

impl Champion {
    pub fn from_genome(genome: &Genome, config: &EvolutionConfig, generations: usize) -> Self {
        Self {
            trained_at: Utc::now(),
            generations,
            fitness: genome.fitness().unwrap_or(0.0),
            config: config.clone(),
            weights: genome.weights().to_vec(),
        }
    }

    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let champion: Self = util::read_json_file("champion", path)?;
        champion
            .validate()
            .with_context(|| format!("Invalid champion file: {}", path.display()))?;
        Ok(champion)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.config.validate()?;
        anyhow::ensure!(
            self.weights.len() == self.config.weight_count(),
            "weight vector has {} entries, topology expects {}",
            self.weights.len(),
            self.config.weight_count(),
        );
        Ok(())
    }

    pub fn to_genome(&self) -> Genome {
        Genome::from_weights(0, self.weights.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn champion() -> Champion {
        let config = EvolutionConfig::default();
        let weights = vec![0.5; config.weight_count()];
        Champion {
            trained_at: Utc::now(),
            generations: 50,
            fitness: 42.0,
            config,
            weights,
        }
    }

    #[test]
    fn valid_champion_round_trips_through_json() {
        let champion = champion();
        let json = serde_json::to_string(&champion).unwrap();
        let back: Champion = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
        assert_eq!(back.weights, champion.weights);
        assert_eq!(back.generations, champion.generations);
    }

    #[test]
    fn validate_rejects_weight_topology_mismatch() {
        let mut champion = champion();
        champion.weights.pop();
        assert!(champion.validate().is_err());
    }

    #[test]
    fn to_genome_carries_the_weights() {
        let champion = champion();
        let genome = champion.to_genome();
        assert_eq!(genome.weights(), champion.weights.as_slice());
        assert_eq!(genome.fitness(), None);
    }
}
