use serde::{Deserialize, Serialize};

/// Evolution parameters, loadable from a JSON file.
///
/// All fields have defaults, so a configuration file only needs to name the
/// values it overrides. Validation is this crate's responsibility: callers
/// should run [`EvolutionConfig::validate`] after loading and fail fast on
/// errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of genomes per generation.
    pub population_size: usize,
    /// Top genomes copied unchanged into the next generation, per species.
    pub elitism: usize,
    /// Tournament size for parent selection (larger = stronger pressure).
    pub tournament_size: usize,

    /// Network input count (observation components).
    pub num_inputs: usize,
    /// Hidden layer size (topology bound).
    pub num_hidden: usize,
    /// Network output count (discrete actions).
    pub num_outputs: usize,

    /// Weights are kept within `[-max_weight, max_weight]`.
    pub max_weight: f32,
    /// Probability of mutating each weight.
    pub mutation_rate: f32,
    /// Standard deviation of Gaussian mutation noise.
    pub mutation_sigma: f32,
    /// BLX-α crossover parameter (exploration beyond the parent range).
    pub blx_alpha: f32,

    /// Genomes closer than this (mean absolute weight difference) share a
    /// species.
    pub compatibility_threshold: f32,
    /// Generations without improvement before a species stops reproducing.
    pub max_stagnation: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            elitism: 2,
            tournament_size: 2,
            num_inputs: 3,
            num_hidden: 6,
            num_outputs: 3,
            max_weight: 8.0,
            mutation_rate: 0.3,
            mutation_sigma: 0.5,
            blx_alpha: 0.2,
            compatibility_threshold: 1.2,
            max_stagnation: 15,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population_size must be at least 2, got {size}")]
    PopulationTooSmall { size: usize },
    #[display("network layers must be non-empty ({inputs} inputs, {hidden} hidden, {outputs} outputs)")]
    EmptyNetworkLayer {
        inputs: usize,
        hidden: usize,
        outputs: usize,
    },
    #[display("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[display("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[display("tournament_size must be at least 1")]
    EmptyTournament,
}

impl EvolutionConfig {
    /// Checks the configuration for values evolution cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if self.num_inputs == 0 || self.num_hidden == 0 || self.num_outputs == 0 {
            return Err(ConfigError::EmptyNetworkLayer {
                inputs: self.num_inputs,
                hidden: self.num_hidden,
                outputs: self.num_outputs,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::RateOutOfRange {
                name: "mutation_rate",
                value: self.mutation_rate,
            });
        }
        for (name, value) in [
            ("max_weight", self.max_weight),
            ("mutation_sigma", self.mutation_sigma),
            ("compatibility_threshold", self.compatibility_threshold),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.blx_alpha < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "blx_alpha",
                value: self.blx_alpha,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        Ok(())
    }

    /// Length of a genome's weight vector for this topology.
    ///
    /// Layout: input-to-hidden weights, hidden biases, hidden-to-output
    /// weights, output biases.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.num_inputs * self.num_hidden
            + self.num_hidden
            + self.num_hidden * self.num_outputs
            + self.num_outputs
    }
}
