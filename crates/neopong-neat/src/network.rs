use crate::{config::EvolutionConfig, genome::Genome};

/// A feed-forward network compiled from a genome.
///
/// One hidden layer with tanh activation, linear outputs. The weight vector
/// layout is fixed by [`EvolutionConfig::weight_count`]: input-to-hidden
/// weights (input-major), hidden biases, hidden-to-output weights
/// (hidden-major), output biases.
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    num_inputs: usize,
    num_hidden: usize,
    num_outputs: usize,
    weights: Vec<f32>,
}

impl FeedForwardNetwork {
    /// Compiles a genome into an activatable network.
    ///
    /// # Panics
    ///
    /// Panics if the genome's weight vector does not match the configured
    /// topology.
    #[must_use]
    pub fn from_genome(genome: &Genome, config: &EvolutionConfig) -> Self {
        assert_eq!(
            genome.weights().len(),
            config.weight_count(),
            "genome weight vector does not match network topology"
        );
        Self {
            num_inputs: config.num_inputs,
            num_hidden: config.num_hidden,
            num_outputs: config.num_outputs,
            weights: genome.weights().to_vec(),
        }
    }

    /// Feeds an observation through the network.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not match the configured input count.
    #[must_use]
    pub fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        assert_eq!(inputs.len(), self.num_inputs);

        let (input_hidden, rest) = self.weights.split_at(self.num_inputs * self.num_hidden);
        let (hidden_bias, rest) = rest.split_at(self.num_hidden);
        let (hidden_output, output_bias) = rest.split_at(self.num_hidden * self.num_outputs);

        let mut hidden = Vec::with_capacity(self.num_hidden);
        for h in 0..self.num_hidden {
            let mut sum = hidden_bias[h];
            for (i, input) in inputs.iter().enumerate() {
                sum += input * input_hidden[i * self.num_hidden + h];
            }
            hidden.push(sum.tanh());
        }

        let mut outputs = Vec::with_capacity(self.num_outputs);
        for o in 0..self.num_outputs {
            let mut sum = output_bias[o];
            for (h, activation) in hidden.iter().enumerate() {
                sum += activation * hidden_output[h * self.num_outputs + o];
            }
            outputs.push(sum);
        }
        outputs
    }

    /// Index of the strongest output activation.
    ///
    /// Ties resolve to the earliest index, which maps to the "hold" action
    /// for controller use.
    #[must_use]
    pub fn activate_argmax(&self, inputs: &[f32]) -> usize {
        let outputs = self.activate(inputs);
        let mut best = 0;
        for (i, value) in outputs.iter().enumerate() {
            if *value > outputs[best] {
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> EvolutionConfig {
        EvolutionConfig {
            num_inputs: 2,
            num_hidden: 2,
            num_outputs: 2,
            ..EvolutionConfig::default()
        }
    }

    #[test]
    fn zero_weights_produce_zero_outputs() {
        let config = tiny_config();
        let genome = Genome::from_weights(1, vec![0.0; config.weight_count()]);
        let network = FeedForwardNetwork::from_genome(&genome, &config);
        let outputs = network.activate(&[1.0, -1.0]);
        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|o| o.abs() < 1e-6));
    }

    #[test]
    fn output_bias_passes_through() {
        let config = tiny_config();
        // Everything zero except the two output biases at the tail.
        let mut weights = vec![0.0; config.weight_count()];
        let len = weights.len();
        weights[len - 2] = 0.25;
        weights[len - 1] = -0.75;
        let genome = Genome::from_weights(1, weights);
        let network = FeedForwardNetwork::from_genome(&genome, &config);

        let outputs = network.activate(&[3.0, 4.0]);
        assert!((outputs[0] - 0.25).abs() < 1e-6);
        assert!((outputs[1] + 0.75).abs() < 1e-6);
    }

    #[test]
    fn single_path_computes_tanh_chain() {
        // 1 input, 1 hidden, 1 output: weight layout is
        // [input->hidden, hidden bias, hidden->output, output bias].
        let config = EvolutionConfig {
            num_inputs: 1,
            num_hidden: 1,
            num_outputs: 1,
            ..EvolutionConfig::default()
        };
        let genome = Genome::from_weights(1, vec![2.0, 0.5, 3.0, -1.0]);
        let network = FeedForwardNetwork::from_genome(&genome, &config);

        let input = 0.75_f32;
        let expected = (input * 2.0 + 0.5).tanh() * 3.0 - 1.0;
        let outputs = network.activate(&[input]);
        assert!((outputs[0] - expected).abs() < 1e-5);
    }

    #[test]
    fn argmax_selects_strongest_output() {
        let config = tiny_config();
        let mut weights = vec![0.0; config.weight_count()];
        let len = weights.len();
        weights[len - 1] = 1.0;
        let genome = Genome::from_weights(1, weights);
        let network = FeedForwardNetwork::from_genome(&genome, &config);
        assert_eq!(network.activate_argmax(&[0.0, 0.0]), 1);
    }

    #[test]
    fn argmax_breaks_ties_toward_first_output() {
        let config = tiny_config();
        let genome = Genome::from_weights(1, vec![0.0; config.weight_count()]);
        let network = FeedForwardNetwork::from_genome(&genome, &config);
        assert_eq!(network.activate_argmax(&[1.0, 1.0]), 0);
    }

    #[test]
    #[should_panic(expected = "genome weight vector does not match network topology")]
    fn topology_mismatch_panics() {
        let config = tiny_config();
        let genome = Genome::from_weights(1, vec![0.0; 3]);
        let _ = FeedForwardNetwork::from_genome(&genome, &config);
    }
}
