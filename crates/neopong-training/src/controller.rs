use neopong_engine::{Action, Controller, Observation};
use neopong_neat::{EvolutionConfig, FeedForwardNetwork, Genome};

/// A paddle controller driven by a feed-forward network.
///
/// The observation is fed to the network as `[paddle_y, ball_y,
/// ball_distance]` and the strongest of the three outputs picks the action:
/// output 0 holds, output 1 moves up, output 2 moves down.
#[derive(Debug, Clone)]
pub struct NetworkController {
    network: FeedForwardNetwork,
}

impl NetworkController {
    /// Compiles a genome into a controller.
    ///
    /// # Panics
    ///
    /// Panics if the genome does not match the configured topology.
    #[must_use]
    pub fn new(genome: &Genome, config: &EvolutionConfig) -> Self {
        Self {
            network: FeedForwardNetwork::from_genome(genome, config),
        }
    }
}

impl Controller for NetworkController {
    fn decide(&self, observation: &Observation) -> Action {
        let inputs = [
            observation.paddle_y,
            observation.ball_y,
            observation.ball_distance,
        ];
        match self.network.activate_argmax(&inputs) {
            1 => Action::MoveUp,
            2 => Action::MoveDown,
            _ => Action::Hold,
        }
    }
}
