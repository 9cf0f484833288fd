/// The three discrete moves a controller can request each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the paddle where it is.
    Hold,
    MoveUp,
    MoveDown,
}

/// What a controller sees of the match before deciding its move.
///
/// Built from pre-tick state by
/// [`PongMatch::observe`](crate::PongMatch::observe): the controller's own
/// paddle height, the ball height, and the horizontal distance between the
/// two. Both paddles receive the same shape of observation, so a single
/// controller can play either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Top edge of the controller's own paddle.
    pub paddle_y: f32,
    pub ball_y: f32,
    /// Horizontal distance between the paddle face and the ball.
    pub ball_distance: f32,
}

/// A stateless per-tick decision function.
///
/// Variants are human input (keys polled by the frontend) and
/// neural-network controllers; the simulator only ever sees the resulting
/// [`Action`].
pub trait Controller {
    fn decide(&self, observation: &Observation) -> Action;
}
