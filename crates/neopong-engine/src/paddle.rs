/// A player paddle.
///
/// Paddles only move vertically. [`Paddle::shift`] does not clamp; the match
/// simulator validates every move against the court bounds before applying
/// it (see [`PongMatch::move_paddle`](crate::PongMatch::move_paddle)).
#[derive(Debug, Clone)]
pub struct Paddle {
    x: f32,
    y: f32,
    start_x: f32,
    start_y: f32,
}

impl Paddle {
    /// Vertical distance moved per accepted move command.
    pub const SPEED: f32 = 4.0;
    pub const WIDTH: f32 = 20.0;
    pub const HEIGHT: f32 = 100.0;

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            start_x: x,
            start_y: y,
        }
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Vertical center of the paddle face.
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y + Self::HEIGHT / 2.0
    }

    /// Shifts the paddle by one speed step, up or down.
    pub fn shift(&mut self, up: bool) {
        if up {
            self.y -= Self::SPEED;
        } else {
            self.y += Self::SPEED;
        }
    }

    /// Returns the paddle to its start position.
    pub fn reset(&mut self) {
        self.x = self.start_x;
        self.y = self.start_y;
    }
}
