use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
    ball::{Ball, LaunchSeed},
    controller::{Action, Observation},
    paddle::Paddle,
};

/// Which paddle a command or observation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Side {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

/// Cumulative per-match counters.
///
/// Hit and score counters are monotonically non-decreasing within a match
/// and only return to zero through [`PongMatch::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub left_hits: u32,
    pub right_hits: u32,
    pub left_score: u32,
    pub right_score: u32,
}

/// The single authoritative source of game state for one match.
///
/// Owns the ball and both paddles and advances the simulation by exactly one
/// tick per [`PongMatch::tick`] call. Paddle positions can only be mutated
/// during play through [`PongMatch::move_paddle`], which enforces the court
/// bounds.
#[derive(Debug, Clone)]
pub struct PongMatch {
    width: f32,
    height: f32,
    ball: Ball,
    left_paddle: Paddle,
    right_paddle: Paddle,
    state: MatchState,
}

impl Default for PongMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl PongMatch {
    pub const COURT_WIDTH: f32 = 700.0;
    pub const COURT_HEIGHT: f32 = 500.0;
    /// Horizontal gap between each paddle and its wall.
    const PADDLE_MARGIN: f32 = 10.0;

    /// Creates a match with a random launch seed.
    ///
    /// For deterministic matches, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic
    /// ball launches.
    #[must_use]
    pub fn with_seed(seed: LaunchSeed) -> Self {
        let width = Self::COURT_WIDTH;
        let height = Self::COURT_HEIGHT;
        let paddle_y = height / 2.0 - Paddle::HEIGHT / 2.0;
        Self {
            width,
            height,
            ball: Ball::new(width / 2.0, height / 2.0, seed),
            left_paddle: Paddle::new(Self::PADDLE_MARGIN, paddle_y),
            right_paddle: Paddle::new(width - Self::PADDLE_MARGIN - Paddle::WIDTH, paddle_y),
            state: MatchState::default(),
        }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    #[must_use]
    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    #[must_use]
    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Builds the observation a controller on `side` sees before a tick.
    #[must_use]
    pub fn observe(&self, side: Side) -> Observation {
        let paddle = self.paddle(side);
        Observation {
            paddle_y: paddle.y(),
            ball_y: self.ball.y(),
            ball_distance: (paddle.x() - self.ball.x()).abs(),
        }
    }

    /// Requests a paddle move, validating it against the court bounds.
    ///
    /// The move is rejected (and `false` returned) if it would put any part
    /// of the paddle outside `[0, height]`. A rejected move is a normal
    /// boundary signal, not an error.
    pub fn move_paddle(&mut self, side: Side, up: bool) -> bool {
        let paddle = match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        };
        if up && paddle.y() - Paddle::SPEED < 0.0 {
            return false;
        }
        if !up && paddle.y() + Paddle::SPEED + Paddle::HEIGHT > self.height {
            return false;
        }
        paddle.shift(up);
        true
    }

    /// Applies a controller decision to the given side.
    ///
    /// [`Action::Hold`] always succeeds; move actions are subject to the
    /// same bounds check as [`Self::move_paddle`].
    pub fn apply_action(&mut self, side: Side, action: Action) -> bool {
        match action {
            Action::Hold => true,
            Action::MoveUp => self.move_paddle(side, true),
            Action::MoveDown => self.move_paddle(side, false),
        }
    }

    /// Advances the simulation by exactly one tick.
    ///
    /// Moves the ball one step, resolves wall and paddle collisions, detects
    /// scoring (ball fully past a side wall increments the opposing score
    /// and resets the ball to center), and returns the cumulative counters.
    pub fn tick(&mut self) -> MatchState {
        self.ball.advance();
        self.handle_ball_collision();

        if self.ball.x() + Ball::RADIUS < 0.0 {
            self.ball.reset_position();
            self.state.right_score += 1;
        } else if self.ball.x() - Ball::RADIUS > self.width {
            self.ball.reset_position();
            self.state.left_score += 1;
        }

        self.state
    }

    /// Resets the entire match: counters to zero, ball and paddles to their
    /// start state.
    pub fn reset(&mut self) {
        self.ball.reset_position();
        self.left_paddle.reset();
        self.right_paddle.reset();
        self.state = MatchState::default();
    }

    fn handle_ball_collision(&mut self) {
        let ball = &mut self.ball;

        if ball.y + Ball::RADIUS >= self.height || ball.y - Ball::RADIUS <= 0.0 {
            ball.velocity_y = -ball.velocity_y;
        }

        // The ball is only tested against the paddle it is travelling
        // toward; inverting the velocity inside the branch guarantees the
        // same collision is not re-detected within this tick.
        if ball.velocity_x < 0.0 {
            let paddle = &self.left_paddle;
            if ball.y >= paddle.y()
                && ball.y <= paddle.y() + Paddle::HEIGHT
                && ball.x - Ball::RADIUS <= paddle.x() + Paddle::WIDTH
            {
                ball.velocity_x = -ball.velocity_x;
                ball.velocity_y = deflection_velocity(ball.y, paddle.center_y());
                self.state.left_hits += 1;
            }
        } else {
            let paddle = &self.right_paddle;
            if ball.y >= paddle.y()
                && ball.y <= paddle.y() + Paddle::HEIGHT
                && ball.x + Ball::RADIUS >= paddle.x()
            {
                ball.velocity_x = -ball.velocity_x;
                ball.velocity_y = deflection_velocity(ball.y, paddle.center_y());
                self.state.right_hits += 1;
            }
        }
    }
}

/// Vertical velocity after a paddle hit.
///
/// Linear in the offset between the ball and the paddle center, normalized
/// so a hit at the paddle edge leaves at [`Ball::MAX_SPEED`] vertically.
fn deflection_velocity(ball_y: f32, paddle_center_y: f32) -> f32 {
    let offset = paddle_center_y - ball_y;
    let reduction_factor = (Paddle::HEIGHT / 2.0) / Ball::MAX_SPEED;
    -(offset / reduction_factor)
}
