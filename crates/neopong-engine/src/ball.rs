use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Launch angles (in whole degrees) that are never selected.
///
/// A perfectly horizontal launch produces a rally the paddles can hold
/// forever, so zero degrees is excluded by default.
const EXCLUDED_LAUNCH_DEGREES: [i32; 1] = [0];

/// Upper bound on rejection-sampling attempts when picking a launch angle.
///
/// If the excluded set ever covers the whole angle range, sampling falls back
/// to the smallest angle outside the excluded set instead of looping forever.
const MAX_LAUNCH_RETRIES: usize = 32;

/// Seed for deterministic ball launches.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator that picks launch angles and directions. Using the same seed
/// produces the same launch sequence, enabling:
///
/// - Reproducible matches for debugging
/// - Deterministic testing
/// - Repeatable training runs
#[derive(Debug, Clone, Copy)]
pub struct LaunchSeed(pub(crate) [u8; 16]);

impl From<[u8; 16]> for LaunchSeed {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl Serialize for LaunchSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for LaunchSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `LaunchSeed` values with `rng.random()`.
impl Distribution<LaunchSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> LaunchSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        LaunchSeed(seed)
    }
}

/// The match ball.
///
/// Position and velocity are mutated every tick by motion and collision
/// rules; the ball is repositioned (never destroyed) when a side scores.
/// The speed magnitude never exceeds [`Ball::MAX_SPEED`] except transiently
/// through [`Ball::reset_position`].
#[derive(Debug, Clone)]
pub struct Ball {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) velocity_x: f32,
    pub(crate) velocity_y: f32,
    start_x: f32,
    start_y: f32,
    rng: Pcg32,
}

impl Ball {
    /// Maximum speed along either axis, and the free-flight speed magnitude.
    pub const MAX_SPEED: f32 = 5.0;
    /// Ball radius in court units.
    pub const RADIUS: f32 = 7.0;

    /// Creates a ball at the given start position and launches it.
    #[must_use]
    pub fn new(x: f32, y: f32, seed: LaunchSeed) -> Self {
        let mut ball = Self {
            x,
            y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            start_x: x,
            start_y: y,
            rng: Pcg32::from_seed(seed.0),
        };
        ball.launch();
        ball
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn velocity_x(&self) -> f32 {
        self.velocity_x
    }

    #[must_use]
    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    /// Launches the ball in a random direction.
    ///
    /// Picks a random angle in [-30, 30) degrees (excluding the default
    /// excluded set) and a random left/right direction, then sets the
    /// velocity components via cos/sin scaled to [`Ball::MAX_SPEED`].
    pub fn launch(&mut self) {
        self.launch_with_excluded(&EXCLUDED_LAUNCH_DEGREES);
    }

    /// Like [`Ball::launch`], but with an explicit excluded angle set.
    pub fn launch_with_excluded(&mut self, excluded_degrees: &[i32]) {
        let angle = self.random_launch_angle(excluded_degrees);
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.velocity_x = direction * (angle.cos() * Self::MAX_SPEED).abs();
        self.velocity_y = angle.sin() * Self::MAX_SPEED;
    }

    /// Advances the ball by one tick (Euler integration, unit timestep).
    pub fn advance(&mut self) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
    }

    /// Returns the ball to its start position after a score.
    ///
    /// The launch angle is rerolled, but only its vertical component is
    /// applied; the horizontal velocity keeps its pre-reset magnitude with
    /// the sign flipped, so the ball always travels back toward the side
    /// that just scored. This asymmetry is intentional and covered by tests.
    pub fn reset_position(&mut self) {
        self.x = self.start_x;
        self.y = self.start_y;

        let angle = self.random_launch_angle(&EXCLUDED_LAUNCH_DEGREES);
        self.velocity_y = angle.sin() * Self::MAX_SPEED;
        self.velocity_x = -self.velocity_x;
    }

    /// Samples a launch angle in radians, rejecting excluded degrees.
    ///
    /// Sampling is bounded by [`MAX_LAUNCH_RETRIES`]; on exhaustion the
    /// smallest non-excluded angle in range is used, or zero if the whole
    /// range is excluded.
    fn random_launch_angle(&mut self, excluded_degrees: &[i32]) -> f32 {
        const MIN_DEGREES: i32 = -30;
        const MAX_DEGREES: i32 = 30;

        for _ in 0..MAX_LAUNCH_RETRIES {
            let degrees = self.rng.random_range(MIN_DEGREES..MAX_DEGREES);
            if !excluded_degrees.contains(&degrees) {
                return degrees_to_radians(degrees);
            }
        }

        let fallback = (MIN_DEGREES..MAX_DEGREES)
            .find(|d| !excluded_degrees.contains(d))
            .unwrap_or(0);
        degrees_to_radians(fallback)
    }
}

#[expect(clippy::cast_precision_loss)]
fn degrees_to_radians(degrees: i32) -> f32 {
    (degrees as f32).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_seed(fill: u8) -> LaunchSeed {
        LaunchSeed([fill; 16])
    }

    fn speed(ball: &Ball) -> f32 {
        ball.velocity_x.hypot(ball.velocity_y)
    }

    #[test]
    fn launch_speed_is_max_speed() {
        for fill in 0..32 {
            let ball = Ball::new(350.0, 250.0, test_seed(fill));
            assert!((speed(&ball) - Ball::MAX_SPEED).abs() < 1e-4);
        }
    }

    #[test]
    fn launch_never_picks_excluded_angle() {
        let mut ball = Ball::new(350.0, 250.0, test_seed(7));
        for _ in 0..200 {
            ball.launch();
            // A zero-degree launch would make velocity_y exactly zero.
            assert!(ball.velocity_y != 0.0);
        }
    }

    #[test]
    fn launch_with_fully_excluded_range_terminates() {
        let excluded: Vec<i32> = (-30..30).collect();
        let mut ball = Ball::new(350.0, 250.0, test_seed(3));
        ball.launch_with_excluded(&excluded);
        // Fallback angle is zero; the launch is horizontal but bounded.
        assert!((ball.velocity_x.abs() - Ball::MAX_SPEED).abs() < 1e-4);
        assert!((ball.velocity_y).abs() < 1e-4);
    }

    #[test]
    fn advance_applies_velocity_once() {
        let mut ball = Ball::new(350.0, 250.0, test_seed(1));
        let (x, y) = (ball.x(), ball.y());
        let (vx, vy) = (ball.velocity_x(), ball.velocity_y());
        ball.advance();
        assert!((ball.x() - (x + vx)).abs() < 1e-6);
        assert!((ball.y() - (y + vy)).abs() < 1e-6);
    }

    #[test]
    fn free_flight_preserves_speed() {
        let mut ball = Ball::new(350.0, 250.0, test_seed(9));
        let before = speed(&ball);
        for _ in 0..100 {
            ball.advance();
        }
        assert!((speed(&ball) - before).abs() < 1e-4);
    }

    #[test]
    fn reset_returns_to_start_and_flips_horizontal_sign() {
        let mut ball = Ball::new(350.0, 250.0, test_seed(5));
        let vx_before = ball.velocity_x();
        for _ in 0..10 {
            ball.advance();
        }
        ball.reset_position();
        assert!((ball.x() - 350.0).abs() < 1e-6);
        assert!((ball.y() - 250.0).abs() < 1e-6);
        // Horizontal magnitude is reused, only the sign flips.
        assert!((ball.velocity_x() + vx_before).abs() < 1e-6);
    }

    #[test]
    fn same_seed_produces_same_launch() {
        let a = Ball::new(350.0, 250.0, test_seed(42));
        let b = Ball::new(350.0, 250.0, test_seed(42));
        assert_eq!(a.velocity_x(), b.velocity_x());
        assert_eq!(a.velocity_y(), b.velocity_y());
    }

    mod launch_seed_serialization {
        use super::*;

        #[test]
        fn serializes_to_hex_string() {
            let seed = LaunchSeed([0xab; 16]);
            let json = serde_json::to_string(&seed).unwrap();
            assert_eq!(json, format!("\"{}\"", "ab".repeat(16)));
        }

        #[test]
        fn round_trips_through_json() {
            let seed = LaunchSeed([
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
            ]);
            let json = serde_json::to_string(&seed).unwrap();
            let back: LaunchSeed = serde_json::from_str(&json).unwrap();
            assert_eq!(back.0, seed.0);
        }

        #[test]
        fn rejects_wrong_length() {
            let result: Result<LaunchSeed, _> = serde_json::from_str("\"abcd\"");
            assert!(result.is_err());
        }
    }
}
