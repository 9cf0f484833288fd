use neopong_engine::{Controller, LaunchSeed, MatchState, PongMatch, Side};

/// Plays single headless matches between two controllers.
///
/// Each tick both controllers are queried on the pre-tick state, their
/// actions are applied, and the simulation advances once. The match ends as
/// soon as either side scores `score_limit` points or the left paddle's hit
/// count exceeds `rally_cap`; the hit cap bounds match length when two
/// controllers sustain a rally indefinitely.
#[derive(Debug, Clone, Copy)]
pub struct MatchEvaluator {
    score_limit: u32,
    rally_cap: u32,
}

impl Default for MatchEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEvaluator {
    pub const SCORE_LIMIT: u32 = 1;
    pub const RALLY_CAP: u32 = 50;

    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(Self::SCORE_LIMIT, Self::RALLY_CAP)
    }

    #[must_use]
    pub fn with_limits(score_limit: u32, rally_cap: u32) -> Self {
        Self {
            score_limit,
            rally_cap,
        }
    }

    /// Runs one match to completion and returns the final counters.
    pub fn play<L, R>(&self, left: &L, right: &R, seed: LaunchSeed) -> MatchState
    where
        L: Controller + ?Sized,
        R: Controller + ?Sized,
    {
        let mut game = PongMatch::with_seed(seed);
        loop {
            let left_action = left.decide(&game.observe(Side::Left));
            let right_action = right.decide(&game.observe(Side::Right));
            game.apply_action(Side::Left, left_action);
            game.apply_action(Side::Right, right_action);

            let state = game.tick();
            if state.left_score >= self.score_limit
                || state.right_score >= self.score_limit
                || state.left_hits > self.rally_cap
            {
                return state;
            }
        }
    }
}
