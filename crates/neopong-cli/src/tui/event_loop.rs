use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Game logic update timing (based on the tick interval).
    Tick,
    /// Screen render timing (based on the render interval).
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(event::Event),
}

/// Tick and render scheduling for the application loop.
///
/// `next()` returns the next due event, interleaving terminal events
/// whenever they arrive before a deadline. An unset interval disables that
/// event type; with both unset, `next()` only waits for terminal events.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_interval: Option<Duration>,
    last_tick: Instant,
    last_render: Instant,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        // Both deadlines start in the past so the first tick and render
        // fire immediately.
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_interval: None,
            last_tick: past_time,
            last_render: past_time,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_interval(&mut self, interval: Option<Duration>) {
        self.render_interval = interval;
    }

    /// Returns the next event, blocking until a deadline is reached or a
    /// terminal event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= interval
            {
                self.last_tick = now;
                return Ok(TuiEvent::Tick);
            }
            if let Some(interval) = self.render_interval
                && now.duration_since(self.last_render) >= interval
            {
                self.last_render = now;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = self
            .render_interval
            .map(|interval| self.last_render + interval);
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
