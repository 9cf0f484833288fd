use crossterm::event::{Event, KeyCode};
use neopong_engine::{Controller as _, PongMatch, Side};
use neopong_training::NetworkController;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    model::champion::Champion,
    tui::{App, Runtime},
    ui::MatchDisplay,
};

const FPS: f64 = 60.0;

/// Interactive match against a trained champion.
///
/// The human drives the left paddle, the champion network the right one.
/// Scoring never ends the match; play continues until the player quits.
#[derive(Debug)]
pub struct PlayApp {
    game: PongMatch,
    opponent: NetworkController,
    paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    /// Builds the app from a validated champion file.
    pub fn new(champion: &Champion) -> Self {
        Self {
            game: PongMatch::new(),
            opponent: NetworkController::new(&champion.to_genome(), &champion.config),
            paused: false,
            is_exiting: false,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(FPS));
        runtime.set_frame_rate(Some(FPS));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let playing = !self.paused;
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Up | KeyCode::Char('w') if playing => {
                    _ = self.game.move_paddle(Side::Left, true);
                }
                KeyCode::Down | KeyCode::Char('s') if playing => {
                    _ = self.game.move_paddle(Side::Left, false);
                }
                KeyCode::Char('p') => self.paused = !self.paused,
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let match_display = MatchDisplay::new(&self.game).paused(self.paused);
        let help_text = if self.paused {
            "Controls: P (Resume) | Q (Quit)"
        } else {
            "Controls: ↑/W (Up) | ↓/S (Down) | P (Pause) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Min(10), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(match_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        if self.paused {
            return;
        }
        let action = self.opponent.decide(&self.game.observe(Side::Right));
        self.game.apply_action(Side::Right, action);
        self.game.tick();
    }
}
