use neopong_engine::{Paddle, PongMatch, Side};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Widget},
};

use crate::ui::{color, style};

/// Renders a whole match: court border, net, paddles, ball, and the score
/// and rally counters.
///
/// Court coordinates are scaled to whatever area the widget is given, so
/// the display follows the terminal size.
#[derive(Debug)]
pub struct MatchDisplay<'a> {
    game: &'a PongMatch,
    paused: bool,
}

impl<'a> MatchDisplay<'a> {
    pub fn new(game: &'a PongMatch) -> Self {
        Self {
            game,
            paused: false,
        }
    }

    pub fn paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }
}

impl Widget for MatchDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &MatchDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let state = self.game.state();
        let border_color = if self.paused {
            color::YELLOW
        } else {
            color::WHITE
        };
        let score = Line::from(format!(" {} : {} ", state.left_score, state.right_score)).centered();
        let rallies = Line::from(format!(
            " hits {} / {} ",
            state.left_hits, state.right_hits
        ))
        .right_aligned();
        let block = Block::bordered()
            .title(score)
            .title_bottom(rallies)
            .border_style(border_color)
            .style(style::DEFAULT);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let net_x = inner.x + inner.width / 2;
        for y in inner.top()..inner.bottom() {
            if (y - inner.y) % 2 == 0 {
                buf[(net_x, y)].set_symbol("\u{250a}").set_style(style::NET);
            }
        }

        for side in [Side::Left, Side::Right] {
            let paddle = self.game.paddle(side);
            let x = inner.x + scale(paddle.x() + Paddle::WIDTH / 2.0, self.game.width(), inner.width);
            let top = scale(paddle.y(), self.game.height(), inner.height);
            let bottom = scale(paddle.y() + Paddle::HEIGHT, self.game.height(), inner.height);
            for y in top..=bottom {
                buf[(x, inner.y + y)]
                    .set_symbol("\u{2588}")
                    .set_style(style::PADDLE);
            }
        }

        let ball = self.game.ball();
        let x = inner.x + scale(ball.x(), self.game.width(), inner.width);
        let y = inner.y + scale(ball.y(), self.game.height(), inner.height);
        buf[(x, y)].set_symbol("\u{25cf}").set_style(style::BALL);

        if self.paused {
            let popup_area = inner.centered(Constraint::Length(12), Constraint::Length(3));
            let popup = Block::new().style(style::PAUSED);
            let text = Text::styled("PAUSED", style::PAUSED).centered();
            let popup_inner = popup.inner(popup_area);
            Clear.render(popup_area, buf);
            popup.render(popup_area, buf);
            text.render(
                popup_inner.centered_vertically(Constraint::Length(1)),
                buf,
            );
        }
    }
}

/// Maps a court coordinate to a cell offset within `cells`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale(value: f32, court_extent: f32, cells: u16) -> u16 {
    let cell = (value / court_extent * f32::from(cells)) as u16;
    cell.min(cells.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_clamps_to_the_cell_range() {
        assert_eq!(scale(0.0, 700.0, 70), 0);
        assert_eq!(scale(350.0, 700.0, 70), 35);
        assert_eq!(scale(700.0, 700.0, 70), 69);
        // Transiently out-of-court positions stay on screen.
        assert_eq!(scale(-6.0, 700.0, 70), 0);
        assert_eq!(scale(710.0, 700.0, 70), 69);
    }
}
