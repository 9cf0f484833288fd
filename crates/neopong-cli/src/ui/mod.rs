pub use self::match_display::*;

mod match_display;

mod color {
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const NET: Style = fg_bg(color::GRAY, color::BLACK);
    pub const PADDLE: Style = fg_bg(color::WHITE, color::BLACK);
    pub const BALL: Style = fg_bg(color::YELLOW, color::BLACK);
    pub const PAUSED: Style = fg_bg(color::BLACK, color::YELLOW);
}
