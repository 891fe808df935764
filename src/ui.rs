pub mod screen;
pub mod sprite_sink;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    input::{Action, Region},
    ui::screen::current_screen,
    App,
};

pub const BACKGROUND: Color = Color::Rgb(50, 50, 50);
pub const PROMPT_BG: Color = Color::Rgb(0, 150, 0);
pub const INPUT_BG: Color = Color::Black;
pub const TEXT: Color = Color::White;
pub const HEART: Color = Color::Rgb(211, 0, 0);
pub const BOMB: Color = Color::Rgb(231, 231, 231);
pub const FLAME: Color = Color::Rgb(255, 165, 0);

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 20;
const BUTTON_HEIGHT: u16 = 3;

/// START and MENU share one spot: centred, a third of the width wide, just
/// below the middle of the screen.
pub fn button_regions(area: Rect) -> Vec<Region> {
    let width = (area.width / 3).max(10).min(area.width);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height / 2,
        width,
        BUTTON_HEIGHT.min(area.height),
    );
    vec![
        Region::new(rect, Action::Start, "START"),
        Region::new(rect, Action::ReturnToMenu, "MENU"),
    ]
}

/// A `height`-row strip of `width` columns centred horizontally in `area`,
/// starting at row `y`, clipped to `area`.
pub fn centered_strip(area: Rect, width: u16, y: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, y, width, height).intersection(area)
}

/// Paints `rect` with `style` and writes `text` centred on its middle row.
pub fn boxed_text(buf: &mut Buffer, rect: Rect, text: &str, style: Style) {
    if rect.is_empty() {
        return;
    }
    buf.set_style(rect, style);
    let middle = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1);
    Paragraph::new(Line::from(text.to_string()))
        .style(style)
        .alignment(Alignment::Center)
        .render(middle, buf);
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let canvas = Style::default().bg(BACKGROUND).fg(TEXT);
        buf.set_style(area, canvas);

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let message = format!("Terminal too small ({MIN_WIDTH}x{MIN_HEIGHT} needed)");
            Paragraph::new(message)
                .style(canvas.fg(Color::Yellow))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        current_screen(self.session().state()).render(self, area, buf);

        let button_style = Style::default()
            .bg(Color::Black)
            .fg(TEXT)
            .add_modifier(Modifier::BOLD);
        for region in self.regions().visible() {
            boxed_text(buf, region.rect, region.label, button_style);
        }
    }
}

/// Width of `text` in terminal columns, as u16.
pub fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}
