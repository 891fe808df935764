use std::iter;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    session::GameState,
    ui::{
        boxed_text, centered_strip, sprite_sink::BufferSink, text_width, BACKGROUND, BOMB,
        FLAME, HEART, INPUT_BG, PROMPT_BG, TEXT,
    },
    App,
};

const PADDING: u16 = 2;
const PROMPT_BOX_WIDTH: u16 = 20;
const INPUT_BOX_WIDTH: u16 = 40;
const BOX_HEIGHT: u16 = 3;

/// A UI Screen boundary: responsible for drawing one game state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Title and instructions; the START button is drawn by the app widget
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, _app: &App, area: Rect, buf: &mut Buffer) {
        let title_style = Style::default()
            .bg(BACKGROUND)
            .fg(FLAME)
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default()
            .bg(BACKGROUND)
            .fg(TEXT)
            .add_modifier(Modifier::ITALIC);

        let title = centered_strip(area, area.width, area.y + area.height / 4, 1);
        Paragraph::new("W O R D   B O M B")
            .style(title_style)
            .alignment(Alignment::Center)
            .render(title, buf);

        let hint = centered_strip(area, area.width, title.y + 2, 2);
        Paragraph::new(vec![
            Line::from("type a word containing the prompt before the bomb goes off"),
            Line::from("(enter) start  (esc) quit"),
        ])
        .style(hint_style)
        .alignment(Alignment::Center)
        .render(hint, buf);
    }
}

/// Fuse, lives, bomb, prompt and the running input
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = app.session();
        let bold = Style::default()
            .bg(BACKGROUND)
            .fg(TEXT)
            .add_modifier(Modifier::BOLD);

        // seconds left
        buf.set_string(
            area.x + PADDING,
            area.y + 1,
            session.timer().display_secs().to_string(),
            bold,
        );

        // one heart per life, right aligned
        let hearts = iter::repeat("♥").take(session.lives() as usize).join(" ");
        let hearts_x = area.right().saturating_sub(text_width(&hearts) + PADDING);
        buf.set_span(
            hearts_x,
            area.y + 1,
            &Span::styled(hearts.as_str(), Style::default().bg(BACKGROUND).fg(HEART)),
            area.width,
        );

        // sprites are anchored to the top centre of the screen
        let origin = (i32::from(area.x + area.width / 2), i32::from(area.y));
        session
            .bomb()
            .render(&mut BufferSink::new(buf, area, origin, Style::default().fg(BOMB)));
        session.explosion().render(&mut BufferSink::new(
            buf,
            area,
            origin,
            Style::default().fg(FLAME).add_modifier(Modifier::BOLD),
        ));

        let prompt_box = centered_strip(
            area,
            PROMPT_BOX_WIDTH,
            area.y + area.height / 2,
            BOX_HEIGHT,
        );
        boxed_text(
            buf,
            prompt_box,
            session.prompt(),
            Style::default().bg(PROMPT_BG).fg(TEXT).add_modifier(Modifier::BOLD),
        );

        let input_box = centered_strip(
            area,
            INPUT_BOX_WIDTH,
            area.bottom().saturating_sub(BOX_HEIGHT + 1),
            BOX_HEIGHT,
        );
        boxed_text(
            buf,
            input_box,
            session.input(),
            Style::default().bg(INPUT_BG).fg(TEXT),
        );
    }
}

/// End-of-game statistics; the MENU button is drawn by the app widget
pub struct EndedScreen;

impl Screen for EndedScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let Some(stats) = app.session().statistics() else {
            return;
        };
        let style = Style::default().bg(BACKGROUND).fg(TEXT);

        for (i, line) in stats.summary_lines().iter().enumerate() {
            let y = area.y + PADDING + (i as u16) * 2;
            if y >= area.bottom() {
                break;
            }
            buf.set_stringn(
                area.x + PADDING,
                y,
                line,
                usize::from(area.width.saturating_sub(PADDING)),
                style,
            );
        }
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: GameState) -> Box<dyn Screen> {
    match state {
        GameState::Menu => Box::new(MenuScreen),
        GameState::Playing => Box::new(PlayingScreen),
        GameState::Ended => Box::new(EndedScreen),
    }
}
