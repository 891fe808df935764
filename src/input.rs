//! Turns raw terminal events into game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

use crate::runtime::GameEvent;
use crate::session::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    AppendChar(char),
    Backspace,
    Submit,
    ReturnToMenu,
    Quit,
}

/// A clickable area of the screen bound to an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rect: Rect,
    pub action: Action,
    pub label: &'static str,
    pub visible: bool,
}

impl Region {
    pub fn new(rect: Rect, action: Action, label: &'static str) -> Self {
        Self {
            rect,
            action,
            label,
            visible: true,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.rect.x
            && column < self.rect.x.saturating_add(self.rect.width)
            && row >= self.rect.y
            && row < self.rect.y.saturating_add(self.rect.height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Regions {
    regions: Vec<Region>,
}

impl Regions {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn replace(&mut self, regions: Vec<Region>) {
        self.regions = regions;
    }

    pub fn visible(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.visible)
    }

    /// Shows exactly the regions whose action is in `actions`.
    pub fn show_only(&mut self, actions: &[Action]) {
        for region in &mut self.regions {
            region.visible = actions.contains(&region.action);
        }
    }

    /// First visible region under the pointer.
    pub fn hit(&self, column: u16, row: u16) -> Option<Action> {
        self.visible()
            .find(|r| r.contains(column, row))
            .map(|r| r.action)
    }
}

/// Emits one action per discrete user action: key presses only (not repeats
/// or releases) and one click per left-button press/release pair.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    pointer_armed: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(
        &mut self,
        event: &GameEvent,
        state: GameState,
        regions: &Regions,
    ) -> Option<Action> {
        match event {
            GameEvent::Key(key) => Self::translate_key(key, state),
            GameEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.pointer_armed = true;
                    None
                }
                MouseEventKind::Up(MouseButton::Left) if self.pointer_armed => {
                    self.pointer_armed = false;
                    regions.hit(mouse.column, mouse.row)
                }
                _ => None,
            },
            GameEvent::Resize => None,
        }
    }

    fn translate_key(key: &KeyEvent, state: GameState) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match (key.code, state) {
            (KeyCode::Esc, _) => Some(Action::Quit),
            (KeyCode::Enter | KeyCode::Char(' '), GameState::Menu) => Some(Action::Start),
            // Enter is left out so a late submit can't dismiss the results
            (KeyCode::Char(' '), GameState::Ended) => Some(Action::ReturnToMenu),
            (KeyCode::Enter, GameState::Playing) => Some(Action::Submit),
            (KeyCode::Backspace, GameState::Playing) => Some(Action::Backspace),
            (KeyCode::Char(c), GameState::Playing) if c.is_ascii_alphabetic() => {
                Some(Action::AppendChar(c.to_ascii_uppercase()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn press(code: KeyCode) -> GameEvent {
        GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn key_with_kind(code: KeyCode, kind: KeyEventKind) -> GameEvent {
        GameEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> GameEvent {
        GameEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn start_button() -> Regions {
        Regions::new(vec![
            Region::new(Rect::new(10, 10, 20, 3), Action::Start, "START"),
            Region {
                visible: false,
                ..Region::new(Rect::new(10, 10, 20, 3), Action::ReturnToMenu, "MENU")
            },
        ])
    }

    #[test]
    fn test_letters_are_uppercased_while_playing() {
        let mut edge = EdgeDetector::new();
        let regions = Regions::default();
        assert_eq!(
            edge.translate(&press(KeyCode::Char('b')), GameState::Playing, &regions),
            Some(Action::AppendChar('B'))
        );
        assert_eq!(
            edge.translate(&press(KeyCode::Char('Q')), GameState::Playing, &regions),
            Some(Action::AppendChar('Q'))
        );
        assert_eq!(
            edge.translate(&press(KeyCode::Char('7')), GameState::Playing, &regions),
            None
        );
        assert_eq!(
            edge.translate(&press(KeyCode::Char('b')), GameState::Menu, &regions),
            None
        );
    }

    #[test]
    fn test_control_keys() {
        let mut edge = EdgeDetector::new();
        let regions = Regions::default();
        assert_eq!(
            edge.translate(&press(KeyCode::Enter), GameState::Playing, &regions),
            Some(Action::Submit)
        );
        assert_eq!(
            edge.translate(&press(KeyCode::Backspace), GameState::Playing, &regions),
            Some(Action::Backspace)
        );
        assert_eq!(
            edge.translate(&press(KeyCode::Enter), GameState::Menu, &regions),
            Some(Action::Start)
        );
        assert_eq!(
            edge.translate(&press(KeyCode::Char(' ')), GameState::Ended, &regions),
            Some(Action::ReturnToMenu)
        );
        assert_eq!(
            edge.translate(&press(KeyCode::Enter), GameState::Ended, &regions),
            None
        );
        assert_eq!(
            edge.translate(&press(KeyCode::Esc), GameState::Playing, &regions),
            Some(Action::Quit)
        );
        let ctrl_c = GameEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(
            edge.translate(&ctrl_c, GameState::Playing, &regions),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_repeats_and_releases_are_ignored() {
        let mut edge = EdgeDetector::new();
        let regions = Regions::default();
        for kind in [KeyEventKind::Repeat, KeyEventKind::Release] {
            assert_eq!(
                edge.translate(
                    &key_with_kind(KeyCode::Char('a'), kind),
                    GameState::Playing,
                    &regions
                ),
                None
            );
        }
    }

    #[test]
    fn test_click_on_visible_region() {
        let mut edge = EdgeDetector::new();
        let regions = start_button();
        assert_eq!(
            edge.translate(
                &mouse(MouseEventKind::Down(MouseButton::Left), 12, 11),
                GameState::Menu,
                &regions
            ),
            None
        );
        assert_eq!(
            edge.translate(
                &mouse(MouseEventKind::Up(MouseButton::Left), 12, 11),
                GameState::Menu,
                &regions
            ),
            Some(Action::Start)
        );
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut edge = EdgeDetector::new();
        let regions = start_button();
        assert_eq!(
            edge.translate(
                &mouse(MouseEventKind::Up(MouseButton::Left), 12, 11),
                GameState::Menu,
                &regions
            ),
            None
        );
    }

    #[test]
    fn test_click_outside_or_on_hidden_region() {
        let mut edge = EdgeDetector::new();
        let mut regions = start_button();
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 0, 0);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 0, 0);
        edge.translate(&down, GameState::Menu, &regions);
        assert_eq!(edge.translate(&up, GameState::Menu, &regions), None);

        regions.show_only(&[Action::ReturnToMenu]);
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 15, 12);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 15, 12);
        edge.translate(&down, GameState::Ended, &regions);
        assert_eq!(
            edge.translate(&up, GameState::Ended, &regions),
            Some(Action::ReturnToMenu)
        );
    }

    #[test]
    fn test_region_bounds() {
        let region = Region::new(Rect::new(5, 5, 2, 2), Action::Start, "S");
        assert!(region.contains(5, 5));
        assert!(region.contains(6, 6));
        assert!(!region.contains(7, 6));
        assert!(!region.contains(4, 5));
    }
}
