use std::time::Duration;

use ratatui::layout::Rect;
use tracing::debug;

use crate::error::Result;
use crate::input::{Action, EdgeDetector, Regions};
use crate::runtime::GameEvent;
use crate::session::Session;
use crate::ui::{button_regions, MIN_HEIGHT, MIN_WIDTH};

/// Glue between the terminal and the session: routes events through the
/// edge detector and keeps the on-screen buttons in step with the game state.
pub struct App {
    session: Session,
    regions: Regions,
    edge: EdgeDetector,
    quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            regions: Regions::default(),
            edge: EdgeDetector::new(),
            quit: false,
        }
    }

    /// Applies every event of one tick in arrival order. Events after a quit
    /// are dropped.
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if self.quit {
                break;
            }
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(action) = self
            .edge
            .translate(event, self.session.state(), &self.regions)
        {
            self.dispatch(action);
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        match action {
            Action::Quit => self.quit = true,
            other => self.session.apply(other),
        }
        self.sync_regions();
    }

    pub fn tick(&mut self, delta: Duration) -> Result<()> {
        let delta_ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        self.session.tick(delta_ms)?;
        self.sync_regions();
        Ok(())
    }

    /// Recomputes button rectangles for the current terminal area. A terminal
    /// too small to draw the game gets no clickable regions.
    pub fn layout(&mut self, area: Rect) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            self.regions.replace(Vec::new());
            return;
        }
        self.regions.replace(button_regions(area));
        self.sync_regions();
    }

    fn sync_regions(&mut self) {
        self.regions.show_only(self.session.visible_regions());
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
