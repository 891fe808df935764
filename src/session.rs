//! The game's state machine.
//!
//! A [`Session`] owns lives, the prompt, the running input, the words used so
//! far, the fuse and both animations. Every change goes through one of its
//! transition methods, driven either by an [`Action`] or by [`Session::tick`].
//! Sounds are requested from the injected [`AudioSink`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::animation::Animation;
use crate::audio::{AudioSink, Cue};
use crate::config::Config;
use crate::corpus::Corpora;
use crate::error::Result;
use crate::input::Action;
use crate::sprites::{bomb_animation, explosion_animation, Sprite};
use crate::stats::Statistics;
use crate::timer::Countdown;
use crate::validator::{validate, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameState {
    Menu,
    Playing,
    Ended,
}

/// Tunables for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub initial_time_ms: u64,
    pub max_lives: u32,
    pub bomb_duplication: usize,
    pub explosion_duplication: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Rules {
    fn from(cfg: &Config) -> Self {
        Self {
            initial_time_ms: cfg.initial_time_ms,
            max_lives: cfg.max_lives,
            bomb_duplication: cfg.bomb_duplication,
            explosion_duplication: cfg.explosion_duplication,
        }
    }
}

/// Owned copy of everything a renderer reads, taken once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub state: GameState,
    pub lives: u32,
    pub max_lives: u32,
    pub prompt: String,
    pub input: String,
    pub used_words: Vec<String>,
    pub remaining_ms: i64,
    pub elapsed_ms: u64,
    pub statistics: Option<Statistics>,
}

pub struct Session {
    state: GameState,
    rules: Rules,
    lives: u32,
    prompt: String,
    input: String,
    used_words: Vec<String>,
    timer: Countdown,
    elapsed_ms: u64,
    statistics: Option<Statistics>,
    bomb: Animation<Sprite>,
    explosion: Animation<Sprite>,
    corpora: Corpora,
    audio: Box<dyn AudioSink>,
    rng: StdRng,
}

impl Session {
    pub fn new(rules: Rules, corpora: Corpora, audio: Box<dyn AudioSink>) -> Self {
        Self {
            state: GameState::Menu,
            lives: rules.max_lives,
            prompt: String::new(),
            input: String::new(),
            used_words: Vec::new(),
            timer: Countdown::new(rules.initial_time_ms),
            elapsed_ms: 0,
            statistics: None,
            bomb: bomb_animation(rules.bomb_duplication),
            explosion: explosion_animation(rules.explosion_duplication),
            corpora,
            audio,
            rng: StdRng::from_entropy(),
            rules,
        }
    }

    /// Makes prompt selection reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Applies one edge-detected action. `Quit` is left to the caller.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Start => self.start(),
            Action::AppendChar(c) => self.push_char(c),
            Action::Backspace => self.backspace(),
            Action::Submit => {
                self.submit();
            }
            Action::ReturnToMenu => self.return_to_menu(),
            Action::Quit => {}
        }
    }

    /// Menu -> Playing. Ignored in any other state.
    pub fn start(&mut self) {
        if self.state != GameState::Menu {
            debug!(state = %self.state, "start ignored");
            return;
        }

        self.lives = self.rules.max_lives;
        self.used_words.clear();
        self.input.clear();
        self.elapsed_ms = 0;
        self.statistics = None;
        self.next_prompt();
        self.timer.reset(self.rules.initial_time_ms);
        self.bomb.restart();
        self.explosion.stop();
        self.audio.play(Cue::AmbientStart);
        self.state = GameState::Playing;

        info!(lives = self.lives, prompt = %self.prompt, "game started");
    }

    pub fn push_char(&mut self, c: char) {
        if self.state == GameState::Playing && c.is_ascii_alphabetic() {
            self.input.push(c.to_ascii_uppercase());
        }
    }

    pub fn backspace(&mut self) {
        if self.state == GameState::Playing {
            self.input.pop();
        }
    }

    /// Checks the running input against the prompt. Returns `None` when not playing.
    pub fn submit(&mut self) -> Option<Verdict> {
        if self.state != GameState::Playing {
            return None;
        }

        let verdict = validate(
            &self.input,
            &self.prompt,
            &self.used_words,
            &self.corpora.words,
        );
        debug!(input = %self.input, prompt = %self.prompt, %verdict, "submitted");

        match verdict {
            Verdict::Accepted => {
                let word = std::mem::take(&mut self.input);
                self.used_words.push(word);
                self.next_prompt();
                self.timer.reset(self.rules.initial_time_ms);
                self.audio.play(Cue::Success);
            }
            Verdict::AlreadyUsed => {
                self.input.clear();
                self.audio.play(Cue::Locked);
            }
            Verdict::NotInDictionary => {
                self.input.clear();
                self.audio.play(Cue::Error);
            }
        }
        Some(verdict)
    }

    /// Ended -> Menu. The next `start` resets the game data.
    pub fn return_to_menu(&mut self) {
        if self.state == GameState::Ended {
            self.state = GameState::Menu;
            debug!("returned to menu");
        }
    }

    /// Advances the game by `delta_ms` of wall-clock time: one frame of each
    /// animation, then the session clock and the fuse (at most one timeout
    /// per tick). Animations step first so a freshly started explosion shows
    /// its first frame on the next render.
    pub fn tick(&mut self, delta_ms: u64) -> Result<()> {
        self.bomb.step()?;
        self.explosion.step()?;

        if self.state == GameState::Playing {
            self.elapsed_ms += delta_ms;
            if self.timer.tick(delta_ms) {
                self.lose_life();
            }
        }
        Ok(())
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.audio.play(Cue::Explosion);
        self.timer.reset(self.rules.initial_time_ms);

        if self.lives == 0 {
            self.end();
            return;
        }

        debug!(lives = self.lives, "lost a life");
        self.explosion.restart();
        self.next_prompt();
        self.input.clear();
    }

    fn end(&mut self) {
        let stats = Statistics::new(&self.used_words, self.elapsed_ms);
        info!(
            words = stats.word_count(),
            elapsed_ms = stats.elapsed_ms(),
            "game over"
        );

        self.statistics = Some(stats);
        self.bomb.stop();
        self.explosion.stop();
        // Both animations are built with frames, so rewinding can't fail
        let _ = self.explosion.set_current_frame(0);
        self.audio.play(Cue::AmbientStop);
        self.state = GameState::Ended;
    }

    fn next_prompt(&mut self) {
        self.prompt = self.corpora.prompts.generate_with(&mut self.rng);
    }

    /// Actions whose on-screen buttons should be visible.
    pub fn visible_regions(&self) -> &'static [Action] {
        match self.state {
            GameState::Menu => &[Action::Start],
            GameState::Playing => &[],
            GameState::Ended => &[Action::ReturnToMenu],
        }
    }

    pub fn snapshot(&self) -> SessionView {
        SessionView {
            state: self.state,
            lives: self.lives,
            max_lives: self.rules.max_lives,
            prompt: self.prompt.clone(),
            input: self.input.clone(),
            used_words: self.used_words.clone(),
            remaining_ms: self.timer.remaining_ms(),
            elapsed_ms: self.elapsed_ms,
            statistics: self.statistics.clone(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn remaining_ms(&self) -> i64 {
        self.timer.remaining_ms()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    pub fn bomb(&self) -> &Animation<Sprite> {
        &self.bomb
    }

    pub fn explosion(&self) -> &Animation<Sprite> {
        &self.explosion
    }
}
