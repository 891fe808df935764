//! Frame sequencer for sprite animations.
//!
//! An [`Animation`] owns an ordered list of opaque frame handles, a per-frame
//! `(dx, dy)` offset relative to its anchor position and a playing/stopped
//! flag. It is advanced once per tick; a looping animation wraps forever while
//! a one-shot animation stops itself after showing its last frame.

use crate::error::{GameError, Result};

/// Receives frames to draw. Implemented by the presentation layer.
pub trait FrameSink<F> {
    fn blit(&mut self, frame: &F, x: i32, y: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Loop,
    OneShot,
}

pub type Offset = (i32, i32);

#[derive(Debug, Clone)]
pub struct Animation<F> {
    frames: Vec<F>,
    offsets: Vec<Offset>,
    position: (i32, i32),
    current: usize,
    playback: Playback,
    mode: Mode,
}

impl<F: Clone> Animation<F> {
    pub fn new(x: i32, y: i32, mode: Mode) -> Self {
        Self {
            frames: Vec::new(),
            offsets: Vec::new(),
            position: (x, y),
            current: 0,
            playback: Playback::Stopped,
            mode,
        }
    }

    pub fn looping(x: i32, y: i32) -> Self {
        Self::new(x, y, Mode::Loop)
    }

    pub fn one_shot(x: i32, y: i32) -> Self {
        Self::new(x, y, Mode::OneShot)
    }

    pub fn add_frame(&mut self, frame: F, offset: Offset) {
        self.frames.push(frame);
        self.offsets.push(offset);
    }

    /// Replaces all frames, giving each a zero offset.
    pub fn set_frames(&mut self, frames: Vec<F>) {
        self.offsets = vec![(0, 0); frames.len()];
        self.frames = frames;
        self.current = 0;
    }

    /// Replaces the per-frame offsets. The length must match the frame count.
    pub fn set_offsets(&mut self, offsets: Vec<Offset>) -> Result<()> {
        if offsets.len() != self.frames.len() {
            return Err(GameError::InvalidState(format!(
                "{} offsets for {} frames",
                offsets.len(),
                self.frames.len()
            )));
        }
        self.offsets = offsets;
        Ok(())
    }

    /// Expands every frame/offset pair into `factor + 1` consecutive copies,
    /// keeping the original order. Used to slow an animation down against a
    /// fixed per-tick advance rate.
    pub fn duplicate_all_frames(&mut self, factor: usize) {
        let copies = factor.saturating_add(1);
        self.frames = self
            .frames
            .iter()
            .flat_map(|f| std::iter::repeat(f.clone()).take(copies))
            .collect();
        self.offsets = self
            .offsets
            .iter()
            .flat_map(|o| std::iter::repeat(*o).take(copies))
            .collect();
        self.current = 0;
    }

    pub fn start(&mut self) {
        self.playback = Playback::Playing;
    }

    pub fn stop(&mut self) {
        self.playback = Playback::Stopped;
    }

    /// Rewinds to the first frame and starts playing.
    pub fn restart(&mut self) {
        self.current = 0;
        self.start();
    }

    pub fn set_current_frame(&mut self, index: usize) -> Result<()> {
        if index >= self.frames.len() {
            return Err(GameError::InvalidState(format!(
                "frame {index} out of range for {} frames",
                self.frames.len()
            )));
        }
        self.current = index;
        Ok(())
    }

    /// Moves to the next frame, wrapping to 0. A one-shot animation that is
    /// on its last frame stops as it wraps.
    pub fn advance(&mut self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(GameError::InvalidState(
                "cannot advance an animation with no frames".into(),
            ));
        }

        let last = self.frames.len() - 1;
        if self.mode == Mode::OneShot && self.current == last {
            self.stop();
        }
        self.current = if self.current >= last {
            0
        } else {
            self.current + 1
        };
        Ok(())
    }

    /// Advances only while playing.
    pub fn step(&mut self) -> Result<()> {
        if self.is_playing() {
            self.advance()?;
        }
        Ok(())
    }

    /// Draws the current frame at its anchor plus offset. Does nothing when stopped.
    pub fn render<S: FrameSink<F>>(&self, sink: &mut S) {
        if !self.is_playing() {
            return;
        }
        if let (Some(frame), Some((dx, dy))) =
            (self.frames.get(self.current), self.offsets.get(self.current))
        {
            sink.blit(frame, self.position.0 + dx, self.position.1 + dy);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> Option<&F> {
        self.frames.get(self.current)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
