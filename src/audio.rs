//! Audio cues triggered by the session.
//!
//! The session only names cues; what a cue sounds like is up to the
//! [`AudioSink`] it was given. Build with the `sound` feature for a
//! `rodio`-backed sink that synthesises every cue in memory.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Cue {
    Success,
    Locked,
    Error,
    Explosion,
    AmbientStart,
    AmbientStop,
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: Cue) {
        debug!(%cue, "cue (silent)");
    }
}

/// Records every cue. Clones share the same log, so a test can keep one
/// handle and give the other to a session.
#[derive(Debug, Default, Clone)]
pub struct CueLog {
    cues: Rc<RefCell<Vec<Cue>>>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().clone()
    }

    pub fn last(&self) -> Option<Cue> {
        self.cues.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.cues.borrow_mut().clear();
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }
}

/// Picks the audio backend: tones when enabled and available, silence otherwise.
pub fn default_audio(enabled: bool) -> Box<dyn AudioSink> {
    if !enabled {
        return Box::new(SilentAudio);
    }

    #[cfg(feature = "sound")]
    {
        match tone::ToneAudio::new() {
            Some(audio) => return Box::new(audio),
            None => tracing::warn!("no audio output device, continuing without sound"),
        }
    }

    Box::new(SilentAudio)
}

#[cfg(feature = "sound")]
pub mod tone {
    use std::f32::consts::PI;

    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
    use tracing::warn;

    use super::{AudioSink, Cue};

    const SAMPLE_RATE: u32 = 22050;

    /// Procedural cues played through the default output device.
    pub struct ToneAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        success: Vec<f32>,
        locked: Vec<f32>,
        error: Vec<f32>,
        explosion: Vec<f32>,
        tick: Vec<f32>,
        ambient: Option<Sink>,
    }

    impl ToneAudio {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            Some(Self {
                _stream: stream,
                handle,
                success: gen_beep(),
                locked: gen_locked(),
                error: gen_error(),
                explosion: gen_explosion(),
                tick: gen_tick(),
                ambient: None,
            })
        }

        fn play_once(&self, samples: &[f32]) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()));
                    sink.detach();
                }
                Err(e) => warn!(error = %e, "failed to open audio sink"),
            }
        }

        fn start_ambient(&mut self) {
            self.stop_ambient();
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.append(
                        SamplesBuffer::new(1, SAMPLE_RATE, self.tick.clone()).repeat_infinite(),
                    );
                    self.ambient = Some(sink);
                }
                Err(e) => warn!(error = %e, "failed to open ambient sink"),
            }
        }

        fn stop_ambient(&mut self) {
            if let Some(sink) = self.ambient.take() {
                sink.stop();
            }
        }
    }

    impl AudioSink for ToneAudio {
        fn play(&mut self, cue: Cue) {
            match cue {
                Cue::Success => self.play_once(&self.success),
                Cue::Locked => self.play_once(&self.locked),
                Cue::Error => self.play_once(&self.error),
                Cue::Explosion => self.play_once(&self.explosion),
                Cue::AmbientStart => self.start_ambient(),
                Cue::AmbientStop => self.stop_ambient(),
            }
        }
    }

    fn tone(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32);
                (t * freq * 2.0 * PI).sin() * env * volume
            })
            .collect()
    }

    fn silence(duration: f32) -> Vec<f32> {
        vec![0.0; (SAMPLE_RATE as f32 * duration) as usize]
    }

    /// Accepted word: one bright beep.
    fn gen_beep() -> Vec<f32> {
        tone(1320.0, 0.12, 0.3)
    }

    /// Reused word: two short low clicks.
    fn gen_locked() -> Vec<f32> {
        let mut samples = tone(330.0, 0.05, 0.3);
        samples.extend(silence(0.04));
        samples.extend(tone(330.0, 0.05, 0.3));
        samples
    }

    /// Rejected word: a buzzy descending pair.
    fn gen_error() -> Vec<f32> {
        let mut samples = tone(220.0, 0.1, 0.2);
        samples.extend(tone(165.0, 0.15, 0.2));
        samples
    }

    /// Fuse burnt out: decaying noise with a low rumble.
    fn gen_explosion() -> Vec<f32> {
        let duration = 0.6;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 0x2545_f491;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let ti = i as f32 / SAMPLE_RATE as f32;
                rng = rng.wrapping_mul(1_103_515_245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let rumble = (ti * 60.0 * 2.0 * PI).sin();
                (noise * 0.7 + rumble * 0.3) * (1.0 - t).powf(2.0) * 0.5
            })
            .collect()
    }

    /// Ambient clock: a tick and a tock per second, quiet.
    fn gen_tick() -> Vec<f32> {
        let mut samples = tone(2000.0, 0.02, 0.1);
        samples.extend(silence(0.48));
        samples.extend(tone(1500.0, 0.02, 0.1));
        samples.extend(silence(0.48));
        samples
    }
}
