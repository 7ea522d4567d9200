//! Sound cue playback.
//!
//! Every [`Cue`] has a short sine [`Tone`]. With the `sound` feature the
//! tones are synthesized and played through the default output device:
//! ```sh
//! cargo build --features sound
//! ```
//!
//! Without the feature, or when no device opens, the [`TerminalBell`] rings
//! for the cues worth interrupting the player for. A sink that fails once
//! stays silent for the rest of the run.

#[cfg(feature = "sound")]
mod synth;

#[cfg(feature = "sound")]
pub use synth::RodioSink;

use crate::core::session::Cue;
use std::io::Write;

/// Anything that can play a [`Cue`]. Failures are the sink's problem.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);

    fn play_all(&mut self, cues: &[Cue]) {
        for cue in cues {
            self.play(*cue);
        }
    }
}

/// A plain sine beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    /// Peak amplitude, 0.0..=1.0.
    pub volume: f32,
}

impl Tone {
    const fn new(frequency_hz: f32, duration_ms: u32, volume: f32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            volume,
        }
    }

    pub fn for_cue(cue: Cue) -> Self {
        match cue {
            Cue::Jump => Self::new(800.0, 100, 0.3),
            Cue::Score => Self::new(1200.0, 150, 0.3),
            Cue::Collision => Self::new(200.0, 400, 0.5),
            Cue::Select => Self::new(600.0, 100, 0.2),
            Cue::SpeedTierChanged => Self::new(1000.0, 200, 0.3),
        }
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }
}

/// Pick the best sink available: synthesized tones when built with `sound`
/// and a device opens, the terminal bell otherwise.
pub fn default_sink() -> Box<dyn AudioSink> {
    #[cfg(feature = "sound")]
    {
        match RodioSink::open() {
            Ok(sink) => return Box::new(sink),
            Err(e) => log::warn!("no audio device ({}), falling back to the bell", e),
        }
    }

    Box::new(TerminalBell::new(std::io::stdout()))
}

/// Rings the terminal bell (BEL) on score, tier change, and collision.
pub struct TerminalBell<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A terminal has one bell; jumps and menu clicks would drown it out.
    fn rings_for(cue: Cue) -> bool {
        matches!(cue, Cue::Score | Cue::SpeedTierChanged | Cue::Collision)
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        if !self.enabled || !Self::rings_for(cue) {
            return;
        }

        let result = self
            .out
            .write_all(b"\x07")
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            log::warn!("disabling sound after {:?} cue failed: {}", cue, e);
            self.enabled = false;
        }
    }
}
