//! Synthesized cue playback through rodio.

use super::{AudioSink, Tone};
use crate::core::session::Cue;
use fundsp::prelude32 as dsp;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};

const SAMPLE_RATE: u32 = 44_100;
/// Tail of each tone that fades to silence, so clips end without a click.
const FADE_SECS: f32 = 0.02;

const CUES: [Cue; 5] = [
    Cue::Jump,
    Cue::Score,
    Cue::Collision,
    Cue::Select,
    Cue::SpeedTierChanged,
];

/// Plays each cue's [`Tone`] on the default output device.
///
/// Samples are rendered once at startup; every play gets its own detached
/// sink so overlapping cues mix instead of cutting each other off.
pub struct RodioSink {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clips: Vec<(Cue, Vec<f32>)>,
    enabled: bool,
}

impl RodioSink {
    pub fn open() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        let clips = CUES
            .iter()
            .map(|cue| (*cue, render_tone(Tone::for_cue(*cue))))
            .collect();
        log::debug!("audio device opened at {} Hz", SAMPLE_RATE);

        Ok(Self {
            _stream: stream,
            handle,
            clips,
            enabled: true,
        })
    }

    fn clip(&self, cue: Cue) -> Option<&[f32]> {
        self.clips
            .iter()
            .find(|(c, _)| *c == cue)
            .map(|(_, samples)| samples.as_slice())
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        let Some(samples) = self.clip(cue).map(<[f32]>::to_vec) else {
            return;
        };

        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(e) => {
                log::warn!("disabling sound after {:?} cue failed: {}", cue, e);
                self.enabled = false;
            }
        }
    }
}

/// Sine at the tone's pitch with a short linear fade at the end.
pub(super) fn render_tone(tone: Tone) -> Vec<f32> {
    let duration = tone.duration_secs();
    let volume = tone.volume;
    let fade_start = (duration - FADE_SECS).max(0.0);
    let mut node = dsp::sine_hz(tone.frequency_hz)
        * dsp::lfo(move |t: f32| {
            if t < fade_start {
                volume
            } else {
                volume * (1.0 - (t - fade_start) / FADE_SECS).max(0.0)
            }
        });
    render_mono(&mut node, SAMPLE_RATE, duration)
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(sample_rate as f64);
    node.reset();

    let sample_count = (sample_rate as f32 * duration) as usize;
    (0..sample_count).map(|_| node.get_mono()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length_matches_duration() {
        let samples = render_tone(Tone::for_cue(Cue::Score));
        assert_eq!(samples.len(), (SAMPLE_RATE as f32 * 0.15) as usize);
    }

    #[test]
    fn test_tone_stays_under_its_volume() {
        for cue in CUES {
            let tone = Tone::for_cue(cue);
            let samples = render_tone(tone);
            let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
            assert!(peak > tone.volume * 0.5, "{:?} is nearly silent", cue);
            assert!(peak <= tone.volume + 1e-3);
            assert!(samples.last().map_or(true, |s| s.abs() < tone.volume * 0.2));
        }
    }
}
