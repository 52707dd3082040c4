//! Headless collaborators for the native runner and tests

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::{AudioCue, AudioOut, FramePacer, InputEvent, InputSource, PresentError, Surface};
use crate::renderer::Scene;

/// Surface that keeps the last scene and logs score/banner changes
#[derive(Debug, Default)]
pub struct LogSurface {
    pub frames: u64,
    pub last_scene: Option<Scene>,
}

impl Surface for LogSurface {
    fn present(&mut self, scene: &Scene) -> Result<(), PresentError> {
        self.frames += 1;
        let changed = self
            .last_scene
            .as_ref()
            .is_none_or(|last| last.score.text != scene.score.text);
        if changed {
            log::debug!("frame {}: {}", self.frames, scene.score.text);
        }
        if let Some(banner) = &scene.banner {
            log::info!("{}", banner.text);
        }
        self.last_scene = Some(scene.clone());
        Ok(())
    }
}

/// Audio sink that records every request
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub cues: Vec<AudioCue>,
    pub music_playing: bool,
    pub music_starts: u32,
}

impl AudioOut for RecordingAudio {
    fn start_music(&mut self) {
        self.music_playing = true;
        self.music_starts += 1;
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
    }

    fn play(&mut self, cue: AudioCue) {
        log::debug!("cue: {cue:?}");
        self.cues.push(cue);
    }
}

/// Input replayed from a per-frame script; empty once exhausted
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Sleeps until each fixed-rate deadline
#[derive(Debug)]
pub struct FixedRatePacer {
    period: Duration,
    next: Instant,
}

impl FixedRatePacer {
    pub fn new(ticks_per_second: u32) -> Self {
        let period = Duration::from_secs(1) / ticks_per_second.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }
}

impl FramePacer for FixedRatePacer {
    fn wait_tick(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            // Running behind: don't try to catch up with a burst of frames
            self.next = now + self.period;
        }
    }

    fn hold(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Never blocks; counts what it was asked to wait for
#[derive(Debug, Default)]
pub struct InstantPacer {
    pub ticks: u64,
    pub held: Duration,
}

impl FramePacer for InstantPacer {
    fn wait_tick(&mut self) {
        self.ticks += 1;
    }

    fn hold(&mut self, duration: Duration) {
        self.held += duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_drains_per_frame() {
        let mut input = ScriptedInput::new([
            vec![InputEvent::PointerMoved { x: 10 }],
            vec![],
            vec![InputEvent::PointerReleased, InputEvent::Quit],
        ]);
        assert_eq!(input.poll(), vec![InputEvent::PointerMoved { x: 10 }]);
        assert!(input.poll().is_empty());
        assert_eq!(input.poll().len(), 2);
        assert!(input.poll().is_empty());
    }

    #[test]
    fn test_fixed_rate_pacer_period() {
        let pacer = FixedRatePacer::new(40);
        assert_eq!(pacer.period, Duration::from_millis(25));
    }

    #[test]
    fn test_recording_audio() {
        let mut audio = RecordingAudio::default();
        audio.start_music();
        audio.play(AudioCue::Pop);
        audio.stop_music();
        assert_eq!(audio.cues, vec![AudioCue::Pop]);
        assert!(!audio.music_playing);
        assert_eq!(audio.music_starts, 1);
    }
}
