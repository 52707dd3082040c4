//! Audio system using Web Audio API
//!
//! Cues and the background loop are synthesized with oscillators, so no
//! asset files are shipped.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{AudioCue, AudioOut};
use crate::settings::Settings;

/// Bass line of the background loop (Hz), one note per beat
const MUSIC_NOTES: [f32; 8] = [110.0, 110.0, 131.0, 147.0, 110.0, 110.0, 98.0, 123.0];
const MUSIC_BEAT_SECS: f64 = 0.25;
/// How far ahead the loop is scheduled before it is topped up
const MUSIC_SCHEDULE_AHEAD: f64 = 4.0;

/// Nodes of the running background loop
struct Music {
    osc: OscillatorNode,
    gain: GainNode,
    /// Context time up to which notes are scheduled
    scheduled_until: f64,
    next_note: usize,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    music: Option<Music>,
    /// Silenced while the window is in the background
    suspended: bool,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings,
            music: None,
            suspended: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio and remember the choice
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.settings.save();
        self.apply_music_volume();
    }

    /// Temporarily silence everything (window blur)
    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
        self.apply_music_volume();
    }

    fn sfx_volume(&self) -> f32 {
        if self.suspended {
            0.0
        } else {
            self.settings.effective_sfx()
        }
    }

    fn music_volume(&self) -> f32 {
        if self.suspended {
            0.0
        } else {
            self.settings.effective_music() * 0.2
        }
    }

    fn apply_music_volume(&self) {
        if let Some(music) = &self.music {
            music.gain.gain().set_value(self.music_volume());
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Keep the background loop scheduled; call once per animation frame
    pub fn pump(&mut self) {
        let (Some(ctx), Some(music)) = (&self.ctx, &mut self.music) else {
            return;
        };
        let now = ctx.current_time();
        let freq = music.osc.frequency();
        if music.scheduled_until < now {
            music.scheduled_until = now;
        }
        while music.scheduled_until < now + MUSIC_SCHEDULE_AHEAD {
            let note = MUSIC_NOTES[music.next_note % MUSIC_NOTES.len()];
            freq.set_value_at_time(note, music.scheduled_until).ok();
            music.scheduled_until += MUSIC_BEAT_SECS;
            music.next_note += 1;
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Brick destroyed - short bright pop
    fn play_pop(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();
        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1400.0, t + 0.04)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Ball lost - falling tone
    fn play_life_lost(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.6).ok();
    }

    /// Round won - rising fanfare
    fn play_win(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.5).ok();
            }
        }
    }

    /// Round lost - sad descending
    fn play_lose(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

impl AudioOut for AudioManager {
    fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = self.create_osc(ctx, MUSIC_NOTES[0], OscillatorType::Triangle)
        else {
            log::warn!("Failed to create music nodes");
            return;
        };
        gain.gain().set_value(self.music_volume());
        osc.start().ok();
        self.music = Some(Music {
            osc,
            gain,
            scheduled_until: ctx.current_time(),
            next_note: 0,
        });
        self.pump();
        log::debug!("Music started");
    }

    fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            music.osc.stop().ok();
            let _ = music.gain.disconnect();
            log::debug!("Music stopped");
        }
    }

    fn play(&mut self, cue: AudioCue) {
        let vol = self.sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            AudioCue::Pop => self.play_pop(ctx, vol),
            AudioCue::LifeLost => self.play_life_lost(ctx, vol),
            AudioCue::Win => self.play_win(ctx, vol),
            AudioCue::Lose => self.play_lose(ctx, vol),
        }
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.stop_music();
        if let Some(ctx) = &self.ctx {
            let _ = ctx.close();
        }
    }
}
