//! Fixed-tick orchestrator
//!
//! `Game` owns the round and the pending input for the next tick. The
//! browser frontend drives `step` from its animation-frame accumulator;
//! `run` is the blocking loop used by the native runner and tests.

use std::time::Duration;

use crate::config::{ConfigError, RoundConfig};
use crate::consts::END_BANNER_HOLD_MS;
use crate::platform::{AudioCue, AudioOut, FramePacer, InputEvent, InputSource, Surface};
use crate::renderer::Scene;
use crate::sim::{GameEvent, RoundOutcome, RoundState, TickInput, tick};

/// How `run` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Won { score: u32 },
    Lost { score: u32 },
    /// Quit before the round finished
    Quit,
}

/// A round plus the input collected for its next tick
#[derive(Debug, Clone)]
pub struct Game {
    pub state: RoundState,
    pub input: TickInput,
}

impl Game {
    pub fn new(config: RoundConfig, seed: u64) -> Result<Self, ConfigError> {
        let state = RoundState::new(config, seed)?;
        log::info!("Round started with seed {seed}");
        Ok(Self::with_state(state))
    }

    pub fn with_state(state: RoundState) -> Self {
        Self {
            state,
            input: TickInput::default(),
        }
    }

    /// Start over with the same configuration and keep the autoplay setting
    pub fn restart(&mut self, seed: u64) -> Result<(), ConfigError> {
        let autoplay = self.input.autoplay;
        *self = Self::new(self.state.config.clone(), seed)?;
        self.input.autoplay = autoplay;
        Ok(())
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.input.autoplay = enabled;
    }

    /// Fold one input event into the next tick; `Quit` is the caller's concern
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x } => self.input.pointer_x = Some(x),
            InputEvent::PointerReleased => self.input.launch = true,
            InputEvent::Quit => {}
        }
    }

    /// Run one simulation tick and play the cues it triggered
    pub fn step(&mut self, audio: &mut impl AudioOut) -> Vec<GameEvent> {
        let events = tick(&mut self.state, &self.input);

        // Clear one-shot inputs after processing
        self.input.pointer_x = None;
        self.input.launch = false;

        for cue in events.iter().filter_map(cue_for) {
            audio.play(cue);
        }
        events
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.state.outcome
    }

    pub fn scene(&self) -> Scene {
        Scene::from_round(&self.state)
    }
}

/// Audio cue for a simulation event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::BrickDestroyed { .. } => Some(AudioCue::Pop),
        GameEvent::LifeLost { .. } => Some(AudioCue::LifeLost),
        GameEvent::RoundWon { .. } => Some(AudioCue::Win),
        GameEvent::RoundLost { .. } => Some(AudioCue::Lose),
        _ => None,
    }
}

/// Play the round to completion at the pacer's rate
///
/// Music runs for the whole call. When the round ends the banner frame is
/// presented and held before returning.
pub fn run(
    game: &mut Game,
    surface: &mut impl Surface,
    audio: &mut impl AudioOut,
    input: &mut impl InputSource,
    pacer: &mut impl FramePacer,
) -> RunOutcome {
    audio.start_music();

    let outcome = loop {
        pacer.wait_tick();

        let events = input.poll();
        if events.contains(&InputEvent::Quit) {
            log::info!("Quit requested");
            break RunOutcome::Quit;
        }
        for event in events {
            game.handle_event(event);
        }

        game.step(audio);

        if let Err(e) = surface.present(&game.scene()) {
            log::warn!("Render error: {e}");
        }

        if let Some(outcome) = game.outcome() {
            pacer.hold(Duration::from_millis(END_BANNER_HOLD_MS));
            let score = game.state.score;
            break match outcome {
                RoundOutcome::Won => RunOutcome::Won { score },
                RoundOutcome::Lost => RunOutcome::Lost { score },
            };
        }
    };

    audio.stop_music();
    outcome
}
