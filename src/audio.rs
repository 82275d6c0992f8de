//! Audio feedback using the Web Audio API
//!
//! Procedurally generated beeps - no sample assets needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::session::GameEvent;

/// Plays the side signals the session emits
pub struct AudioPlayer {
    ctx: Option<AudioContext>,
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer {
    pub fn new() -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Play the sound for one side signal
    pub fn play(&self, event: GameEvent) {
        let Some(ctx) = &self.ctx else { return };

        // browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            GameEvent::FoodEaten => self.play_food(ctx),
            GameEvent::LevelUp => self.play_level_up(ctx),
            GameEvent::GameOver => self.play_game_over(ctx),
        }
    }

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

    /// Single tone with exponential decay, starting `delay` seconds out
    fn beep(&self, ctx: &AudioContext, freq: f32, duration: f64, osc_type: OscillatorType, delay: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }

    /// Food eaten - short high chirp
    fn play_food(&self, ctx: &AudioContext) {
        self.beep(ctx, 800.0, 0.1, OscillatorType::Sine, 0.0);
    }

    /// Level up - ascending three-note arpeggio
    fn play_level_up(&self, ctx: &AudioContext) {
        for (i, (freq, duration)) in [(523.0, 0.15), (659.0, 0.15), (784.0, 0.2)]
            .into_iter()
            .enumerate()
        {
            self.beep(ctx, freq, duration, OscillatorType::Square, i as f64 * 0.15);
        }
    }

    /// Game over - sawtooth descent
    fn play_game_over(&self, ctx: &AudioContext) {
        self.beep(ctx, 200.0, 0.5, OscillatorType::Sawtooth, 0.0);
        self.beep(ctx, 150.0, 0.3, OscillatorType::Sawtooth, 0.2);
    }
}
