//! Audio
//!
//! Sound effects are triggered from simulation events. On the web they are
//! synthesized with the Web Audio API, so no sound files are needed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Nest piece picked up
    Collect,
    /// Heal bird picked up
    Heal,
    /// Tree, bird watcher or head-on hawk hit
    Hit,
    /// Hawk taken from behind
    Defeat,
    /// Nest complete
    Win,
    /// Out of health
    Lose,
    /// Menu button
    Click,
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Silent sink for native builds
#[derive(Debug, Clone, Copy, Default)]
pub struct MuteAudio;

impl AudioSink for MuteAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// The sound a simulation event should make, if any
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::NestCollected { .. } => Some(SoundEffect::Collect),
        GameEvent::Healed { .. } => Some(SoundEffect::Heal),
        GameEvent::ObstacleHit { .. } => Some(SoundEffect::Hit),
        GameEvent::EnemyDefeated { from_behind: true, .. } => Some(SoundEffect::Defeat),
        GameEvent::EnemyDefeated { from_behind: false, .. } => Some(SoundEffect::Hit),
        GameEvent::Won => Some(SoundEffect::Win),
        GameEvent::Lost => Some(SoundEffect::Lose),
        GameEvent::CameraShake { .. } | GameEvent::PlayerTint { .. } | GameEvent::TintCleared => {
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Overall level every effect is scaled by
    const VOLUME: f32 = 0.8;

    /// Procedural Web Audio synthesizer
    pub struct WebAudio {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Oscillator routed through its own gain node
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

        /// One decaying tone, optionally sliding to `end_freq`
        #[allow(clippy::too_many_arguments)]
        fn tone(
            &self,
            ctx: &AudioContext,
            start: f64,
            freq: f32,
            end_freq: Option<f32>,
            osc_type: OscillatorType,
            level: f32,
            decay: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            gain.gain().set_value_at_time(level, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + decay)
                .ok();
            if let Some(end) = end_freq {
                osc.frequency().set_value_at_time(freq, start).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end, start + decay)
                    .ok();
            }
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + decay + 0.05).ok();
        }

        /// Notes played one after another
        fn arpeggio(
            &self,
            ctx: &AudioContext,
            notes: &[f32],
            spacing: f64,
            osc_type: OscillatorType,
            level: f32,
            decay: f64,
        ) {
            let t = ctx.current_time();
            for (i, freq) in notes.iter().enumerate() {
                self.tone(ctx, t + i as f64 * spacing, *freq, None, osc_type, level, decay);
            }
        }

        /// Nest pickup - bright ding
        fn play_collect(&self, ctx: &AudioContext, vol: f32) {
            self.arpeggio(ctx, &[660.0, 880.0], 0.06, OscillatorType::Sine, vol * 0.3, 0.15);
        }

        /// Heal - soft rising chirp
        fn play_heal(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.tone(ctx, t, 500.0, Some(1200.0), OscillatorType::Triangle, vol * 0.25, 0.2);
        }

        /// Hit - dull thump with a rasp on top
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.tone(ctx, t, 150.0, Some(50.0), OscillatorType::Sine, vol * 0.6, 0.15);
            self.tone(ctx, t, 220.0, Some(90.0), OscillatorType::Sawtooth, vol * 0.15, 0.1);
        }

        /// Defeat - swooping dive
        fn play_defeat(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.tone(ctx, t, 1200.0, Some(200.0), OscillatorType::Square, vol * 0.2, 0.3);
            self.tone(ctx, t, 80.0, Some(40.0), OscillatorType::Sine, vol * 0.4, 0.2);
        }

        /// Win - triumphant fanfare
        fn play_win(&self, ctx: &AudioContext, vol: f32) {
            self.arpeggio(
                ctx,
                &[400.0, 500.0, 600.0, 800.0, 1000.0],
                0.1,
                OscillatorType::Triangle,
                vol * 0.3,
                0.4,
            );
        }

        /// Lose - sad descending
        fn play_lose(&self, ctx: &AudioContext, vol: f32) {
            self.arpeggio(
                ctx,
                &[400.0, 350.0, 300.0, 200.0],
                0.2,
                OscillatorType::Sine,
                vol * 0.3,
                0.3,
            );
        }

        /// Click - short tap
        fn play_click(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.tone(ctx, t, 300.0, None, OscillatorType::Triangle, vol * 0.25, 0.05);
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };
            let vol = VOLUME;

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Collect => self.play_collect(ctx, vol),
                SoundEffect::Heal => self.play_heal(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
                SoundEffect::Defeat => self.play_defeat(ctx, vol),
                SoundEffect::Win => self.play_win(ctx, vol),
                SoundEffect::Lose => self.play_lose(ctx, vol),
                SoundEffect::Click => self.play_click(ctx, vol),
            }
        }
    }
}
