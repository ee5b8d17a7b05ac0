//! Audio cues for paddle hits and brick explosions
//!
//! Procedurally generated - no sound files. The game only ever asks for two
//! primitives, a decaying tone and a decaying noise burst; where they are
//! played is up to the [`AudioOutput`] the platform provides.

use crate::config::AudioConfig;

/// A fixed-frequency square tone with an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
}

/// Broadband noise with an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseBurst {
    /// Seconds
    pub duration: f32,
    pub gain: f32,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle - short square blip
    PaddleHit,
    /// Brick destroyed - noise crunch
    BrickExplosion,
}

/// Paddle hit - short square blip
pub const PADDLE_HIT_TONE: Tone = Tone {
    frequency: 440.0,
    duration: 0.1,
    gain: 0.3,
};

/// Brick explosion - noise crunch
pub const BRICK_EXPLOSION_NOISE: NoiseBurst = NoiseBurst {
    duration: 0.2,
    gain: 0.5,
};

/// Something that can make sound
pub trait AudioOutput {
    fn play_tone(&mut self, tone: &Tone);
    fn play_noise_burst(&mut self, burst: &NoiseBurst);
}

/// Opens the platform output on first use; `None` means no audio
pub type OutputOpener = Box<dyn FnMut() -> Option<Box<dyn AudioOutput>>>;

enum OutputState {
    Unopened,
    Ready(Box<dyn AudioOutput>),
    Unavailable,
}

/// Audio manager for the game
pub struct AudioFeedback {
    output: OutputState,
    opener: OutputOpener,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl std::fmt::Debug for AudioFeedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = match self.output {
            OutputState::Unopened => "unopened",
            OutputState::Ready(_) => "ready",
            OutputState::Unavailable => "unavailable",
        };
        f.debug_struct("AudioFeedback")
            .field("output", &output)
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioFeedback {
    /// Audio using the platform's default output
    pub fn new(config: &AudioConfig) -> Self {
        Self::with_opener(config, Box::new(crate::platform::open_audio_output))
    }

    /// Audio using a custom output, opened lazily on first cue
    pub fn with_opener(config: &AudioConfig, opener: OutputOpener) -> Self {
        Self {
            output: OutputState::Unopened,
            opener,
            master_volume: config.master_volume.clamp(0.0, 1.0),
            sfx_volume: config.sfx_volume.clamp(0.0, 1.0),
            muted: config.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// False once opening the output has failed
    pub fn is_available(&self) -> bool {
        !matches!(self.output, OutputState::Unavailable)
    }

    pub fn play_paddle_hit(&mut self) {
        self.play(SoundEffect::PaddleHit);
    }

    pub fn play_brick_explosion(&mut self) {
        self.play(SoundEffect::BrickExplosion);
    }

    /// Play a sound effect. Never fails: without output the cue is dropped.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(output) = self.output() else { return };

        match effect {
            SoundEffect::PaddleHit => output.play_tone(&Tone {
                gain: PADDLE_HIT_TONE.gain * vol,
                ..PADDLE_HIT_TONE
            }),
            SoundEffect::BrickExplosion => output.play_noise_burst(&NoiseBurst {
                gain: BRICK_EXPLOSION_NOISE.gain * vol,
                ..BRICK_EXPLOSION_NOISE
            }),
        }
    }

    fn output(&mut self) -> Option<&mut Box<dyn AudioOutput>> {
        if matches!(self.output, OutputState::Unopened) {
            self.output = match (self.opener)() {
                Some(output) => OutputState::Ready(output),
                None => {
                    log::warn!("No audio output available - sound disabled");
                    OutputState::Unavailable
                }
            };
        }
        match &mut self.output {
            OutputState::Ready(output) => Some(output),
            _ => None,
        }
    }
}

/// Web Audio API output
#[cfg(target_arch = "wasm32")]
pub mod web {
    use rand::Rng;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioOutput, NoiseBurst, Tone};

    /// Gain the envelopes decay to (exponential ramps can not reach 0)
    const ENVELOPE_FLOOR: f32 = 0.001;

    pub struct WebAudioOutput {
        ctx: AudioContext,
    }

    impl WebAudioOutput {
        /// May fail outside a secure context
        pub fn new() -> Option<Self> {
            let ctx = AudioContext::new().ok()?;
            Some(Self { ctx })
        }

        /// Resume context if suspended (browsers require user gesture)
        fn resume(&self) {
            if self.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }
        }

        /// Gain node wired to the destination with a decay envelope starting now
        fn envelope(&self, peak: f32, duration: f32) -> Option<GainNode> {
            let gain = self.ctx.create_gain().ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;
            let t = self.ctx.current_time();
            gain.gain().set_value_at_time(peak.max(ENVELOPE_FLOOR), t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(ENVELOPE_FLOOR, t + duration as f64)
                .ok()?;
            Some(gain)
        }

        fn create_osc(&self, tone: &Tone, gain: &GainNode) -> Option<OscillatorNode> {
            let osc = self.ctx.create_oscillator().ok()?;
            osc.set_type(OscillatorType::Square);
            osc.frequency().set_value(tone.frequency);
            osc.connect_with_audio_node(gain).ok()?;
            Some(osc)
        }

        fn tone(&self, tone: &Tone) -> Option<()> {
            let gain = self.envelope(tone.gain, tone.duration)?;
            let osc = self.create_osc(tone, &gain)?;
            let t = self.ctx.current_time();
            osc.start().ok()?;
            osc.stop_with_when(t + tone.duration as f64).ok()?;
            Some(())
        }

        fn noise(&self, burst: &NoiseBurst) -> Option<()> {
            let sample_rate = self.ctx.sample_rate();
            let len = ((sample_rate * burst.duration) as u32).max(1);
            let buffer = self.ctx.create_buffer(1, len, sample_rate).ok()?;

            let mut rng = rand::rng();
            let mut samples: Vec<f32> = (0..len).map(|_| rng.random_range(-1.0..=1.0)).collect();
            buffer.copy_to_channel(&mut samples[..], 0).ok()?;

            let gain = self.envelope(burst.gain, burst.duration)?;
            let source = self.ctx.create_buffer_source().ok()?;
            source.set_buffer(Some(&buffer));
            source.connect_with_audio_node(&gain).ok()?;

            let t = self.ctx.current_time();
            source.start().ok()?;
            source.stop_with_when(t + burst.duration as f64).ok()?;
            Some(())
        }
    }

    impl AudioOutput for WebAudioOutput {
        fn play_tone(&mut self, tone: &Tone) {
            self.resume();
            if self.tone(tone).is_none() {
                log::debug!("Tone dropped");
            }
        }

        fn play_noise_burst(&mut self, burst: &NoiseBurst) {
            self.resume();
            if self.noise(burst).is_none() {
                log::debug!("Noise burst dropped");
            }
        }
    }
}
