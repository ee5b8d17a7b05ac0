//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend
//! - Audio output
//! - Entropy for the unseeded game RNG

use crate::audio::AudioOutput;

/// Install the logger for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Install the logger for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Open the browser's Web Audio output
#[cfg(target_arch = "wasm32")]
pub fn open_audio_output() -> Option<Box<dyn AudioOutput>> {
    crate::audio::web::WebAudioOutput::new().map(|out| Box::new(out) as Box<dyn AudioOutput>)
}

/// Native builds are headless: there is no audio output
#[cfg(not(target_arch = "wasm32"))]
pub fn open_audio_output() -> Option<Box<dyn AudioOutput>> {
    None
}

/// Fresh seed for a session that does not ask for a specific one
pub fn entropy_seed() -> u64 {
    rand::random::<u64>()
}
