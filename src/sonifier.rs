//! Pointer sonifier - turns pointer position into a tone
//!
//! - Horizontal position controls stereo pan and volume
//! - Vertical position controls pitch (top = highest)
//! - A click toggles the tone on and off
//! - Ctrl/Cmd + Shift + P silences it
//!
//! Each sonifier owns its voice and its own listener bindings, so any
//! number of them can coexist.

use crate::audio::{AudioBackend, Voice};
use crate::config::SonifierConfig;
use crate::error::Result;
use crate::input::{Bindings, InputEvent, Listener};
use crate::mapping::{self, Viewport};

/// Last known pointer position in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Maps pointer coordinates onto one owned voice
pub struct Sonifier<V: Voice> {
    config: SonifierConfig,
    voice: V,
    is_playing: bool,
    position: Option<PointerPosition>,
    bindings: Bindings,
}

impl<V: Voice> Sonifier<V> {
    /// Create a sonifier with a freshly created voice
    ///
    /// The voice starts paused at `min_volume`, centered.
    pub fn new<B>(config: SonifierConfig, backend: &B) -> Result<Self>
    where
        B: AudioBackend<Voice = V>,
    {
        config.validate()?;

        let mut voice = backend.create_voice(config.waveform, config.min_volume)?;
        voice.set_pan(0.0);

        log::info!(
            "Sonifier created: {} {}-{}Hz",
            config.waveform,
            config.min_frequency,
            config.max_frequency
        );

        Ok(Self {
            config,
            voice,
            is_playing: false,
            position: None,
            bindings: Bindings::default(),
        })
    }

    pub fn config(&self) -> &SonifierConfig {
        &self.config
    }

    pub fn voice(&self) -> &V {
        &self.voice
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position(&self) -> Option<PointerPosition> {
        self.position
    }

    pub fn is_bound(&self, listener: Listener) -> bool {
        self.bindings.is_installed(listener)
    }

    pub fn compute_pan(&self, x: f64, viewport: Viewport) -> f64 {
        mapping::compute_pan(x, viewport, &self.config)
    }

    pub fn compute_volume(&self, x: f64, viewport: Viewport) -> f64 {
        mapping::compute_volume(x, viewport, &self.config)
    }

    pub fn compute_frequency(&self, y: f64, viewport: Viewport) -> i32 {
        mapping::compute_frequency(y, viewport, &self.config)
    }

    /// Play if stopped, pause if playing. Returns the new state.
    ///
    /// This is the only place `is_playing` changes. If the voice refuses
    /// to start, the state stays stopped.
    pub fn toggle_playback(&mut self) -> bool {
        if self.is_playing {
            self.voice.pause();
            self.is_playing = false;
        } else {
            match self.voice.play() {
                Ok(()) => self.is_playing = true,
                Err(e) => log::error!("Failed to start playback: {}", e),
            }
        }
        self.is_playing
    }

    /// Record the pointer and retune the voice to match it
    pub fn update_for_pointer(&mut self, x: i32, y: i32, viewport: Viewport) -> PointerPosition {
        let position = PointerPosition { x, y };
        self.position = Some(position);

        let pan = self.compute_pan(x as f64, viewport);
        let volume = self.compute_volume(x as f64, viewport);
        let frequency = self.compute_frequency(y as f64, viewport);

        self.voice.set_pan(pan);
        self.voice.set_volume(volume);
        self.voice.set_frequency(frequency as f64);

        log::debug!(
            "Pointer ({}, {}) -> pan {} volume {} {}Hz",
            x,
            y,
            pan,
            volume,
            frequency
        );

        position
    }

    /// Install the click, pointer-move and key-down listeners
    pub fn setup(&mut self) {
        for &listener in Listener::ALL {
            self.bindings.install(listener);
        }
        log::info!("Sonifier listeners installed");
    }

    /// Silence the voice and remove every listener
    ///
    /// Safe to call any number of times.
    pub fn teardown(&mut self) {
        if self.is_playing {
            self.toggle_playback();
        }
        if self.bindings.any() {
            for &listener in Listener::ALL {
                self.bindings.remove(listener);
            }
            log::info!("Sonifier listeners removed");
        }
    }

    /// Dispatch one input event to its listener, if installed
    pub fn handle_event(&mut self, event: InputEvent, viewport: Viewport) {
        if !self.bindings.is_installed(event.listener()) {
            return;
        }

        match event {
            InputEvent::Click => {
                self.toggle_playback();
            }
            InputEvent::PointerMove { x, y } => {
                self.update_for_pointer(x, y, viewport);
            }
            InputEvent::KeyDown(chord) => {
                if chord.is_stop_shortcut() && self.is_playing {
                    log::info!("Stop shortcut pressed");
                    self.toggle_playback();
                }
            }
        }
    }
}
