//! Voice trait - the audio capability a sonifier drives
//!
//! A voice is a single oscillator with a stereo pan stage. The sonifier
//! only ever talks to this trait, so the real cpal output and the test
//! double are interchangeable.

use super::Waveform;
use crate::error::Result;

/// A single synthesized sound source
pub trait Voice {
    /// Set the stereo position (-1.0 = left, 1.0 = right)
    fn set_pan(&mut self, pan: f64);

    /// Set the output level (0.0 to 1.0)
    fn set_volume(&mut self, volume: f64);

    /// Set the oscillator frequency in Hz
    fn set_frequency(&mut self, frequency: f64);

    /// Start producing sound
    fn play(&mut self) -> Result<()>;

    /// Stop producing sound
    ///
    /// Must always leave the voice silent, even if the device
    /// refuses to pause.
    fn pause(&mut self);

    /// Whether the voice is currently audible
    fn is_playing(&self) -> bool;

    fn pan(&self) -> f64;

    fn volume(&self) -> f64;

    fn frequency(&self) -> f64;
}

/// Something that can create voices
pub trait AudioBackend {
    type Voice: Voice;

    /// Create a paused voice with the given waveform and starting volume
    fn create_voice(&self, waveform: Waveform, initial_volume: f64) -> Result<Self::Voice>;
}
