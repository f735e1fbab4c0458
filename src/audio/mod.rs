//! Audio module - the voice a sonifier plays through
//!
//! This module provides:
//! - Waveform shapes for the oscillator
//! - `Voice` and `AudioBackend` traits
//! - A cpal-backed voice for real output

mod engine;
mod voice;
mod waveform;

// Re-export public types
pub use engine::{CpalBackend, CpalVoice};
pub use voice::{AudioBackend, Voice};
pub use waveform::Waveform;

#[cfg(test)]
pub(crate) use voice::testing;
