//! pointer-sonifier - hear where the pointer is
//!
//! Horizontal pointer position sets stereo pan and volume, vertical
//! position sets pitch. A click toggles the tone; Ctrl/Cmd + Shift + P
//! silences it.

pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod mapping;
pub mod render;
pub mod settings;
pub mod sonifier;

pub use audio::{AudioBackend, CpalBackend, CpalVoice, Voice, Waveform};
pub use config::SonifierConfig;
pub use error::{Result, SonifierError};
pub use input::{InputEvent, KeyChord};
pub use mapping::Viewport;
pub use sonifier::{PointerPosition, Sonifier};
