//! Error types for the sonifier
//!
//! Only construction can fail hard. Once a sonifier exists, event
//! handlers log problems instead of returning them.

use thiserror::Error;

/// Errors that can occur while building or driving a sonifier
#[derive(Error, Debug)]
pub enum SonifierError {
    #[error("No output device found")]
    NoOutputDevice,

    #[error("Output device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to get output config: {0}")]
    OutputConfig(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    #[error("Failed to build output stream: {0}")]
    BuildStream(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SonifierError>;
