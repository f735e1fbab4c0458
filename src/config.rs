//! Construction-time configuration for a [`Sonifier`](crate::Sonifier)

use serde::{Deserialize, Serialize};

use crate::audio::Waveform;
use crate::error::{Result, SonifierError};

/// Bounds and waveform used by the pointer mapping
///
/// Fields use `#[serde(default)]` so partial settings files still load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SonifierConfig {
    /// Oscillator shape
    pub waveform: Waveform,
    /// Pitch at the bottom edge (Hz)
    pub min_frequency: f64,
    /// Pitch at the top edge (Hz)
    pub max_frequency: f64,
    /// Pan at the left edge
    pub max_left_pan: f64,
    /// Pan at the right edge
    pub max_right_pan: f64,
    /// Volume at the left edge (0.0 to 1.0)
    pub min_volume: f64,
    /// Volume at the right edge (0.0 to 1.0)
    pub max_volume: f64,
}

impl Default for SonifierConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            min_frequency: 220.0,
            max_frequency: 880.0,
            max_left_pan: -1.0,
            max_right_pan: 1.0,
            min_volume: 0.1,
            max_volume: 0.6,
        }
    }
}

impl SonifierConfig {
    /// Check that every bound is finite and every range is ordered
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("frequency", self.min_frequency, self.max_frequency),
            ("pan", self.max_left_pan, self.max_right_pan),
            ("volume", self.min_volume, self.max_volume),
        ];

        for (name, min, max) in ranges {
            if !min.is_finite() || !max.is_finite() {
                return Err(SonifierError::InvalidConfig(format!(
                    "{} range must be finite, got {}..{}",
                    name, min, max
                )));
            }
            if min > max {
                return Err(SonifierError::InvalidConfig(format!(
                    "{} range is inverted: {} > {}",
                    name, min, max
                )));
            }
        }

        if self.min_frequency <= 0.0 {
            return Err(SonifierError::InvalidConfig(format!(
                "min_frequency must be positive, got {}",
                self.min_frequency
            )));
        }

        if self.min_volume < 0.0 {
            return Err(SonifierError::InvalidConfig(format!(
                "min_volume must not be negative, got {}",
                self.min_volume
            )));
        }

        Ok(())
    }
}
