//! Oscillator waveform shapes

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SonifierError;

/// Waveform shapes available to the voice
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    /// Smooth sine wave
    #[default]
    Sine,
    /// Abrupt square wave
    Square,
    /// Rising sawtooth
    Sawtooth,
    /// Linear triangle wave
    Triangle,
}

impl Waveform {
    /// Get all waveform types
    pub fn all() -> &'static [Waveform] {
        &[
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Triangle,
        ]
    }

    /// Lowercase name, matching the settings file
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    /// Sample the waveform at phase (0.0 to 1.0)
    /// Returns value in range -1.0 to 1.0
    pub fn sample(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),

            Waveform::Square => {
                if phase < 0.5 { 1.0 } else { -1.0 }
            }

            Waveform::Sawtooth => 2.0 * phase - 1.0,

            Waveform::Triangle => {
                let p = phase * 4.0;
                if p < 1.0 {
                    p
                } else if p < 3.0 {
                    2.0 - p
                } else {
                    p - 4.0
                }
            }
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = SonifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::all()
            .iter()
            .copied()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SonifierError::InvalidConfig(format!("unsupported waveform: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine() {
        assert!(Waveform::Sine.sample(0.0).abs() < 0.001);
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 0.001);
        assert!((Waveform::Sine.sample(0.75) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_square() {
        assert_eq!(Waveform::Square.sample(0.25), 1.0);
        assert_eq!(Waveform::Square.sample(0.75), -1.0);
    }

    #[test]
    fn test_sawtooth() {
        assert_eq!(Waveform::Sawtooth.sample(0.0), -1.0);
        assert_eq!(Waveform::Sawtooth.sample(0.5), 0.0);
    }

    #[test]
    fn test_triangle_peaks() {
        assert_eq!(Waveform::Triangle.sample(0.25), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.75), -1.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Sawtooth".parse::<Waveform>().unwrap(), Waveform::Sawtooth);
        assert_eq!(" triangle ".parse::<Waveform>().unwrap(), Waveform::Triangle);
        assert!("pulse".parse::<Waveform>().is_err());
    }
}
