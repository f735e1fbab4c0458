//! cpal-backed voice
//!
//! Opens an output device, builds a stream whose callback synthesizes
//! the oscillator, and exposes it through the [`Voice`] trait. The UI
//! thread publishes parameters through atomics; the audio thread only
//! reads them.

use std::f32::consts::FRAC_PI_4;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};

use super::voice::{AudioBackend, Voice};
use super::Waveform;
use crate::error::{Result, SonifierError};

/// Voice parameters shared with the audio thread (f32 stored as bits)
struct VoiceParams {
    playing: AtomicBool,
    frequency: AtomicU32,
    volume: AtomicU32,
    pan: AtomicU32,
}

impl VoiceParams {
    fn new(frequency: f32, volume: f32) -> Self {
        Self {
            playing: AtomicBool::new(false),
            frequency: AtomicU32::new(frequency.to_bits()),
            volume: AtomicU32::new(volume.to_bits()),
            pan: AtomicU32::new(0.0_f32.to_bits()),
        }
    }

    fn load(cell: &AtomicU32) -> f32 {
        f32::from_bits(cell.load(Ordering::Relaxed))
    }

    fn store(cell: &AtomicU32, value: f32) {
        cell.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Phase-accumulating oscillator owned by the audio callback
struct Oscillator {
    waveform: Waveform,
    phase: f32,
    sample_rate: f32,
}

impl Oscillator {
    fn new(waveform: Waveform, sample_rate: f32) -> Self {
        Self {
            waveform,
            phase: 0.0,
            sample_rate,
        }
    }

    fn next(&mut self, frequency: f32) -> f32 {
        let value = self.waveform.sample(self.phase);
        // rem_euclid keeps the phase in [0, 1) for negative frequencies too
        self.phase = (self.phase + frequency / self.sample_rate).rem_euclid(1.0);
        value
    }
}

/// Equal-power left/right gains for a pan position
fn pan_gains(pan: f32) -> (f32, f32) {
    let angle = (pan.clamp(-1.0, 1.0) + 1.0) * FRAC_PI_4;
    (angle.cos(), angle.sin())
}

/// Write audio samples for any sample format
fn write_audio_samples<T: Sample + FromSample<f32>>(
    data: &mut [T],
    channels: usize,
    params: &VoiceParams,
    oscillator: &mut Oscillator,
) {
    if !params.playing.load(Ordering::Relaxed) {
        for sample in data.iter_mut() {
            *sample = T::EQUILIBRIUM;
        }
        return;
    }

    let frequency = VoiceParams::load(&params.frequency);
    let volume = VoiceParams::load(&params.volume);
    let (left_gain, right_gain) = pan_gains(VoiceParams::load(&params.pan));

    for frame in data.chunks_mut(channels) {
        let value = oscillator.next(frequency) * volume;

        if channels >= 2 {
            frame[0] = T::from_sample(value * left_gain);
            frame[1] = T::from_sample(value * right_gain);
            for ch in frame.iter_mut().skip(2) {
                *ch = T::EQUILIBRIUM;
            }
        } else {
            frame[0] = T::from_sample(value);
        }
    }
}

fn build_stream<T: SizedSample + FromSample<f32>>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    params: Arc<VoiceParams>,
    mut oscillator: Oscillator,
) -> std::result::Result<cpal::Stream, cpal::BuildStreamError> {
    let channels = config.channels as usize;
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            write_audio_samples(data, channels, &params, &mut oscillator);
        },
        |err| log::error!("Audio stream error: {}", err),
        None,
    )
}

/// Creates [`CpalVoice`]s on a cpal output device
#[derive(Debug, Clone, Default)]
pub struct CpalBackend {
    /// Output device to open, or the host default when `None`
    pub device_name: Option<String>,
}

impl CpalBackend {
    pub fn new(device_name: Option<String>) -> Self {
        Self { device_name }
    }

    /// Names of all output devices on the default host
    pub fn output_devices() -> Vec<String> {
        cpal::default_host()
            .output_devices()
            .map(|devices| devices.filter_map(|d| d.name().ok()).collect())
            .unwrap_or_default()
    }

    fn open_device(&self) -> Result<cpal::Device> {
        let host = cpal::default_host();

        match &self.device_name {
            Some(wanted) => host
                .output_devices()
                .map_err(|e| SonifierError::OutputConfig(e.to_string()))?
                .find(|d| d.name().map(|n| &n == wanted).unwrap_or(false))
                .ok_or_else(|| SonifierError::DeviceNotFound(wanted.clone())),
            None => host
                .default_output_device()
                .ok_or(SonifierError::NoOutputDevice),
        }
    }
}

impl AudioBackend for CpalBackend {
    type Voice = CpalVoice;

    fn create_voice(&self, waveform: Waveform, initial_volume: f64) -> Result<CpalVoice> {
        let device = self.open_device()?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!("Using output device: {}", device_name);

        let supported = device
            .default_output_config()
            .map_err(|e| SonifierError::OutputConfig(e.to_string()))?;
        log::info!("Audio config: {:?}", supported);

        let sample_rate = supported.sample_rate().0 as f32;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let frequency = 440.0;
        let params = Arc::new(VoiceParams::new(frequency as f32, initial_volume as f32));
        let oscillator = Oscillator::new(waveform, sample_rate);

        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, Arc::clone(&params), oscillator)
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, Arc::clone(&params), oscillator)
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config, Arc::clone(&params), oscillator)
            }
            format => {
                return Err(SonifierError::UnsupportedSampleFormat(format!("{:?}", format)));
            }
        }
        .map_err(|e| SonifierError::BuildStream(e.to_string()))?;

        // Some hosts start streams on creation
        if let Err(e) = stream.pause() {
            log::debug!("Could not pause new stream: {}", e);
        }

        Ok(CpalVoice {
            stream,
            params,
            device_name,
            pan: 0.0,
            volume: initial_volume,
            frequency,
        })
    }
}

/// A voice playing on a cpal output stream
pub struct CpalVoice {
    /// Kept alive for as long as the voice exists
    stream: cpal::Stream,
    params: Arc<VoiceParams>,
    device_name: String,
    pan: f64,
    volume: f64,
    frequency: f64,
}

impl CpalVoice {
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl Voice for CpalVoice {
    fn set_pan(&mut self, pan: f64) {
        self.pan = pan;
        VoiceParams::store(&self.params.pan, pan as f32);
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
        VoiceParams::store(&self.params.volume, volume as f32);
    }

    fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
        VoiceParams::store(&self.params.frequency, frequency as f32);
    }

    fn play(&mut self) -> Result<()> {
        self.stream
            .play()
            .map_err(|e| SonifierError::Playback(e.to_string()))?;
        self.params.playing.store(true, Ordering::Relaxed);
        log::info!("Voice playing on {}", self.device_name);
        Ok(())
    }

    fn pause(&mut self) {
        // Silence first; the callback checks this flag before anything else
        self.params.playing.store(false, Ordering::Relaxed);
        if let Err(e) = self.stream.pause() {
            log::warn!("Failed to pause stream: {}", e);
        }
        log::info!("Voice paused");
    }

    fn is_playing(&self) -> bool {
        self.params.playing.load(Ordering::Relaxed)
    }

    fn pan(&self) -> f64 {
        self.pan
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(playing: bool, volume: f32, pan: f32) -> VoiceParams {
        let p = VoiceParams::new(1.0, volume);
        p.playing.store(playing, Ordering::Relaxed);
        VoiceParams::store(&p.pan, pan);
        p
    }

    #[test]
    fn test_silent_when_paused() {
        let mut data = [1.0_f32; 8];
        let mut osc = Oscillator::new(Waveform::Square, 4.0);
        write_audio_samples(&mut data, 2, &params(false, 0.5, 0.0), &mut osc);
        assert!(data.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_hard_left() {
        let mut data = [0.0_f32; 4];
        let mut osc = Oscillator::new(Waveform::Square, 4.0);
        write_audio_samples(&mut data, 2, &params(true, 0.5, -1.0), &mut osc);
        assert!((data[0] - 0.5).abs() < 1e-6);
        assert!(data[1].abs() < 1e-6);
    }

    #[test]
    fn test_center_is_equal_power() {
        let (l, r) = pan_gains(0.0);
        assert!((l - r).abs() < 1e-6);
        assert!((l * l + r * r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_pan_is_clamped_for_gain() {
        assert_eq!(pan_gains(3.0), pan_gains(1.0));
        assert_eq!(pan_gains(-7.5), pan_gains(-1.0));
    }

    #[test]
    fn test_mono_and_extra_channels() {
        let mut mono = [0.0_f32; 2];
        let mut osc = Oscillator::new(Waveform::Square, 4.0);
        write_audio_samples(&mut mono, 1, &params(true, 0.25, 1.0), &mut osc);
        assert_eq!(mono, [0.25, 0.25]);

        let mut quad = [1.0_f32; 4];
        let mut osc = Oscillator::new(Waveform::Square, 4.0);
        write_audio_samples(&mut quad, 4, &params(true, 0.25, 0.0), &mut osc);
        assert_eq!(quad[2], 0.0);
        assert_eq!(quad[3], 0.0);
    }

    #[test]
    fn test_oscillator_wraps_phase() {
        // 1 Hz at 4 Hz sample rate: square goes high, high, low, low
        let mut osc = Oscillator::new(Waveform::Square, 4.0);
        let out: Vec<f32> = (0..5).map(|_| osc.next(1.0)).collect();
        assert_eq!(out, vec![1.0, 1.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_oscillator_negative_frequency() {
        let mut osc = Oscillator::new(Waveform::Sawtooth, 4.0);
        osc.next(-1.0);
        assert!((0.0..1.0).contains(&osc.phase));
    }
}
