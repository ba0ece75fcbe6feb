//! Real-time audio output via cpal.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Extract device name via `description()` (cpal 0.17+).
fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio output device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub channels: u16,
}

/// Output stream configuration.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Buffer size in frames.
    pub buffer_size: u32,
    /// Output device name (uses default if `None`).
    pub output_device: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            buffer_size: 256,
            output_device: None,
        }
    }
}

/// List all available audio output devices.
pub fn list_output_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            if let Ok(name) = device_name(&device) {
                let (sample_rate, channels) = device
                    .default_output_config()
                    .map(|c| (c.sample_rate(), c.channels()))
                    .unwrap_or((48000, 2));
                devices.push(AudioDevice {
                    name,
                    default_sample_rate: sample_rate,
                    channels,
                });
            }
        }
    }

    Ok(devices)
}

/// Get the default output device info, if any.
pub fn default_output_device() -> Result<Option<AudioDevice>> {
    let host = cpal::default_host();
    Ok(host.default_output_device().and_then(|d| {
        device_name(&d).ok().map(|name| {
            let (sample_rate, channels) = d
                .default_output_config()
                .map(|c| (c.sample_rate(), c.channels()))
                .unwrap_or((48000, 2));
            AudioDevice {
                name,
                default_sample_rate: sample_rate,
                channels,
            }
        })
    }))
}

/// Find an output device by case-insensitive substring, or the default.
fn find_output_device(host: &Host, name: Option<&str>) -> Result<Device> {
    match name {
        Some(search) => {
            let search_lower = search.to_lowercase();
            let devices = host
                .output_devices()
                .map_err(|e| Error::Stream(e.to_string()))?;

            for device in devices {
                if let Ok(dev_name) = device_name(&device)
                    && dev_name.to_lowercase().contains(search_lower.as_str())
                {
                    return Ok(device);
                }
            }
            Err(Error::DeviceNotFound(format!(
                "no output device matching '{}'",
                search
            )))
        }
        None => host.default_output_device().ok_or(Error::NoDevice),
    }
}

/// Real-time audio output stream.
///
/// The stream owns a stop flag shared with whoever needs to end playback
/// (a Ctrl+C handler, a driver thread counting down a duration). [`run`]
/// blocks until the flag is cleared.
///
/// [`run`]: OutputStream::run
pub struct OutputStream {
    device: Device,
    stream_config: cpal::StreamConfig,
    channels: u16,
    sample_rate: u32,
    running: Arc<AtomicBool>,
}

impl OutputStream {
    /// Open the configured output device without starting playback.
    pub fn new(config: StreamConfig) -> Result<Self> {
        let host = cpal::default_host();
        let device = find_output_device(&host, config.output_device.as_deref())?;

        let channels = device
            .default_output_config()
            .map(|c| c.channels())
            .map_err(|e| Error::Stream(e.to_string()))?;
        if channels == 0 {
            return Err(Error::UnsupportedChannelCount(channels));
        }

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Fixed(config.buffer_size),
        };

        Ok(Self {
            device,
            stream_config,
            channels,
            sample_rate: config.sample_rate,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Output channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// The shared stop flag: clearing it makes [`run`](OutputStream::run)
    /// return.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Request the stream to stop.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the stream is (or will be) running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start playback and block until the stop flag clears.
    ///
    /// `render` is the audio callback: it must fill the interleaved buffer
    /// completely on every invocation and never block.
    pub fn run<F>(&mut self, mut render: F) -> Result<()>
    where
        F: FnMut(&mut [f32]) + Send + 'static,
    {
        self.running.store(true, Ordering::SeqCst);

        let stream = self
            .device
            .build_output_stream(
                &self.stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    render(data);
                },
                move |err| {
                    tracing::error!(error = %err, "output stream error");
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            channels = self.channels,
            sample_rate = self.sample_rate,
            "output stream started"
        );

        while self.running.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(20));
        }

        drop(stream);
        tracing::info!("output stream stopped");
        Ok(())
    }
}
