//! Cross-platform microphone capture using cpal
//!
//! Buffers device callback fragments while a session is active and
//! concatenates them into one WAV payload on stop. Mono, 16-bit, at the
//! device sample rate.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tokio::time::Duration as TokioDuration;

use crate::application::ports::{AudioCapture, CaptureError};
use crate::domain::capture::{AudioMimeType, AudioPayload};

/// Microphone capture adapter using cpal.
///
/// The stream is owned by a dedicated thread because cpal::Stream is not
/// Send; the thread holds it for exactly the lifetime of the session and
/// drops it on every exit path.
pub struct CpalCapture {
    /// Buffered fragments (mono, i16, at device sample rate)
    fragments: Arc<StdMutex<Vec<i16>>>,
    /// Device sample rate for the active session
    device_sample_rate: Arc<AtomicU32>,
    /// Session state flag, also the stream thread's shutdown signal
    is_capturing: Arc<AtomicBool>,
    /// Error the stream thread hit while opening the device, if any
    start_error: Arc<StdMutex<Option<CaptureError>>>,
}

impl CpalCapture {
    /// Create a new cpal-based capture adapter
    pub fn new() -> Self {
        Self {
            fragments: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_capturing: Arc::new(AtomicBool::new(false)),
            start_error: Arc::new(StdMutex::new(None)),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(CaptureError::NoInputDevice)
    }

    /// Map a stream build failure to a capture error.
    /// A device the platform refuses to open surfaces as unavailable.
    fn map_build_error(error: cpal::BuildStreamError) -> CaptureError {
        match error {
            cpal::BuildStreamError::DeviceNotAvailable => CaptureError::PermissionDenied,
            other => CaptureError::StreamFailed(other.to_string()),
        }
    }

    /// Mix interleaved multi-channel samples down to mono
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Concatenate buffered fragments into one WAV payload
    fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<AudioPayload, CaptureError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| CaptureError::StreamFailed(format!("WAV init failed: {}", e)))?;
            for &sample in samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| CaptureError::StreamFailed(format!("WAV write failed: {}", e)))?;
            }
            writer
                .finalize()
                .map_err(|e| CaptureError::StreamFailed(format!("WAV finalize failed: {}", e)))?;
        }

        Ok(AudioPayload::new(cursor.into_inner(), AudioMimeType::Wav))
    }

    /// Record a device-open failure and mark the session dead
    fn abort_session(
        error: CaptureError,
        is_capturing: &Arc<AtomicBool>,
        start_error: &Arc<StdMutex<Option<CaptureError>>>,
    ) {
        if let Ok(mut slot) = start_error.lock() {
            *slot = Some(error);
        }
        is_capturing.store(false, Ordering::SeqCst);
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCapture for CpalCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        if self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::AlreadyCapturing);
        }

        // Fresh session: clear fragments and any previous failure
        {
            let mut fragments = self.fragments.lock().unwrap_or_else(|e| e.into_inner());
            fragments.clear();
        }
        {
            let mut slot = self.start_error.lock().unwrap_or_else(|e| e.into_inner());
            *slot = None;
        }

        self.is_capturing.store(true, Ordering::SeqCst);

        let fragments = Arc::clone(&self.fragments);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_capturing = Arc::clone(&self.is_capturing);
        let start_error = Arc::clone(&self.start_error);

        // The stream lives on its own thread for the whole session
        std::thread::spawn(move || {
            let device = match CpalCapture::get_input_device() {
                Ok(d) => d,
                Err(e) => {
                    CpalCapture::abort_session(e, &is_capturing, &start_error);
                    return;
                }
            };

            let supported = match device.default_input_config() {
                Ok(c) => c,
                Err(e) => {
                    CpalCapture::abort_session(
                        CaptureError::StreamFailed(e.to_string()),
                        &is_capturing,
                        &start_error,
                    );
                    return;
                }
            };

            let sample_format = supported.sample_format();
            let config: cpal::StreamConfig = supported.into();
            let sample_rate = config.sample_rate.0;
            let channels = config.channels;
            device_sample_rate.store(sample_rate, Ordering::SeqCst);

            let fragments_clone = Arc::clone(&fragments);
            let is_capturing_clone = Arc::clone(&is_capturing);

            let stream_result = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if is_capturing_clone.load(Ordering::SeqCst) {
                            let mono = CpalCapture::mix_to_mono(data, channels);
                            if let Ok(mut buffer) = fragments_clone.lock() {
                                buffer.extend_from_slice(&mono);
                            }
                        }
                    },
                    |err| eprintln!("Audio stream error: {}", err),
                    None,
                ),

                SampleFormat::F32 => {
                    let fragments_clone = Arc::clone(&fragments);
                    let is_capturing_clone = Arc::clone(&is_capturing);

                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if is_capturing_clone.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalCapture::mix_to_mono(&i16_data, channels);
                                if let Ok(mut buffer) = fragments_clone.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }

                other => {
                    CpalCapture::abort_session(
                        CaptureError::StreamFailed(format!(
                            "Unsupported sample format: {:?}",
                            other
                        )),
                        &is_capturing,
                        &start_error,
                    );
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(e) => {
                    CpalCapture::abort_session(
                        CpalCapture::map_build_error(e),
                        &is_capturing,
                        &start_error,
                    );
                    return;
                }
            };

            if let Err(e) = stream.play() {
                CpalCapture::abort_session(
                    CaptureError::StreamFailed(e.to_string()),
                    &is_capturing,
                    &start_error,
                );
                return;
            }

            // Hold the stream until the session ends
            while is_capturing.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }

            drop(stream);
        });

        // Give the thread a moment to open the device
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        if !self.is_capturing.load(Ordering::SeqCst) {
            let error = {
                let mut slot = self.start_error.lock().unwrap_or_else(|e| e.into_inner());
                slot.take()
            };
            return Err(error.unwrap_or_else(|| {
                CaptureError::StreamFailed("Capture thread exited early".to_string())
            }));
        }

        Ok(())
    }

    async fn stop(&self) -> Result<AudioPayload, CaptureError> {
        if !self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::NotCapturing);
        }

        // Signal the stream thread to release the device
        self.is_capturing.store(false, Ordering::SeqCst);
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::StreamFailed("Sample rate not set".to_string()));
        }

        let samples = {
            let mut fragments = self.fragments.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *fragments)
        };

        if samples.is_empty() {
            return Err(CaptureError::EmptyCapture);
        }

        // WAV finalization is CPU work, keep it off the async threads
        tokio::task::spawn_blocking(move || Self::encode_wav(&samples, sample_rate))
            .await
            .map_err(|e| CaptureError::StreamFailed(format!("Encode task error: {}", e)))?
    }

    fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::SeqCst)
    }
}
