use crate::{
    CoreResult, TrackerError,
    capture::{CaptureFailureKind, CaptureService, CapturedAudio, LevelHistory, normalized_level},
    device::find_input_device,
    lifecycle::classify_capture_message,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use cpal::{
    BuildStreamError, Device, FromSample, PauseStreamError, PlayStreamError, Sample,
    SampleFormat, SizedSample, Stream, StreamConfig,
    traits::{DeviceTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Buffer preallocation ceiling; longer captures grow on demand.
const PREALLOCATE_SAMPLES: usize = 48_000 * 2 * 30;

/// cpal-backed [`CaptureService`].
///
/// Samples from `f32`, `i16` and `u16` streams are converted to `f32` and
/// buffered up to the maximum duration passed to `start_capture`. Past that
/// point further data is dropped and [`CaptureService::limit_reached`]
/// reports true. Each callback appends its normalized level to a bounded
/// [`LevelHistory`].
pub struct CpalCapturer {
    stream: Option<Stream>,
    device_name: Option<String>,
    format: Option<(u32, u16)>,
    samples: Arc<Mutex<Vec<f32>>>,
    /// Signals the audio callback to stop writing. Set before the stream is
    /// dropped so no in-flight callback writes after `stop_capture` locks.
    shutdown: Arc<AtomicBool>,
    limit_reached: Arc<AtomicBool>,
    levels: Arc<Mutex<LevelHistory>>,
    stream_error: Arc<Mutex<Option<String>>>,
}

impl CpalCapturer {
    /// Create an idle capturer.
    pub fn new() -> Self {
        Self {
            stream: None,
            device_name: None,
            format: None,
            samples: Arc::new(Mutex::new(Vec::new())),
            shutdown: Arc::new(AtomicBool::new(false)),
            limit_reached: Arc::new(AtomicBool::new(false)),
            levels: Arc::new(Mutex::new(LevelHistory::new())),
            stream_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Name of the device used by the current or last capture.
    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    fn build_stream<T>(
        &self,
        device: &Device,
        config: &StreamConfig,
        max_samples: usize,
    ) -> Result<Stream, BuildStreamError>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let samples = Arc::clone(&self.samples);
        let shutdown = Arc::clone(&self.shutdown);
        let limit_reached = Arc::clone(&self.limit_reached);
        let levels = Arc::clone(&self.levels);
        let stream_error = Arc::clone(&self.stream_error);

        device.build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                if shutdown.load(Ordering::Acquire) {
                    return;
                }
                // A poisoned mutex still holds valid samples.
                let mut buf = samples.lock().unwrap_or_else(|e| {
                    error!("Sample buffer lock poisoned, recovering: {}", e);
                    e.into_inner()
                });

                let room = max_samples.saturating_sub(buf.len());
                let take = data.len().min(room);
                if take < data.len() {
                    limit_reached.store(true, Ordering::Release);
                }
                if take == 0 {
                    return;
                }

                let mut sum_squares = 0.0f32;
                buf.extend(data[..take].iter().map(|s| {
                    let v = s.to_sample::<f32>();
                    sum_squares += v * v;
                    v
                }));

                drop(buf);

                let rms = (sum_squares / take as f32).sqrt();
                levels
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(normalized_level(rms));
            },
            move |err| {
                error!("Audio stream error: {}", err);
                let mut slot = stream_error.lock().unwrap_or_else(|e| e.into_inner());
                *slot = Some(err.to_string());
            },
            None,
        )
    }

    #[track_caller]
    fn lock_samples(&self) -> CoreResult<std::sync::MutexGuard<'_, Vec<f32>>> {
        self.samples.lock().map_err(|e| TrackerError::CaptureFailed {
            kind: CaptureFailureKind::Capture,
            reason: format!("Failed to lock samples: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn no_active_capture() -> TrackerError {
        TrackerError::CaptureFailed {
            kind: CaptureFailureKind::Capture,
            reason: "No active capture".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl Default for CpalCapturer {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureService for CpalCapturer {
    #[track_caller]
    #[instrument(skip(self))]
    fn start_capture(&mut self, max_duration: Duration, device_id: Option<&str>) -> CoreResult<()> {
        if self.stream.is_some() {
            return Err(TrackerError::CaptureFailed {
                kind: CaptureFailureKind::Capture,
                reason: "Capture already running".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let (device, device_name) = find_input_device(device_id)?;

        let supported = device
            .default_input_config()
            .map_err(|e| TrackerError::CaptureFailed {
                kind: match e {
                    cpal::DefaultStreamConfigError::DeviceNotAvailable => {
                        CaptureFailureKind::Device
                    }
                    _ => classify_capture_message(&e.to_string()),
                },
                reason: format!("Failed to get input config for '{}': {}", device_name, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();
        let max_samples = (max_duration.as_secs_f64()
            * f64::from(config.sample_rate)
            * f64::from(config.channels)) as usize;

        self.shutdown.store(false, Ordering::Release);
        self.limit_reached.store(false, Ordering::Release);
        self.levels.lock().unwrap_or_else(|e| e.into_inner()).clear();
        *self.stream_error.lock().unwrap_or_else(|e| e.into_inner()) = None;
        {
            let mut buf = self.lock_samples()?;
            buf.clear();
            buf.reserve(max_samples.min(PREALLOCATE_SAMPLES));
        }

        let stream = match sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(&device, &config, max_samples),
            SampleFormat::I16 => self.build_stream::<i16>(&device, &config, max_samples),
            SampleFormat::U16 => self.build_stream::<u16>(&device, &config, max_samples),
            other => {
                return Err(TrackerError::CaptureFailed {
                    kind: CaptureFailureKind::Conversion,
                    reason: format!("Unsupported sample format {:?} on '{}'", other, device_name),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }
        .map_err(|e| TrackerError::CaptureFailed {
            kind: match e {
                BuildStreamError::DeviceNotAvailable => CaptureFailureKind::Device,
                _ => classify_capture_message(&e.to_string()),
            },
            reason: format!("Failed to build stream on '{}': {}", device_name, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        stream.play().map_err(|e| TrackerError::CaptureFailed {
            kind: match e {
                PlayStreamError::DeviceNotAvailable => CaptureFailureKind::Device,
                _ => classify_capture_message(&e.to_string()),
            },
            reason: format!("Failed to start stream on '{}': {}", device_name, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(
            device = %device_name,
            sample_rate = config.sample_rate,
            channels = config.channels,
            max_samples,
            "Audio capture started"
        );

        self.format = Some((config.sample_rate, config.channels));
        self.device_name = Some(device_name);
        self.stream = Some(stream);

        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn pause(&mut self) -> CoreResult<()> {
        let stream = self.stream.as_ref().ok_or_else(Self::no_active_capture)?;

        stream.pause().map_err(|e| TrackerError::CaptureFailed {
            kind: match e {
                PauseStreamError::DeviceNotAvailable => CaptureFailureKind::Device,
                _ => classify_capture_message(&e.to_string()),
            },
            reason: format!("Failed to pause stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!("Audio capture paused");
        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn resume(&mut self) -> CoreResult<()> {
        let stream = self.stream.as_ref().ok_or_else(Self::no_active_capture)?;

        stream.play().map_err(|e| TrackerError::CaptureFailed {
            kind: match e {
                PlayStreamError::DeviceNotAvailable => CaptureFailureKind::Device,
                _ => classify_capture_message(&e.to_string()),
            },
            reason: format!("Failed to resume stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!("Audio capture resumed");
        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn stop_capture(&mut self) -> CoreResult<CapturedAudio> {
        self.shutdown.store(true, Ordering::Release);

        let stream = self.stream.take().ok_or_else(Self::no_active_capture)?;
        drop(stream);
        // Some backends return from drop() before the final callback has
        // observed the shutdown flag.
        std::thread::sleep(Duration::from_millis(5));

        let samples = std::mem::take(&mut *self.lock_samples()?);
        let (sample_rate, channels) = self.format.take().unwrap_or((0, 0));

        if samples.is_empty() {
            let stream_error = self
                .stream_error
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .take();
            if let Some(reason) = stream_error {
                warn!(reason = %reason, "Capture stopped with a stream error and no audio");
                return Err(TrackerError::CaptureFailed {
                    kind: classify_capture_message(&reason),
                    reason,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        info!(sample_count = samples.len(), "Audio capture stopped");

        Ok(CapturedAudio {
            samples,
            sample_rate,
            channels,
        })
    }

    fn limit_reached(&self) -> bool {
        self.limit_reached.load(Ordering::Acquire)
    }

    fn recent_levels(&self) -> Vec<f32> {
        self.levels.lock().unwrap_or_else(|e| e.into_inner()).to_vec()
    }

    #[track_caller]
    fn take_error(&mut self) -> Option<TrackerError> {
        let reason = self
            .stream_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()?;

        Some(TrackerError::CaptureFailed {
            kind: classify_capture_message(&reason),
            reason,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
