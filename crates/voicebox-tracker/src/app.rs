use crate::{
    AppError, AppResult, Command,
    config::Config,
    meter::LevelMeter,
    progress_view::{ProgressEvent, ProgressView},
    task_view::diff,
    wav::write_wav,
};

use voicebox_tracker_core::{
    capture::{CaptureFailureKind, CaptureService, CpalCapturer, probe_input_signal},
    device::{CpalDeviceSource, DeviceSource, NormalizedInputDevice, normalize, resolve_selection},
    lifecycle::{LifecycleFailure, RecordingLifecycleState, RecordingSession},
    poll::{ProgressPoller, TaskListPoller},
    tasks::{HttpTaskSource, TaskMap},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use error_location::ErrorLocation;
use jiff::Timestamp;
use tracing::{info, instrument, warn};

/// How often a running recording is checked for stream errors and the limit.
const CAPTURE_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Capture checks between two printed level readings.
const METER_EVERY_CHECKS: u32 = 10;

/// Runs one CLI command against a loaded configuration.
pub struct App {
    pub(crate) config: Config,
    pub(crate) config_path: PathBuf,
}

impl App {
    /// Create an app over `config`, which was loaded from `config_path`.
    pub(crate) fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Run `command` to completion.
    #[instrument(skip(self))]
    pub(crate) async fn run(self, command: Command) -> AppResult<()> {
        match command {
            Command::Tasks { interval_ms } => self.follow_tasks(interval_ms).await,
            Command::Progress {
                task_id,
                interval_ms,
            } => self.follow_progress(task_id, interval_ms).await,
            Command::Devices { current, save } => self.list_devices(current, save),
            Command::Probe {
                device,
                duration_ms,
            } => self.probe(device, duration_ms).await,
            Command::Record {
                device,
                max_seconds,
                output,
            } => self.record(device, max_seconds, output).await,
        }
    }

    fn task_source(&self) -> AppResult<Arc<HttpTaskSource>> {
        let source = HttpTaskSource::new(
            &self.config.server.base_url,
            self.config.server.request_timeout(),
        )?;
        info!(url = %source.url(), "Polling backend");
        Ok(Arc::new(source))
    }

    async fn follow_tasks(&self, interval_ms: Option<u64>) -> AppResult<()> {
        let interval = interval_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.config.polling.task_list_interval());

        let (handle, mut view) =
            TaskListPoller::start(self.task_source()?, interval, self.config.polling.terminal_ttl());

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut previous = TaskMap::new();

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Stop requested");
                    break;
                }
                changed = view.changed() => {
                    if changed.is_err() {
                        warn!("Task list poller stopped");
                        break;
                    }
                    let current = view.borrow_and_update().clone();
                    for change in diff(&previous, &current) {
                        println!("{change}");
                    }
                    previous = current;
                }
            }
        }

        handle.join().await;
        Ok(())
    }

    async fn follow_progress(&self, task_id: String, interval_ms: Option<u64>) -> AppResult<()> {
        let interval = interval_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.config.polling.progress_interval());

        let (handle, mut state) = ProgressPoller::start(self.task_source()?, task_id.clone(), interval);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut view = ProgressView::new(task_id);
        let mut outcome = Ok(());

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Stop requested");
                    break;
                }
                changed = state.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let current = state.borrow_and_update().clone();
                    match view.observe(&current) {
                        ProgressEvent::Line(line) => println!("{line}"),
                        ProgressEvent::Finished(line) => {
                            println!("{line}");
                            break;
                        }
                        ProgressEvent::Failed(line) => {
                            eprintln!("{line}");
                            outcome = Err(AppError::ProcessingFailed {
                                reason: line,
                                location: ErrorLocation::from(Location::caller()),
                            });
                            break;
                        }
                    }
                }
            }
        }

        handle.join().await;
        outcome
    }

    fn list_devices(mut self, current: Option<String>, save: bool) -> AppResult<()> {
        let devices = read_devices(&CpalDeviceSource::new())?;
        let current = current.or_else(|| self.config.audio.selected_device.clone());
        let resolution = resolve_selection(current.as_deref(), &devices);

        for device in &devices {
            let marker = if resolution.selected_device_id.as_deref() == Some(device.id.as_str()) {
                "*"
            } else {
                " "
            };
            let default = if device.is_default { " (default)" } else { "" };
            println!(
                "{marker} {}{default}  {} [{:?}, {:?}] {}",
                device.name,
                device.id,
                device.availability,
                device.permission,
                device.diagnostics.as_deref().unwrap_or("")
            );
        }

        if let Some(missing) = &resolution.disconnected_device_id {
            println!("Device '{missing}' is no longer connected");
        }

        if save {
            self.config.audio.selected_device = resolution.selected_device_id.clone();
            self.config.save_to(&self.config_path)?;
            println!("Saved selection to {}", self.config_path.display());
        }

        Ok(())
    }

    async fn probe(&self, device: Option<String>, duration_ms: u64) -> AppResult<()> {
        let device = device.or_else(|| self.config.audio.selected_device.clone());
        let duration = Duration::from_millis(duration_ms);

        let probe = tokio::task::spawn_blocking(move || probe_input_signal(device.as_deref(), duration))
            .await
            .map_err(|e| AppError::TaskJoinFailed {
                reason: format!("Probe did not complete: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        println!(
            "{}: peak {:.4}, rms {:.4}, level {:.2} over {} samples",
            probe.device_name, probe.peak, probe.rms, probe.normalized_level, probe.sample_count
        );
        println!("{}", probe.message);

        Ok(())
    }

    async fn record(
        &self,
        device: Option<String>,
        max_seconds: Option<u64>,
        output: Option<PathBuf>,
    ) -> AppResult<()> {
        let max_duration = max_seconds
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.config.audio.max_duration());
        let output = output.unwrap_or_else(default_output_path);

        let device_source = CpalDeviceSource::new();
        let requested = device.or_else(|| self.config.audio.selected_device.clone());
        let resolution = resolve_selection(requested.as_deref(), &read_devices(&device_source)?);
        if let Some(missing) = &resolution.disconnected_device_id {
            warn!(device = %missing, "Requested input device not found, falling back");
        }

        let mut session = RecordingSession::new(CpalCapturer::new(), max_duration);
        session.select_device(resolution.selected_device_id);
        session.arm()?;
        report_status(&session);

        if session.start().is_err() {
            return Err(session_failed(&session));
        }
        report_status(&session);
        println!("Press Ctrl-C to stop");

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut capture_check = tokio::time::interval(CAPTURE_CHECK_INTERVAL);
        let mut device_refresh = tokio::time::interval(self.config.audio.device_refresh_interval());
        device_refresh.tick().await;
        let mut checks: u32 = 0;

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!(session_id = %session.session_id(), "Stop requested");
                    break;
                }
                _ = capture_check.tick() => {
                    if session.poll_capture_error() {
                        break;
                    }
                    if session.capture().limit_reached() {
                        info!(session_id = %session.session_id(), "Maximum duration reached");
                        break;
                    }
                    checks = checks.wrapping_add(1);
                    if checks % METER_EVERY_CHECKS == 0 {
                        println!("{}", LevelMeter::new(&session.capture().recent_levels()));
                    }
                }
                _ = device_refresh.tick() => {
                    match read_devices(&device_source) {
                        Ok(devices) => {
                            let refreshed = resolve_selection(session.device_id(), &devices);
                            if let Some(gone) = refreshed.disconnected_device_id {
                                if session.device_disconnected(&gone) {
                                    break;
                                }
                            }
                        }
                        Err(e) => warn!(error = %e, "Device refresh failed"),
                    }
                }
            }
        }

        if session.state() == RecordingLifecycleState::Error {
            return Err(session_failed(&session));
        }

        let Ok(audio) = session.stop() else {
            return Err(session_failed(&session));
        };
        report_status(&session);

        if let Err(e) = write_wav(&output, &audio) {
            session.fail(LifecycleFailure::new(CaptureFailureKind::Conversion, e.to_string()));
            return Err(session_failed(&session));
        }

        session.mark_ready()?;
        report_status(&session);
        println!(
            "Saved {:.1}s to {}",
            audio.duration().as_secs_f32(),
            output.display()
        );

        Ok(())
    }
}

fn read_devices(source: &impl DeviceSource) -> AppResult<Vec<NormalizedInputDevice>> {
    let raw = source.list_input_devices()?;
    Ok(normalize(&raw, source.permission_state()))
}

fn default_output_path() -> PathBuf {
    let stamp = Timestamp::now().strftime("%Y%m%d-%H%M%S");
    Path::new(".").join(format!("voicebox-recording-{stamp}.wav"))
}

fn report_status<C: CaptureService>(session: &RecordingSession<C>) {
    let status = session.status();
    println!("{}: {}", status.label, status.hint);
}

/// Print the session's failure and turn it into an error.
#[track_caller]
fn session_failed<C: CaptureService>(session: &RecordingSession<C>) -> AppError {
    let summary = session
        .last_failure()
        .map(|failure| failure.summary.clone())
        .unwrap_or_else(|| session.status().hint.to_string());
    eprintln!("{summary}");

    AppError::RecordingFailed {
        summary,
        location: ErrorLocation::from(Location::caller()),
    }
}
