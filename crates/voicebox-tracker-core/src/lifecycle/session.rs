use crate::{
    CoreResult, TrackerError,
    capture::{CaptureService, CapturedAudio},
    lifecycle::{LifecycleFailure, RecordingLifecycleState, StatusCopy, status_copy, transition},
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// One recording session: the single owner of a lifecycle state.
///
/// Every operation checks the transition table before touching the capture
/// service. Capture failures move the session to `error`, where it stays
/// until `reset` or `arm` is called explicitly.
pub struct RecordingSession<C> {
    session_id: Uuid,
    state: RecordingLifecycleState,
    capture: C,
    device_id: Option<String>,
    max_duration: Duration,
    last_failure: Option<LifecycleFailure>,
}

impl<C: CaptureService> RecordingSession<C> {
    /// Create an idle session capturing through `capture`.
    pub fn new(capture: C, max_duration: Duration) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session_id = %session_id, "Recording session created");

        Self {
            session_id,
            state: RecordingLifecycleState::Idle,
            capture,
            device_id: None,
            max_duration,
            last_failure: None,
        }
    }

    /// Id used to correlate this session's log lines.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RecordingLifecycleState {
        self.state
    }

    /// Status text for the current state.
    pub fn status(&self) -> StatusCopy {
        status_copy(self.state)
    }

    /// Device used by the next (or current) capture; `None` means default.
    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Failure that put the session in `error`, if any.
    pub fn last_failure(&self) -> Option<&LifecycleFailure> {
        self.last_failure.as_ref()
    }

    /// Capture service, for level and limit queries.
    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Choose the device for the next capture.
    pub fn select_device(&mut self, device_id: Option<String>) {
        debug!(session_id = %self.session_id, device = ?device_id, "Input device selected");
        self.device_id = device_id;
    }

    /// Move to `armed`.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn arm(&mut self) -> CoreResult<()> {
        self.apply(RecordingLifecycleState::Armed)?;
        self.last_failure = None;
        Ok(())
    }

    /// Start capturing. From `paused` this resumes instead.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn start(&mut self) -> CoreResult<()> {
        if self.state == RecordingLifecycleState::Paused {
            return self.resume();
        }
        self.guard(RecordingLifecycleState::Recording)?;
        if self.state == RecordingLifecycleState::Recording {
            return Ok(());
        }

        if let Err(e) = self
            .capture
            .start_capture(self.max_duration, self.device_id.as_deref())
        {
            self.capture_failed(&e);
            return Err(e);
        }

        self.set_state(RecordingLifecycleState::Recording);
        Ok(())
    }

    /// Suspend the running capture.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn pause(&mut self) -> CoreResult<()> {
        self.guard(RecordingLifecycleState::Paused)?;
        if self.state == RecordingLifecycleState::Paused {
            return Ok(());
        }

        if let Err(e) = self.capture.pause() {
            self.capture_failed(&e);
            return Err(e);
        }

        self.set_state(RecordingLifecycleState::Paused);
        Ok(())
    }

    /// Continue a paused capture.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn resume(&mut self) -> CoreResult<()> {
        if self.state != RecordingLifecycleState::Paused {
            return Err(self.reject(RecordingLifecycleState::Recording));
        }

        if let Err(e) = self.capture.resume() {
            self.capture_failed(&e);
            return Err(e);
        }

        self.set_state(RecordingLifecycleState::Recording);
        Ok(())
    }

    /// Stop capturing and move to `processing`, returning the audio.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn stop(&mut self) -> CoreResult<CapturedAudio> {
        if !self.state.holds_capture() {
            return Err(self.reject(RecordingLifecycleState::Processing));
        }

        match self.capture.stop_capture() {
            Ok(audio) => {
                self.set_state(RecordingLifecycleState::Processing);
                info!(
                    session_id = %self.session_id,
                    samples = audio.samples.len(),
                    duration_ms = audio.duration().as_millis(),
                    "Capture handed off for processing"
                );
                Ok(audio)
            }
            Err(e) => {
                self.capture_failed(&e);
                Err(e)
            }
        }
    }

    /// Mark processing as finished.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn mark_ready(&mut self) -> CoreResult<()> {
        self.apply(RecordingLifecycleState::Ready)
    }

    /// Enter `error` with `failure`, discarding any running capture.
    #[instrument(skip(self, failure), fields(session_id = %self.session_id))]
    pub fn fail(&mut self, failure: LifecycleFailure) {
        self.discard_capture();

        warn!(
            session_id = %self.session_id,
            from = %self.state,
            kind = %failure.kind,
            summary = %failure.summary,
            detail = %failure.detail,
            "Recording session failed"
        );

        self.set_state(RecordingLifecycleState::Error);
        self.last_failure = Some(failure);
    }

    /// Enter `error` for a native capture error.
    pub fn capture_failed(&mut self, err: &TrackerError) {
        self.fail(LifecycleFailure::from(err));
    }

    /// Fail the session if the capture stream reported an error.
    ///
    /// Returns true when the session moved to `error`.
    pub fn poll_capture_error(&mut self) -> bool {
        let Some(err) = self.capture.take_error() else {
            return false;
        };

        if self.state.holds_capture() {
            self.capture_failed(&err);
            true
        } else {
            debug!(session_id = %self.session_id, error = %err, "Ignoring capture error outside a capture");
            false
        }
    }

    /// React to `device_id` disappearing from the device listing.
    ///
    /// Mid-capture this fails the session with a device error. Otherwise the
    /// selection is cleared so the next capture falls back to the default.
    /// Returns true when the session moved to `error`.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn device_disconnected(&mut self, device_id: &str) -> bool {
        if self.device_id.as_deref() != Some(device_id) {
            return false;
        }

        if self.state.holds_capture() {
            self.fail(LifecycleFailure::device_disconnected(device_id));
            true
        } else {
            info!(session_id = %self.session_id, device = %device_id, "Selected device disconnected");
            self.device_id = None;
            false
        }
    }

    /// Return to `idle`, discarding any capture and clearing the failure.
    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn reset(&mut self) -> CoreResult<()> {
        self.guard(RecordingLifecycleState::Idle)?;
        self.discard_capture();
        self.last_failure = None;
        self.set_state(RecordingLifecycleState::Idle);
        Ok(())
    }

    #[track_caller]
    fn apply(&mut self, target: RecordingLifecycleState) -> CoreResult<()> {
        self.guard(target)?;
        self.set_state(target);
        Ok(())
    }

    #[track_caller]
    fn guard(&self, target: RecordingLifecycleState) -> CoreResult<()> {
        if transition(self.state, target).valid {
            Ok(())
        } else {
            Err(self.reject(target))
        }
    }

    #[track_caller]
    fn reject(&self, target: RecordingLifecycleState) -> TrackerError {
        warn!(
            session_id = %self.session_id,
            from = %self.state,
            to = %target,
            "Rejected lifecycle transition"
        );

        TrackerError::InvalidTransition {
            from: self.state,
            to: target,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    fn set_state(&mut self, next: RecordingLifecycleState) {
        if self.state != next {
            info!(session_id = %self.session_id, from = %self.state, to = %next, "Lifecycle transition");
            self.state = next;
        }
    }

    fn discard_capture(&mut self) {
        if !self.state.holds_capture() {
            return;
        }
        if let Err(e) = self.capture.stop_capture() {
            debug!(session_id = %self.session_id, error = %e, "Discarded capture did not stop cleanly");
        }
    }
}
