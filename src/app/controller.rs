use super::state::{SessionPhase, UploadState};
use crate::config::RESET_DELAY;
use crate::upload::{validate, ConversionUpdate, SelectedFile, Validation, FALLBACK_ERROR};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Background work owned by the current submission. Dropping it aborts the
/// pipeline task, which in turn aborts its ticker.
struct ActiveSession {
    receiver: Receiver<ConversionUpdate>,
    task: Option<JoinHandle<()>>,
}

impl Drop for ActiveSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Drives the upload form: selection, validation, submission and reset.
/// Knows nothing about egui so it can be exercised directly in tests.
pub struct UploadController {
    state: UploadState,
    session: Option<ActiveSession>,
    reset_delay: Duration,
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new(RESET_DELAY)
    }
}

impl UploadController {
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            state: UploadState::default(),
            session: None,
            reset_delay,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    pub fn is_busy(&self) -> bool {
        self.state.phase != SessionPhase::Idle
    }

    /// Runs the validation rule on a new (or absent) selection.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        let validation = validate(file.as_ref());
        match &validation {
            Validation::Ready { info } => {
                log::info!("Selected {}", info);
                self.state.selection = file;
            }
            Validation::Rejected(error) => {
                log::info!("Rejected selection: {}", error);
                self.state.error.show(error.to_string());
                self.state.selection = None;
            }
            Validation::Empty => {
                self.state.selection = None;
            }
        }
        self.state.validation = validation;
    }

    pub fn select_path(&mut self, path: &Path) {
        match SelectedFile::from_path(path) {
            Ok(file) => self.select_file(Some(file)),
            Err(e) => self.reject_unreadable(&path.display().to_string(), &e),
        }
    }

    pub fn reject_unreadable(&mut self, name: &str, error: &std::io::Error) {
        log::warn!("Could not read {}: {}", name, error);
        self.select_file(None);
        self.state.error.show(format!("Could not read {name}: {error}"));
    }

    pub fn set_drag_hover(&mut self, hovered: bool) {
        self.state.drop_zone.set_hovered(hovered);
    }

    /// A drop behaves exactly like picking the first dropped file.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) {
        self.state.drop_zone.set_hovered(false);
        self.select_file(files.into_iter().next());
    }

    /// Starts a session if submit is enabled. The caller runs the pipeline
    /// with the returned file and sender, then hands the task back through
    /// [`Self::attach_task`].
    pub fn begin_submission(&mut self) -> Option<(SelectedFile, Sender<ConversionUpdate>)> {
        if !self.can_submit() {
            return None;
        }
        let file = self.state.selection.clone()?;

        let (sender, receiver) = mpsc::channel();
        self.session = Some(ActiveSession {
            receiver,
            task: None,
        });
        self.state.phase = SessionPhase::Converting;
        self.state.progress.start();

        log::info!("Submitting {} for conversion", file.name);
        Some((file, sender))
    }

    pub fn attach_task(&mut self, task: JoinHandle<()>) {
        match &mut self.session {
            Some(session) => session.task = Some(task),
            None => task.abort(),
        }
    }

    pub fn apply_update(&mut self, update: ConversionUpdate, now: Instant) {
        match update {
            ConversionUpdate::Tick => {
                if self.state.phase == SessionPhase::Converting {
                    self.state.progress.advance();
                }
            }
            ConversionUpdate::ResponseReceived => {
                if self.state.phase == SessionPhase::Converting {
                    self.state.progress.complete();
                    self.state.phase = SessionPhase::Downloading;
                }
            }
            ConversionUpdate::Downloaded(path) => {
                if !self.state.phase.is_in_flight() {
                    return;
                }
                self.state.progress.complete();
                self.state.last_download = Some(path);
                self.state.phase = SessionPhase::Completed {
                    reset_at: now + self.reset_delay,
                };
                self.session = None;
            }
            ConversionUpdate::Failed(message) => {
                if self.state.phase.is_in_flight() {
                    self.fail(message);
                }
            }
        }
    }

    /// Drains pending pipeline updates and performs a due reset. Call once
    /// per frame.
    pub fn poll(&mut self, now: Instant) {
        let mut updates = Vec::new();
        let mut disconnected = false;

        if let Some(session) = &self.session {
            loop {
                match session.receiver.try_recv() {
                    Ok(update) => updates.push(update),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        for update in updates {
            self.apply_update(update, now);
        }

        // The pipeline went away without reporting an outcome.
        if disconnected && self.state.phase.is_in_flight() {
            self.fail(FALLBACK_ERROR.to_string());
        }

        if let SessionPhase::Completed { reset_at } = self.state.phase {
            if now >= reset_at {
                self.reset_form();
            }
        }
    }

    /// Time left until the scheduled reset, if one is pending.
    pub fn reset_due_in(&self, now: Instant) -> Option<Duration> {
        match self.state.phase {
            SessionPhase::Completed { reset_at } => Some(reset_at.saturating_duration_since(now)),
            _ => None,
        }
    }

    pub fn reset_form(&mut self) {
        log::info!("Resetting upload form");
        self.session = None;
        self.state.clear_form();
    }

    pub fn dismiss_error(&mut self) {
        self.state.error.dismiss();
    }

    fn fail(&mut self, message: String) {
        self.session = None;
        self.state.phase = SessionPhase::Idle;
        self.state.progress.hide();
        self.state.error.show(message);
    }
}
