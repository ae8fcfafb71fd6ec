use crate::config::{PROGRESS_CAP, PROGRESS_STEP};
use crate::upload::{SelectedFile, Validation};
use std::path::PathBuf;
use std::time::Instant;

pub const CONVERTING_TEXT: &str = "Converting...";
pub const DONE_TEXT: &str = "Done!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// Request in flight; progress is simulated.
    Converting,
    /// 2xx received, body being read and saved.
    Downloading,
    /// Saved; the form resets once `reset_at` passes.
    Completed { reset_at: Instant },
}

impl SessionPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SessionPhase::Converting | SessionPhase::Downloading)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressState {
    pub visible: bool,
    pub percent: u8,
    pub status_text: String,
}

impl ProgressState {
    pub fn start(&mut self) {
        self.visible = true;
        self.percent = 0;
        self.status_text.clear();
    }

    /// One simulated step. Returns false once the cap is reached.
    pub fn advance(&mut self) -> bool {
        if self.percent >= PROGRESS_CAP {
            return false;
        }
        self.percent = (self.percent + PROGRESS_STEP).min(PROGRESS_CAP);
        self.status_text = CONVERTING_TEXT.to_string();
        true
    }

    pub fn complete(&mut self) {
        self.percent = 100;
        self.status_text = DONE_TEXT.to_string();
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.percent = 0;
        self.status_text.clear();
    }

    pub fn fraction(&self) -> f32 {
        f32::from(self.percent) / 100.0
    }
}

/// Single error message; a new error replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct ErrorBanner {
    message: String,
    visible: bool,
}

impl ErrorBanner {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DropZone {
    highlighted: bool,
}

impl DropZone {
    pub fn set_hovered(&mut self, hovered: bool) {
        self.highlighted = hovered;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

pub struct UploadState {
    pub selection: Option<SelectedFile>,
    pub validation: Validation,
    pub phase: SessionPhase,
    pub progress: ProgressState,
    pub error: ErrorBanner,
    pub drop_zone: DropZone,
    pub last_download: Option<PathBuf>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            selection: None,
            validation: Validation::Empty,
            phase: SessionPhase::Idle,
            progress: ProgressState::default(),
            error: ErrorBanner::default(),
            drop_zone: DropZone::default(),
            last_download: None,
        }
    }
}

impl UploadState {
    pub fn file_info(&self) -> &str {
        self.validation.info_text()
    }

    pub fn can_submit(&self) -> bool {
        self.validation.is_ready() && self.phase == SessionPhase::Idle
    }

    /// Back to the initial form, keeping the error banner and last download.
    pub fn clear_form(&mut self) {
        self.selection = None;
        self.validation = Validation::Empty;
        self.phase = SessionPhase::Idle;
        self.progress.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_caps_at_ninety_in_steps_of_ten() {
        let mut progress = ProgressState::default();
        progress.start();

        let mut seen = Vec::new();
        while progress.advance() {
            seen.push(progress.percent);
        }

        assert_eq!(seen, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert_eq!(progress.status_text, "Converting...");
        assert!(!progress.advance());
        assert_eq!(progress.percent, 90);
    }

    #[test]
    fn hide_resets_to_zero() {
        let mut progress = ProgressState::default();
        progress.start();
        progress.advance();
        progress.complete();
        assert_eq!(progress.fraction(), 1.0);

        progress.hide();
        assert!(!progress.visible);
        assert_eq!(progress.percent, 0);
        assert!(progress.status_text.is_empty());
    }

    #[test]
    fn error_banner_overwrites_and_dismisses() {
        let mut banner = ErrorBanner::default();
        assert!(!banner.is_visible());

        banner.show("first");
        banner.show("second");
        assert!(banner.is_visible());
        assert_eq!(banner.message(), "second");

        banner.dismiss();
        assert!(!banner.is_visible());
    }
}
