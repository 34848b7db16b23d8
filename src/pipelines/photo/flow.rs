// SPDX-License-Identifier: MPL-2.0

//! Capture-to-save state machine
//!
//! ```text
//! Idle ─▶ Capturing ─▶ Captured(temp) ─▶ AwaitingName ─▶ Saved(photo)
//!            │               │                 │
//!            ▼               ▼                 ▼
//!          Idle          Discarded         Discarded
//!      (capture error)
//! ```
//!
//! Discarding never touches the photo directory: the temp file is simply
//! abandoned. A save attempt always navigates back to the previous screen,
//! whether it succeeded or failed.

use crate::backends::camera::TempFilePath;
use crate::constants::timing;
use crate::errors::{CameraError, FlowError};
use crate::pipelines::photo::capture::CapturedPhoto;
use crate::storage::{PhotoDirectory, PhotoFile};
use std::future::Future;
use std::time::Duration;
use tracing::{error, info};

/// Where the user is in a single capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Capturing,
    Captured(TempFilePath),
    AwaitingName(TempFilePath),
    Saved(PhotoFile),
    Discarded,
}

impl FlowState {
    pub fn label(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::Capturing => "capturing",
            FlowState::Captured(_) => "captured",
            FlowState::AwaitingName(_) => "awaiting a name",
            FlowState::Saved(_) => "saved",
            FlowState::Discarded => "discarded",
        }
    }
}

/// Screen change requested by the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    ReturnToPrevious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// How long the notification stays visible
    pub fn duration(&self) -> Duration {
        timing::NOTIFICATION_DURATION
    }
}

/// Result of a step that ends user interaction with the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    pub notification: Option<Notification>,
    pub navigation: Navigation,
    /// Set when a photo was persisted
    pub saved: Option<PhotoFile>,
}

/// How the photo should be named when saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// User supplied name; `.jpg` is appended when missing
    Named(String),
    /// Next free `supercamNNN` name, allocated under the directory lock
    Auto,
}

/// User decisions during a capture
pub trait CaptureDialog {
    /// Preview the capture; `true` keeps it, `false` discards it
    fn review(&mut self, photo: &CapturedPhoto) -> impl Future<Output = bool>;

    /// Ask for a file name; `Some` confirms, `None` cancels
    ///
    /// `suggestion` is the allocator's next free name, if it could be read.
    fn ask_name(&mut self, suggestion: Option<&str>) -> impl Future<Output = Option<String>>;
}

/// State machine for one capture-to-save flow
#[derive(Debug, Clone)]
pub struct CaptureFlow {
    state: FlowState,
}

impl Default for CaptureFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            from: self.state.label(),
            action,
        }
    }

    /// Start a capture; allowed when idle or after a previous flow finished
    pub fn begin_capture(&mut self) -> Result<(), FlowError> {
        match self.state {
            FlowState::Idle | FlowState::Saved(_) | FlowState::Discarded => {
                self.state = FlowState::Capturing;
                Ok(())
            }
            _ => Err(self.invalid("capture")),
        }
    }

    pub fn capture_succeeded(&mut self, temp: TempFilePath) -> Result<(), FlowError> {
        if self.state != FlowState::Capturing {
            return Err(self.invalid("finish capture"));
        }
        self.state = FlowState::Captured(temp);
        Ok(())
    }

    /// Report a capture error; the user stays on the camera screen
    pub fn capture_failed(&mut self, err: &CameraError) -> Result<FlowOutcome, FlowError> {
        if self.state != FlowState::Capturing {
            return Err(self.invalid("fail capture"));
        }
        error!(error = %err, "Capture failed");
        self.state = FlowState::Idle;
        Ok(FlowOutcome {
            notification: Some(Notification::error(err.to_string())),
            navigation: Navigation::Stay,
            saved: None,
        })
    }

    /// User chose to keep the capture and is asked for a name
    pub fn request_name(&mut self) -> Result<(), FlowError> {
        match &self.state {
            FlowState::Captured(temp) => {
                self.state = FlowState::AwaitingName(temp.clone());
                Ok(())
            }
            _ => Err(self.invalid("request a name")),
        }
    }

    /// Abandon the capture; the photo directory is not touched
    pub fn discard(&mut self) -> Result<FlowOutcome, FlowError> {
        match &self.state {
            FlowState::Captured(temp) | FlowState::AwaitingName(temp) => {
                info!(path = %temp, "Capture discarded");
                self.state = FlowState::Discarded;
                Ok(FlowOutcome {
                    notification: None,
                    navigation: Navigation::ReturnToPrevious,
                    saved: None,
                })
            }
            _ => Err(self.invalid("discard")),
        }
    }

    /// Apply the name dialog's answer
    ///
    /// `None` (cancelled) discards; `Some(name)` saves under that name.
    pub async fn finish(
        &mut self,
        directory: &PhotoDirectory,
        name: Option<String>,
    ) -> Result<FlowOutcome, FlowError> {
        match name {
            Some(name) => self.save(directory, SaveTarget::Named(name)).await,
            None => self.discard(),
        }
    }

    /// Persist the capture
    ///
    /// Success moves to `Saved`; failure goes back to `Captured` so the temp
    /// file is still known. Both navigate back to the previous screen.
    pub async fn save(
        &mut self,
        directory: &PhotoDirectory,
        target: SaveTarget,
    ) -> Result<FlowOutcome, FlowError> {
        let FlowState::AwaitingName(temp) = &self.state else {
            return Err(self.invalid("save"));
        };
        let temp = temp.clone();

        let result = match &target {
            SaveTarget::Named(name) => directory.save_photo(temp.as_path(), name).await,
            SaveTarget::Auto => directory.save_auto_named(temp.as_path()).await,
        };

        let outcome = match result {
            Ok(photo) => {
                let notification = Notification::info(format!("Saved {}", photo.name));
                self.state = FlowState::Saved(photo.clone());
                FlowOutcome {
                    notification: Some(notification),
                    navigation: Navigation::ReturnToPrevious,
                    saved: Some(photo),
                }
            }
            Err(e) => {
                error!(error = %e, target = ?target, "Saving photo failed");
                self.state = FlowState::Captured(temp);
                FlowOutcome {
                    notification: Some(Notification::error(e.to_string())),
                    navigation: Navigation::ReturnToPrevious,
                    saved: None,
                }
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_flow() -> CaptureFlow {
        let mut flow = CaptureFlow::new();
        flow.begin_capture().unwrap();
        flow.capture_succeeded(TempFilePath::new("/tmp/capture_x.jpg"))
            .unwrap();
        flow
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut flow = captured_flow();
        assert!(matches!(flow.state(), FlowState::Captured(_)));
        flow.request_name().unwrap();
        assert!(matches!(flow.state(), FlowState::AwaitingName(_)));
    }

    #[test]
    fn test_cannot_capture_twice() {
        let mut flow = CaptureFlow::new();
        flow.begin_capture().unwrap();
        assert_eq!(
            flow.begin_capture(),
            Err(FlowError::InvalidTransition {
                from: "capturing",
                action: "capture"
            })
        );
    }

    #[test]
    fn test_capture_failure_returns_to_idle() {
        let mut flow = CaptureFlow::new();
        flow.begin_capture().unwrap();
        let outcome = flow
            .capture_failed(&CameraError::CaptureFailed("sensor".into()))
            .unwrap();

        assert_eq!(flow.state(), &FlowState::Idle);
        assert_eq!(outcome.navigation, Navigation::Stay);
        assert_eq!(
            outcome.notification.map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[test]
    fn test_discard_from_preview() {
        let mut flow = captured_flow();
        let outcome = flow.discard().unwrap();
        assert_eq!(flow.state(), &FlowState::Discarded);
        assert!(outcome.saved.is_none());
        // A new capture may start afterwards
        flow.begin_capture().unwrap();
    }

    #[test]
    fn test_discard_requires_a_capture() {
        let mut flow = CaptureFlow::new();
        assert!(flow.discard().is_err());
    }

    #[tokio::test]
    async fn test_save_requires_awaiting_name() {
        let dir = tempfile::tempdir().unwrap();
        let directory = PhotoDirectory::new(dir.path());
        let mut flow = captured_flow();

        let err = flow.save(&directory, SaveTarget::Auto).await.unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition {
                from: "captured",
                action: "save"
            }
        );
    }

    #[tokio::test]
    async fn test_cancelled_name_discards() {
        let dir = tempfile::tempdir().unwrap();
        let directory = PhotoDirectory::new(dir.path());
        let mut flow = captured_flow();
        flow.request_name().unwrap();

        let outcome = flow.finish(&directory, None).await.unwrap();
        assert_eq!(flow.state(), &FlowState::Discarded);
        assert!(outcome.saved.is_none());
    }

    #[tokio::test]
    async fn test_failed_save_still_returns_to_previous() {
        let dir = tempfile::tempdir().unwrap();
        let directory = PhotoDirectory::new(dir.path());
        // Temp file does not exist, so the copy fails
        let mut flow = captured_flow();
        flow.request_name().unwrap();

        let outcome = flow
            .finish(&directory, Some("beach".to_string()))
            .await
            .unwrap();

        assert_eq!(outcome.navigation, Navigation::ReturnToPrevious);
        assert!(outcome.saved.is_none());
        assert_eq!(
            outcome.notification.map(|n| n.kind),
            Some(NotificationKind::Error)
        );
        assert!(matches!(flow.state(), FlowState::Captured(_)));
    }
}
