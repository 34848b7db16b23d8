// SPDX-License-Identifier: MPL-2.0

//! Async photo capture pipeline
//!
//! ```text
//! CameraSession → Capture → Review → Name → Persist
//!                              ↓        ↓
//!                           Discard  Discard
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Capture**: The session writes a temp file (blocking pool)
//! 2. **Review**: The user keeps or discards the capture
//! 3. **Name**: The user confirms a name, prefilled with the next free one
//! 4. **Persist**: The temp file is copied into the photo directory

pub mod capture;
pub mod encoding;
pub mod flow;

pub use capture::{CapturedPhoto, PhotoCapture};
pub use encoding::EncodingQuality;
pub use flow::{
    CaptureDialog, CaptureFlow, FlowOutcome, FlowState, Navigation, Notification,
    NotificationKind, SaveTarget,
};

use crate::backends::camera::CameraSession;
use crate::errors::FlowError;
use crate::storage::PhotoDirectory;
use tracing::{info, warn};

/// Complete photo capture pipeline
///
/// Orchestrates the capture → review → name → save workflow against one
/// photo directory.
pub struct PhotoPipeline {
    directory: PhotoDirectory,
}

impl PhotoPipeline {
    pub fn new(directory: PhotoDirectory) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &PhotoDirectory {
        &self.directory
    }

    /// Run one interactive capture with a fresh flow
    pub async fn run<D: CaptureDialog>(
        &self,
        session: &CameraSession,
        dialog: &mut D,
    ) -> Result<FlowOutcome, FlowError> {
        let mut flow = CaptureFlow::new();
        self.run_flow(&mut flow, session, dialog).await
    }

    /// Run one interactive capture on an existing flow
    ///
    /// # Arguments
    /// * `flow` - Must be idle or finished
    /// * `session` - Open camera session
    /// * `dialog` - Source of the user's review and naming decisions
    ///
    /// # Returns
    /// * `Ok(FlowOutcome)` - What to show and where to navigate
    /// * `Err(FlowError)` - The flow was in the middle of another capture
    pub async fn run_flow<D: CaptureDialog>(
        &self,
        flow: &mut CaptureFlow,
        session: &CameraSession,
        dialog: &mut D,
    ) -> Result<FlowOutcome, FlowError> {
        flow.begin_capture()?;

        let photo = match PhotoCapture::capture_from_session(session).await {
            Ok(photo) => photo,
            Err(e) => return flow.capture_failed(&e),
        };
        flow.capture_succeeded(photo.temp.clone())?;

        if !dialog.review(&photo).await {
            return flow.discard();
        }
        flow.request_name()?;

        let suggestion = match self.directory.next_available_name().await {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(error = %e, "No name suggestion available");
                None
            }
        };

        let name = dialog.ask_name(suggestion.as_deref()).await;
        flow.finish(&self.directory, name).await
    }

    /// Capture and save without asking the user anything
    pub async fn capture_and_save(
        &self,
        session: &CameraSession,
        target: SaveTarget,
    ) -> Result<FlowOutcome, FlowError> {
        let mut flow = CaptureFlow::new();
        flow.begin_capture()?;

        let photo = match PhotoCapture::capture_from_session(session).await {
            Ok(photo) => photo,
            Err(e) => return flow.capture_failed(&e),
        };
        flow.capture_succeeded(photo.temp)?;
        flow.request_name()?;

        info!(target = ?target, "Saving capture without prompting");
        flow.save(&self.directory, target).await
    }
}
