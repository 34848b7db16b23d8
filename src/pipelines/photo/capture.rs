// SPDX-License-Identifier: MPL-2.0

//! Photo capture from a camera session
//!
//! Wraps the session's capture call and gathers what the preview screen
//! shows about the new temp file.

use crate::backends::camera::{CameraSession, TempFilePath};
use crate::errors::CameraError;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

/// A captured photo waiting for the user's decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Temp file holding the image
    pub temp: TempFilePath,
    /// Size of the temp file in bytes
    pub size_bytes: u64,
    /// Pixel dimensions, when the header could be read
    pub dimensions: Option<(u32, u32)>,
    pub captured_at: DateTime<Local>,
}

/// Photo capture handler
pub struct PhotoCapture;

impl PhotoCapture {
    /// Capture a photo from the camera session
    ///
    /// # Returns
    /// * `Ok(CapturedPhoto)` - Temp file plus preview details
    /// * `Err(CameraError)` - Capture failed or the camera is busy
    pub async fn capture_from_session(
        session: &CameraSession,
    ) -> Result<CapturedPhoto, CameraError> {
        info!(backend = %session.name(), "Capturing photo");

        let temp = session.capture().await?;
        let captured_at = Local::now();

        let size_bytes = tokio::fs::metadata(temp.as_path())
            .await
            .map(|m| m.len())
            .map_err(|e| {
                CameraError::CaptureFailed(format!("Capture file missing {}: {}", temp, e))
            })?;

        let dimensions = Self::read_dimensions(&temp).await;

        debug!(
            path = %temp,
            size_bytes,
            dimensions = ?dimensions,
            "Photo captured"
        );

        Ok(CapturedPhoto {
            temp,
            size_bytes,
            dimensions,
            captured_at,
        })
    }

    /// Read the image header without decoding pixels
    async fn read_dimensions(temp: &TempFilePath) -> Option<(u32, u32)> {
        let path = temp.as_path().to_path_buf();
        let result = tokio::task::spawn_blocking(move || image::image_dimensions(&path))
            .await
            .ok()?;

        match result {
            Ok(dimensions) => Some(dimensions),
            Err(e) => {
                warn!(path = %temp, error = %e, "Could not read image dimensions");
                None
            }
        }
    }
}
