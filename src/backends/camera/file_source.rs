// SPDX-License-Identifier: MPL-2.0

//! Virtual camera backed by a file or a generated test pattern
//!
//! Stands in for camera hardware: every capture writes a JPEG into the
//! capture directory under a unique `capture_<uuid>.jpg` name.

use super::types::{BackendResult, CaptureSource, TempFilePath};
use super::CameraBackend;
use crate::constants::{directories, virtual_camera};
use crate::errors::CameraError;
use crate::pipelines::photo::encoding::{EncodingQuality, encode_test_pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Camera whose sensor is a JPEG file or a test pattern
pub struct VirtualCamera {
    source: CaptureSource,
    capture_dir: PathBuf,
    /// Encoded test pattern, built on initialize
    pattern: Option<Vec<u8>>,
    initialized: bool,
}

impl VirtualCamera {
    pub fn new(source: CaptureSource, capture_dir: PathBuf) -> Self {
        Self {
            source,
            capture_dir,
            pattern: None,
            initialized: false,
        }
    }

    fn next_capture_path(&self) -> PathBuf {
        self.capture_dir.join(format!(
            "{}{}.jpg",
            directories::CAPTURE_FILE_PREFIX,
            uuid::Uuid::new_v4()
        ))
    }
}

/// Check that `path` is an existing JPEG file usable as a capture source
fn validate_source_file(path: &Path) -> BackendResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !virtual_camera::is_source_extension(&extension) {
        return Err(CameraError::InitializationFailed(format!(
            "Unsupported source format: {}",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path).map_err(|e| {
        CameraError::InitializationFailed(format!("Cannot open {}: {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(CameraError::InitializationFailed(format!(
            "Source is not a file: {}",
            path.display()
        )));
    }
    Ok(())
}

impl CameraBackend for VirtualCamera {
    fn name(&self) -> String {
        format!("virtual camera ({})", self.source)
    }

    fn initialize(&mut self) -> BackendResult<()> {
        if self.initialized {
            return Ok(());
        }

        std::fs::create_dir_all(&self.capture_dir).map_err(|e| {
            CameraError::InitializationFailed(format!(
                "Cannot create capture directory {}: {}",
                self.capture_dir.display(),
                e
            ))
        })?;

        match &self.source {
            CaptureSource::File(path) => validate_source_file(path)?,
            CaptureSource::TestPattern { width, height } => {
                let data = encode_test_pattern(*width, *height, EncodingQuality::High)
                    .map_err(CameraError::InitializationFailed)?;
                debug!(size = data.len(), "Test pattern encoded");
                self.pattern = Some(data);
            }
        }

        self.initialized = true;
        info!(source = %self.source, dir = %self.capture_dir.display(), "Virtual camera initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> BackendResult<()> {
        if self.initialized {
            info!(source = %self.source, "Virtual camera shut down");
        }
        self.initialized = false;
        self.pattern = None;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn capture(&mut self) -> BackendResult<TempFilePath> {
        if !self.initialized {
            return Err(CameraError::NotInitialized);
        }

        let path = self.next_capture_path();
        let written = match (&self.source, &self.pattern) {
            (CaptureSource::File(source), _) => std::fs::copy(source, &path),
            (CaptureSource::TestPattern { .. }, Some(data)) => {
                std::fs::write(&path, data).map(|_| data.len() as u64)
            }
            (CaptureSource::TestPattern { .. }, None) => {
                return Err(CameraError::NotInitialized);
            }
        }
        .map_err(|e| CameraError::CaptureFailed(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), bytes = written, "Frame written to temp file");
        Ok(TempFilePath::new(path))
    }
}
