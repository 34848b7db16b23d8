// SPDX-License-Identifier: MPL-2.0

//! Shared types for camera backends

use crate::errors::CameraError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, CameraError>;

/// Path of a temporary file produced by a capture
///
/// Valid immediately after a successful capture. Nothing deletes it; saving
/// copies it, discarding abandons it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TempFilePath(PathBuf);

impl TempFilePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for TempFilePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for TempFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Where the virtual camera gets its pictures from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureSource {
    /// Generated color bars encoded as JPEG
    TestPattern { width: u32, height: u32 },
    /// Every capture delivers the bytes of this JPEG file
    File(PathBuf),
}

impl Default for CaptureSource {
    fn default() -> Self {
        use crate::constants::virtual_camera::{TEST_PATTERN_HEIGHT, TEST_PATTERN_WIDTH};
        CaptureSource::TestPattern {
            width: TEST_PATTERN_WIDTH,
            height: TEST_PATTERN_HEIGHT,
        }
    }
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureSource::TestPattern { width, height } => {
                write!(f, "test pattern {}x{}", width, height)
            }
            CaptureSource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_source_display() {
        let source = CaptureSource::TestPattern {
            width: 320,
            height: 240,
        };
        assert_eq!(source.to_string(), "test pattern 320x240");
    }

    #[test]
    fn test_capture_source_serde_shape() {
        let json = serde_json::to_string(&CaptureSource::File(PathBuf::from("/tmp/a.jpg"))).unwrap();
        assert_eq!(json, r#"{"file":"/tmp/a.jpg"}"#);
    }
}
