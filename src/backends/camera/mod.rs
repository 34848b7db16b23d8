// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   Capture flow      │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    CameraSession    │  ← Scoped acquisition, busy rejection
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← Common interface
//! └──────────┬──────────┘
//!            │
//!            ▼
//!     ┌─────────────┐
//!     │VirtualCamera│  ← File / test pattern implementation
//!     └─────────────┘
//! ```

pub mod file_source;
pub mod session;
pub mod types;

pub use file_source::VirtualCamera;
pub use session::CameraSession;
pub use types::*;

use std::path::PathBuf;

/// Camera backend trait
///
/// Implementations are driven by [`CameraSession`], which guarantees that
/// `initialize` runs once before any capture and that `shutdown` runs when
/// the session goes away.
pub trait CameraBackend: Send {
    /// Human readable backend name for logs and the CLI
    fn name(&self) -> String;

    /// Acquire the camera hardware
    ///
    /// # Returns
    /// * `Ok(())` - Camera ready for capture
    /// * `Err(CameraError::InitializationFailed)` - Camera could not be opened
    fn initialize(&mut self) -> BackendResult<()>;

    /// Release the camera hardware
    fn shutdown(&mut self) -> BackendResult<()>;

    /// Check if the backend is currently initialized
    fn is_initialized(&self) -> bool;

    /// Capture a single still image into a temporary file
    ///
    /// Blocking; the session runs it on the blocking thread pool.
    ///
    /// # Returns
    /// * `Ok(TempFilePath)` - Path of the freshly written temp file
    /// * `Err(CameraError)` - Capture failed
    fn capture(&mut self) -> BackendResult<TempFilePath>;
}

/// Get a concrete backend for a capture source
///
/// Captures are written below `capture_dir`.
pub fn get_backend(source: CaptureSource, capture_dir: PathBuf) -> Box<dyn CameraBackend> {
    Box::new(VirtualCamera::new(source, capture_dir))
}
