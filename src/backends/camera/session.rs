// SPDX-License-Identifier: MPL-2.0

//! Camera session lifecycle
//!
//! A session owns one backend for the lifetime of a screen. Opening it
//! initializes the camera exactly once; dropping it shuts the camera down on
//! every exit path. Overlapping captures are rejected with
//! [`CameraError::Busy`].

use super::types::*;
use super::CameraBackend;
use crate::errors::CameraError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info};

/// Owned camera resource with scoped acquire/release
pub struct CameraSession {
    backend: Arc<Mutex<Box<dyn CameraBackend>>>,
    busy: Arc<AtomicBool>,
    name: String,
    closed: bool,
}

/// Clears the busy flag when the backend call it travels with returns
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> BackendResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CameraError::Busy)?;
        Ok(Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CameraSession {
    /// Initialize `backend` and wrap it in a session
    ///
    /// # Returns
    /// * `Ok(CameraSession)` - Camera ready for capture
    /// * `Err(CameraError::InitializationFailed)` - Camera could not be opened
    pub fn open(mut backend: Box<dyn CameraBackend>) -> BackendResult<Self> {
        let name = backend.name();
        info!(backend = %name, "Opening camera session");

        backend.initialize().map_err(|e| match e {
            CameraError::InitializationFailed(_) => e,
            other => CameraError::InitializationFailed(other.to_string()),
        })?;

        Ok(Self {
            backend: Arc::new(Mutex::new(backend)),
            busy: Arc::new(AtomicBool::new(false)),
            name,
            closed: false,
        })
    }

    /// Backend name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if a capture is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Capture one photo into a temporary file
    ///
    /// May be called any number of times. A call made while another capture
    /// is still running fails with [`CameraError::Busy`]. Dropping the
    /// returned future does not clear the busy state: the backend call keeps
    /// running and the session stays busy until it returns.
    pub async fn capture(&self) -> BackendResult<TempFilePath> {
        let busy = BusyGuard::acquire(&self.busy)?;
        debug!(backend = %self.name, "Capture requested");

        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || {
            let _busy = busy;
            let mut backend = backend.lock().unwrap_or_else(PoisonError::into_inner);
            if !backend.is_initialized() {
                return Err(CameraError::NotInitialized);
            }
            backend.capture()
        })
        .await
        .map_err(|e| CameraError::CaptureFailed(format!("Capture task error: {}", e)))?
    }

    /// Shut the camera down and report any error
    ///
    /// Dropping the session does the same but can only log failures.
    pub fn close(mut self) -> BackendResult<()> {
        self.closed = true;
        self.shutdown_backend()
    }

    fn shutdown_backend(&self) -> BackendResult<()> {
        info!(backend = %self.name, "Releasing camera");
        let mut backend = self.backend.lock().unwrap_or_else(PoisonError::into_inner);
        backend.shutdown()
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.shutdown_backend() {
            error!(backend = %self.name, error = %e, "Camera shutdown failed");
        }
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("backend", &self.name)
            .field("busy", &self.is_busy())
            .finish()
    }
}
