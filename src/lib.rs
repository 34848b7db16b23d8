// SPDX-License-Identifier: MPL-2.0

//! Supercam - capture photos, name them and browse them
//!
//! This library holds everything below the screens: the photo directory
//! scan, sequential name allocation, the copy-on-save step, the camera
//! session and the capture-to-save state machine.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Photo directory resolution and gallery listing
//! - [`backends`]: Camera backend abstraction and owned camera session
//! - [`pipelines`]: Capture → review → name → save flow
//! - [`storage`]: Photo scan, name allocation and persistence
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```ignore
//! let directory = PhotoDirectory::ensure("/tmp/photos").await?;
//! let name = directory.next_available_name().await?; // "supercam001"
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use backends::camera::{CameraBackend, CameraSession, CaptureSource, TempFilePath};
pub use config::Config;
pub use errors::{AppError, AppResult, CameraError, StorageError};
pub use pipelines::photo::{CaptureFlow, FlowOutcome, PhotoPipeline, SaveTarget};
pub use storage::{NamingScheme, PhotoDirectory, PhotoFile};
