// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera application

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Photo directory errors
    Storage(StorageError),
    /// Capture flow errors
    Flow(FlowError),
    /// Configuration errors
    Config(ConfigError),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Camera initialization failed
    InitializationFailed(String),
    /// Capture was requested before the camera was initialized
    NotInitialized,
    /// Capture failed
    CaptureFailed(String),
    /// Another capture is still in flight
    Busy,
}

/// Photo directory errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Listing or probing the directory failed
    Read { path: PathBuf, message: String },
    /// Copying a photo into the directory failed
    Write { path: PathBuf, message: String },
    /// Target name is empty or escapes the directory
    InvalidName(String),
}

impl StorageError {
    pub(crate) fn read(path: &Path, err: std::io::Error) -> Self {
        StorageError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write(path: &Path, err: std::io::Error) -> Self {
        StorageError::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Capture flow errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The requested action is not valid in the current state
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config directory could be determined
    ConfigDirNotFound,
    /// Config file exists but could not be read
    Read(PathBuf, String),
    /// Config file is not valid JSON
    Parse(PathBuf, String),
    /// Config file could not be written
    Write(PathBuf, String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Flow(e) => write!(f, "Capture flow error: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::NotInitialized => write!(f, "Camera is not initialized"),
            CameraError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            CameraError::Busy => write!(f, "Camera is busy"),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Read { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
            StorageError::Write { path, message } => {
                write!(f, "Failed to write {}: {}", path.display(), message)
            }
            StorageError::InvalidName(name) => write!(f, "Invalid photo name: {:?}", name),
        }
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::InvalidTransition { from, action } => {
                write!(f, "Cannot {} while {}", action, from)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ConfigDirNotFound => write!(f, "No configuration directory available"),
            ConfigError::Read(path, msg) => write!(f, "Failed to read {}: {}", path.display(), msg),
            ConfigError::Parse(path, msg) => {
                write!(f, "Failed to parse {}: {}", path.display(), msg)
            }
            ConfigError::Write(path, msg) => {
                write!(f, "Failed to write {}: {}", path.display(), msg)
            }
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for StorageError {}
impl std::error::Error for FlowError {}
impl std::error::Error for ConfigError {}

// Conversions from sub-errors to AppError
impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        AppError::Flow(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}
