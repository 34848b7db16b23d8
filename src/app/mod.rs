// SPDX-License-Identifier: MPL-2.0

//! Application-level helpers shared by the CLI screens
//!
//! - Photo directory resolution (resolved once per session)
//! - Gallery listing

pub mod gallery;

pub use gallery::{GalleryEntry, GalleryOrder, latest_photo, load_gallery};

use crate::config::Config;
use crate::errors::StorageError;
use crate::storage::PhotoDirectory;
use std::path::PathBuf;
use tracing::info;

/// Get the photo save directory
///
/// An explicit override (e.g. `--dir`) wins over the config.
pub fn get_photo_directory(config: &Config, override_dir: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(|| config.photo_directory())
}

/// Ensure the photo directory exists, creating it if necessary
pub async fn ensure_photo_directory(
    config: &Config,
    override_dir: Option<PathBuf>,
) -> Result<PhotoDirectory, StorageError> {
    let path = get_photo_directory(config, override_dir);
    let directory = PhotoDirectory::ensure(path).await?;
    info!(path = %directory.path().display(), "Using photo directory");
    Ok(directory)
}
