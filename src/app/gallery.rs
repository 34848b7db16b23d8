// SPDX-License-Identifier: MPL-2.0

//! Gallery listing of saved photos
//!
//! Builds display entries on top of the storage scan. The scan itself has
//! no order; sorting here is purely for presentation.

use crate::errors::StorageError;
use crate::storage::{PhotoDirectory, PhotoFile};
use chrono::{DateTime, Local};
use std::cmp::Reverse;
use tracing::{debug, warn};

/// Sort order for the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryOrder {
    /// Directory listing order
    #[default]
    AsListed,
    /// Alphabetical by file name
    Name,
    /// Most recently modified first
    Newest,
}

/// One photo in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub photo: PhotoFile,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Load all photos with their size and modification time
///
/// Photos removed between the scan and the metadata lookup are skipped.
pub async fn load_gallery(
    directory: &PhotoDirectory,
    order: GalleryOrder,
) -> Result<Vec<GalleryEntry>, StorageError> {
    let photos = directory.list_photos().await?;

    let mut entries = Vec::with_capacity(photos.len());
    for photo in photos {
        let metadata = tokio::fs::metadata(&photo.path).await;
        match metadata {
            Ok(metadata) => entries.push(GalleryEntry {
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
                photo,
            }),
            Err(e) => {
                warn!(path = %photo.path.display(), error = %e, "Photo vanished during listing");
            }
        }
    }

    match order {
        GalleryOrder::AsListed => {}
        GalleryOrder::Name => entries.sort_by(|a, b| a.photo.name.cmp(&b.photo.name)),
        GalleryOrder::Newest => entries.sort_by_key(|e| Reverse(e.modified)),
    }

    debug!(count = entries.len(), order = ?order, "Gallery loaded");
    Ok(entries)
}

/// Most recently modified photo, if any
pub async fn latest_photo(directory: &PhotoDirectory) -> Result<Option<GalleryEntry>, StorageError> {
    let entries = load_gallery(directory, GalleryOrder::Newest).await?;
    Ok(entries.into_iter().next())
}

/// Human readable file size, e.g. `12.3 KB`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }

    #[tokio::test]
    async fn test_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "c.jpg", "a.jpg", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let directory = PhotoDirectory::new(dir.path());

        let entries = load_gallery(&directory, GalleryOrder::Name).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.photo.name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
        assert!(entries.iter().all(|e| e.size_bytes == 1));
    }

    #[tokio::test]
    async fn test_latest_photo_of_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let directory = PhotoDirectory::new(dir.path());
        assert!(latest_photo(&directory).await.unwrap().is_none());
    }
}
