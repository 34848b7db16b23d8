// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for managing saved photos
//!
//! Photos live as flat files directly inside one directory. There is no index
//! or sidecar file: the directory listing is the gallery.
//!
//! - [`list_photos`] scans the directory for files with the photo suffix
//! - [`next_available_name`] probes `supercam001`, `supercam002`, ... until a
//!   free name is found
//! - [`save_photo`] copies a captured temp file into the directory under a
//!   chosen name, overwriting any file with the same name
//! - [`PhotoDirectory::save_auto_named`] allocates and writes under a
//!   per-directory lock with create-new semantics

use crate::constants::naming;
use crate::errors::StorageError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// How auto-allocated photo names are built
///
/// `{prefix}{sequence:0width}.{extension}`, e.g. `supercam007.jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingScheme {
    pub prefix: String,
    /// Minimum digit count; larger sequence numbers grow past it
    pub width: usize,
    /// Extension without the leading dot
    pub extension: String,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            prefix: naming::PREFIX.to_string(),
            width: naming::SEQUENCE_WIDTH,
            extension: naming::EXTENSION.to_string(),
        }
    }
}

impl NamingScheme {
    /// Candidate name (without extension) for a sequence number
    pub fn candidate(&self, sequence: u32) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }

    /// File suffix including the dot, e.g. `.jpg`
    pub fn suffix(&self) -> String {
        format!(".{}", self.extension)
    }

    /// Append the extension unless the name already ends with it
    pub fn file_name(&self, name: &str) -> String {
        let suffix = self.suffix();
        if name.ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{}{}", name, suffix)
        }
    }
}

/// A saved photo. Identity is the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoFile {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Basename including extension
    pub name: String,
}

impl PhotoFile {
    fn new(path: PathBuf, name: String) -> Self {
        Self { path, name }
    }
}

/// The directory that holds saved photos
///
/// Resolved once per session; the path never changes afterwards. Clones and
/// separately constructed handles for the same path share one write lock.
#[derive(Debug, Clone)]
pub struct PhotoDirectory {
    path: PathBuf,
    scheme: NamingScheme,
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl PhotoDirectory {
    /// Open an existing photo directory with the default naming scheme
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_scheme(path, NamingScheme::default())
    }

    /// Open an existing photo directory with a custom naming scheme
    pub fn with_scheme(path: impl Into<PathBuf>, scheme: NamingScheme) -> Self {
        let path = path.into();
        let write_lock = directory_lock(&path);
        Self {
            path,
            scheme,
            write_lock,
        }
    }

    /// Create the directory if it is missing, then open it
    pub async fn ensure(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| StorageError::write(&path, e))?;
        info!(path = %path.display(), "Photo directory ready");
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scheme(&self) -> &NamingScheme {
        &self.scheme
    }

    /// All saved photos, in directory listing order
    pub async fn list_photos(&self) -> Result<Vec<PhotoFile>, StorageError> {
        list_photos(&self.path, &self.scheme.suffix()).await
    }

    /// Next free auto-generated name, without extension
    pub async fn next_available_name(&self) -> Result<String, StorageError> {
        next_available_name(&self.path, &self.scheme).await
    }

    /// Copy `source` into the directory as `target_name`
    ///
    /// Overwrites an existing photo with the same name without asking.
    pub async fn save_photo(
        &self,
        source: &Path,
        target_name: &str,
    ) -> Result<PhotoFile, StorageError> {
        save_photo(&self.path, source, target_name, &self.scheme).await
    }

    /// Copy `source` into the directory under the next free sequential name
    ///
    /// Allocation and write happen under the directory lock, and the file is
    /// created with create-new semantics. If another process claims the name
    /// first, probing continues with the following sequence number.
    pub async fn save_auto_named(&self, source: &Path) -> Result<PhotoFile, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut start = naming::FIRST_SEQUENCE;
        loop {
            let (sequence, stem) = probe_free_name(&self.path, &self.scheme, start).await?;
            let name = self.scheme.file_name(&stem);
            let destination = self.path.join(&name);

            match copy_new(source, &destination).await {
                Ok(bytes) => {
                    info!(path = %destination.display(), bytes, "Photo saved");
                    return Ok(PhotoFile::new(destination, name));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(name = %name, "Name claimed concurrently, probing further");
                    start = sequence.saturating_add(1);
                }
                Err(e) => return Err(StorageError::write(&destination, e)),
            }
        }
    }
}

/// Scan `dir` for files whose name ends with `suffix`
///
/// The result is in whatever order the directory listing yields. Entries
/// that are not regular files (after following symlinks) are skipped. Names
/// that are not valid UTF-8 are still listed; `PhotoFile::name` holds a
/// lossy rendering while `path` stays exact.
pub async fn list_photos(dir: &Path, suffix: &str) -> Result<Vec<PhotoFile>, StorageError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| StorageError::read(dir, e))?;

    let mut photos = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StorageError::read(dir, e))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(suffix) {
            continue;
        }

        let path = entry.path();
        let metadata = tokio::fs::metadata(&path).await;
        match metadata {
            Ok(metadata) if metadata.is_file() => photos.push(PhotoFile::new(path, name)),
            Ok(_) => {}
            Err(e) => {
                // Dangling symlink or entry removed mid-scan
                warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
            }
        }
    }

    debug!(dir = %dir.display(), count = photos.len(), "Scanned photo directory");
    Ok(photos)
}

/// Smallest `{prefix}{N:0width}` (N ≥ 1) with no matching file in `dir`
///
/// Returns the name without its extension. One existence check per probe.
pub async fn next_available_name(
    dir: &Path,
    scheme: &NamingScheme,
) -> Result<String, StorageError> {
    let (_, name) = probe_free_name(dir, scheme, naming::FIRST_SEQUENCE).await?;
    Ok(name)
}

async fn probe_free_name(
    dir: &Path,
    scheme: &NamingScheme,
    start: u32,
) -> Result<(u32, String), StorageError> {
    let mut sequence = start;
    loop {
        let candidate = scheme.candidate(sequence);
        let path = dir.join(scheme.file_name(&candidate));
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::read(&path, e))?;

        if !exists {
            debug!(name = %candidate, probes = sequence - start + 1, "Allocated photo name");
            return Ok((sequence, candidate));
        }

        sequence = sequence.checked_add(1).ok_or_else(|| StorageError::Read {
            path: dir.to_path_buf(),
            message: "photo sequence numbers exhausted".to_string(),
        })?;
    }
}

/// Copy `source` to `{dir}/{target_name}`
///
/// The extension is appended when `target_name` lacks it. An existing file
/// with the same name is overwritten; nothing re-checks existence between
/// allocation and this write. The source file is left untouched.
pub async fn save_photo(
    dir: &Path,
    source: &Path,
    target_name: &str,
    scheme: &NamingScheme,
) -> Result<PhotoFile, StorageError> {
    let name = validated_file_name(target_name, scheme)?;
    let destination = dir.join(&name);

    info!(
        source = %source.display(),
        destination = %destination.display(),
        "Saving photo"
    );

    let bytes = tokio::fs::copy(source, &destination)
        .await
        .map_err(|e| StorageError::write(&destination, e))?;

    info!(path = %destination.display(), bytes, "Photo saved successfully");
    Ok(PhotoFile::new(destination, name))
}

/// Turn user input into a file name inside the photo directory
///
/// Trims surrounding whitespace, rejects empty names and anything that could
/// leave the directory, and appends the extension when absent.
pub fn validated_file_name(
    target_name: &str,
    scheme: &NamingScheme,
) -> Result<String, StorageError> {
    let trimmed = target_name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
        || trimmed == scheme.suffix();

    if invalid {
        return Err(StorageError::InvalidName(target_name.to_string()));
    }

    Ok(scheme.file_name(trimmed))
}

/// Copy into a file that must not exist yet; removes the partial file on failure
async fn copy_new(source: &Path, destination: &Path) -> std::io::Result<u64> {
    let mut reader = tokio::fs::File::open(source).await?;
    let mut writer = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .await?;

    let result = async {
        let bytes = tokio::io::copy(&mut reader, &mut writer).await?;
        writer.flush().await?;
        writer.sync_all().await?;
        Ok::<u64, std::io::Error>(bytes)
    }
    .await;

    if result.is_err() {
        drop(writer);
        if let Err(e) = tokio::fs::remove_file(destination).await {
            warn!(path = %destination.display(), error = %e, "Failed to remove partial photo");
        }
    }
    result
}

/// Process-wide write lock for a directory path
///
/// Keyed by the lexically absolute path, so the key does not depend on
/// whether the directory exists yet. Symlinked aliases get separate locks;
/// `create_new` still keeps their writes from colliding. Entries are never
/// removed: the map only grows, by one entry per distinct directory.
fn directory_lock(path: &Path) -> Arc<tokio::sync::Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>> = OnceLock::new();

    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_is_zero_padded() {
        let scheme = NamingScheme::default();
        assert_eq!(scheme.candidate(1), "supercam001");
        assert_eq!(scheme.candidate(42), "supercam042");
        assert_eq!(scheme.candidate(999), "supercam999");
    }

    #[test]
    fn test_candidate_grows_past_width() {
        let scheme = NamingScheme::default();
        assert_eq!(scheme.candidate(1000), "supercam1000");
        assert_eq!(scheme.candidate(12345), "supercam12345");
    }

    #[test]
    fn test_file_name_appends_extension_once() {
        let scheme = NamingScheme::default();
        assert_eq!(scheme.file_name("vacation"), "vacation.jpg");
        assert_eq!(scheme.file_name("vacation.jpg"), "vacation.jpg");
        assert_eq!(scheme.file_name("beach.png"), "beach.png.jpg");
    }

    #[test]
    fn test_validated_file_name_rejects_bad_input() {
        let scheme = NamingScheme::default();
        for bad in ["", "   ", ".", "..", "../escape", "a/b", "a\\b", ".jpg"] {
            assert!(
                matches!(
                    validated_file_name(bad, &scheme),
                    Err(StorageError::InvalidName(_))
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_validated_file_name_trims() {
        let scheme = NamingScheme::default();
        assert_eq!(
            validated_file_name("  sunset  ", &scheme).unwrap(),
            "sunset.jpg"
        );
    }

    #[test]
    fn test_directory_lock_is_shared_per_path() {
        let a = directory_lock(Path::new("/nonexistent/supercam-lock-test"));
        let b = directory_lock(Path::new("/nonexistent/supercam-lock-test"));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_directory_lock_survives_ensure() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("photos");

        let before = PhotoDirectory::new(&path);
        let after = PhotoDirectory::ensure(&path).await.unwrap();
        assert!(Arc::ptr_eq(&before.write_lock, &after.write_lock));
    }
}
