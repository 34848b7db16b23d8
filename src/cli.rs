// SPDX-License-Identifier: MPL-2.0

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Listing saved photos
//! - Taking photos (with an interactive review and name prompt)
//! - Saving existing images into the photo directory
//! - Opening photos in the system viewer

use std::io::Write;
use std::path::PathBuf;
use supercam::app::{self, GalleryOrder, gallery::format_size};
use supercam::backends::camera::{CameraSession, CaptureSource, get_backend};
use supercam::pipelines::photo::{
    CaptureDialog, CapturedPhoto, FlowOutcome, NotificationKind, PhotoPipeline, SaveTarget,
};
use supercam::Config;
use supercam::errors::ConfigError;
use tracing::{debug, error, info};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// List all saved photos
pub async fn list_photos(config: &Config, dir: Option<PathBuf>, order: GalleryOrder) -> CliResult {
    let directory = app::ensure_photo_directory(config, dir).await?;
    let entries = app::load_gallery(&directory, order).await?;

    if entries.is_empty() {
        println!("No photos in {}", directory.path().display());
        return Ok(());
    }

    println!("Photos in {}:", directory.path().display());
    println!();
    for entry in &entries {
        let modified = entry
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<24} {:>10}  {}",
            entry.photo.name,
            format_size(entry.size_bytes),
            modified
        );
    }
    println!();
    println!("{} photo(s)", entries.len());

    Ok(())
}

/// Print the next free sequential name
pub async fn next_name(config: &Config, dir: Option<PathBuf>) -> CliResult {
    let directory = app::ensure_photo_directory(config, dir).await?;
    let name = directory.next_available_name().await?;
    println!("{}", name);
    Ok(())
}

/// Take a photo using the virtual camera
///
/// Without a target the user reviews the capture and picks a name.
pub async fn take_photo(
    config: &Config,
    dir: Option<PathBuf>,
    source: Option<PathBuf>,
    target: Option<SaveTarget>,
) -> CliResult {
    let directory = app::ensure_photo_directory(config, dir).await?;

    let source = source
        .map(CaptureSource::File)
        .unwrap_or_else(|| config.capture_source.clone());
    let backend = get_backend(source, config.capture_directory());

    // Initialization touches the disk, keep it off the async workers
    let session = tokio::task::spawn_blocking(move || CameraSession::open(backend)).await??;
    println!("Using camera: {}", session.name());

    let pipeline = PhotoPipeline::new(directory);
    let outcome = match target {
        Some(target) => pipeline.capture_and_save(&session, target).await?,
        None => pipeline.run(&session, &mut TerminalDialog).await?,
    };

    session.close()?;
    report(outcome)
}

/// Copy an existing image into the photo directory
pub async fn save_existing(
    config: &Config,
    dir: Option<PathBuf>,
    source: PathBuf,
    name: Option<String>,
) -> CliResult {
    let directory = app::ensure_photo_directory(config, dir).await?;

    let photo = match name {
        Some(name) => directory.save_photo(&source, &name).await?,
        None => directory.save_auto_named(&source).await?,
    };

    println!("Photo saved: {}", photo.path.display());
    Ok(())
}

/// Open a photo with the system viewer
pub async fn open_photo(config: &Config, dir: Option<PathBuf>, name: Option<String>) -> CliResult {
    let directory = app::ensure_photo_directory(config, dir).await?;

    let path = match name {
        Some(name) => {
            let path = directory.path().join(directory.scheme().file_name(&name));
            if !tokio::fs::try_exists(&path).await? {
                return Err(format!("No photo named {}", name).into());
            }
            path
        }
        None => match app::latest_photo(&directory).await? {
            Some(entry) => entry.photo.path,
            None => {
                println!("No photos in {}", directory.path().display());
                return Ok(());
            }
        },
    };

    info!(path = %path.display(), "Opening photo");
    if let Err(e) = open::that(&path) {
        error!(error = %e, path = %path.display(), "Failed to open photo");
        return Err(e.into());
    }
    Ok(())
}

/// Print the effective configuration, optionally writing defaults
pub fn show_config(config: &Config, path: Option<PathBuf>, init: bool) -> CliResult {
    let path = path.or_else(Config::default_path);

    if init {
        let path = path.as_ref().ok_or(ConfigError::ConfigDirNotFound)?;
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            Config::default().save_to(path)?;
            println!("Config written: {}", path.display());
        }
    }

    if let Some(path) = &path {
        println!("Config file: {}", path.display());
    }
    println!("Photo directory: {}", config.photo_directory().display());
    println!("Capture directory: {}", config.capture_directory().display());
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

/// Show the flow's notification; failed saves exit non-zero
fn report(outcome: FlowOutcome) -> CliResult {
    debug!(navigation = ?outcome.navigation, "Flow finished");

    match outcome.notification {
        Some(notification) if notification.kind == NotificationKind::Error => {
            Err(notification.message.into())
        }
        Some(notification) => {
            println!("{}", notification.message);
            if let Some(photo) = outcome.saved {
                println!("Photo saved: {}", photo.path.display());
            }
            Ok(())
        }
        None => {
            println!("Photo discarded");
            Ok(())
        }
    }
}

/// Review and naming prompts on stdin
struct TerminalDialog;

impl CaptureDialog for TerminalDialog {
    async fn review(&mut self, photo: &CapturedPhoto) -> bool {
        let dimensions = photo
            .dimensions
            .map(|(w, h)| format!(", {}x{}", w, h))
            .unwrap_or_default();
        println!(
            "Captured at {}: {} ({}{})",
            photo.captured_at.format("%H:%M:%S"),
            photo.temp,
            format_size(photo.size_bytes),
            dimensions
        );

        match prompt("Keep this photo? [Y/n] ".to_string()).await {
            Some(answer) => matches!(answer.trim(), "" | "y" | "Y" | "yes"),
            None => false,
        }
    }

    async fn ask_name(&mut self, suggestion: Option<&str>) -> Option<String> {
        let hint = suggestion
            .map(|s| format!(" [{}]", s))
            .unwrap_or_default();
        let answer = prompt(format!("Name{} (q to discard): ", hint)).await?;

        match answer.trim() {
            "q" => None,
            "" => suggestion.map(str::to_string),
            name => Some(name.to_string()),
        }
    }
}

/// Print `text` and read one line; `None` on end of input
async fn prompt(text: String) -> Option<String> {
    tokio::task::spawn_blocking(move || {
        print!("{}", text);
        std::io::stdout().flush().ok()?;

        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    })
    .await
    .ok()
    .flatten()
}
