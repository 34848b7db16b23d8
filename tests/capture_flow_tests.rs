// SPDX-License-Identifier: MPL-2.0

//! End-to-end capture flows against the virtual camera

use std::path::Path;
use supercam::backends::camera::{CameraSession, CaptureSource, VirtualCamera};
use supercam::pipelines::photo::{
    CaptureDialog, CapturedPhoto, FlowState, Navigation, NotificationKind, PhotoPipeline,
    SaveTarget,
};
use supercam::{CameraError, PhotoDirectory};
use tempfile::TempDir;

/// Answers the dialogs from a script and records what it was shown
struct ScriptedDialog {
    keep: bool,
    name: Option<String>,
    /// Set once the name dialog was shown
    seen_suggestion: Option<Option<String>>,
    reviewed: Option<CapturedPhoto>,
}

impl ScriptedDialog {
    fn new(keep: bool, name: Option<&str>) -> Self {
        Self {
            keep,
            name: name.map(str::to_string),
            seen_suggestion: None,
            reviewed: None,
        }
    }
}

impl CaptureDialog for ScriptedDialog {
    async fn review(&mut self, photo: &CapturedPhoto) -> bool {
        self.reviewed = Some(photo.clone());
        self.keep
    }

    async fn ask_name(&mut self, suggestion: Option<&str>) -> Option<String> {
        self.seen_suggestion = Some(suggestion.map(str::to_string));
        self.name.clone()
    }
}

fn open_session(capture_dir: &Path) -> CameraSession {
    let camera = VirtualCamera::new(
        CaptureSource::TestPattern {
            width: 64,
            height: 48,
        },
        capture_dir.to_path_buf(),
    );
    CameraSession::open(Box::new(camera)).unwrap()
}

#[tokio::test]
async fn test_capture_review_and_save_with_custom_name() {
    let photos = TempDir::new().unwrap();
    let captures = TempDir::new().unwrap();
    let session = open_session(captures.path());
    let pipeline = PhotoPipeline::new(PhotoDirectory::new(photos.path()));
    let mut dialog = ScriptedDialog::new(true, Some("vacation"));

    let outcome = pipeline.run(&session, &mut dialog).await.unwrap();

    let saved = outcome.saved.expect("photo saved");
    assert_eq!(saved.name, "vacation.jpg");
    assert_eq!(outcome.navigation, Navigation::ReturnToPrevious);
    assert_eq!(
        outcome.notification.map(|n| n.kind),
        Some(NotificationKind::Info)
    );

    // Suggestion offered to the user was the next free sequential name
    assert_eq!(dialog.seen_suggestion, Some(Some("supercam001".to_string())));

    // Saved bytes match the reviewed temp file, which is left in place
    let reviewed = dialog.reviewed.expect("photo reviewed");
    assert_eq!(reviewed.dimensions, Some((64, 48)));
    assert_eq!(
        std::fs::read(&saved.path).unwrap(),
        std::fs::read(reviewed.temp.as_path()).unwrap()
    );
}

#[tokio::test]
async fn test_discard_leaves_gallery_unchanged() {
    let photos = TempDir::new().unwrap();
    let captures = TempDir::new().unwrap();
    std::fs::write(photos.path().join("supercam001.jpg"), b"old").unwrap();

    let directory = PhotoDirectory::new(photos.path());
    let before = directory.list_photos().await.unwrap();

    let session = open_session(captures.path());
    let pipeline = PhotoPipeline::new(directory.clone());
    let mut dialog = ScriptedDialog::new(false, Some("never"));

    let outcome = pipeline.run(&session, &mut dialog).await.unwrap();

    assert!(outcome.saved.is_none());
    assert!(dialog.seen_suggestion.is_none(), "name dialog never shown");
    assert_eq!(directory.list_photos().await.unwrap(), before);
}

#[tokio::test]
async fn test_cancelled_name_dialog_saves_nothing() {
    let photos = TempDir::new().unwrap();
    let captures = TempDir::new().unwrap();
    let session = open_session(captures.path());
    let directory = PhotoDirectory::new(photos.path());
    let pipeline = PhotoPipeline::new(directory.clone());
    let mut dialog = ScriptedDialog::new(true, None);

    let outcome = pipeline.run(&session, &mut dialog).await.unwrap();

    assert!(outcome.saved.is_none());
    assert!(directory.list_photos().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_auto_named_captures_count_up() {
    let photos = TempDir::new().unwrap();
    let captures = TempDir::new().unwrap();
    let session = open_session(captures.path());
    let pipeline = PhotoPipeline::new(PhotoDirectory::new(photos.path()));

    let mut names = Vec::new();
    for _ in 0..3 {
        let outcome = pipeline
            .capture_and_save(&session, SaveTarget::Auto)
            .await
            .unwrap();
        names.push(outcome.saved.unwrap().name);
    }

    assert_eq!(
        names,
        ["supercam001.jpg", "supercam002.jpg", "supercam003.jpg"]
    );
}

#[tokio::test]
async fn test_named_capture_overwrites_silently() {
    let photos = TempDir::new().unwrap();
    let captures = TempDir::new().unwrap();
    std::fs::write(photos.path().join("beach.jpg"), b"previous").unwrap();

    let session = open_session(captures.path());
    let pipeline = PhotoPipeline::new(PhotoDirectory::new(photos.path()));
    let outcome = pipeline
        .capture_and_save(&session, SaveTarget::Named("beach".to_string()))
        .await
        .unwrap();

    assert!(outcome.saved.is_some());
    let bytes = std::fs::read(photos.path().join("beach.jpg")).unwrap();
    assert_ne!(bytes, b"previous");
}

#[tokio::test]
async fn test_failed_save_reports_error_and_returns() {
    let root = TempDir::new().unwrap();
    let captures = TempDir::new().unwrap();
    // Photo directory does not exist, so the copy fails
    let directory = PhotoDirectory::new(root.path().join("missing"));

    let session = open_session(captures.path());
    let pipeline = PhotoPipeline::new(directory);
    let outcome = pipeline
        .capture_and_save(&session, SaveTarget::Named("x".to_string()))
        .await
        .unwrap();

    assert!(outcome.saved.is_none());
    assert_eq!(outcome.navigation, Navigation::ReturnToPrevious);
    assert_eq!(
        outcome.notification.map(|n| n.kind),
        Some(NotificationKind::Error)
    );
}

#[tokio::test]
async fn test_flow_can_run_again_after_save() {
    let photos = TempDir::new().unwrap();
    let captures = TempDir::new().unwrap();
    let session = open_session(captures.path());
    let pipeline = PhotoPipeline::new(PhotoDirectory::new(photos.path()));
    let mut flow = supercam::CaptureFlow::new();

    let mut dialog = ScriptedDialog::new(true, Some("one"));
    pipeline
        .run_flow(&mut flow, &session, &mut dialog)
        .await
        .unwrap();
    assert!(matches!(flow.state(), FlowState::Saved(_)));

    let mut dialog = ScriptedDialog::new(true, Some("two"));
    pipeline
        .run_flow(&mut flow, &session, &mut dialog)
        .await
        .unwrap();

    let mut names: Vec<_> = PhotoDirectory::new(photos.path())
        .list_photos()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    names.sort();
    assert_eq!(names, ["one.jpg", "two.jpg"]);
}

#[test]
fn test_missing_source_fails_to_open() {
    let captures = TempDir::new().unwrap();
    let camera = VirtualCamera::new(
        CaptureSource::File(captures.path().join("nope.jpg")),
        captures.path().to_path_buf(),
    );

    let err = CameraSession::open(Box::new(camera)).unwrap_err();
    assert!(matches!(err, CameraError::InitializationFailed(_)));
}
