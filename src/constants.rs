// SPDX-License-Identifier: MPL-2.0

//! Application-wide constants

use std::time::Duration;

/// Photo naming constants
///
/// Auto-named photos look like `supercam001.jpg`, `supercam002.jpg`, ...
pub mod naming {
    /// Prefix of every auto-allocated photo name
    pub const PREFIX: &str = "supercam";

    /// Minimum number of digits in the sequence number (zero-padded)
    pub const SEQUENCE_WIDTH: usize = 3;

    /// Extension of saved photos (without the dot)
    pub const EXTENSION: &str = "jpg";

    /// First sequence number probed by the allocator
    pub const FIRST_SEQUENCE: u32 = 1;
}

/// Directory names used below the platform directories
pub mod directories {
    /// Folder below the platform data/config dirs
    pub const APP_FOLDER: &str = "supercam";

    /// Folder holding saved photos
    pub const PHOTOS_FOLDER: &str = "photos";

    /// Fallback photo directory when no platform data dir is known
    pub const FALLBACK_PHOTOS_DIR: &str = "supercam-photos";

    /// Config file name inside the config folder
    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Prefix of temporary capture files
    pub const CAPTURE_FILE_PREFIX: &str = "capture_";
}

/// Virtual camera defaults
pub mod virtual_camera {
    /// Default test pattern width
    pub const TEST_PATTERN_WIDTH: u32 = 640;

    /// Default test pattern height
    pub const TEST_PATTERN_HEIGHT: u32 = 480;

    /// Supported file source extensions
    pub const SOURCE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

    /// Check if a file extension can be used as a capture source
    pub fn is_source_extension(ext: &str) -> bool {
        SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// How long a transient notification stays visible
    pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);
}
