// SPDX-License-Identifier: MPL-2.0

//! Capture pipelines
//!
//! ```text
//! ┌───────────────┐     ┌───────────────────┐     ┌──────────────────┐
//! │ CameraSession │ ──▶ │  Photo Pipeline   │ ──▶ │ supercamNNN.jpg  │
//! │  (temp file)  │     │  - Preview        │     │  or custom name  │
//! │               │     │  - Name dialog    │     │                  │
//! │               │     │  - Copy to store  │     │                  │
//! └───────────────┘     └───────────────────┘     └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Capture, review, naming and saving of a single photo

pub mod photo;
