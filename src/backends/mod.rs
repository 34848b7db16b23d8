// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera capture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Capture flow / CLI                │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                  │
//! │  ┌──────────────────┐   ┌───────────────┐   │
//! │  │  CameraSession   │──▶│ CameraBackend │   │
//! │  │ (owned, scoped)  │   │    (trait)    │   │
//! │  └──────────────────┘   └───────┬───────┘   │
//! │                         ┌───────┴───────┐   │
//! │                         │ VirtualCamera │   │
//! │                         └───────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Camera backend trait, session lifecycle and the virtual camera

pub mod camera;
