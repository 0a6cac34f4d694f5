// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer configuration loaded from environment variables.

use nalgebra::{Point3, Vector3};

/// Viewer configuration.
///
/// Defaults mirror the host page the bridge was written for: a light grey
/// background, a perspective camera parked above and to the side of the
/// model origin, and a single white directional light.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Scene background color (linear RGB).
    pub background: [f32; 3],
    /// Initial camera eye position.
    pub camera_eye: Point3<f64>,
    /// Initial camera look-at target.
    pub camera_target: Point3<f64>,
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Near clipping plane.
    pub near: f64,
    /// Far clipping plane.
    pub far: f64,
    /// Directional light direction (from origin towards the light).
    pub light_direction: Vector3<f64>,
    /// Directional light intensity.
    pub light_intensity: f32,
    /// Frame interval of the render task in milliseconds.
    pub frame_interval_ms: u64,
    /// Frame height reported to the host.
    pub frame_height: u32,
}

impl ViewerConfig {
    /// Load configuration from environment variables, falling back to the
    /// built-in defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            frame_interval_ms: std::env::var("VIEWER_FRAME_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.frame_interval_ms),
            frame_height: std::env::var("VIEWER_FRAME_HEIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.frame_height),
            fov_degrees: std::env::var("VIEWER_FOV_DEGREES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fov_degrees),
            ..defaults
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            // 0xaaaaaa
            background: [0.667, 0.667, 0.667],
            camera_eye: Point3::new(8.0, 13.0, 15.0),
            camera_target: Point3::origin(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            light_direction: Vector3::new(10.0, 10.0, 10.0),
            light_intensity: 1.0,
            frame_interval_ms: 16,
            frame_height: 720,
        }
    }
}
