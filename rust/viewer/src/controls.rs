// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orbit-style camera controls.

use nalgebra::{Point3, Vector3};

use crate::camera::PerspectiveCamera;

const MIN_PITCH: f64 = -1.55;
const MAX_PITCH: f64 = 1.55;
const MIN_DISTANCE: f64 = 0.01;

/// Orbit controls: the camera circles a target point at a fixed distance.
///
/// Input handling is owned by the host; the bridge only applies the
/// accumulated spherical pose back onto the camera once per frame.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f64>,
    yaw: f64,
    pitch: f64,
    distance: f64,
}

impl OrbitControls {
    /// Derive the spherical pose from the camera's current eye and target.
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.norm().max(MIN_DISTANCE);
        Self {
            target: camera.target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
        }
    }

    /// Rotate around the target. Pitch is clamped short of the poles.
    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Scale the orbit distance. Factors below 1.0 zoom in.
    pub fn zoom(&mut self, factor: f64) {
        self.distance = (self.distance * factor).max(MIN_DISTANCE);
    }

    /// Apply the current spherical pose to the camera.
    pub fn update(&self, camera: &mut PerspectiveCamera) {
        let horizontal = self.distance * self.pitch.cos();
        let eye = self.target
            + Vector3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            );
        camera.look_at(eye, self.target);
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }
}
