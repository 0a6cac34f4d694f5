// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perspective camera pose and projection.

use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use crate::config::ViewerConfig;

/// Perspective camera with an eye/target/up pose.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub eye: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveCamera {
    /// Build a camera from the viewer configuration with a 16:9 aspect.
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            eye: config.camera_eye,
            target: config.camera_target,
            up: Vector3::y(),
            fov_y: config.fov_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: config.near,
            far: config.far,
        }
    }

    /// Reposition the camera, keeping projection parameters.
    pub fn look_at(&mut self, eye: Point3<f64>, target: Point3<f64>) {
        self.eye = eye;
        self.target = target;
    }

    /// Update the aspect ratio after a surface resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = f64::from(width) / f64::from(height);
        }
    }

    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Isometry3::look_at_rh(&self.eye, &self.target, &self.up).to_homogeneous()
    }

    /// Perspective projection matrix.
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Perspective3::new(self.aspect, self.fov_y, self.near, self.far).to_homogeneous()
    }

    /// Unit vector from the eye towards the target.
    pub fn forward(&self) -> Vector3<f64> {
        (self.target - self.eye).normalize()
    }
}
