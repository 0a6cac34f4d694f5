// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene graph: a flat node list of lights and loaded models.

use nalgebra::Vector3;

use crate::loader::LoadedModel;

/// Directional light attached to the scene.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub direction: Vector3<f64>,
    pub intensity: f32,
    pub color: [f32; 3],
}

impl DirectionalLight {
    pub fn white(direction: Vector3<f64>, intensity: f32) -> Self {
        Self {
            direction,
            intensity,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// A loaded model placed in the scene.
#[derive(Debug, Clone)]
pub struct ModelNode {
    /// Source URL the model was loaded from.
    pub source_url: String,
    pub model: LoadedModel,
}

/// Scene node kinds. The renderer walks these; their internals stay opaque
/// to it beyond this surface.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Light(DirectionalLight),
    Model(ModelNode),
}

/// Flat scene graph owned by a viewer session.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: [f32; 3],
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new(background: [f32; 3]) -> Self {
        Self {
            background,
            nodes: Vec::new(),
        }
    }

    pub fn add_light(&mut self, light: DirectionalLight) {
        self.nodes.push(SceneNode::Light(light));
    }

    pub fn add_model(&mut self, source_url: &str, model: LoadedModel) {
        self.nodes.push(SceneNode::Model(ModelNode {
            source_url: source_url.to_string(),
            model,
        }));
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn light_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Light(_)))
            .count()
    }

    pub fn model_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, SceneNode::Model(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadedModel, ModelFormat};

    fn model() -> LoadedModel {
        LoadedModel {
            name: "duplex".into(),
            format: ModelFormat::Ifc,
            size_bytes: 1024,
            object_count: 12,
        }
    }

    #[test]
    fn scene_counts_lights_and_models() {
        let mut scene = Scene::new([0.667, 0.667, 0.667]);
        scene.add_light(DirectionalLight::white(Vector3::new(10.0, 10.0, 10.0), 1.0));
        scene.add_model("/static/duplex.ifc", model());
        scene.add_model("/static/duplex2.ifc", model());
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.model_count(), 2);
        assert_eq!(scene.nodes().len(), 3);
    }
}
