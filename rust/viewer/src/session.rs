// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer sessions and the viewer that owns them.
//!
//! A session is the ephemeral unit: scene graph, camera pose and controls
//! state. `Viewer::init` replaces the whole session, disposing the previous
//! one and cancelling its render task before the new one exists.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::camera::PerspectiveCamera;
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::error::Result;
use crate::loader::{LoadedModel, ModelLoader};
use crate::render::{RenderTask, Renderer};
use crate::scene::{DirectionalLight, Scene};

struct SessionState {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
}

/// Ephemeral viewer session: scene, camera and controls.
pub struct ViewerSession {
    state: RwLock<SessionState>,
}

impl ViewerSession {
    /// Build a session from the config: background, one directional light,
    /// the camera pose, orbit controls and the loaded model.
    pub fn new(config: &ViewerConfig, source_url: &str, model: LoadedModel) -> Arc<Self> {
        let mut scene = Scene::new(config.background);
        scene.add_light(DirectionalLight::white(
            config.light_direction,
            config.light_intensity,
        ));
        scene.add_model(source_url, model);

        let camera = PerspectiveCamera::from_config(config);
        let controls = OrbitControls::from_camera(&camera);

        Arc::new(Self {
            state: RwLock::new(SessionState {
                scene,
                camera,
                controls,
            }),
        })
    }

    /// Advance the controls and draw one frame.
    pub async fn render_frame(&self, renderer: &dyn Renderer) -> Result<()> {
        let mut state = self.state.write().await;
        let SessionState {
            scene,
            camera,
            controls,
        } = &mut *state;
        controls.update(camera);
        renderer.render(scene, camera)
    }

    /// Update the camera aspect after a surface resize.
    pub async fn resize(&self, width: u32, height: u32) {
        self.state.write().await.camera.set_aspect(width, height);
    }

    pub async fn model_count(&self) -> usize {
        self.state.read().await.scene.model_count()
    }

    pub async fn light_count(&self) -> usize {
        self.state.read().await.scene.light_count()
    }

    pub async fn camera(&self) -> PerspectiveCamera {
        self.state.read().await.camera.clone()
    }
}

/// A viewer instance: loader, renderer, and the current session.
pub struct Viewer {
    config: ViewerConfig,
    loader: Arc<dyn ModelLoader>,
    renderer: Arc<dyn Renderer>,
    session: Option<Arc<ViewerSession>>,
    render_task: Option<RenderTask>,
}

impl Viewer {
    pub fn new(
        config: ViewerConfig,
        loader: Arc<dyn ModelLoader>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            config,
            loader,
            renderer,
            session: None,
            render_task: None,
        }
    }

    /// Initialize (or re-initialize) the viewer with a model URL.
    ///
    /// The previous session and its render task are torn down first. On a
    /// load failure the viewer is left without a session rather than with a
    /// half-built scene.
    pub async fn init(&mut self, url: &str) -> Result<()> {
        self.dispose().await;

        let model = self.loader.load(url).await?;
        tracing::info!(url = %url, size = model.size_bytes, "Model loaded");

        let session = ViewerSession::new(&self.config, url, model);
        let task = RenderTask::spawn(
            Arc::clone(&session),
            Arc::clone(&self.renderer),
            Duration::from_millis(self.config.frame_interval_ms),
        );

        self.session = Some(session);
        self.render_task = Some(task);
        Ok(())
    }

    /// Cancel the render task and drop the current session.
    pub async fn dispose(&mut self) {
        if let Some(task) = self.render_task.take() {
            task.cancel().await;
        }
        self.session = None;
    }

    /// Relay a surface resize to the session and the renderer.
    pub async fn resize(&self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        if let Some(session) = &self.session {
            session.resize(width, height).await;
        }
    }

    pub fn session(&self) -> Option<&Arc<ViewerSession>> {
        self.session.as_ref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}
