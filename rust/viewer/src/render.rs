// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Renderer seam and the cancellable render task.
//!
//! The frame loop is an explicit tokio task with a cancellation handle, so a
//! re-initialization tears the previous loop down deterministically instead
//! of leaving it rescheduling itself forever.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::camera::PerspectiveCamera;
use crate::error::Result;
use crate::scene::Scene;
use crate::session::ViewerSession;

/// Rendering contract. The actual drawing backend stays opaque behind it.
pub trait Renderer: Send + Sync {
    /// Resize the render surface.
    fn resize(&self, width: u32, height: u32);

    /// Draw one frame.
    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()>;
}

/// Renderer that draws nothing and records activity.
///
/// Used for embedding without a GPU and as the observable backend in tests.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: AtomicU64,
    size: Mutex<(u32, u32)>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    pub fn size(&self) -> (u32, u32) {
        *self.size.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Renderer for HeadlessRenderer {
    fn resize(&self, width: u32, height: u32) {
        *self.size.lock().unwrap_or_else(|e| e.into_inner()) = (width, height);
    }

    fn render(&self, _scene: &Scene, _camera: &PerspectiveCamera) -> Result<()> {
        self.frames.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Handle to a running frame loop.
///
/// Dropping the handle cancels the loop, so a viewer that goes away without
/// an explicit dispose (a registry overwrite, a bridge bailing out early)
/// cannot orphan a ticking task.
pub struct RenderTask {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl RenderTask {
    /// Spawn a frame loop over `session`, ticking every `frame_interval`.
    pub fn spawn(
        session: Arc<ViewerSession>,
        renderer: Arc<dyn Renderer>,
        frame_interval: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(frame_interval);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = session.render_frame(renderer.as_ref()).await {
                            tracing::warn!(error = %e, "Frame render failed");
                        }
                    }
                }
            }
            tracing::debug!("Render task stopped");
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Cancel the loop and wait for the task to drain.
    pub async fn cancel(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for RenderTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
