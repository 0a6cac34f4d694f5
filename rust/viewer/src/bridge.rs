// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-event bridge.
//!
//! The host dispatches render events carrying a model URL; the bridge
//! re-initializes the viewer and reports readiness and its frame height
//! back, once at startup and once per render event.

use serde::Deserialize;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::session::Viewer;

/// Render event payload as the host serializes it: `{ "args": { "url": … } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderEvent {
    pub args: RenderArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderArgs {
    #[serde(default)]
    pub url: Option<String>,
}

impl RenderEvent {
    /// Parse the host's JSON payload.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

/// Events the host can dispatch at the bridge.
#[derive(Debug)]
pub enum HostEvent {
    Render(RenderEvent),
    Resize { width: u32, height: u32 },
    Shutdown,
}

/// Signals the bridge emits back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeSignal {
    ComponentReady,
    FrameHeight(u32),
}

/// Relays host render events into viewer re-initialization.
pub struct ViewerBridge {
    viewer: Viewer,
    signals: mpsc::Sender<BridgeSignal>,
    frame_height: u32,
}

impl ViewerBridge {
    pub fn new(viewer: Viewer, signals: mpsc::Sender<BridgeSignal>) -> Self {
        let frame_height = viewer.config().frame_height;
        Self {
            viewer,
            signals,
            frame_height,
        }
    }

    /// Pump host events until the channel closes or a shutdown arrives.
    ///
    /// Load failures are logged and leave the viewer without a session; the
    /// pump keeps serving subsequent events.
    pub async fn run(&mut self, mut events: mpsc::Receiver<HostEvent>) -> Result<()> {
        self.send(BridgeSignal::ComponentReady).await?;
        self.send(BridgeSignal::FrameHeight(self.frame_height)).await?;

        while let Some(event) = events.recv().await {
            match event {
                HostEvent::Render(render) => {
                    if let Some(url) = render.args.url {
                        if let Err(e) = self.viewer.init(&url).await {
                            tracing::error!(url = %url, error = %e, "Viewer init failed");
                        }
                    }
                    self.send(BridgeSignal::FrameHeight(self.frame_height)).await?;
                }
                HostEvent::Resize { width, height } => {
                    self.frame_height = height;
                    self.viewer.resize(width, height).await;
                    self.send(BridgeSignal::FrameHeight(height)).await?;
                }
                HostEvent::Shutdown => break,
            }
        }

        self.viewer.dispose().await;
        Ok(())
    }

    async fn send(&self, signal: BridgeSignal) -> Result<()> {
        self.signals.send(signal).await.map_err(|_| Error::HostGone)
    }
}
