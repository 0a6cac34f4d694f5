// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer lifecycle: init, re-init disposal, render task cancellation, and
//! the host-event bridge contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use xkt_bridge_viewer::{
    BridgeSignal, Error, HeadlessRenderer, HostEvent, LoadedModel, ModelFormat, ModelLoader,
    RenderArgs, RenderEvent, Viewer, ViewerBridge, ViewerConfig,
};

/// Loader stub: succeeds for every URL except ones containing "broken".
struct StubLoader {
    loads: AtomicUsize,
}

impl StubLoader {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            loads: AtomicUsize::new(0),
        })
    }

    fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelLoader for StubLoader {
    async fn load(&self, url: &str) -> xkt_bridge_viewer::Result<LoadedModel> {
        if url.contains("broken") {
            return Err(Error::Load {
                url: url.to_string(),
                reason: "stub failure".into(),
            });
        }
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(LoadedModel {
            name: "stub".into(),
            format: ModelFormat::from_url(url),
            size_bytes: 10 * 1024,
            object_count: 42,
        })
    }
}

fn fast_config() -> ViewerConfig {
    ViewerConfig {
        frame_interval_ms: 5,
        ..ViewerConfig::default()
    }
}

fn render_event(url: Option<&str>) -> HostEvent {
    HostEvent::Render(RenderEvent {
        args: RenderArgs {
            url: url.map(str::to_string),
        },
    })
}

#[tokio::test]
async fn init_builds_session_from_config() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let mut viewer = Viewer::new(fast_config(), loader.clone(), renderer);

    viewer.init("/static/duplex.ifc").await.unwrap();

    let session = viewer.session().expect("session after init");
    assert_eq!(session.light_count().await, 1);
    assert_eq!(session.model_count().await, 1);
    let camera = session.camera().await;
    assert_eq!(camera.eye, ViewerConfig::default().camera_eye);
    assert_eq!(loader.load_count(), 1);
}

#[tokio::test]
async fn render_task_draws_frames_until_disposed() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let mut viewer = Viewer::new(fast_config(), loader, renderer.clone());

    viewer.init("/static/duplex.ifc").await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(renderer.frames_rendered() > 0, "frame loop never ticked");

    viewer.dispose().await;
    let frames_after_dispose = renderer.frames_rendered();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(
        renderer.frames_rendered(),
        frames_after_dispose,
        "render task kept running after dispose"
    );
    assert!(!viewer.has_session());
}

#[tokio::test]
async fn dropping_viewer_stops_frame_loop() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let mut viewer = Viewer::new(fast_config(), loader, renderer.clone());

    viewer.init("/static/duplex.ifc").await.unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(renderer.frames_rendered() > 0, "frame loop never ticked");

    // No explicit dispose. A registry overwrite drops a viewer exactly
    // like this, and the frame loop must die with it.
    drop(viewer);
    tokio::time::sleep(Duration::from_millis(20)).await;
    let frames_after_drop = renderer.frames_rendered();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(
        renderer.frames_rendered(),
        frames_after_drop,
        "render task kept ticking after the viewer was dropped"
    );
}

#[tokio::test]
async fn bridge_bailing_out_stops_frame_loop() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let viewer = Viewer::new(fast_config(), loader, renderer.clone());

    let (signal_tx, mut signal_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(16);

    let mut bridge = ViewerBridge::new(viewer, signal_tx);
    let pump = tokio::spawn(async move { bridge.run(event_rx).await });

    signal_rx.recv().await.unwrap();
    signal_rx.recv().await.unwrap();

    event_tx
        .send(render_event(Some("/static/duplex.ifc")))
        .await
        .unwrap();
    signal_rx.recv().await.unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(renderer.frames_rendered() > 0, "frame loop never ticked");

    // Host goes away: the pump errors out of its next send and the bridge
    // (viewer included) is dropped without reaching the shutdown path.
    drop(signal_rx);
    event_tx.send(render_event(None)).await.unwrap();
    let err = pump.await.unwrap().unwrap_err();
    assert!(matches!(err, Error::HostGone));

    tokio::time::sleep(Duration::from_millis(20)).await;
    let frames_after_exit = renderer.frames_rendered();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(
        renderer.frames_rendered(),
        frames_after_exit,
        "render task outlived the bridge"
    );
}

#[tokio::test]
async fn reinit_disposes_previous_session() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let mut viewer = Viewer::new(fast_config(), loader, renderer);

    viewer.init("/static/first.ifc").await.unwrap();
    let first = Arc::downgrade(viewer.session().unwrap());

    viewer.init("/static/second.ifc").await.unwrap();
    assert!(
        first.upgrade().is_none(),
        "previous session leaked across re-init"
    );
    assert!(viewer.has_session());
}

#[tokio::test]
async fn failed_load_leaves_viewer_without_session() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let mut viewer = Viewer::new(fast_config(), loader, renderer);

    viewer.init("/static/ok.ifc").await.unwrap();
    let err = viewer.init("/static/broken.ifc").await.unwrap_err();
    assert!(matches!(err, Error::Load { .. }));
    assert!(!viewer.has_session());
}

#[tokio::test]
async fn bridge_emits_ready_and_frame_height_per_event() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let viewer = Viewer::new(fast_config(), loader.clone(), renderer);

    let (signal_tx, mut signal_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(16);

    let mut bridge = ViewerBridge::new(viewer, signal_tx);
    let pump = tokio::spawn(async move { bridge.run(event_rx).await });

    // Startup handshake.
    assert_eq!(signal_rx.recv().await.unwrap(), BridgeSignal::ComponentReady);
    assert_eq!(
        signal_rx.recv().await.unwrap(),
        BridgeSignal::FrameHeight(720)
    );

    event_tx
        .send(render_event(Some("/static/duplex.ifc")))
        .await
        .unwrap();
    assert_eq!(
        signal_rx.recv().await.unwrap(),
        BridgeSignal::FrameHeight(720)
    );
    assert_eq!(loader.load_count(), 1);

    // An event without a URL re-reports the height but does not re-init.
    event_tx.send(render_event(None)).await.unwrap();
    assert_eq!(
        signal_rx.recv().await.unwrap(),
        BridgeSignal::FrameHeight(720)
    );
    assert_eq!(loader.load_count(), 1);

    event_tx.send(HostEvent::Shutdown).await.unwrap();
    pump.await.unwrap().unwrap();
}

#[tokio::test]
async fn bridge_resize_updates_reported_height() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let viewer = Viewer::new(fast_config(), loader, renderer.clone());

    let (signal_tx, mut signal_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(16);

    let mut bridge = ViewerBridge::new(viewer, signal_tx);
    let pump = tokio::spawn(async move { bridge.run(event_rx).await });

    signal_rx.recv().await.unwrap();
    signal_rx.recv().await.unwrap();

    event_tx
        .send(HostEvent::Resize {
            width: 1280,
            height: 960,
        })
        .await
        .unwrap();
    assert_eq!(
        signal_rx.recv().await.unwrap(),
        BridgeSignal::FrameHeight(960)
    );
    assert_eq!(renderer.size(), (1280, 960));

    drop(event_tx);
    pump.await.unwrap().unwrap();
}

#[tokio::test]
async fn bridge_survives_a_failed_load() {
    let loader = StubLoader::new();
    let renderer = Arc::new(HeadlessRenderer::new());
    let viewer = Viewer::new(fast_config(), loader.clone(), renderer);

    let (signal_tx, mut signal_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(16);

    let mut bridge = ViewerBridge::new(viewer, signal_tx);
    let pump = tokio::spawn(async move { bridge.run(event_rx).await });

    signal_rx.recv().await.unwrap();
    signal_rx.recv().await.unwrap();

    event_tx
        .send(render_event(Some("/static/broken.ifc")))
        .await
        .unwrap();
    // Height is still reported after the failed init.
    assert_eq!(
        signal_rx.recv().await.unwrap(),
        BridgeSignal::FrameHeight(720)
    );

    // The pump is still alive and a good URL recovers.
    event_tx
        .send(render_event(Some("/static/ok.ifc")))
        .await
        .unwrap();
    assert_eq!(
        signal_rx.recv().await.unwrap(),
        BridgeSignal::FrameHeight(720)
    );
    assert_eq!(loader.load_count(), 1);

    drop(event_tx);
    pump.await.unwrap().unwrap();
}
