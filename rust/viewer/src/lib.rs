// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # XKT-Bridge Viewer
//!
//! Viewer session management for building models, plus the host-event bridge
//! and the viewer registry service.
//!
//! ## Overview
//!
//! - **Session**: scene graph, perspective camera and orbit controls, built
//!   per model URL and replaced wholesale on re-initialization.
//! - **Render task**: an explicit frame loop on tokio with a cancellation
//!   handle, torn down deterministically when a session is disposed.
//! - **Bridge**: consumes host render events (`{ args: { url } }`), re-inits
//!   the viewer and reports readiness and frame height back to the host.
//! - **Registry**: identifier → viewer mapping behind an explicitly shared
//!   handle.
//!
//! Rendering and model parsing stay behind the [`render::Renderer`] and
//! [`loader::ModelLoader`] traits; this crate never looks inside them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use xkt_bridge_viewer::{
//!     FsModelLoader, HeadlessRenderer, Viewer, ViewerConfig,
//! };
//!
//! let mut viewer = Viewer::new(
//!     ViewerConfig::from_env(),
//!     Arc::new(FsModelLoader::new("static")),
//!     Arc::new(HeadlessRenderer::new()),
//! );
//! viewer.init("/uploads/duplex.ifc").await?;
//! ```

pub mod bridge;
pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod loader;
pub mod registry;
pub mod render;
pub mod scene;
pub mod session;

pub use bridge::{BridgeSignal, HostEvent, RenderArgs, RenderEvent, ViewerBridge};
pub use camera::PerspectiveCamera;
pub use config::ViewerConfig;
pub use controls::OrbitControls;
pub use error::{Error, Result};
pub use loader::{FsModelLoader, LoadedModel, ModelFormat, ModelLoader};
pub use registry::{SharedViewer, SharedViewerRegistry, ViewerRegistry};
pub use render::{HeadlessRenderer, RenderTask, Renderer};
pub use scene::{DirectionalLight, ModelNode, Scene, SceneNode};
pub use session::{Viewer, ViewerSession};
