// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer registry service.
//!
//! Maps opaque string identifiers to viewer instances. Instead of an ambient
//! `getInstance()` singleton, the registry is constructed explicitly and the
//! shared handle is passed by reference to every consumer, keeping ownership
//! and lifetime visible.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::session::Viewer;

/// A registered viewer. Mutation (re-init) goes through the mutex.
pub type SharedViewer = Arc<tokio::sync::Mutex<Viewer>>;

/// Explicitly shared registry handle.
pub type SharedViewerRegistry = Arc<RwLock<ViewerRegistry>>;

/// Mapping from identifier to viewer instance.
///
/// Entries are added on demand and never evicted; the registry lives as long
/// as the process. Overwrites follow last-write-wins.
#[derive(Default)]
pub struct ViewerRegistry {
    viewers: FxHashMap<String, SharedViewer>,
}

impl ViewerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct the process-wide shared handle.
    pub fn shared() -> SharedViewerRegistry {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Insert or overwrite the viewer registered under `id`.
    pub fn set_viewer(&mut self, viewer: SharedViewer, id: &str) {
        tracing::debug!(id = %id, "Registered viewer");
        self.viewers.insert(id.to_string(), viewer);
    }

    /// Look up the viewer registered under `id`.
    pub fn get_viewer(&self, id: &str) -> Option<SharedViewer> {
        self.viewers.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }
}
