// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model loading seam.
//!
//! Parsing and tessellation are owned by the embedded loader implementation;
//! the viewer only sees the narrow [`ModelLoader`] contract and the
//! [`LoadedModel`] summary it returns.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Source format, sniffed from the URL extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Ifc,
    Xkt,
    Gltf,
    Other,
}

impl ModelFormat {
    pub fn from_url(url: &str) -> Self {
        match Path::new(url)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("ifc") | Some("ifczip") => Self::Ifc,
            Some("xkt") => Self::Xkt,
            Some("gltf") | Some("glb") => Self::Gltf,
            _ => Self::Other,
        }
    }
}

/// Summary of a loaded model, enough for the scene graph and the host UI.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: String,
    pub format: ModelFormat,
    pub size_bytes: u64,
    pub object_count: usize,
}

/// Asynchronous model loading contract.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Load the model behind `url`. Failures surface as [`Error::Load`].
    async fn load(&self, url: &str) -> Result<LoadedModel>;
}

/// Loader for models on the local filesystem.
///
/// Host pages hand the bridge root-relative URLs like
/// `/static/uploads/model.ifc`; those resolve against `base_dir`.
#[derive(Debug, Clone)]
pub struct FsModelLoader {
    base_dir: PathBuf,
}

impl FsModelLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let relative = url.trim_start_matches('/');
        self.base_dir.join(relative)
    }
}

#[async_trait]
impl ModelLoader for FsModelLoader {
    async fn load(&self, url: &str) -> Result<LoadedModel> {
        let path = self.resolve(url);
        let meta = tokio::fs::metadata(&path).await.map_err(|e| Error::Load {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model")
            .to_string();

        tracing::debug!(url = %url, size = meta.len(), "Loaded model from disk");

        Ok(LoadedModel {
            name,
            format: ModelFormat::from_url(url),
            size_bytes: meta.len(),
            object_count: 0,
        })
    }
}
