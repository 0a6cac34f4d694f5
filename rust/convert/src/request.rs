// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion request: the transient configuration record for one run.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::metamodel::MetaModel;

/// Request to convert a source model into an XKT file.
///
/// Built once from command-line input, consumed once, then discarded.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Path to the source IFC/glTF/etc. file.
    pub source: PathBuf,
    /// Path of the target .xkt file.
    pub target: PathBuf,
    /// Target directory for per-object property files.
    pub properties_dir: Option<PathBuf>,
    /// Parsed metamodel document, when one was given and valid.
    pub metamodel: Option<MetaModel>,
    /// Whether to emit conversion metrics.
    pub log: bool,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            properties_dir: None,
            metamodel: None,
            log: false,
        }
    }

    /// The source must exist on disk before the converter is invoked.
    pub fn validate(&self) -> Result<()> {
        if !self.source.exists() {
            return Err(Error::SourceNotFound(self.source.clone()));
        }
        Ok(())
    }

    /// Create the target's parent directory and the properties directory.
    pub async fn prepare_dirs(&self) -> Result<()> {
        if let Some(parent) = self.target.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        if let Some(props) = &self.properties_dir {
            tokio::fs::create_dir_all(props).await?;
        }
        Ok(())
    }

    /// Lowercased source extension, if any.
    pub fn source_extension(&self) -> Option<String> {
        Path::new(&self.source)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_fails_validation() {
        let request = ConversionRequest::new("/definitely/not/here.ifc", "/tmp/out.xkt");
        assert!(matches!(
            request.validate(),
            Err(Error::SourceNotFound(_))
        ));
    }

    #[test]
    fn extension_is_lowercased() {
        let request = ConversionRequest::new("model.IFC", "out.xkt");
        assert_eq!(request.source_extension().as_deref(), Some("ifc"));
    }

    #[tokio::test]
    async fn prepare_dirs_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = ConversionRequest::new(
            dir.path().join("in.ifc"),
            dir.path().join("out/nested/model.xkt"),
        );
        request.properties_dir = Some(dir.path().join("props"));

        request.prepare_dirs().await.unwrap();
        assert!(dir.path().join("out/nested").is_dir());
        assert!(dir.path().join("props").is_dir());
    }
}
