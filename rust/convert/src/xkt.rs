// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! XKT container writer and the shipped converter implementation.
//!
//! The container is a compact binary: a magic/version header followed by two
//! zlib-deflated blocks, a JSON manifest (schema, entity counts, metamodel
//! reference) and the entity payload. Tessellation is out of scope here; the
//! viewer stack downstream owns geometry.

use std::io::{Read, Write};
use std::path::Path;

use async_trait::async_trait;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::converter::{ConversionStats, ModelConverter};
use crate::error::{Error, Result};
use crate::metamodel::MetaModel;
use crate::request::ConversionRequest;
use crate::scan::{scan_step, StepScan};

/// Container magic bytes.
pub const XKT_MAGIC: [u8; 4] = *b"XKT1";
/// Container format version.
pub const XKT_VERSION: u32 = 10;

/// Manifest block of the container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XktManifest {
    pub source_name: String,
    #[serde(default)]
    pub schema: Option<String>,
    pub entity_count: usize,
    #[serde(default)]
    pub type_counts: std::collections::BTreeMap<String, usize>,
    #[serde(default)]
    pub metamodel_id: Option<String>,
}

/// Serialize the container into bytes.
pub fn encode_container(manifest: &XktManifest, payload: &[u8]) -> Result<Vec<u8>> {
    let manifest_json = serde_json::to_vec(manifest)?;
    let manifest_block = deflate(&manifest_json)?;
    let payload_block = deflate(payload)?;

    let mut out = Vec::with_capacity(16 + manifest_block.len() + payload_block.len());
    out.extend_from_slice(&XKT_MAGIC);
    out.extend_from_slice(&XKT_VERSION.to_le_bytes());
    out.extend_from_slice(&(manifest_block.len() as u32).to_le_bytes());
    out.extend_from_slice(&manifest_block);
    out.extend_from_slice(&(payload_block.len() as u32).to_le_bytes());
    out.extend_from_slice(&payload_block);
    Ok(out)
}

/// Decode a container header and manifest. Used by consumers and tests.
pub fn decode_manifest(bytes: &[u8]) -> Result<(u32, XktManifest)> {
    if bytes.len() < 12 || bytes[..4] != XKT_MAGIC {
        return Err(Error::Container("bad magic".into()));
    }
    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
    let block = bytes
        .get(12..12 + len)
        .ok_or_else(|| Error::Container("truncated manifest block".into()))?;
    let manifest = serde_json::from_slice(&inflate(block)?)?;
    Ok((version, manifest))
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

/// The shipped converter: scans the source, writes the container, and emits
/// per-object property files when a properties directory and metamodel are
/// both present.
#[derive(Debug, Clone, Default)]
pub struct XktConverter;

impl XktConverter {
    pub fn new() -> Self {
        Self
    }

    fn scan(request: &ConversionRequest, source: &[u8]) -> StepScan {
        match request.source_extension().as_deref() {
            Some("ifc") | Some("ifczip") => scan_step(source),
            // Non-STEP sources pass through without an entity table.
            _ => StepScan::default(),
        }
    }
}

#[async_trait]
impl ModelConverter for XktConverter {
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionStats> {
        let source = tokio::fs::read(&request.source).await?;
        let scan = Self::scan(request, &source);

        let manifest = XktManifest {
            source_name: request
                .source
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("model")
                .to_string(),
            schema: scan.schema.clone(),
            entity_count: scan.entity_count,
            type_counts: scan.type_counts.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            metamodel_id: request.metamodel.as_ref().map(|m| m.id.clone()),
        };

        let container = encode_container(&manifest, &source)?;
        tokio::fs::write(&request.target, &container).await?;
        tracing::debug!(
            target_file = %request.target.display(),
            entities = scan.entity_count,
            "Wrote XKT container"
        );

        let property_files = match (&request.properties_dir, &request.metamodel) {
            (Some(dir), Some(metamodel)) => write_property_files(dir, metamodel).await?,
            _ => 0,
        };

        Ok(ConversionStats {
            input_size: source.len() as u64,
            output_size: container.len() as u64,
            elapsed: std::time::Duration::ZERO,
            entity_count: scan.entity_count,
            property_files,
        })
    }
}

/// One JSON property file per metamodel object that carries property sets.
async fn write_property_files(dir: &Path, metamodel: &MetaModel) -> Result<usize> {
    let mut written = 0;
    for object in &metamodel.meta_objects {
        let sets = metamodel.property_sets_for(object);
        if sets.is_empty() {
            continue;
        }
        let body = serde_json::json!({
            "id": object.id,
            "name": object.name,
            "type": object.object_type,
            "propertySets": sets,
        });
        let file_name = format!("{}.json", sanitize_file_stem(&object.id));
        tokio::fs::write(dir.join(file_name), serde_json::to_vec_pretty(&body)?).await?;
        written += 1;
    }
    tracing::debug!(dir = %dir.display(), count = written, "Wrote property files");
    Ok(written)
}

/// Object ids land in filenames; strip anything path-like.
fn sanitize_file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
