// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion seam and the orchestration around one request.
//!
//! The converter itself is an injected capability behind [`ModelConverter`],
//! so the CLI (and the tests) can substitute implementations.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::Result;
use crate::request::ConversionRequest;

/// Metrics reported after a successful conversion.
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    pub input_size: u64,
    pub output_size: u64,
    pub elapsed: Duration,
    pub entity_count: usize,
    pub property_files: usize,
}

/// Asynchronous conversion capability.
#[async_trait]
pub trait ModelConverter: Send + Sync {
    /// Convert `request.source` into an XKT file at `request.target`.
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionStats>;
}

/// Run one conversion request end to end.
///
/// Validates the source, prepares output directories, invokes the converter
/// and reports metrics. The converter is never invoked for a missing source.
pub async fn run_conversion(
    converter: &dyn ModelConverter,
    request: &ConversionRequest,
) -> Result<ConversionStats> {
    request.validate()?;
    request.prepare_dirs().await?;

    if request.log {
        let input_size = tokio::fs::metadata(&request.source).await?.len();
        tracing::info!(
            source = %request.source.display(),
            "Reading input file: {:.2} kB",
            input_size as f64 / 1024.0
        );
        tracing::info!("Converting...");
    }

    let start = Instant::now();
    let mut stats = converter.convert(request).await?;
    stats.elapsed = start.elapsed();

    if request.log {
        tracing::info!(
            target_file = %request.target.display(),
            "Writing XKT file: {:.2} kB",
            stats.output_size as f64 / 1024.0
        );
        tracing::info!("Conversion time: {:.2} s", stats.elapsed.as_secs_f64());
    }

    Ok(stats)
}
