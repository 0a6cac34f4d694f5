// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # XKT-Bridge Convert
//!
//! Conversion wrapper around an injected [`converter::ModelConverter`]
//! capability, plus the shipped [`xkt::XktConverter`] and the `ifc2xkt`
//! command line tool.
//!
//! The wrapper owns validation (the source must exist before the converter
//! is invoked), directory creation, optional metamodel loading with graceful
//! degradation, and timing/size metrics. The conversion algorithm itself
//! stays behind the trait.

pub mod converter;
pub mod error;
pub mod metamodel;
pub mod request;
pub mod scan;
pub mod xkt;

pub use converter::{run_conversion, ConversionStats, ModelConverter};
pub use error::{Error, Result};
pub use metamodel::{MetaModel, MetaObject, Property, PropertySet};
pub use request::ConversionRequest;
pub use scan::{scan_step, StepScan};
pub use xkt::{decode_manifest, encode_container, XktConverter, XktManifest, XKT_MAGIC, XKT_VERSION};
