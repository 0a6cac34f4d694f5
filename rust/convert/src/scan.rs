// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light STEP scan.
//!
//! Fast line-oriented pass over the source using [memchr]: enough to fill the
//! container manifest (schema name, entity count, type histogram) without
//! decoding attributes. Full parsing belongs to the downstream viewer stack,
//! not this wrapper.

use memchr::{memchr, memchr_iter};
use rustc_hash::FxHashMap;

/// Summary of a scanned STEP source.
#[derive(Debug, Clone, Default)]
pub struct StepScan {
    /// Schema name from the FILE_SCHEMA header, e.g. `IFC4`.
    pub schema: Option<String>,
    /// Number of entity instance records.
    pub entity_count: usize,
    /// Entity type histogram, e.g. `IFCWALL -> 12`.
    pub type_counts: FxHashMap<String, usize>,
}

/// Scan STEP content for the manifest summary.
///
/// Only lines that open an entity record (`#<id>=<TYPE>(`) are considered;
/// continuation lines of multi-line records are skipped.
pub fn scan_step(content: &[u8]) -> StepScan {
    let mut scan = StepScan::default();

    let mut line_start = 0;
    for line_end in memchr_iter(b'\n', content).chain(std::iter::once(content.len())) {
        if line_end <= line_start {
            line_start = line_end + 1;
            continue;
        }
        let line = trim_ascii(&content[line_start..line_end]);
        line_start = line_end + 1;

        if line.starts_with(b"FILE_SCHEMA") {
            if scan.schema.is_none() {
                scan.schema = extract_quoted(line);
            }
            continue;
        }

        if line.first() != Some(&b'#') {
            continue;
        }
        let Some(eq) = memchr(b'=', line) else {
            continue;
        };
        if !line[1..eq].iter().all(|b| b.is_ascii_digit()) || eq == 1 {
            continue;
        }

        let rest = trim_ascii(&line[eq + 1..]);
        let type_end = rest
            .iter()
            .position(|b| !(b.is_ascii_alphanumeric() || *b == b'_'))
            .unwrap_or(rest.len());
        if type_end == 0 {
            continue;
        }
        let type_name = String::from_utf8_lossy(&rest[..type_end]).to_ascii_uppercase();

        scan.entity_count += 1;
        *scan.type_counts.entry(type_name).or_insert(0) += 1;
    }

    scan
}

/// First single-quoted token on the line, e.g. `('IFC4'))` -> `IFC4`.
fn extract_quoted(line: &[u8]) -> Option<String> {
    let open = memchr(b'\'', line)?;
    let close = memchr(b'\'', &line[open + 1..])?;
    Some(String::from_utf8_lossy(&line[open + 1..open + 1 + close]).into_owned())
}

fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let Some((first, rest)) = bytes.split_first() {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    while let Some((last, rest)) = bytes.split_last() {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}
