// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: convert an IFC (or other supported) model file into XKT.
//!
//! Usage:
//!   ifc2xkt -s model.ifc -o model.xkt [options]
//!
//! Exit codes: 0 on success or help, 1 on missing required flags, missing
//! source file, or conversion failure.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use xkt_bridge_convert::{metamodel, run_conversion, ConversionRequest, Error, XktConverter};

#[derive(Debug, Clone, Default, PartialEq)]
struct CliArgs {
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    properties: Option<PathBuf>,
    metamodel: Option<PathBuf>,
    log: bool,
    help: bool,
}

impl CliArgs {
    fn missing_required(&self) -> bool {
        self.source.is_none() || self.output.is_none()
    }
}

/// Parse recognized flags; unrecognized arguments are ignored.
fn parse_args(argv: &[String]) -> CliArgs {
    let mut args = CliArgs::default();
    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => args.help = true,
            "-l" | "--log" => args.log = true,
            "-s" | "--source" => args.source = take_value(argv, &mut i),
            "-o" | "--output" => args.output = take_value(argv, &mut i),
            "-p" | "--properties" => args.properties = take_value(argv, &mut i),
            "-m" | "--metamodel" => args.metamodel = take_value(argv, &mut i),
            _ => {}
        }
        i += 1;
    }
    args
}

fn take_value(argv: &[String], i: &mut usize) -> Option<PathBuf> {
    *i += 1;
    argv.get(*i).map(PathBuf::from)
}

#[tokio::main]
async fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&argv);
    if !args.help && !args.missing_required() {
        init_tracing(args.log);
    }
    std::process::exit(run(args).await);
}

/// Execute the CLI and return its exit code: 0 on success or help, 1 on
/// missing required flags, a missing source file, or conversion failure.
async fn run(args: CliArgs) -> i32 {
    if args.help {
        print_usage();
        return 0;
    }
    if args.missing_required() {
        eprintln!("Error: --source and --output are required.");
        print_usage();
        return 1;
    }

    let metamodel = match &args.metamodel {
        Some(path) => metamodel::load_optional(path).await,
        None => None,
    };

    let request = ConversionRequest {
        // missing_required() checked above
        source: args.source.unwrap_or_default(),
        target: args.output.unwrap_or_default(),
        properties_dir: args.properties,
        metamodel,
        log: args.log,
    };

    let converter = XktConverter::new();
    match run_conversion(&converter, &request).await {
        Ok(stats) => {
            tracing::debug!(
                entities = stats.entity_count,
                property_files = stats.property_files,
                "Conversion complete"
            );
            0
        }
        Err(e @ Error::SourceNotFound(_)) => {
            eprintln!("{e}");
            1
        }
        Err(e) => {
            eprintln!("Conversion failed:");
            eprintln!("{e}");
            1
        }
    }
}

fn init_tracing(log: bool) {
    let default_filter = if log { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

fn print_usage() {
    println!(
        r#"Usage: ifc2xkt [options]

Options:

  -s, --source [file]      path to source IFC/GLTF/etc. file (required)
  -o, --output [file]      path to target .xkt file (required)
  -p, --properties [dir]   target directory for object property files (optional)
  -m, --metamodel [file]   path to source metamodel JSON file (optional)
  -l, --log                enable logging
  -h, --help               show this help
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_short_and_long_flags() {
        let args = parse_args(&argv(&[
            "--source", "in.ifc", "-o", "out.xkt", "-p", "props", "--metamodel", "meta.json",
            "-l",
        ]));
        assert_eq!(args.source.as_deref(), Some(std::path::Path::new("in.ifc")));
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.xkt")));
        assert_eq!(args.properties.as_deref(), Some(std::path::Path::new("props")));
        assert_eq!(args.metamodel.as_deref(), Some(std::path::Path::new("meta.json")));
        assert!(args.log);
        assert!(!args.help);
        assert!(!args.missing_required());
    }

    #[test]
    fn missing_source_or_output_is_flagged() {
        assert!(parse_args(&argv(&["-o", "out.xkt"])).missing_required());
        assert!(parse_args(&argv(&["-s", "in.ifc"])).missing_required());
        assert!(parse_args(&argv(&[])).missing_required());
    }

    #[test]
    fn flag_without_value_stays_unset() {
        let args = parse_args(&argv(&["-s", "in.ifc", "-o"]));
        assert!(args.output.is_none());
        assert!(args.missing_required());
    }

    #[test]
    fn unknown_flags_are_ignored() {
        let args = parse_args(&argv(&["--wat", "-s", "in.ifc", "-o", "out.xkt"]));
        assert!(!args.missing_required());
    }

    #[test]
    fn help_flag_wins() {
        assert!(parse_args(&argv(&["-h"])).help);
        assert!(parse_args(&argv(&["--help", "-s", "x"])).help);
    }

    #[tokio::test]
    async fn help_exits_zero() {
        assert_eq!(run(parse_args(&argv(&["-h"]))).await, 0);
    }

    #[tokio::test]
    async fn missing_required_flags_exit_one() {
        assert_eq!(run(parse_args(&argv(&[]))).await, 1);
        assert_eq!(run(parse_args(&argv(&["-s", "in.ifc"]))).await, 1);
        assert_eq!(run(parse_args(&argv(&["-o", "out.xkt"]))).await, 1);
    }

    #[tokio::test]
    async fn missing_source_file_exits_one() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("absent.ifc");
        let target = dir.path().join("out.xkt");
        let args = parse_args(&argv(&[
            "-s",
            source.to_str().unwrap(),
            "-o",
            target.to_str().unwrap(),
        ]));
        assert_eq!(run(args).await, 1);
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn valid_conversion_exits_zero() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("box.ifc");
        tokio::fs::write(
            &source,
            "ISO-10303-21;\nDATA;\n#1=IFCWALL('x',$,$,$,$,$,$,$,$);\nENDSEC;\n",
        )
        .await
        .unwrap();
        let target = dir.path().join("box.xkt");
        let args = parse_args(&argv(&[
            "-s",
            source.to_str().unwrap(),
            "-o",
            target.to_str().unwrap(),
        ]));
        assert_eq!(run(args).await, 0);
        assert!(target.exists());
    }
}
