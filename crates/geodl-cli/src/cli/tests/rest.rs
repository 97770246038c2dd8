//! Tests for status, probe, and completions.

use super::parse;
use crate::cli::CliCommand;
use clap_complete::Shell;
use std::path::Path;

#[test]
fn cli_parse_status_defaults() {
    match parse(&["geodl", "status"]) {
        CliCommand::Status {
            manifest,
            output_dir,
        } => {
            assert_eq!(manifest, Path::new("links.txt"));
            assert!(output_dir.is_none());
        }
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_parse_status_with_paths() {
    match parse(&["geodl", "status", "otros.txt", "-o", "/srv/capas"]) {
        CliCommand::Status {
            manifest,
            output_dir,
        } => {
            assert_eq!(manifest, Path::new("otros.txt"));
            assert_eq!(output_dir.as_deref(), Some(Path::new("/srv/capas")));
        }
        _ => panic!("expected Status with paths"),
    }
}

#[test]
fn cli_parse_probe_default_url() {
    match parse(&["geodl", "probe"]) {
        CliCommand::Probe { url } => assert!(url.is_none()),
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_probe_custom_url() {
    match parse(&["geodl", "probe", "https://example.test/health"]) {
        CliCommand::Probe { url } => {
            assert_eq!(url.as_deref(), Some("https://example.test/health"));
        }
        _ => panic!("expected Probe with URL"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["geodl", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}
