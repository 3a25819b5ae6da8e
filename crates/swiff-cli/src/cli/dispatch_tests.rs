//! Tests for CLI dispatch logic: argument parsing and params extraction.

use std::path::PathBuf;

use clap::ArgMatches;
use swiff_tags::UnknownTagPolicy;

use super::*;
use crate::commands::dump::DumpFormat;
use crate::commands::rewrite::BodyCompression;

fn subcommand(args: &[&str]) -> ArgMatches {
    let matches = build_cli()
        .try_get_matches_from(args)
        .unwrap_or_else(|e| panic!("{args:?} should parse: {e}"));
    let (_, m) = matches.subcommand().expect("subcommand is required");
    m.clone()
}

#[test]
fn dump_defaults() {
    let params = DumpParams::from_matches(&subcommand(&["swiff", "dump", "movie.swf"]));
    assert_eq!(params.input, PathBuf::from("movie.swf"));
    assert_eq!(params.format, DumpFormat::Text);
    assert_eq!(params.unknown, UnknownTagPolicy::Preserve);
    assert_eq!(params.verbose, 0);
}

#[test]
fn dump_json_with_error_policy() {
    let params = DumpParams::from_matches(&subcommand(&[
        "swiff",
        "dump",
        "-",
        "--format",
        "json",
        "--unknown",
        "error",
    ]));
    assert_eq!(params.input, PathBuf::from("-"));
    assert_eq!(params.format, DumpFormat::Json);
    assert_eq!(params.unknown, UnknownTagPolicy::Error);
}

#[test]
fn verbose_is_global() {
    let before = DumpParams::from_matches(&subcommand(&["swiff", "-v", "dump", "a.swf"]));
    assert_eq!(before.verbose, 1);

    let after = DumpParams::from_matches(&subcommand(&["swiff", "dump", "a.swf", "-vv"]));
    assert_eq!(after.verbose, 2);
}

#[test]
fn dump_rejects_unknown_format() {
    let result = build_cli().try_get_matches_from(["swiff", "dump", "a.swf", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn dump_requires_input() {
    let result = build_cli().try_get_matches_from(["swiff", "dump"]);
    assert!(result.is_err());
}

#[test]
fn rewrite_params() {
    let params = RewriteParams::from_matches(&subcommand(&[
        "swiff",
        "rewrite",
        "in.swf",
        "-o",
        "out.swf",
        "--decompress",
        "--unknown",
        "skip",
        "--check",
    ]));
    assert_eq!(params.input, PathBuf::from("in.swf"));
    assert_eq!(params.output, PathBuf::from("out.swf"));
    assert_eq!(params.compression, BodyCompression::Decompress);
    assert_eq!(params.unknown, UnknownTagPolicy::Skip);
    assert!(params.check);
}

#[test]
fn rewrite_keeps_compression_by_default() {
    let params = RewriteParams::from_matches(&subcommand(&[
        "swiff",
        "rewrite",
        "in.swf",
        "--output",
        "out.swf",
    ]));
    assert_eq!(params.compression, BodyCompression::Keep);
    assert!(!params.check);
}

#[test]
fn rewrite_requires_output() {
    let result = build_cli().try_get_matches_from(["swiff", "rewrite", "in.swf"]);
    assert!(result.is_err());
}

#[test]
fn compress_conflicts_with_decompress() {
    let result = build_cli().try_get_matches_from([
        "swiff",
        "rewrite",
        "in.swf",
        "-o",
        "out.swf",
        "--compress",
        "--decompress",
    ]);
    assert!(result.is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["swiff"]).is_err());
}

#[test]
fn check_help_describes_uncompressed_comparison() {
    let cli = build_cli();
    let rewrite = cli.find_subcommand("rewrite").unwrap();
    let check = rewrite
        .get_arguments()
        .find(|arg| arg.get_id() == "check")
        .unwrap();

    insta::assert_snapshot!(
        check.get_help().unwrap(),
        @"Fail unless the re-encoded file decompresses to the same bytes as the input"
    );
}
