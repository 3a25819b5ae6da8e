//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Input SWF file (positional, "-" for stdin).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("SWF file to read (use \"-\" for stdin)")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Where to write the re-encoded file")
}

/// Unknown tag handling (--unknown).
pub fn unknown_arg() -> Arg {
    Arg::new("unknown")
        .long("unknown")
        .value_name("POLICY")
        .default_value("preserve")
        .value_parser(["preserve", "skip", "error"])
        .help("What to do with tags the codec does not know")
}

/// Dump output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Output format")
}

/// Force a zlib body (--compress).
pub fn compress_arg() -> Arg {
    Arg::new("compress")
        .long("compress")
        .action(ArgAction::SetTrue)
        .conflicts_with("decompress")
        .help("Write a compressed (CWS) file")
}

/// Force a plain body (--decompress).
pub fn decompress_arg() -> Arg {
    Arg::new("decompress")
        .long("decompress")
        .action(ArgAction::SetTrue)
        .help("Write an uncompressed (FWS) file")
}

/// Verify the output against the input (--check).
pub fn check_arg() -> Arg {
    Arg::new("check")
        .long("check")
        .action(ArgAction::SetTrue)
        .help("Fail unless the re-encoded file decompresses to the same bytes as the input")
}

/// Log verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Increase log verbosity (-v debug, -vv trace); SWIFF_LOG overrides")
}
