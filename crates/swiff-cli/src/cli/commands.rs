//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("swiff")
        .about("Inspect and re-encode SWF files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(dump_command())
        .subcommand(rewrite_command())
}

/// List the header and tags of a file.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("List the header and tags of a SWF file")
        .override_usage(
            "\
  swiff dump <FILE>
  swiff dump <FILE> --format json",
        )
        .after_help(
            r#"EXAMPLES:
  swiff dump movie.swf                   # tag listing
  swiff dump movie.swf --format json     # machine-readable summary
  swiff dump movie.swf --unknown error   # fail on tags the codec does not know
  cat movie.swf | swiff dump -           # from stdin"#,
        )
        .arg(input_arg())
        .arg(format_arg())
        .arg(unknown_arg())
}

/// Decode and write a file back.
pub fn rewrite_command() -> Command {
    Command::new("rewrite")
        .about("Decode a SWF file and encode it again")
        .override_usage(
            "\
  swiff rewrite <FILE> -o <OUT>
  swiff rewrite <FILE> -o <OUT> --compress
  swiff rewrite <FILE> -o <OUT> --check",
        )
        .after_help(
            r#"EXAMPLES:
  swiff rewrite in.swf -o out.swf                # keep compression
  swiff rewrite in.swf -o out.swf --decompress   # CWS -> FWS
  swiff rewrite in.swf -o out.swf --unknown skip # drop unknown tags
  swiff rewrite in.swf -o out.swf --check        # verify lossless round trip"#,
        )
        .arg(input_arg())
        .arg(output_arg())
        .arg(compress_arg())
        .arg(decompress_arg())
        .arg(unknown_arg())
        .arg(check_arg())
}
