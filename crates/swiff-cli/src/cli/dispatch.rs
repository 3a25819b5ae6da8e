//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use swiff_tags::UnknownTagPolicy;

use crate::commands::dump::{DumpArgs, DumpFormat};
use crate::commands::rewrite::{BodyCompression, RewriteArgs};

pub struct DumpParams {
    pub input: PathBuf,
    pub format: DumpFormat,
    pub unknown: UnknownTagPolicy,
    pub verbose: u8,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: parse_input(m),
            format: match m.get_one::<String>("format").map(|s| s.as_str()) {
                Some("json") => DumpFormat::Json,
                _ => DumpFormat::Text,
            },
            unknown: parse_unknown(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input,
            format: p.format,
            unknown: p.unknown,
        }
    }
}

pub struct RewriteParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub compression: BodyCompression,
    pub unknown: UnknownTagPolicy,
    pub check: bool,
    pub verbose: u8,
}

impl RewriteParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let compression = if m.get_flag("compress") {
            BodyCompression::Compress
        } else if m.get_flag("decompress") {
            BodyCompression::Decompress
        } else {
            BodyCompression::Keep
        };

        Self {
            input: parse_input(m),
            output: m.get_one::<PathBuf>("output").cloned().unwrap_or_default(),
            compression,
            unknown: parse_unknown(m),
            check: m.get_flag("check"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<RewriteParams> for RewriteArgs {
    fn from(p: RewriteParams) -> Self {
        Self {
            input: p.input,
            output: p.output,
            compression: p.compression,
            unknown: p.unknown,
            check: p.check,
        }
    }
}

fn parse_input(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("input").cloned().unwrap_or_default()
}

fn parse_unknown(m: &ArgMatches) -> UnknownTagPolicy {
    match m.get_one::<String>("unknown").map(|s| s.as_str()) {
        Some("skip") => UnknownTagPolicy::Skip,
        Some("error") => UnknownTagPolicy::Error,
        _ => UnknownTagPolicy::Preserve,
    }
}
