use std::fs;
use std::path::PathBuf;

use swiff_tags::{UnknownTagPolicy, uncompressed_image};
use tracing::{debug, info};

use super::movie_loader::{decode_movie, load_bytes};

/// Body compression of the written file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyCompression {
    /// Same as the input.
    #[default]
    Keep,
    Compress,
    Decompress,
}

impl BodyCompression {
    pub fn resolve(self, input_compressed: bool) -> bool {
        match self {
            Self::Keep => input_compressed,
            Self::Compress => true,
            Self::Decompress => false,
        }
    }
}

pub struct RewriteArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub compression: BodyCompression,
    pub unknown: UnknownTagPolicy,
    pub check: bool,
}

pub fn run(args: RewriteArgs) {
    if let Err(msg) = rewrite(&args) {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    }
}

pub fn rewrite(args: &RewriteArgs) -> Result<(), String> {
    let input = load_bytes(&args.input)?;
    let output = reencode(&input, args)?;
    fs::write(&args.output, &output)
        .map_err(|e| format!("failed to write '{}': {}", args.output.display(), e))?;
    info!(
        bytes = output.len(),
        "wrote {}",
        args.output.display()
    );
    Ok(())
}

/// Decode `input` and encode it again with the requested compression.
///
/// With `check`, the uncompressed images of input and output must match byte
/// for byte. Deflate streams are not compared since encoders differ.
pub fn reencode(input: &[u8], args: &RewriteArgs) -> Result<Vec<u8>, String> {
    let mut movie = decode_movie(input, &args.input, args.unknown)?;
    movie.compressed = args.compression.resolve(movie.compressed);
    debug!(tags = movie.tags.len(), compressed = movie.compressed, "re-encoding");

    let output = movie
        .to_bytes()
        .map_err(|e| format!("failed to encode: {}", e))?;
    if args.check {
        check_lossless(input, &output)?;
    }
    Ok(output)
}

fn check_lossless(input: &[u8], output: &[u8]) -> Result<(), String> {
    let expected = uncompressed_image(input).map_err(|e| e.to_string())?;
    let actual = uncompressed_image(output).map_err(|e| e.to_string())?;
    if expected == actual {
        return Ok(());
    }

    let offset = expected
        .iter()
        .zip(&actual)
        .position(|(a, b)| a != b)
        .unwrap_or(expected.len().min(actual.len()));
    Err(format!(
        "re-encoded file differs from input at byte {} ({} bytes in, {} bytes out)",
        offset,
        expected.len(),
        actual.len()
    ))
}
