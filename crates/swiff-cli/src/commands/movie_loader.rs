use std::fs;
use std::io::{self, Read};
use std::path::Path;

use swiff_tags::{DecodeOptions, Movie, UnknownTagPolicy};

/// Contents of `path`, or of stdin when it is "-".
pub fn load_bytes(path: &Path) -> Result<Vec<u8>, String> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    fs::read(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

pub fn decode_movie(
    bytes: &[u8],
    source: &Path,
    unknown: UnknownTagPolicy,
) -> Result<Movie, String> {
    let options = DecodeOptions::default().with_unknown_tags(unknown);
    Movie::from_bytes(bytes, &options)
        .map_err(|e| format!("failed to decode '{}': {}", source.display(), e))
}

pub fn load_movie(path: &Path, unknown: UnknownTagPolicy) -> Result<Movie, String> {
    let bytes = load_bytes(path)?;
    decode_movie(&bytes, path, unknown)
}
