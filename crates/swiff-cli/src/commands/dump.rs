use std::path::PathBuf;

use swiff_tags::{Movie, UnknownTagPolicy, dump, summarize};

use super::movie_loader::load_movie;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DumpFormat {
    #[default]
    Text,
    Json,
}

pub struct DumpArgs {
    pub input: PathBuf,
    pub format: DumpFormat,
    pub unknown: UnknownTagPolicy,
}

pub fn run(args: DumpArgs) {
    let output = load_movie(&args.input, args.unknown).and_then(|movie| render(&movie, args.format));
    match output {
        Ok(text) => print!("{}", text),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

pub fn render(movie: &Movie, format: DumpFormat) -> Result<String, String> {
    match format {
        DumpFormat::Text => dump(movie).map_err(|e| e.to_string()),
        DumpFormat::Json => {
            let summary = summarize(movie).map_err(|e| e.to_string())?;
            let mut json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
            json.push('\n');
            Ok(json)
        }
    }
}
