//! Human-readable and JSON listings of a movie's tags.

use std::fmt::Write as _;

use serde::Serialize;
use swiff_core::{Rect, Result};

use crate::movie::Movie;
use crate::tag::{
    DefineBinaryData, DefineBitsJpeg2, DefineScalingGrid, DoAbc, FileAttributes, Rgb,
    ScriptLimits, SymbolClass, Tag, UnknownTag,
};
use crate::visitor::TagVisitor;

/// One listed record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub code: u16,
    pub name: &'static str,
    pub length: u32,
    pub detail: String,
}

/// Header fields plus one row per tag, the shape of `--format json`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieSummary {
    pub compressed: bool,
    pub version: u8,
    pub frame_size: Rect,
    pub frame_rate: f32,
    pub frame_count: u16,
    pub tags: Vec<TagSummary>,
}

/// One-line description of a tag's payload.
#[derive(Default)]
struct Describe {
    detail: String,
}

impl<'a> TagVisitor<'a> for Describe {
    fn visit_end(&mut self) {}
    fn visit_show_frame(&mut self) {}

    fn visit_set_background_color(&mut self, color: &'a Rgb) {
        self.detail = format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
    }

    fn visit_define_bits_jpeg2(&mut self, tag: &'a DefineBitsJpeg2) {
        self.detail = format!("id={} image={}B", tag.character_id, tag.image_data.len());
    }

    fn visit_script_limits(&mut self, tag: &'a ScriptLimits) {
        self.detail = format!(
            "recursion={} timeout={}s",
            tag.max_recursion_depth, tag.script_timeout_seconds
        );
    }

    fn visit_file_attributes(&mut self, tag: &'a FileAttributes) {
        let flags = [
            (tag.use_direct_blit, "direct-blit"),
            (tag.use_gpu, "gpu"),
            (tag.has_metadata, "metadata"),
            (tag.actionscript3, "as3"),
            (tag.use_network, "network"),
        ];
        let set: Vec<&str> = flags
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        self.detail = set.join(",");
    }

    fn visit_symbol_class(&mut self, tag: &'a SymbolClass) {
        let symbols: Vec<String> = tag
            .symbols
            .iter()
            .map(|(id, name)| format!("{id}={name}"))
            .collect();
        self.detail = symbols.join(" ");
    }

    fn visit_metadata(&mut self, xml: &'a str) {
        self.detail = format!("{}B xml", xml.len());
    }

    fn visit_define_scaling_grid(&mut self, tag: &'a DefineScalingGrid) {
        self.detail = format!("id={} splitter={}", tag.character_id, tag.splitter);
    }

    fn visit_do_abc(&mut self, tag: &'a DoAbc) {
        self.detail = format!("name={:?} abc={}B", tag.name, tag.abc_data.len());
        if tag.is_lazy() {
            self.detail.push_str(" lazy");
        }
    }

    fn visit_define_binary_data(&mut self, tag: &'a DefineBinaryData) {
        self.detail = format!("id={} data={}B", tag.character_id, tag.data.len());
    }

    fn visit_unknown(&mut self, tag: &'a UnknownTag) {
        self.detail = format!("{}B raw", tag.data.len());
    }
}

/// Rows for every tag, followed by the terminating `End`.
pub fn summarize(movie: &Movie) -> Result<MovieSummary> {
    let mut tags = Vec::with_capacity(movie.tags.len() + 1);
    for tag in movie.tags.iter().chain(std::iter::once(&Tag::End)) {
        let mut describe = Describe::default();
        tag.accept(&mut describe);
        tags.push(TagSummary {
            code: tag.code(),
            name: tag.name(),
            length: tag.length()?,
            detail: describe.detail,
        });
    }

    Ok(MovieSummary {
        compressed: movie.compressed,
        version: movie.header.version,
        frame_size: movie.header.frame_size,
        frame_rate: movie.header.frame_rate_fps(),
        frame_count: movie.header.frame_count,
        tags,
    })
}

/// Text listing: a header line, then one aligned row per tag.
pub fn dump(movie: &Movie) -> Result<String> {
    let summary = summarize(movie)?;
    let mut out = String::new();

    let signature = if summary.compressed { "CWS" } else { "FWS" };
    let _ = writeln!(
        out,
        "{signature} v{} frame {} rate {:.2} frames {}",
        summary.version, summary.frame_size, summary.frame_rate, summary.frame_count
    );

    let name_width = summary
        .tags
        .iter()
        .map(|row| row.name.len())
        .max()
        .unwrap_or(0);
    for row in &summary.tags {
        let line = format!(
            "{:>4} {:<name_width$} {:>8}  {}",
            row.code, row.name, row.length, row.detail
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }

    Ok(out)
}
