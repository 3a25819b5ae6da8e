//! Double dispatch over tag kinds.
//!
//! [`Tag::accept`](crate::Tag::accept) calls exactly one method per tag.
//! There are no default methods: a new tag kind must be handled by every
//! visitor before the workspace compiles again.

use std::collections::BTreeMap;

use crate::tag::{
    DefineBinaryData, DefineBitsJpeg2, DefineScalingGrid, DoAbc, FileAttributes, Rgb,
    ScriptLimits, SymbolClass, UnknownTag,
};

/// Consumer-side processing of tags, one method per kind.
///
/// The lifetime lets visitors keep references into the tags they visit.
pub trait TagVisitor<'a> {
    fn visit_end(&mut self);
    fn visit_show_frame(&mut self);
    fn visit_set_background_color(&mut self, color: &'a Rgb);
    fn visit_define_bits_jpeg2(&mut self, tag: &'a DefineBitsJpeg2);
    fn visit_script_limits(&mut self, tag: &'a ScriptLimits);
    fn visit_file_attributes(&mut self, tag: &'a FileAttributes);
    fn visit_symbol_class(&mut self, tag: &'a SymbolClass);
    fn visit_metadata(&mut self, xml: &'a str);
    fn visit_define_scaling_grid(&mut self, tag: &'a DefineScalingGrid);
    fn visit_do_abc(&mut self, tag: &'a DoAbc);
    fn visit_define_binary_data(&mut self, tag: &'a DefineBinaryData);
    fn visit_unknown(&mut self, tag: &'a UnknownTag);
}

/// Collects the ABC blocks of a movie in decode order.
#[derive(Debug, Default)]
pub struct AbcCollector<'a> {
    pub blocks: Vec<&'a DoAbc>,
}

impl<'a> TagVisitor<'a> for AbcCollector<'a> {
    fn visit_end(&mut self) {}
    fn visit_show_frame(&mut self) {}
    fn visit_set_background_color(&mut self, _color: &'a Rgb) {}
    fn visit_define_bits_jpeg2(&mut self, _tag: &'a DefineBitsJpeg2) {}
    fn visit_script_limits(&mut self, _tag: &'a ScriptLimits) {}
    fn visit_file_attributes(&mut self, _tag: &'a FileAttributes) {}
    fn visit_symbol_class(&mut self, _tag: &'a SymbolClass) {}
    fn visit_metadata(&mut self, _xml: &'a str) {}
    fn visit_define_scaling_grid(&mut self, _tag: &'a DefineScalingGrid) {}

    fn visit_do_abc(&mut self, tag: &'a DoAbc) {
        self.blocks.push(tag);
    }

    fn visit_define_binary_data(&mut self, _tag: &'a DefineBinaryData) {}
    fn visit_unknown(&mut self, _tag: &'a UnknownTag) {}
}

/// Counts frames and character definitions.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrameCounter {
    pub frames: u32,
    /// Character ids defined, with the number of definitions seen for each.
    pub characters: BTreeMap<u16, u32>,
}

impl FrameCounter {
    fn define(&mut self, id: u16) {
        *self.characters.entry(id).or_default() += 1;
    }

    /// Ids defined more than once.
    pub fn duplicate_ids(&self) -> Vec<u16> {
        self.characters
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl<'a> TagVisitor<'a> for FrameCounter {
    fn visit_end(&mut self) {}

    fn visit_show_frame(&mut self) {
        self.frames += 1;
    }

    fn visit_set_background_color(&mut self, _color: &'a Rgb) {}

    fn visit_define_bits_jpeg2(&mut self, tag: &'a DefineBitsJpeg2) {
        self.define(tag.character_id);
    }

    fn visit_script_limits(&mut self, _tag: &'a ScriptLimits) {}
    fn visit_file_attributes(&mut self, _tag: &'a FileAttributes) {}
    fn visit_symbol_class(&mut self, _tag: &'a SymbolClass) {}
    fn visit_metadata(&mut self, _xml: &'a str) {}

    // A scaling grid decorates an existing character.
    fn visit_define_scaling_grid(&mut self, _tag: &'a DefineScalingGrid) {}

    fn visit_do_abc(&mut self, _tag: &'a DoAbc) {}

    fn visit_define_binary_data(&mut self, tag: &'a DefineBinaryData) {
        self.define(tag.character_id);
    }

    fn visit_unknown(&mut self, _tag: &'a UnknownTag) {}
}
