use super::*;

/// Records the visit order by kind name.
#[derive(Default)]
struct Trace(Vec<&'static str>);

impl<'a> TagVisitor<'a> for Trace {
    fn visit_end(&mut self) {
        self.0.push("End");
    }
    fn visit_show_frame(&mut self) {
        self.0.push("ShowFrame");
    }
    fn visit_set_background_color(&mut self, _color: &'a Rgb) {
        self.0.push("SetBackgroundColor");
    }
    fn visit_define_bits_jpeg2(&mut self, _tag: &'a DefineBitsJpeg2) {
        self.0.push("DefineBitsJPEG2");
    }
    fn visit_script_limits(&mut self, _tag: &'a ScriptLimits) {
        self.0.push("ScriptLimits");
    }
    fn visit_file_attributes(&mut self, _tag: &'a FileAttributes) {
        self.0.push("FileAttributes");
    }
    fn visit_symbol_class(&mut self, _tag: &'a SymbolClass) {
        self.0.push("SymbolClass");
    }
    fn visit_metadata(&mut self, _xml: &'a str) {
        self.0.push("Metadata");
    }
    fn visit_define_scaling_grid(&mut self, _tag: &'a DefineScalingGrid) {
        self.0.push("DefineScalingGrid");
    }
    fn visit_do_abc(&mut self, _tag: &'a DoAbc) {
        self.0.push("DoABC");
    }
    fn visit_define_binary_data(&mut self, _tag: &'a DefineBinaryData) {
        self.0.push("DefineBinaryData");
    }
    fn visit_unknown(&mut self, _tag: &'a UnknownTag) {
        self.0.push("Unknown");
    }
}

fn movie() -> Movie {
    Movie {
        tags: vec![
            Tag::DoAbc(DoAbc {
                name: "first".to_owned(),
                ..DoAbc::default()
            }),
            Tag::DefineBinaryData(DefineBinaryData {
                character_id: 1,
                ..DefineBinaryData::default()
            }),
            Tag::ShowFrame,
            Tag::DefineBitsJpeg2(DefineBitsJpeg2 {
                character_id: 1,
                ..DefineBitsJpeg2::default()
            }),
            Tag::DefineScalingGrid(DefineScalingGrid {
                character_id: 1,
                ..DefineScalingGrid::default()
            }),
            Tag::DoAbc(DoAbc {
                name: "second".to_owned(),
                ..DoAbc::default()
            }),
            Tag::Unknown(UnknownTag {
                code: 2,
                data: vec![],
            }),
            Tag::ShowFrame,
        ],
        ..Movie::default()
    }
}

#[test]
fn each_tag_dispatches_to_its_method() {
    let mut trace = Trace::default();
    movie().accept(&mut trace);
    insta::assert_debug_snapshot!(trace.0, @r#"
    [
        "DoABC",
        "DefineBinaryData",
        "ShowFrame",
        "DefineBitsJPEG2",
        "DefineScalingGrid",
        "DoABC",
        "Unknown",
        "ShowFrame",
        "End",
    ]
    "#);
}

#[test]
fn visit_names_match_tag_names() {
    let movie = movie();
    for tag in &movie.tags {
        let mut trace = Trace::default();
        tag.accept(&mut trace);
        assert_eq!(trace.0, vec![tag.name()]);
    }
}

#[test]
fn abc_blocks_in_order() {
    let movie = movie();
    let names: Vec<_> = movie.abc_blocks().iter().map(|abc| abc.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn frame_counter() {
    let counter = movie().count_frames();
    assert_eq!(counter.frames, 2);
    assert_eq!(counter.characters.get(&1), Some(&2));
    assert_eq!(counter.duplicate_ids(), vec![1]);
}

#[test]
fn visitor_through_trait_object() {
    let movie = movie();
    let mut counter = FrameCounter::default();
    let visitor: &mut dyn TagVisitor<'_> = &mut counter;
    movie.accept(visitor);
    assert_eq!(counter.frames, 2);
}
