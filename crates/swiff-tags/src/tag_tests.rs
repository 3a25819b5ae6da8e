use std::io::Read;

use swiff_core::{CodecError, Rect, RecordHeader, SwfReader, SwfWriter};

use super::*;

fn payload(tag: &Tag) -> Vec<u8> {
    let mut w = SwfWriter::new(Vec::new());
    tag.write(&mut w).unwrap();
    w.into_inner().unwrap()
}

fn decode(code: u16, bytes: &[u8]) -> Tag {
    let header = RecordHeader::new(code, bytes.len() as u32);
    Tag::read(&header, &mut SwfReader::new(bytes)).unwrap()
}

fn samples() -> Vec<Tag> {
    vec![
        Tag::End,
        Tag::ShowFrame,
        Tag::SetBackgroundColor(Rgb::new(0xff, 0x80, 0x00)),
        Tag::DefineBitsJpeg2(DefineBitsJpeg2 {
            character_id: 7,
            image_data: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00],
        }),
        Tag::ScriptLimits(ScriptLimits {
            max_recursion_depth: 1000,
            script_timeout_seconds: 60,
        }),
        Tag::FileAttributes(FileAttributes {
            use_direct_blit: false,
            use_gpu: true,
            has_metadata: true,
            actionscript3: true,
            use_network: true,
        }),
        Tag::SymbolClass(SymbolClass {
            symbols: vec![(0, "Main".to_owned()), (3, "assets.Logo".to_owned())],
        }),
        Tag::Metadata("<rdf:RDF/>".to_owned()),
        Tag::DefineScalingGrid(DefineScalingGrid {
            character_id: 4,
            splitter: Rect::new(-5, 100, 0, 3000),
        }),
        Tag::DoAbc(DoAbc {
            flags: DO_ABC_LAZY_INITIALIZE,
            name: "frame1".to_owned(),
            abc_data: vec![0x10, 0x00, 0x2E, 0x00],
        }),
        Tag::DefineBinaryData(DefineBinaryData {
            character_id: 9,
            reserved: 0,
            data: b"hello".to_vec(),
        }),
        Tag::Unknown(UnknownTag {
            code: 2,
            data: vec![1, 2, 3],
        }),
    ]
}

#[test]
fn jpeg_blob_from_fragmented_source() {
    // id 0x0102, then 8 bytes of image data; the source hands out 3, 4, 3 bytes.
    let bytes = vec![0x02, 0x01, 0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
    let source = (&bytes[..3]).chain(&bytes[3..7]).chain(&bytes[7..]);
    let mut source = SwfReader::new(source);

    let header = RecordHeader::new(21, 10);
    let tag = Tag::read(&header, &mut source).unwrap();

    assert_eq!(
        tag,
        Tag::DefineBitsJpeg2(DefineBitsJpeg2 {
            character_id: 0x0102,
            image_data: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46],
        })
    );
    assert_eq!(source.position(), 10);
}

#[test]
fn jpeg_shorter_than_id_is_a_length_mismatch() {
    let header = RecordHeader::new(21, 1);
    let err = Tag::read(&header, &mut SwfReader::new(&[0x01, 0x00][..])).unwrap_err();
    assert!(matches!(
        err,
        CodecError::LengthMismatch {
            code: 21,
            declared: 1,
            actual: 2
        }
    ));
}

#[test]
fn every_kind_round_trips() {
    for tag in samples() {
        let bytes = payload(&tag);
        assert_eq!(bytes.len() as u32, tag.length().unwrap(), "{}", tag.name());
        assert_eq!(decode(tag.code(), &bytes), tag, "{}", tag.name());
    }
}

#[test]
fn samples_cover_every_kind() {
    let kinds: Vec<_> = samples().iter().filter_map(Tag::kind).collect();
    assert_eq!(kinds, TagKind::ALL);
}

#[test]
fn background_color_bytes() {
    let tag = Tag::SetBackgroundColor(Rgb::new(0x33, 0x66, 0x99));
    assert_eq!(payload(&tag), vec![0x33, 0x66, 0x99]);
    assert_eq!(tag.length().unwrap(), 3);
}

#[test]
fn file_attributes_bit_layout() {
    let tag = Tag::FileAttributes(FileAttributes {
        use_direct_blit: false,
        use_gpu: false,
        has_metadata: true,
        actionscript3: true,
        use_network: true,
    });
    // 0 0 0 1 1 00 1, then 24 reserved bits
    assert_eq!(payload(&tag), vec![0x19, 0x00, 0x00, 0x00]);
}

#[test]
fn file_attributes_ignores_reserved_bits() {
    let tag = decode(69, &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(
        tag,
        Tag::FileAttributes(FileAttributes {
            use_direct_blit: true,
            use_gpu: true,
            has_metadata: true,
            actionscript3: true,
            use_network: true,
        })
    );
    assert_eq!(payload(&tag), vec![0x79, 0x00, 0x00, 0x00]);
}

#[test]
fn do_abc_layout() {
    let tag = Tag::DoAbc(DoAbc {
        flags: 1,
        name: "a".to_owned(),
        abc_data: vec![0xAB],
    });
    assert_eq!(payload(&tag), vec![0x01, 0x00, 0x00, 0x00, b'a', 0x00, 0xAB]);
    assert_eq!(tag.length().unwrap(), 7);
}

#[test]
fn do_abc_lazy_flag() {
    let mut abc = DoAbc::default();
    assert!(!abc.is_lazy());
    abc.flags = DO_ABC_LAZY_INITIALIZE;
    assert!(abc.is_lazy());
}

#[test]
fn scaling_grid_length_is_measured() {
    let tag = Tag::DefineScalingGrid(DefineScalingGrid {
        character_id: 1,
        splitter: Rect::new(0, 11000, 0, 8000),
    });
    assert!(!tag.is_length_known());
    // 2-byte id + 9-byte RECT
    assert_eq!(tag.length().unwrap(), 11);
    assert_eq!(payload(&tag).len(), 11);
}

#[test]
fn only_scaling_grid_is_measured() {
    let measured: Vec<_> = samples()
        .iter()
        .filter(|tag| !tag.is_length_known())
        .map(Tag::name)
        .collect();
    assert_eq!(measured, vec!["DefineScalingGrid"]);
}

#[test]
fn unknown_code_keeps_raw_bytes() {
    let tag = decode(300, &[9, 8, 7]);
    assert_eq!(
        tag,
        Tag::Unknown(UnknownTag {
            code: 300,
            data: vec![9, 8, 7]
        })
    );
    assert_eq!(tag.code(), 300);
    assert_eq!(tag.name(), "Unknown");
    assert_eq!(tag.kind(), None);
}

#[test]
fn odd_blob_lengths() {
    for len in [0usize, 1, 62, 63, 64, 4097] {
        let tag = Tag::DefineBinaryData(DefineBinaryData {
            character_id: 1,
            reserved: 0,
            data: vec![0x5A; len],
        });
        assert_eq!(tag.length().unwrap() as usize, 6 + len);
        assert_eq!(decode(87, &payload(&tag)), tag);
    }
}
