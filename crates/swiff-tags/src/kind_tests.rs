use super::*;

#[test]
fn codes_round_trip() {
    for kind in TagKind::ALL {
        assert_eq!(TagKind::from_code(kind.code()), Some(kind));
    }
}

#[test]
fn unmodelled_codes() {
    assert_eq!(TagKind::from_code(2), None); // DefineShape
    assert_eq!(TagKind::from_code(0x3FF), None);
}

#[test]
fn names() {
    assert_eq!(TagKind::DefineBitsJpeg2.name(), "DefineBitsJPEG2");
    assert_eq!(TagKind::DoAbc.name(), "DoABC");
    assert_eq!(TagKind::from_code(9).map(TagKind::name), Some("SetBackgroundColor"));
}

#[test]
fn character_ids() {
    let with_id: Vec<_> = TagKind::ALL
        .into_iter()
        .filter(|kind| kind.has_character_id())
        .map(TagKind::name)
        .collect();
    insta::assert_debug_snapshot!(with_id, @r#"
    [
        "DefineBitsJPEG2",
        "DefineScalingGrid",
        "DefineBinaryData",
    ]
    "#);
}

#[test]
fn long_header_codes() {
    assert!(requires_long_header(21));
    assert!(requires_long_header(6));
    assert!(requires_long_header(90));
    assert!(!requires_long_header(1));
    assert!(!requires_long_header(87));
}
