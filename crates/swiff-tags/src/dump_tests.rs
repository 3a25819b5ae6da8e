use swiff_core::Rect;

use super::*;

fn movie() -> Movie {
    Movie {
        compressed: false,
        header: MovieHeader {
            version: 10,
            frame_size: Rect::default(),
            frame_rate: 0x1800,
            frame_count: 1,
        },
        tags: vec![
            Tag::FileAttributes(FileAttributes {
                has_metadata: true,
                actionscript3: true,
                ..FileAttributes::default()
            }),
            Tag::SetBackgroundColor(Rgb::new(0x33, 0x66, 0x99)),
            Tag::DoAbc(DoAbc {
                flags: DO_ABC_LAZY_INITIALIZE,
                name: "main".to_owned(),
                abc_data: vec![0x10, 0x00, 0x2E, 0x00],
            }),
            Tag::ShowFrame,
        ],
    }
}

#[test]
fn text_listing() {
    insta::assert_snapshot!(dump(&movie()).unwrap(), @r#"
    FWS v10 frame [0, 0] x [0, 0] rate 24.00 frames 1
      69 FileAttributes            4  metadata,as3
       9 SetBackgroundColor        3  #336699
      82 DoABC                    13  name="main" abc=4B lazy
       1 ShowFrame                 0
       0 End                       0
    "#);
}

#[test]
fn summary_rows() {
    let summary = summarize(&movie()).unwrap();
    assert_eq!(summary.frame_rate, 24.0);
    assert_eq!(summary.tags.len(), 5);
    assert_eq!(
        summary.tags[1],
        TagSummary {
            code: 9,
            name: "SetBackgroundColor",
            length: 3,
            detail: "#336699".to_owned(),
        }
    );
    assert_eq!(summary.tags.last().map(|row| row.name), Some("End"));
}

#[test]
fn unknown_and_binary_rows() {
    let movie = Movie {
        tags: vec![
            Tag::Unknown(UnknownTag {
                code: 2,
                data: vec![0; 12],
            }),
            Tag::DefineBinaryData(DefineBinaryData {
                character_id: 5,
                reserved: 0,
                data: vec![0; 3],
            }),
            Tag::SymbolClass(SymbolClass {
                symbols: vec![(0, "Main".to_owned()), (5, "Blob".to_owned())],
            }),
        ],
        ..Movie::default()
    };
    let details: Vec<_> = summarize(&movie)
        .unwrap()
        .tags
        .into_iter()
        .map(|row| format!("{} {}", row.name, row.detail))
        .collect();
    insta::assert_debug_snapshot!(details, @r#"
    [
        "Unknown 12B raw",
        "DefineBinaryData id=5 data=3B",
        "SymbolClass 0=Main 5=Blob",
        "End ",
    ]
    "#);
}
