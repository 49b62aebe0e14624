use lib::edid::{
    lookup, EdidError, ParsedEdid, S3dFormat, S3dFormatVicInfo, SubsamplingMode,
};
use lib::logging::init_test_logger;

/// Builds a 256-byte EDID with one CEA-861 extension holding `blocks` and
/// correct checksums.
struct EdidBuilder {
    blocks: Vec<Vec<u8>>,
    extensions: u8,
    ext_tag: u8,
}

impl EdidBuilder {
    fn new() -> Self {
        Self {
            blocks: vec![],
            extensions: 1,
            ext_tag: 0x02,
        }
    }

    fn block(mut self, tag: u8, payload: &[u8]) -> Self {
        let mut b = vec![(tag << 5) | payload.len() as u8];
        b.extend_from_slice(payload);
        self.blocks.push(b);
        self
    }

    fn video(self, vics: &[u8]) -> Self {
        self.block(2, vics)
    }

    /// HDMI VSDB with the HDMI video section and the given 3D bytes.
    fn hdmi_3d(self, present: bool, multi: u8, s3d: &[u8]) -> Self {
        let mut p = vec![0x03, 0x0c, 0x00, 0x10, 0x00, 0x00, 0x00, 0x20];
        p.push((if present { 0x80 } else { 0x00 }) | (multi << 5));
        p.push(s3d.len() as u8);
        p.extend_from_slice(s3d);
        self.block(3, &p)
    }

    fn build(self) -> Vec<u8> {
        let mut e = vec![0u8; 256];
        e[..8].copy_from_slice(&[0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00]);
        e[8] = 0x10;
        e[9] = 0xac;
        e[126] = self.extensions;
        e[128] = self.ext_tag;
        e[129] = 3;

        let mut pos = 132;
        for b in &self.blocks {
            e[pos..pos + b.len()].copy_from_slice(b);
            pos += b.len();
        }
        e[130] = (pos - 128) as u8;

        for block in e.chunks_mut(128) {
            let sum = block[..127].iter().fold(0u8, |a, b| a.wrapping_add(*b));
            block[127] = 0u8.wrapping_sub(sum);
        }
        e
    }
}

fn assert_consistent(edid: &ParsedEdid) {
    assert!(edid.svds().len() <= 31);
    for info in edid.format_infos() {
        assert!(!edid.svds_supporting(info.format).is_empty());
        for v in &info.vic_infos {
            assert!((v.svd_position as usize) < edid.svds().len());
        }
    }
    assert_eq!(
        edid.s3d_capable(),
        S3dFormat::ALL.iter().any(|f| edid.supports_format(*f))
    );
}

#[test]
fn svd_order_and_native_flags() {
    init_test_logger();
    let raw = EdidBuilder::new().video(&[0x04, 0x90, 0x1f]).build();
    let edid = ParsedEdid::parse(&raw).unwrap();

    let svds: Vec<_> = edid.svds().iter().map(|s| (s.code, s.native)).collect();
    assert_eq!(svds, vec![(4, false), (16, true), (31, false)]);

    for (i, svd) in edid.svds().iter().enumerate() {
        assert_eq!(edid.svd(i), Some(svd));
        assert_eq!(svd.info, lookup(svd.code));
    }
    assert_eq!(edid.svd(3), None);
    assert_eq!(edid.native_svds().count(), 1);
    assert_consistent(&edid);
}

#[test]
fn single_native_svd() {
    let raw = EdidBuilder::new().video(&[0x84]).build();
    let edid = ParsedEdid::parse(&raw).unwrap();

    assert_eq!(edid.svds().len(), 1);
    let svd = edid.svd(0).unwrap();
    assert_eq!((svd.code, svd.native), (4, true));
    assert_eq!(svd.info, lookup(4));
    assert_eq!(edid.identity().manufacturer, "DEL");
}

#[test]
fn no_extension() {
    let mut b = EdidBuilder::new().video(&[0x84]);
    b.extensions = 0;
    let err = ParsedEdid::parse(&b.build()).unwrap_err();

    assert_eq!(err, EdidError::NoExtension);
    assert!(err.is_absent_extension());
}

#[test]
fn not_cea_extension() {
    let mut b = EdidBuilder::new();
    b.ext_tag = 0x70;
    assert_eq!(
        ParsedEdid::parse(&b.build()),
        Err(EdidError::NotCea { tag: 0x70 })
    );
}

#[test]
fn short_buffer() {
    let raw = EdidBuilder::new().build();
    assert_eq!(
        ParsedEdid::parse(&raw[..128]),
        Err(EdidError::TooShort { len: 128 })
    );
}

#[test]
fn longer_buffer_uses_first_256_bytes() {
    let mut raw = EdidBuilder::new().video(&[0x84]).build();
    raw.extend_from_slice(&[0xff; 128]);
    assert_eq!(ParsedEdid::parse(&raw).unwrap().svds().len(), 1);
}

#[test]
fn empty_video_block() {
    let edid = ParsedEdid::parse(&EdidBuilder::new().video(&[]).build()).unwrap();
    assert!(edid.svds().is_empty());
    assert!(!edid.s3d_capable());
}

#[test]
fn unknown_vics_and_tags_are_not_errors() {
    let raw = EdidBuilder::new()
        .block(1, &[0x09, 0x07, 0x07])
        .video(&[0x00, 0x7f, 0x10])
        .block(4, &[0x01, 0x00, 0x00])
        .block(7, &[0x05, 0x40])
        .block(0, &[])
        .build();
    let edid = ParsedEdid::parse(&raw).unwrap();

    assert_eq!(edid.svds().len(), 3);
    assert_eq!(edid.svd(0).unwrap().info.name, "unknown");
    assert_eq!(edid.svd(1).unwrap().info.name, "unknown");
    assert_eq!(edid.svd(2).unwrap().info.xres, 1920);
}

#[test]
fn truncated_data_block() {
    let mut raw = EdidBuilder::new().video(&[0x84, 0x90]).build();
    // shrink the data block region so the video block overhangs it
    raw[130] = 6;
    let err = ParsedEdid::parse(&raw).unwrap_err();

    assert!(matches!(err, EdidError::TruncatedBlock { offset: 132, .. }), "{:?}", err);
    assert!(!err.is_absent_extension());
}

#[test]
fn s3d_present_cleared() {
    let raw = EdidBuilder::new()
        .video(&[0x84, 0x90, 0x13])
        .hdmi_3d(false, 0, &[])
        .build();
    let edid = ParsedEdid::parse(&raw).unwrap();

    assert!(!edid.s3d_capable());
    for f in S3dFormat::ALL.iter() {
        assert!(edid.format_info(*f).is_none());
        assert!(!edid.supports_format(*f));
    }
    assert!(!edid.hdmi().unwrap().s3d_present);
}

#[test]
fn dangling_svd_position() {
    let raw = EdidBuilder::new()
        .video(&[0x84, 0x90, 0x13])
        .hdmi_3d(true, 0, &[0x50])
        .build();

    assert_eq!(
        ParsedEdid::parse(&raw),
        Err(EdidError::DanglingSvd {
            position: 5,
            svds: 3
        })
    );
}

#[test]
fn missing_side_by_side_detail() {
    let raw = EdidBuilder::new()
        .video(&[0x84, 0x90, 0x13])
        .hdmi_3d(true, 0, &[0x00, 0x28])
        .build();

    assert_eq!(
        ParsedEdid::parse(&raw),
        Err(EdidError::MissingDetail { position: 2 })
    );
}

#[test]
fn explicit_3d_entries() {
    init_test_logger();
    let raw = EdidBuilder::new()
        .video(&[0x84, 0x90, 0x13, 0x20])
        // frame packing for 1080p24, top-and-bottom for 720p50,
        // side-by-side half for 1080p60 with quincunx even/even
        .hdmi_3d(true, 0, &[0x30, 0x26, 0x18, 0xa0])
        .build();
    let edid = ParsedEdid::parse(&raw).unwrap();
    assert_consistent(&edid);
    assert!(edid.s3d_capable());
    assert_eq!(edid.format_infos().count(), 3);

    let fp = edid.format_info(S3dFormat::FramePacking).unwrap();
    assert!(!fp.all_svds);
    assert_eq!(
        fp.vic_infos,
        vec![S3dFormatVicInfo {
            svd_position: 3,
            subsampling: SubsamplingMode::None
        }]
    );

    let vics = edid.format_vics(S3dFormat::SideBySideHalf);
    assert_eq!(vics.len(), 1);
    assert_eq!(vics[0].0.code, 16);
    assert_eq!(vics[0].1, SubsamplingMode::QuincunxEvenLeftEvenRight);

    let tab = edid.format_vics(S3dFormat::TopAndBottom);
    assert_eq!(tab[0].0.code, 19);
    assert_eq!(tab[0].1, SubsamplingMode::Vertical);

    assert!(edid.format_info(S3dFormat::LineAlternative).is_none());
}

#[test]
fn structure_all_and_mask() {
    let raw = EdidBuilder::new()
        .video(&[0x84, 0x90, 0x13, 0x20])
        // frame packing and side-by-side half for SVDs 1 and 3
        .hdmi_3d(true, 2, &[0x01, 0x01, 0x00, 0x0a])
        .build();
    let edid = ParsedEdid::parse(&raw).unwrap();

    let fp = edid.format_info(S3dFormat::FramePacking).unwrap();
    assert!(fp.all_svds);
    assert!(fp.vic_infos.is_empty());
    assert_eq!(fp.mask, Some(0x000a));

    let positions: Vec<_> = edid
        .svds_supporting(S3dFormat::SideBySideHalf)
        .into_iter()
        .map(|(i, _)| i)
        .collect();
    assert_eq!(positions, vec![1, 3]);
    assert!(!edid.supports_format(S3dFormat::TopAndBottom));
}

#[test]
fn short_hdmi_block_keeps_svds() {
    // each cut ends the block before a flagged optional field
    let cuts: [&[u8]; 3] = [
        &[0x03, 0x0c, 0x00, 0x10, 0x00, 0x00, 0x00, 0x80],
        &[0x03, 0x0c, 0x00, 0x10, 0x00, 0x00, 0x00, 0x20],
        &[0x03, 0x0c, 0x00, 0x10, 0x00, 0x00, 0x00, 0x20, 0x80],
    ];
    for vsdb in cuts.iter() {
        let raw = EdidBuilder::new().video(&[0x84, 0x90]).block(3, vsdb).build();
        let edid = ParsedEdid::parse(&raw).unwrap();

        assert_eq!(edid.svds().len(), 2);
        assert!(edid.hdmi().is_some());
        assert!(!edid.s3d_capable());
    }
}

#[test]
fn structure_all_reaching_no_svd_is_unsupported() {
    let raw = EdidBuilder::new()
        .video(&[0x84, 0x90])
        .hdmi_3d(true, 2, &[0x00, 0x01, 0x00, 0x00])
        .build();
    let edid = ParsedEdid::parse(&raw).unwrap();
    assert!(!edid.supports_format(S3dFormat::FramePacking));
    assert!(!edid.s3d_capable());
    assert_consistent(&edid);

    let raw = EdidBuilder::new()
        .video(&[])
        .hdmi_3d(true, 1, &[0x00, 0x01])
        .build();
    let edid = ParsedEdid::parse(&raw).unwrap();
    assert!(!edid.s3d_capable());
    assert!(edid.svds_supporting(S3dFormat::FramePacking).is_empty());
}

#[test]
fn queries_are_stable() {
    let raw = EdidBuilder::new()
        .video(&[0x84, 0x90])
        .hdmi_3d(true, 1, &[0x00, 0x41, 0x18, 0x10])
        .build();
    let edid = ParsedEdid::parse(&raw).unwrap();
    let copy = edid.clone();

    for f in S3dFormat::ALL.iter() {
        assert_eq!(edid.format_info(*f), edid.format_info(*f));
        assert_eq!(edid.supports_format(*f), copy.supports_format(*f));
    }
    assert_eq!(edid.svds(), edid.svds());
    assert_eq!(edid, copy);
    assert_consistent(&edid);
}

#[test]
fn parsed_edid_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParsedEdid>();

    let raw = EdidBuilder::new()
        .video(&[0x84, 0x90])
        .hdmi_3d(true, 1, &[0x00, 0x01])
        .build();
    let edid = std::sync::Arc::new(ParsedEdid::parse(&raw).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let edid = edid.clone();
            std::thread::spawn(move || edid.supports_format(S3dFormat::FramePacking))
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}
