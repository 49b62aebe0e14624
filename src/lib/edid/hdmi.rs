//! HDMI Licensing vendor specific data block (IEEE OUI 00-0C-03).
//!
//! Layout per HDMI 1.4a section 8.3.2, offsets relative to the payload:
//!
//! ```text
//!  0..3   OUI, little endian
//!  3..5   CEC physical address
//!  5      AI, deep color, DVI dual link flags            (optional)
//!  6      max TMDS clock / 5 MHz                          (optional)
//!  7      latency present, i-latency present, HDMI video  (optional)
//!         [video latency, audio latency]
//!         [interlaced video latency, interlaced audio latency]
//!         [3D present, 3D multi present, image size]
//!         [HDMI_VIC_LEN, HDMI_3D_LEN]
//!         [HDMI_VIC * HDMI_VIC_LEN]
//!         [3D section * HDMI_3D_LEN]
//! ```

use std::str::FromStr;

use serde::Serialize;

use crate::logging::*;

use super::EdidError;

pub const HDMI_OUI: [u8; 3] = [0x03, 0x0c, 0x00];

/// 3D_Structure_ALL and 3D_MASK only describe the first 16 SVDs.
pub const MAX_3D_POSITIONS: usize = 16;

/// HDMI 3D transmission structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum S3dFormat {
    FramePacking,
    FieldAlternative,
    LineAlternative,
    SideBySideFull,
    LDepth,
    LDepthGraphicsDepth,
    TopAndBottom,
    SideBySideHalf,
}

impl S3dFormat {
    pub const ALL: [S3dFormat; 8] = [
        S3dFormat::FramePacking,
        S3dFormat::FieldAlternative,
        S3dFormat::LineAlternative,
        S3dFormat::SideBySideFull,
        S3dFormat::LDepth,
        S3dFormat::LDepthGraphicsDepth,
        S3dFormat::TopAndBottom,
        S3dFormat::SideBySideHalf,
    ];

    /// Maps a 3D_Structure code. 0x7 and 0x9 through 0xf are reserved.
    pub fn from_structure(code: u8) -> Option<Self> {
        Some(match code {
            0x0 => S3dFormat::FramePacking,
            0x1 => S3dFormat::FieldAlternative,
            0x2 => S3dFormat::LineAlternative,
            0x3 => S3dFormat::SideBySideFull,
            0x4 => S3dFormat::LDepth,
            0x5 => S3dFormat::LDepthGraphicsDepth,
            0x6 => S3dFormat::TopAndBottom,
            0x8 => S3dFormat::SideBySideHalf,
            _ => return None,
        })
    }

    /// 3D_Structure code, which doubles as the bit in 3D_Structure_ALL.
    pub fn structure(self) -> u8 {
        match self {
            S3dFormat::SideBySideHalf => 0x8,
            f => f.index() as u8,
        }
    }

    /// Slot of this format in [S3dFormat::ALL].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            S3dFormat::FramePacking => "frame-packing",
            S3dFormat::FieldAlternative => "field-alternative",
            S3dFormat::LineAlternative => "line-alternative",
            S3dFormat::SideBySideFull => "side-by-side-full",
            S3dFormat::LDepth => "l-depth",
            S3dFormat::LDepthGraphicsDepth => "l-depth-graphics-depth",
            S3dFormat::TopAndBottom => "top-and-bottom",
            S3dFormat::SideBySideHalf => "side-by-side-half",
        }
    }
}

impl std::fmt::Display for S3dFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for S3dFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        S3dFormat::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow::format_err!(
                    "unknown 3D format {:?}, expected one of: {}",
                    s,
                    S3dFormat::ALL.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
                )
            })
    }
}

impl<'de> serde::Deserialize<'de> for S3dFormat {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubsamplingMode {
    HorizontalAndQuincunx,
    Horizontal,
    QuincunxAll,
    QuincunxOddLeftOddRight,
    QuincunxOddLeftEvenRight,
    QuincunxEvenLeftOddRight,
    QuincunxEvenLeftEvenRight,
    Vertical,
    None,
}

impl SubsamplingMode {
    /// Maps a 3D_Detail nibble of a side-by-side (half) entry.
    pub fn from_detail(detail: u8) -> Option<Self> {
        Some(match detail {
            0x0 => SubsamplingMode::HorizontalAndQuincunx,
            0x1 => SubsamplingMode::Horizontal,
            0x6 => SubsamplingMode::QuincunxAll,
            0x7 => SubsamplingMode::QuincunxOddLeftOddRight,
            0x8 => SubsamplingMode::QuincunxOddLeftEvenRight,
            0x9 => SubsamplingMode::QuincunxEvenLeftOddRight,
            0xa => SubsamplingMode::QuincunxEvenLeftEvenRight,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            SubsamplingMode::HorizontalAndQuincunx => "horizontal and quincunx",
            SubsamplingMode::Horizontal => "horizontal",
            SubsamplingMode::QuincunxAll => "quincunx, all",
            SubsamplingMode::QuincunxOddLeftOddRight => "quincunx, odd left odd right",
            SubsamplingMode::QuincunxOddLeftEvenRight => "quincunx, odd left even right",
            SubsamplingMode::QuincunxEvenLeftOddRight => "quincunx, even left odd right",
            SubsamplingMode::QuincunxEvenLeftEvenRight => "quincunx, even left even right",
            SubsamplingMode::Vertical => "vertical",
            SubsamplingMode::None => "none",
        }
    }
}

impl std::fmt::Display for SubsamplingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One explicit 3D entry. `svd_position` indexes the SVD list, it is not a VIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct S3dFormatVicInfo {
    pub svd_position: u8,
    pub subsampling: SubsamplingMode,
}

/// Support for one 3D structure. Present either through 3D_Structure_ALL
/// (`all_svds`, optionally narrowed by `mask`), through explicit per SVD
/// entries in `vic_infos`, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S3dFormatInfo {
    pub format: S3dFormat,
    pub all_svds: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<u16>,
    pub vic_infos: Vec<S3dFormatVicInfo>,
}

impl S3dFormatInfo {
    fn new(format: S3dFormat) -> Self {
        Self {
            format,
            all_svds: false,
            mask: None,
            vic_infos: vec![],
        }
    }

    /// Whether the SVD at `position` may be sent in this format. The position
    /// must still be a listed SVD, see [ParsedEdid::svd](super::ParsedEdid::svd).
    pub fn covers(&self, position: usize) -> bool {
        let explicit = self
            .vic_infos
            .iter()
            .any(|v| v.svd_position as usize == position);
        let global = self.all_svds
            && position < MAX_3D_POSITIONS
            && self.mask.map_or(true, |m| m & (1 << position) != 0);

        explicit || global
    }
}

/// One slot per [S3dFormat], indexed by [S3dFormat::index].
pub type S3dFormats = [Option<S3dFormatInfo>; 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Latency {
    pub video_ms: Option<u16>,
    pub audio_ms: Option<u16>,
}

impl Latency {
    fn new(video: u8, audio: u8) -> Self {
        // 0 is unknown, 255 is "no output"
        let ms = |b: u8| match b {
            0 | 255 => None,
            b => Some((b as u16 - 1) * 2),
        };
        Self {
            video_ms: ms(video),
            audio_ms: ms(audio),
        }
    }
}

/// Everything in the HDMI VSDB besides the 3D structures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HdmiVsdb {
    pub physical_address: [u8; 4],
    pub supports_ai: bool,
    pub dc_48bit: bool,
    pub dc_36bit: bool,
    pub dc_30bit: bool,
    pub dc_y444: bool,
    pub dvi_dual: bool,
    pub max_tmds_mhz: Option<u32>,
    pub latency: Option<Latency>,
    pub interlaced_latency: Option<Latency>,
    pub content_types: u8,
    pub s3d_present: bool,
    pub image_size: u8,
    pub hdmi_vics: Vec<u8>,
}

impl HdmiVsdb {
    pub fn physical_address_string(&self) -> String {
        let [a, b, c, d] = self.physical_address;
        format!("{}.{}.{}.{}", a, b, c, d)
    }
}

pub fn is_hdmi(payload: &[u8]) -> bool {
    payload.len() >= 3 && payload[..3] == HDMI_OUI
}

/// Bounded reader over the VSDB payload. Every read checks the bytes are
/// there first, so no conditional field is ever read past the block.
struct Cursor<'a> {
    payload: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            pos: 0,
            end: payload.len(),
        }
    }

    fn remaining(&self) -> usize {
        self.end - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], EdidError> {
        if n > self.remaining() {
            return Err(EdidError::TruncatedVendorBlock {
                needed: self.pos + n,
                len: self.end,
            });
        }
        let payload = self.payload;
        let b = &payload[self.pos..self.pos + n];
        self.pos += n;
        Ok(b)
    }

    fn byte(&mut self) -> Result<u8, EdidError> {
        Ok(self.take(1)?[0])
    }

    fn be_u16(&mut self) -> Result<u16, EdidError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Like [Cursor::take] but leaves the cursor alone when the block ends
    /// first, for fields that are allowed to be cut off.
    fn optional_take(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.remaining() {
            return None;
        }
        self.take(n).ok()
    }

    fn optional_byte(&mut self) -> Option<u8> {
        self.optional_take(1).map(|b| b[0])
    }

    /// Splits off the next `n` bytes into their own cursor.
    fn section(&mut self, n: usize) -> Result<Cursor<'a>, EdidError> {
        let start = self.pos;
        self.take(n)?;
        Ok(Cursor {
            payload: self.payload,
            pos: start,
            end: start + n,
        })
    }
}

/// Decodes a vendor specific data block payload. Returns `Ok(None)` for
/// other vendors' blocks. `svds` is the length of the SVD list that explicit
/// 3D entries index into.
pub fn decode_hdmi_vsdb(
    payload: &[u8],
    svds: usize,
) -> Result<Option<(HdmiVsdb, S3dFormats)>, EdidError> {
    if !is_hdmi(payload) {
        return Ok(None);
    }

    let mut c = Cursor::new(payload);
    let mut vsdb = HdmiVsdb::default();
    let mut formats = S3dFormats::default();

    c.take(3)?;
    let pa = c.take(2)?;
    vsdb.physical_address = [pa[0] >> 4, pa[0] & 0xf, pa[1] >> 4, pa[1] & 0xf];

    if let Some(b) = c.optional_byte() {
        vsdb.supports_ai = b & 0x80 != 0;
        vsdb.dc_48bit = b & 0x40 != 0;
        vsdb.dc_36bit = b & 0x20 != 0;
        vsdb.dc_30bit = b & 0x10 != 0;
        vsdb.dc_y444 = b & 0x08 != 0;
        vsdb.dvi_dual = b & 0x01 != 0;
    }

    vsdb.max_tmds_mhz = c
        .optional_byte()
        .filter(|b| *b != 0)
        .map(|b| b as u32 * 5);

    let flags = match c.optional_byte() {
        Some(b) => b,
        None => {
            trace!("HDMI VSDB ends before the latency flags");
            return Ok(Some((vsdb, formats)));
        }
    };
    vsdb.content_types = flags & 0x0f;

    if flags & 0x80 != 0 {
        match c.optional_take(2) {
            Some(l) => vsdb.latency = Some(Latency::new(l[0], l[1])),
            None => {
                debug!("HDMI VSDB ends before its flagged latency fields");
                return Ok(Some((vsdb, formats)));
            }
        }
    }
    if flags & 0x40 != 0 {
        match c.optional_take(2) {
            Some(l) => vsdb.interlaced_latency = Some(Latency::new(l[0], l[1])),
            None => {
                debug!("HDMI VSDB ends before its flagged interlaced latency fields");
                return Ok(Some((vsdb, formats)));
            }
        }
    }
    if flags & 0x20 == 0 {
        trace!("HDMI VSDB carries no HDMI video section");
        return Ok(Some((vsdb, formats)));
    }

    // the video byte only means something together with the lengths byte
    let (video, lens) = match (c.optional_byte(), c.optional_byte()) {
        (Some(video), Some(lens)) => (video, lens),
        _ => {
            debug!("HDMI VSDB ends inside its flagged HDMI video section");
            return Ok(Some((vsdb, formats)));
        }
    };
    vsdb.s3d_present = video & 0x80 != 0;
    let multi = (video >> 5) & 0x3;
    vsdb.image_size = (video >> 3) & 0x3;

    let vic_len = (lens >> 5) as usize;
    let s3d_len = (lens & 0x1f) as usize;
    vsdb.hdmi_vics = c.take(vic_len)?.to_vec();
    let mut s3d = c.section(s3d_len)?;

    if !vsdb.s3d_present {
        if s3d_len != 0 {
            debug!(
                "ignoring {} bytes of 3D data with 3D_present cleared",
                s3d_len
            );
        }
        return Ok(Some((vsdb, formats)));
    }

    let (all, mask) = match multi {
        0b00 => (None, None),
        0b01 => (Some(s3d.be_u16()?), None),
        0b10 => (Some(s3d.be_u16()?), Some(s3d.be_u16()?)),
        _ => {
            debug!("reserved 3D_Multi_present value, ignoring 3D_Structure_ALL");
            (None, None)
        }
    };

    // 3D_Structure_ALL only reaches the first 16 SVDs
    let listed = (1u32 << svds.min(MAX_3D_POSITIONS)) - 1;
    let reach = mask.map_or(listed, |m| u32::from(m) & listed);
    let all = match all {
        Some(all) if reach == 0 => {
            debug!(
                "3D_Structure_ALL {:#06x} reaches none of the {} listed SVDs",
                all, svds
            );
            None
        }
        all => all,
    };

    if let Some(all) = all {
        for format in S3dFormat::ALL.iter().copied() {
            if all & (1 << format.structure()) == 0 {
                continue;
            }
            let info = formats[format.index()].get_or_insert_with(|| S3dFormatInfo::new(format));
            info.all_svds = true;
            info.mask = mask;
        }
        if let Some(mask) = mask {
            let unlisted = mask
                .checked_shr(svds.min(MAX_3D_POSITIONS) as u32)
                .unwrap_or(0);
            if unlisted != 0 {
                debug!("3D_MASK {:#06x} names positions past the {} listed SVDs", mask, svds);
            }
        }
    }

    decode_3d_entries(&mut s3d, svds, &mut formats)?;

    Ok(Some((vsdb, formats)))
}

/// Reads 2D_VIC_order/3D_Structure pairs, each optionally followed by a
/// 3D_Detail byte, until the 3D section runs out.
fn decode_3d_entries(
    c: &mut Cursor<'_>,
    svds: usize,
    formats: &mut S3dFormats,
) -> Result<(), EdidError> {
    while c.remaining() > 0 {
        let b = c.byte()?;
        let position = b >> 4;
        let structure = b & 0xf;

        let detail = if structure >= 0x8 {
            let d = c
                .byte()
                .map_err(|_| EdidError::MissingDetail { position })?;
            Some(d >> 4)
        } else {
            None
        };

        let format = match S3dFormat::from_structure(structure) {
            Some(f) => f,
            None => {
                debug!(
                    "skipping reserved 3D structure {:#x} for SVD {}",
                    structure, position
                );
                continue;
            }
        };

        if position as usize >= svds {
            return Err(EdidError::DanglingSvd { position, svds });
        }

        let subsampling = match (format, detail) {
            (S3dFormat::SideBySideHalf, Some(d)) => match SubsamplingMode::from_detail(d) {
                Some(s) => s,
                None => {
                    debug!(
                        "skipping side-by-side entry for SVD {} with reserved detail {:#x}",
                        position, d
                    );
                    continue;
                }
            },
            (S3dFormat::TopAndBottom, _) => SubsamplingMode::Vertical,
            _ => SubsamplingMode::None,
        };

        let info = formats[format.index()].get_or_insert_with(|| S3dFormatInfo::new(format));
        if info
            .vic_infos
            .iter()
            .any(|v| v.svd_position == position)
        {
            debug!("duplicate {} entry for SVD {}", format, position);
            continue;
        }
        info.vic_infos.push(S3dFormatVicInfo {
            svd_position: position,
            subsampling,
        });
    }

    Ok(())
}
