use std::convert::TryFrom;

use serde::{Serialize, Serializer};

use crate::logging::*;

use super::{
    base::{self, DisplayIdentity, BLOCK_LEN},
    blocks::{DataBlocks, Tag},
    hdmi::{self, HdmiVsdb, S3dFormat, S3dFormatInfo, S3dFormats, SubsamplingMode},
    video::{decode_video_block, ShortVideoDescriptor},
    EdidError, CEA_EXTENSION_TAG, EDID_LEN,
};

/// The decoded form of one 256-byte EDID: its SVD list, HDMI vendor block
/// and one slot per advertised 3D structure. Built in one go by
/// [ParsedEdid::parse] and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEdid {
    identity: DisplayIdentity,
    svds: Vec<ShortVideoDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hdmi: Option<HdmiVsdb>,
    #[serde(rename = "s3d_formats", serialize_with = "present_formats")]
    formats: S3dFormats,
}

fn present_formats<S: Serializer>(formats: &S3dFormats, s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(formats.iter().flatten())
}

/// Offsets of the data block collection within the whole EDID.
fn data_block_range(edid: &[u8]) -> Result<(usize, usize), EdidError> {
    let ext = &edid[BLOCK_LEN..EDID_LEN];
    let revision = ext[1];
    let offset = ext[2];
    let start = BLOCK_LEN + 4;

    match offset {
        // no detailed timings and no data blocks
        0 => Ok((start, start)),
        1..=3 => Err(EdidError::BadDataBlockOffset { offset }),
        o if o as usize >= BLOCK_LEN => Err(EdidError::BadDataBlockOffset { offset }),
        _ if revision < 3 => {
            debug!("CEA-861 revision {} carries no data blocks", revision);
            Ok((start, start))
        }
        o => Ok((start, BLOCK_LEN + o as usize)),
    }
}

impl ParsedEdid {
    /// Decodes the base block and its first CEA-861 extension. Only the first
    /// 256 bytes are looked at.
    pub fn parse(edid: &[u8]) -> Result<Self, EdidError> {
        if edid.len() < EDID_LEN {
            return Err(EdidError::TooShort { len: edid.len() });
        }
        let edid = &edid[..EDID_LEN];
        let base_block = &edid[..BLOCK_LEN];

        base::check_header(base_block);
        base::check_block(base_block, "base");
        let identity = DisplayIdentity::from_base_block(base_block);
        trace!("decoding EDID for {}", identity);

        match base_block[126] {
            0 => return Err(EdidError::NoExtension),
            1 => (),
            n => debug!("EDID lists {} extensions, only the first is decoded", n),
        }

        let ext = &edid[BLOCK_LEN..];
        if ext[0] != CEA_EXTENSION_TAG {
            return Err(EdidError::NotCea { tag: ext[0] });
        }
        base::check_block(ext, "CEA-861 extension");

        // Collect first: 3D entries refer to SVD positions, and the VSDB may
        // come before the Video Data Block.
        let (start, end) = data_block_range(edid)?;
        let mut video = None;
        let mut vendor = vec![];
        for block in DataBlocks::new(edid, start, end) {
            let block = block?;
            match block.tag {
                Tag::Video if video.is_none() => video = Some(block.payload),
                Tag::Video => debug!(
                    "ignoring additional video data block at offset {}",
                    block.offset
                ),
                Tag::VendorSpecific => vendor.push(block),
                tag => trace!("skipping {:?} data block at offset {}", tag, block.offset),
            }
        }

        let svds = video.map(decode_video_block).unwrap_or_default();

        let mut hdmi = None;
        let mut formats = S3dFormats::default();
        for block in vendor {
            if !hdmi::is_hdmi(block.payload) {
                debug!(
                    "ignoring vendor block {:02x?} at offset {}",
                    block.payload.get(..3).unwrap_or(block.payload),
                    block.offset
                );
                continue;
            }
            if hdmi.is_some() {
                debug!("ignoring additional HDMI VSDB at offset {}", block.offset);
                continue;
            }
            if let Some((vsdb, f)) = hdmi::decode_hdmi_vsdb(block.payload, svds.len())? {
                hdmi = Some(vsdb);
                formats = f;
            }
        }

        Ok(ParsedEdid {
            identity,
            svds,
            hdmi,
            formats,
        })
    }

    /// True when at least one 3D structure is advertised.
    pub fn s3d_capable(&self) -> bool {
        self.formats.iter().any(Option::is_some)
    }

    pub fn supports_format(&self, format: S3dFormat) -> bool {
        self.formats[format.index()].is_some()
    }

    pub fn format_info(&self, format: S3dFormat) -> Option<&S3dFormatInfo> {
        self.formats[format.index()].as_ref()
    }

    /// Advertised 3D structures in [S3dFormat::ALL] order.
    pub fn format_infos(&self) -> impl Iterator<Item = &S3dFormatInfo> {
        self.formats.iter().flatten()
    }

    pub fn svds(&self) -> &[ShortVideoDescriptor] {
        &self.svds
    }

    pub fn svd(&self, position: usize) -> Option<&ShortVideoDescriptor> {
        self.svds.get(position)
    }

    pub fn native_svds(&self) -> impl Iterator<Item = &ShortVideoDescriptor> {
        self.svds.iter().filter(|s| s.native)
    }

    /// Resolves the explicit entries of a 3D structure to their SVDs.
    pub fn format_vics(
        &self,
        format: S3dFormat,
    ) -> Vec<(&ShortVideoDescriptor, SubsamplingMode)> {
        self.format_info(format)
            .map(|info| {
                info.vic_infos
                    .iter()
                    .filter_map(|v| {
                        self.svd(v.svd_position as usize)
                            .map(|svd| (svd, v.subsampling))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// SVDs that may be sent in `format`, from both the explicit list and
    /// 3D_Structure_ALL.
    pub fn svds_supporting(&self, format: S3dFormat) -> Vec<(usize, &ShortVideoDescriptor)> {
        match self.format_info(format) {
            Some(info) => self
                .svds
                .iter()
                .enumerate()
                .filter(|(i, _)| info.covers(*i))
                .collect(),
            None => vec![],
        }
    }

    pub fn identity(&self) -> &DisplayIdentity {
        &self.identity
    }

    pub fn hdmi(&self) -> Option<&HdmiVsdb> {
        self.hdmi.as_ref()
    }
}

impl TryFrom<&[u8]> for ParsedEdid {
    type Error = EdidError;

    fn try_from(edid: &[u8]) -> Result<Self, Self::Error> {
        ParsedEdid::parse(edid)
    }
}
