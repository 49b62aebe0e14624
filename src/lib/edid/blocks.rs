use crate::logging::*;

use super::EdidError;

/// CEA-861 data block tag, the top three bits of the block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Audio,
    Video,
    VendorSpecific,
    SpeakerAllocation,
    VesaDisplayTransfer,
    Extended,
    Reserved(u8),
}

impl From<u8> for Tag {
    fn from(tag: u8) -> Self {
        match tag & 0x7 {
            1 => Tag::Audio,
            2 => Tag::Video,
            3 => Tag::VendorSpecific,
            4 => Tag::SpeakerAllocation,
            5 => Tag::VesaDisplayTransfer,
            7 => Tag::Extended,
            t => Tag::Reserved(t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataBlock<'a> {
    pub tag: Tag,
    /// offset of the header byte within the EDID
    pub offset: usize,
    pub payload: &'a [u8],
}

/// Walks the data block collection of a CEA-861 extension. Yields one
/// [DataBlock] per header and stops for good after the first error.
pub struct DataBlocks<'a> {
    edid: &'a [u8],
    pos: usize,
    end: usize,
    failed: bool,
}

impl<'a> DataBlocks<'a> {
    /// `start..end` are absolute offsets into `edid`. `end` is clamped to the
    /// buffer so a bad range can only ever produce a truncation error.
    pub fn new(edid: &'a [u8], start: usize, end: usize) -> Self {
        Self {
            edid,
            pos: start,
            end: end.min(edid.len()),
            failed: false,
        }
    }
}

impl<'a> Iterator for DataBlocks<'a> {
    type Item = Result<DataBlock<'a>, EdidError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.end {
            return None;
        }

        let offset = self.pos;
        let header = self.edid[offset];
        let tag = header >> 5;
        let len = (header & 0x1f) as usize;
        let start = offset + 1;

        if start + len > self.end {
            self.failed = true;
            return Some(Err(EdidError::TruncatedBlock {
                offset,
                tag,
                len,
                end: self.end,
            }));
        }

        self.pos = start + len;
        let block = DataBlock {
            tag: Tag::from(tag),
            offset,
            payload: &self.edid[start..self.pos],
        };
        trace!("data block {:?} at {} with {} bytes", block.tag, offset, len);

        Some(Ok(block))
    }
}

impl std::iter::FusedIterator for DataBlocks<'_> {}
