use serde::Serialize;

use super::vic::{self, VicTableEntry};

/// A VIC as listed by the display in a Video Data Block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortVideoDescriptor {
    pub code: u8,
    pub native: bool,
    pub info: VicTableEntry,
}

impl From<u8> for ShortVideoDescriptor {
    /// bit 7 is the native flag, bits 0-6 are the VIC.
    fn from(b: u8) -> Self {
        let code = b & 0x7f;
        Self {
            code,
            native: b & 0x80 != 0,
            info: vic::lookup(code),
        }
    }
}

impl std::fmt::Display for ShortVideoDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VIC {:>3} {}", self.code, self.info)?;
        if self.native {
            write!(f, " (native)")?;
        }
        Ok(())
    }
}

/// Decodes a Video Data Block payload in declaration order. Positions in the
/// returned list are what HDMI 3D entries refer to.
pub fn decode_video_block(payload: &[u8]) -> Vec<ShortVideoDescriptor> {
    payload.iter().copied().map(ShortVideoDescriptor::from).collect()
}
