use thiserror::Error;

/// Everything that can stop a 256-byte EDID from turning into a
/// [ParsedEdid](super::ParsedEdid). Unknown VICs, unknown data block tags and
/// non-HDMI vendor blocks are not errors and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EdidError {
    #[error("EDID is too short: got {len} bytes, wanted at least 256")]
    TooShort { len: usize },

    #[error("EDID has no extension block")]
    NoExtension,

    #[error("first EDID extension is not CEA-861 (tag {tag:#04x})")]
    NotCea { tag: u8 },

    #[error("CEA-861 detailed timing offset {offset} is invalid")]
    BadDataBlockOffset { offset: u8 },

    #[error("data block with tag {tag} at offset {offset} claims {len} bytes, past the data block end at {end}")]
    TruncatedBlock {
        offset: usize,
        tag: u8,
        len: usize,
        end: usize,
    },

    #[error("HDMI vendor block needs {needed} bytes but only has {len}")]
    TruncatedVendorBlock { needed: usize, len: usize },

    #[error("3D entry for SVD position {position} is missing its side-by-side detail byte")]
    MissingDetail { position: u8 },

    #[error("3D entry references SVD position {position} but only {svds} SVDs are listed")]
    DanglingSvd { position: u8, svds: usize },
}

impl EdidError {
    /// True when the buffer carries no decodable CEA-861 extension at all, as
    /// opposed to carrying a malformed one. Callers may fall back to base block
    /// timings in that case.
    pub fn is_absent_extension(&self) -> bool {
        matches!(
            self,
            EdidError::TooShort { .. } | EdidError::NoExtension | EdidError::NotCea { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_extension_grouping() {
        assert!(EdidError::TooShort { len: 128 }.is_absent_extension());
        assert!(EdidError::NoExtension.is_absent_extension());
        assert!(EdidError::NotCea { tag: 0x70 }.is_absent_extension());
        assert!(!EdidError::MissingDetail { position: 0 }.is_absent_extension());
        assert!(!EdidError::DanglingSvd {
            position: 5,
            svds: 3
        }
        .is_absent_extension());
    }
}
