//! Read-only decoding of a 256-byte EDID: the CEA-861 Video Data Block and
//! the 3D section of the HDMI vendor specific data block.
//!
//! ```no_run
//! use lib::edid::{ParsedEdid, S3dFormat};
//!
//! let raw = std::fs::read("/sys/class/drm/card0-HDMI-A-1/edid").unwrap();
//! let edid = ParsedEdid::parse(&raw).unwrap();
//! for (svd, sub) in edid.format_vics(S3dFormat::SideBySideHalf) {
//!     println!("{}: {}", svd, sub);
//! }
//! ```

mod base;
mod blocks;
mod error;
mod hdmi;
mod parsed;
mod video;
pub mod vic;

pub use base::DisplayIdentity;
pub use blocks::{DataBlock, DataBlocks, Tag};
pub use error::EdidError;
pub use hdmi::{
    HdmiVsdb, Latency, S3dFormat, S3dFormatInfo, S3dFormatVicInfo, SubsamplingMode, HDMI_OUI,
};
pub use parsed::ParsedEdid;
pub use video::{decode_video_block, ShortVideoDescriptor};
pub use vic::{lookup, Scan, VicTableEntry};

/// Base block plus one extension.
pub const EDID_LEN: usize = 256;
pub const CEA_EXTENSION_TAG: u8 = 0x02;
