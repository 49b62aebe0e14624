pub mod config;
pub mod display;
pub mod edid;
pub mod logging;
pub mod types;

pub mod prelude {
    pub use super::display::{probe_all, Device};
    pub use super::edid::{
        EdidError, ParsedEdid, S3dFormat, S3dFormatInfo, ShortVideoDescriptor, SubsamplingMode,
    };
}
