mod device;
mod edid;

pub use device::{probe_all, Device, I2CDevice};
pub use edid::read_raw_edid;
