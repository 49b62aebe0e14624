use std::convert::TryFrom;
use std::fs::{read_link, File};

use ddc_i2c::I2cDdc;
use i2c_linux::I2c;

use crate::{display::read_raw_edid, edid::ParsedEdid, logging::*, types::*};

pub type I2CDevice = I2cDdc<I2c<File>>;

/// A DDC capable i2c bus, named after its /dev node.
pub struct Device {
    name: String,
    inner: I2CDevice,
}

impl TryFrom<I2CDevice> for Device {
    type Error = Error;
    fn try_from(dev: I2CDevice) -> Result<Self> {
        // dig out the device path from the file descriptor
        use std::os::unix::io::AsRawFd;
        let fd_num = dev.inner_ref().inner_ref().as_raw_fd().to_string();
        let fd = std::path::PathBuf::from("/proc/self/fd").join(fd_num);
        let path = read_link(fd)?;

        let name = path
            .to_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("[failed to convert path] {:?}", path));

        Ok(Self { name, inner: dev })
    }
}

impl Device {
    /// Opens a single bus such as `/dev/i2c-4`.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let dev = ddc_i2c::from_i2c_device(path.as_ref())
            .with_context(|| format!("failed to open {}", path.as_ref().display()))?;
        Device::try_from(dev)
    }

    /// Every i2c bus on the system, DDC capable or not.
    pub fn enumerate() -> Result<Vec<Self>> {
        ddc_i2c::I2cDeviceEnumerator::new()?
            .map(Device::try_from)
            .collect()
    }

    pub fn raw_edid(&mut self) -> Result<Vec<u8>> {
        read_raw_edid(&mut self.inner)
    }

    pub fn edid(&mut self) -> Result<ParsedEdid> {
        let raw = self.raw_edid()?;
        ParsedEdid::parse(&raw).with_context(|| format!("failed to decode EDID from {}", self))
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Reads and decodes the EDID of every bus that answers. Buses that fail are
/// returned separately with their error so the caller can report them.
pub fn probe_all(devs: Vec<Device>) -> (Vec<(Device, ParsedEdid)>, Vec<(Device, Error)>) {
    devs.into_iter().partition_map(|mut d| match d.edid() {
        Ok(edid) => {
            trace!("found display {} on {}", edid.identity(), d);
            Either::Left((d, edid))
        }
        Err(e) => {
            debug!("no usable EDID on {}: {:#}", d, e);
            Either::Right((d, e))
        }
    })
}
