use ddc::Edid;

use crate::{edid::EDID_LEN, logging::*, types::*};

const CHUNK: usize = 128;

/// Reads the base block and first extension over DDC, 128 bytes at a time as
/// most monitors won't answer larger reads.
pub fn read_raw_edid<F: std::error::Error, T: Edid<EdidError = F>>(d: &mut T) -> Result<Vec<u8>> {
    let mut edid = vec![0; EDID_LEN];

    for (i, chunk) in edid.chunks_mut(CHUNK).enumerate() {
        let offset = i * CHUNK;
        match d
            .read_edid(offset as u8, chunk)
            .map_err(|e| format_err!("error reading device EDID at offset {}: {}", offset, e))?
        {
            CHUNK => trace!("read EDID bytes {}..{}", offset, offset + CHUNK),
            size => {
                return Err(format_err!(
                    "read insufficient data from device EDID at offset {}: got {} bytes, wanted {}",
                    offset,
                    size,
                    CHUNK
                ))
            }
        }
    }

    Ok(edid)
}
