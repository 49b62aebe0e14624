use serde::Serialize;

use crate::logging::*;

pub const BLOCK_LEN: usize = 128;
pub const HEADER: [u8; 8] = [0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00];

/// Who made the display, read from the base block. Missing descriptors leave
/// their field empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayIdentity {
    pub manufacturer: String,
    pub product: u16,
    pub serial_number: u32,
    pub model: String,
    pub serial: String,
}

impl DisplayIdentity {
    pub fn from_base_block(base: &[u8]) -> DisplayIdentity {
        let mut info = DisplayIdentity {
            manufacturer: read_mfg_id([base[8], base[9]]),
            product: u16::from_le_bytes([base[10], base[11]]),
            serial_number: u32::from_le_bytes([base[12], base[13], base[14], base[15]]),
            ..Default::default()
        };

        for descr in base[54..126].chunks_exact(18) {
            match read_descriptor(descr) {
                DispDescr::Serial(srl) => info.serial = srl,
                DispDescr::Model(model) => info.model = model,
                DispDescr::Other => (),
            }
        }

        info
    }
}

impl std::fmt::Display for DisplayIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (SN: {})",
            self.manufacturer, self.model, self.serial
        )
    }
}

/// Logs blocks whose checksum byte doesn't bring the sum to zero. Decoding
/// carries on either way.
pub fn check_block(block: &[u8], name: &str) -> bool {
    let sum = block.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != 0 {
        warn!("{} block checksum is off by {:#04x}", name, sum);
    }
    sum == 0
}

pub fn check_header(base: &[u8]) -> bool {
    let ok = base[..8] == HEADER;
    if !ok {
        warn!("EDID header is {:02x?}, expected {:02x?}", &base[..8], HEADER);
    }
    ok
}

/// read_mfg_id expects edid bytes 8 & 9 and returns the alphabetical manufacturer.
///
/// bitfield: 0011 0111 0100 1001
/// encoded:  0111 1122 2223 3333
///
/// bit 15 is zero, 1 is A, 26 is Z.
fn read_mfg_id(id: [u8; 2]) -> String {
    let letters = [
        (id[0] & 0x7c) >> 2,
        ((id[0] & 0x3) << 3) | ((id[1] & 0xe0) >> 5),
        id[1] & 0x1f,
    ];

    letters
        .iter()
        .map(|&c| match c {
            1..=26 => (b'A' + c - 1) as char,
            _ => '?',
        })
        .collect()
}

enum DispDescr {
    Serial(String),
    Model(String),
    Other,
}

// https://en.wikipedia.org/wiki/Extended_Display_Identification_Data#Display_Descriptors
fn read_descriptor(descr: &[u8]) -> DispDescr {
    // detailed timings have a non-zero pixel clock here
    if descr[0] != 0 || descr[1] != 0 {
        return DispDescr::Other;
    }

    let text = || {
        String::from_utf8_lossy(&descr[5..18])
            .trim_matches(|c: char| c.is_whitespace() || c == '\0')
            .to_owned()
    };
    match descr[3] {
        0xff => DispDescr::Serial(text()),
        0xfc => DispDescr::Model(text()),
        _ => DispDescr::Other,
    }
}
