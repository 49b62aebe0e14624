//! CEA-861-F Video Identification Code table.
//!
//! Refresh rates are the nominal integer field rates; the 1000/1001 variants
//! (59.94, 23.976, ...) share a code with their integer counterpart.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scan {
    Progressive,
    Interlaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    R4_3,
    R16_9,
    R64_27,
    R256_135,
    Unknown,
}

/// One row of the VIC table. `yres` is the frame height for interlaced
/// formats, `refresh_hz` the field rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VicTableEntry {
    pub vic: u8,
    pub xres: u32,
    pub yres: u32,
    pub refresh_hz: u32,
    pub scan: Scan,
    pub aspect: AspectRatio,
    pub name: &'static str,
}

impl VicTableEntry {
    /// Reserved and undefined codes all decode to this shape.
    pub const fn unknown(vic: u8) -> Self {
        Self {
            vic,
            xres: 0,
            yres: 0,
            refresh_hz: 0,
            scan: Scan::Progressive,
            aspect: AspectRatio::Unknown,
            name: "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        self.aspect != AspectRatio::Unknown
    }
}

impl std::fmt::Display for VicTableEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

macro_rules! vic {
    ($vic:literal, $x:literal, $y:literal, p, $hz:literal, $ar:ident $ars:literal) => {
        VicTableEntry {
            vic: $vic,
            xres: $x,
            yres: $y,
            refresh_hz: $hz,
            scan: Scan::Progressive,
            aspect: AspectRatio::$ar,
            name: concat!(stringify!($x), "x", stringify!($y), "p", stringify!($hz), " ", $ars),
        }
    };
    ($vic:literal, $x:literal, $y:literal, i, $hz:literal, $ar:ident $ars:literal) => {
        VicTableEntry {
            vic: $vic,
            xres: $x,
            yres: $y,
            refresh_hz: $hz,
            scan: Scan::Interlaced,
            aspect: AspectRatio::$ar,
            name: concat!(stringify!($x), "x", stringify!($y), "i", stringify!($hz), " ", $ars),
        }
    };
}

// Indexed by VIC - 1.
static VIC_TABLE: [VicTableEntry; 107] = [
    vic!(1, 640, 480, p, 60, R4_3 "4:3"),
    vic!(2, 720, 480, p, 60, R4_3 "4:3"),
    vic!(3, 720, 480, p, 60, R16_9 "16:9"),
    vic!(4, 1280, 720, p, 60, R16_9 "16:9"),
    vic!(5, 1920, 1080, i, 60, R16_9 "16:9"),
    vic!(6, 1440, 480, i, 60, R4_3 "4:3"),
    vic!(7, 1440, 480, i, 60, R16_9 "16:9"),
    vic!(8, 1440, 240, p, 60, R4_3 "4:3"),
    vic!(9, 1440, 240, p, 60, R16_9 "16:9"),
    vic!(10, 2880, 480, i, 60, R4_3 "4:3"),
    vic!(11, 2880, 480, i, 60, R16_9 "16:9"),
    vic!(12, 2880, 240, p, 60, R4_3 "4:3"),
    vic!(13, 2880, 240, p, 60, R16_9 "16:9"),
    vic!(14, 1440, 480, p, 60, R4_3 "4:3"),
    vic!(15, 1440, 480, p, 60, R16_9 "16:9"),
    vic!(16, 1920, 1080, p, 60, R16_9 "16:9"),
    vic!(17, 720, 576, p, 50, R4_3 "4:3"),
    vic!(18, 720, 576, p, 50, R16_9 "16:9"),
    vic!(19, 1280, 720, p, 50, R16_9 "16:9"),
    vic!(20, 1920, 1080, i, 50, R16_9 "16:9"),
    vic!(21, 1440, 576, i, 50, R4_3 "4:3"),
    vic!(22, 1440, 576, i, 50, R16_9 "16:9"),
    vic!(23, 1440, 288, p, 50, R4_3 "4:3"),
    vic!(24, 1440, 288, p, 50, R16_9 "16:9"),
    vic!(25, 2880, 576, i, 50, R4_3 "4:3"),
    vic!(26, 2880, 576, i, 50, R16_9 "16:9"),
    vic!(27, 2880, 288, p, 50, R4_3 "4:3"),
    vic!(28, 2880, 288, p, 50, R16_9 "16:9"),
    vic!(29, 1440, 576, p, 50, R4_3 "4:3"),
    vic!(30, 1440, 576, p, 50, R16_9 "16:9"),
    vic!(31, 1920, 1080, p, 50, R16_9 "16:9"),
    vic!(32, 1920, 1080, p, 24, R16_9 "16:9"),
    vic!(33, 1920, 1080, p, 25, R16_9 "16:9"),
    vic!(34, 1920, 1080, p, 30, R16_9 "16:9"),
    vic!(35, 2880, 480, p, 60, R4_3 "4:3"),
    vic!(36, 2880, 480, p, 60, R16_9 "16:9"),
    vic!(37, 2880, 576, p, 50, R4_3 "4:3"),
    vic!(38, 2880, 576, p, 50, R16_9 "16:9"),
    // 1250 line total variant of VIC 20
    vic!(39, 1920, 1080, i, 50, R16_9 "16:9"),
    vic!(40, 1920, 1080, i, 100, R16_9 "16:9"),
    vic!(41, 1280, 720, p, 100, R16_9 "16:9"),
    vic!(42, 720, 576, p, 100, R4_3 "4:3"),
    vic!(43, 720, 576, p, 100, R16_9 "16:9"),
    vic!(44, 1440, 576, i, 100, R4_3 "4:3"),
    vic!(45, 1440, 576, i, 100, R16_9 "16:9"),
    vic!(46, 1920, 1080, i, 120, R16_9 "16:9"),
    vic!(47, 1280, 720, p, 120, R16_9 "16:9"),
    vic!(48, 720, 480, p, 120, R4_3 "4:3"),
    vic!(49, 720, 480, p, 120, R16_9 "16:9"),
    vic!(50, 1440, 480, i, 120, R4_3 "4:3"),
    vic!(51, 1440, 480, i, 120, R16_9 "16:9"),
    vic!(52, 720, 576, p, 200, R4_3 "4:3"),
    vic!(53, 720, 576, p, 200, R16_9 "16:9"),
    vic!(54, 1440, 576, i, 200, R4_3 "4:3"),
    vic!(55, 1440, 576, i, 200, R16_9 "16:9"),
    vic!(56, 720, 480, p, 240, R4_3 "4:3"),
    vic!(57, 720, 480, p, 240, R16_9 "16:9"),
    vic!(58, 1440, 480, i, 240, R4_3 "4:3"),
    vic!(59, 1440, 480, i, 240, R16_9 "16:9"),
    vic!(60, 1280, 720, p, 24, R16_9 "16:9"),
    vic!(61, 1280, 720, p, 25, R16_9 "16:9"),
    vic!(62, 1280, 720, p, 30, R16_9 "16:9"),
    vic!(63, 1920, 1080, p, 120, R16_9 "16:9"),
    vic!(64, 1920, 1080, p, 100, R16_9 "16:9"),
    vic!(65, 1280, 720, p, 24, R64_27 "64:27"),
    vic!(66, 1280, 720, p, 25, R64_27 "64:27"),
    vic!(67, 1280, 720, p, 30, R64_27 "64:27"),
    vic!(68, 1280, 720, p, 50, R64_27 "64:27"),
    vic!(69, 1280, 720, p, 60, R64_27 "64:27"),
    vic!(70, 1280, 720, p, 100, R64_27 "64:27"),
    vic!(71, 1280, 720, p, 120, R64_27 "64:27"),
    vic!(72, 1920, 1080, p, 24, R64_27 "64:27"),
    vic!(73, 1920, 1080, p, 25, R64_27 "64:27"),
    vic!(74, 1920, 1080, p, 30, R64_27 "64:27"),
    vic!(75, 1920, 1080, p, 50, R64_27 "64:27"),
    vic!(76, 1920, 1080, p, 60, R64_27 "64:27"),
    vic!(77, 1920, 1080, p, 100, R64_27 "64:27"),
    vic!(78, 1920, 1080, p, 120, R64_27 "64:27"),
    vic!(79, 1680, 720, p, 24, R64_27 "64:27"),
    vic!(80, 1680, 720, p, 25, R64_27 "64:27"),
    vic!(81, 1680, 720, p, 30, R64_27 "64:27"),
    vic!(82, 1680, 720, p, 50, R64_27 "64:27"),
    vic!(83, 1680, 720, p, 60, R64_27 "64:27"),
    vic!(84, 1680, 720, p, 100, R64_27 "64:27"),
    vic!(85, 1680, 720, p, 120, R64_27 "64:27"),
    vic!(86, 2560, 1080, p, 24, R64_27 "64:27"),
    vic!(87, 2560, 1080, p, 25, R64_27 "64:27"),
    vic!(88, 2560, 1080, p, 30, R64_27 "64:27"),
    vic!(89, 2560, 1080, p, 50, R64_27 "64:27"),
    vic!(90, 2560, 1080, p, 60, R64_27 "64:27"),
    vic!(91, 2560, 1080, p, 100, R64_27 "64:27"),
    vic!(92, 2560, 1080, p, 120, R64_27 "64:27"),
    vic!(93, 3840, 2160, p, 24, R16_9 "16:9"),
    vic!(94, 3840, 2160, p, 25, R16_9 "16:9"),
    vic!(95, 3840, 2160, p, 30, R16_9 "16:9"),
    vic!(96, 3840, 2160, p, 50, R16_9 "16:9"),
    vic!(97, 3840, 2160, p, 60, R16_9 "16:9"),
    vic!(98, 4096, 2160, p, 24, R256_135 "256:135"),
    vic!(99, 4096, 2160, p, 25, R256_135 "256:135"),
    vic!(100, 4096, 2160, p, 30, R256_135 "256:135"),
    vic!(101, 4096, 2160, p, 50, R256_135 "256:135"),
    vic!(102, 4096, 2160, p, 60, R256_135 "256:135"),
    vic!(103, 3840, 2160, p, 24, R64_27 "64:27"),
    vic!(104, 3840, 2160, p, 25, R64_27 "64:27"),
    vic!(105, 3840, 2160, p, 30, R64_27 "64:27"),
    vic!(106, 3840, 2160, p, 50, R64_27 "64:27"),
    vic!(107, 3840, 2160, p, 60, R64_27 "64:27"),
];

/// Resolves a VIC to its format. Total over `u8`: 0 and everything past the
/// end of the table come back as [VicTableEntry::unknown].
pub fn lookup(vic: u8) -> VicTableEntry {
    vic.checked_sub(1)
        .and_then(|i| VIC_TABLE.get(i as usize))
        .copied()
        .unwrap_or_else(|| VicTableEntry::unknown(vic))
}
