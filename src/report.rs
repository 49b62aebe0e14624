use std::io::Write;

use lib::{config::ReportOpts, edid::vic::Scan, prelude::*, types::*};

/// Writes the text report, or YAML when asked to, for one decoded EDID.
pub fn write_report<W: Write>(out: &mut W, edid: &ParsedEdid, opts: &ReportOpts) -> Result<()> {
    if opts.yaml {
        serde_yaml::to_writer(&mut *out, edid)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "display: {}", edid.identity())?;
    match edid.hdmi() {
        Some(hdmi) => {
            write!(out, "hdmi: physical address {}", hdmi.physical_address_string())?;
            if let Some(tmds) = hdmi.max_tmds_mhz {
                write!(out, ", max TMDS {} MHz", tmds)?;
            }
            if hdmi.s3d_present {
                write!(out, ", 3D present")?;
            }
            writeln!(out)?;
        }
        None => writeln!(out, "hdmi: no vendor block")?,
    }

    if !opts.no_svds {
        writeln!(out, "video modes:")?;
        if edid.svds().is_empty() {
            writeln!(out, "  none listed")?;
        }
        for (i, svd) in edid.svds().iter().enumerate() {
            let native = if svd.native { " (native)" } else { "" };
            if !svd.info.is_known() {
                writeln!(out, "  {:>2}: VIC {:>3} reserved{}", i, svd.code, native)?;
                continue;
            }
            writeln!(
                out,
                "  {:>2}: VIC {:>3} {:>4}x{:<4} {:>3} Hz {:<11} {}{}",
                i,
                svd.code,
                svd.info.xres,
                svd.info.yres,
                svd.info.refresh_hz,
                match svd.info.scan {
                    Scan::Progressive => "progressive",
                    Scan::Interlaced => "interlaced",
                },
                svd.info.name,
                native,
            )?;
        }
    }

    writeln!(
        out,
        "3D formats:{}",
        if edid.s3d_capable() { "" } else { " not 3D capable" }
    )?;
    for format in opts.formats() {
        write_format(out, edid, format)?;
    }

    Ok(())
}

fn write_format<W: Write>(out: &mut W, edid: &ParsedEdid, format: S3dFormat) -> Result<()> {
    let info = match edid.format_info(format) {
        Some(info) => info,
        None => {
            writeln!(out, "  {}: unsupported", format)?;
            return Ok(());
        }
    };

    write!(out, "  {}:", format)?;
    if info.all_svds {
        match info.mask {
            Some(mask) => write!(out, " listed SVDs in mask {:#06x}", mask)?,
            None => write!(out, " all listed SVDs")?,
        }
    }
    writeln!(out)?;

    for (svd, sub) in edid.format_vics(format) {
        writeln!(out, "    {} ({})", svd.info.name, sub)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1080p60 native, 720p60
    fn edid() -> ParsedEdid {
        edid_with_svds([0x90, 0x04])
    }

    fn edid_with_svds(svds: [u8; 2]) -> ParsedEdid {
        let mut e = vec![0u8; 256];
        e[..8].copy_from_slice(&[0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00]);
        e[8] = 0x10;
        e[9] = 0xac;
        e[126] = 1;
        e[128..132].copy_from_slice(&[0x02, 0x03, 0x14, 0x00]);
        let blocks = [
            0x42, svds[0], svds[1],
            0x6c, 0x03, 0x0c, 0x00, 0x10, 0x00, 0x00, 0x3c, 0x20, 0x80, 0x02, 0x18, 0x00,
        ];
        e[132..132 + blocks.len()].copy_from_slice(&blocks);
        ParsedEdid::parse(&e).unwrap()
    }

    fn report(opts: &ReportOpts) -> String {
        let mut out = vec![];
        write_report(&mut out, &edid(), opts).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_report() {
        let out = report(&ReportOpts::default());

        assert!(out.contains("hdmi: physical address 1.0.0.0, max TMDS 300 MHz, 3D present"));
        assert!(out.contains("VIC  16 1920x1080  60 Hz progressive 1920x1080p60 16:9 (native)"));
        assert!(out.contains("  side-by-side-half:\n    1280x720p60 16:9 (horizontal and quincunx)\n"));
        assert!(out.contains("  frame-packing: unsupported"));
        assert_eq!(out.matches("unsupported").count(), 7);
    }

    #[test]
    fn reserved_vics() {
        let mut out = vec![];
        write_report(&mut out, &edid_with_svds([0x90, 0x7f]), &ReportOpts::default()).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("   1: VIC 127 reserved\n"));
        assert!(out.contains("   0: VIC  16 1920x1080"));
    }

    #[test]
    fn selected_formats_only() {
        let out = report(&ReportOpts {
            formats: vec![S3dFormat::TopAndBottom],
            no_svds: true,
            ..Default::default()
        });

        assert!(!out.contains("video modes"));
        assert!(out.contains("top-and-bottom: unsupported"));
        assert!(!out.contains("side-by-side-half"));
    }

    #[test]
    fn yaml_report() {
        let out = report(&ReportOpts {
            yaml: true,
            ..Default::default()
        });

        assert!(out.contains("s3d_formats:"));
        assert!(out.contains("format: SideBySideHalf"));
        assert!(out.contains("subsampling: HorizontalAndQuincunx"));
    }
}
