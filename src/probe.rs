use std::path::Path;

use structopt::StructOpt;

use lib::{config::Config, logging::*, prelude::*, types::*};

use crate::report::write_report;

#[derive(StructOpt, Debug)]
pub struct Opts {
    /// only read this bus, e.g. /dev/i2c-4, instead of every bus
    #[structopt(long, parse(from_os_str))]
    pub device: Option<std::path::PathBuf>,

    #[structopt(flatten)]
    pub common: lib::config::Opts,
}

pub fn run(device: Option<&Path>, cfg: &Config) -> Result<()> {
    let devs = match device {
        Some(path) => vec![Device::open(path)?],
        None => Device::enumerate()?,
    };
    let total = devs.len();

    let (found, failed) = probe_all(devs);
    info!("decoded {} of {} buses", found.len(), total);

    if found.is_empty() {
        for (d, e) in &failed {
            warn!("\t{}: {:#}", d, e);
        }

        return if total != 0 {
            Err(format_err!("failed to decode any EDID: none of the {} buses answered with a CEA-861 EDID. Do your displays support ddc?", total))
        } else {
            Err(format_err!("failed to query any devices: is the i2c-dev module loaded and can your user read /dev/i2c-*?"))
        };
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (d, edid) in &found {
        use std::io::Write;
        writeln!(out, "== {}", d)?;
        write_report(&mut out, edid, &cfg.report)?;
    }

    Ok(())
}
