use std::convert::TryFrom;

use structopt::StructOpt;

use lib::{config::Config, logging::*, types::*};

mod decode;
mod probe;
mod report;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "edid3d",
    about = "edid3d lists the video modes and HDMI 3D formats a display advertises in its EDID"
)]
enum Command {
    /// decode an EDID dump, such as /sys/class/drm/card0-HDMI-A-1/edid
    Decode(decode::Opts),
    /// read the EDID of every display reachable over DDC and decode it
    Probe(probe::Opts),
}

fn main() -> Result<()> {
    match Command::from_args() {
        Command::Decode(opts) => {
            let cfg = Config::try_from(opts.common)?;
            init_logger(&cfg.logging)?;
            decode::run(&opts.path, &cfg)
        }
        Command::Probe(opts) => {
            let cfg = Config::try_from(opts.common)?;
            init_logger(&cfg.logging)?;
            probe::run(opts.device.as_deref(), &cfg)
        }
    }
}
