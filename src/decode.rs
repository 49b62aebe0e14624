use std::io::Read;
use std::path::{Path, PathBuf};

use structopt::StructOpt;

use lib::{config::Config, edid::EDID_LEN, logging::*, prelude::*, types::*};

use crate::report::write_report;

#[derive(StructOpt, Debug)]
pub struct Opts {
    /// raw EDID file; "-" reads stdin
    #[structopt(parse(from_os_str))]
    pub path: PathBuf,

    #[structopt(flatten)]
    pub common: lib::config::Opts,
}

fn read_edid(path: &Path) -> Result<Vec<u8>> {
    let mut raw = vec![];
    if path == Path::new("-") {
        std::io::stdin().read_to_end(&mut raw)?;
    } else {
        raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    }
    debug!("read {} bytes from {}", raw.len(), path.display());

    if raw.len() > EDID_LEN {
        info!(
            "{} holds {} bytes, decoding the first {}",
            path.display(),
            raw.len(),
            EDID_LEN
        );
    }
    Ok(raw)
}

pub fn run(path: &Path, cfg: &Config) -> Result<()> {
    let raw = read_edid(path)?;
    let edid = match ParsedEdid::parse(&raw) {
        Ok(edid) => edid,
        Err(e) if e.is_absent_extension() => {
            return Err(format_err!(
                "{} has no CEA-861 extension to decode: {}",
                path.display(),
                e
            ))
        }
        Err(e) => return Err(format_err!("{} is malformed: {}", path.display(), e)),
    };

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &edid, &cfg.report)
}
