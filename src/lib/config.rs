use std::convert::{TryFrom, TryInto};
use std::path::PathBuf;

use serde::Deserialize;
use structopt::StructOpt;

use crate::{edid::S3dFormat, logging::*, types::*};

/*
logging:
  level: Debug
  style: Auto
formats:
  - frame-packing
  - side-by-side-half
yaml: false
no_svds: false
*/

#[derive(StructOpt, Debug, Deserialize)]
pub struct Opts {
    #[serde(flatten)]
    #[structopt(flatten)]
    pub report: ReportOpts,

    #[serde(default)]
    #[structopt(flatten)]
    pub logging: LogOpts,

    /// YAML file holding the report and logging settings. When given, it
    /// replaces the report and logging flags.
    #[serde(skip)]
    #[structopt(long, parse(from_os_str))]
    pub config: Option<PathBuf>,
}

#[derive(StructOpt, Debug, Default, Clone, Deserialize)]
pub struct ReportOpts {
    /// 3D structure to report on, may be repeated. Every structure is
    /// reported when absent. Choose from: frame-packing, field-alternative,
    /// line-alternative, side-by-side-full, l-depth, l-depth-graphics-depth,
    /// top-and-bottom, side-by-side-half.
    #[structopt(long = "format", number_of_values = 1)]
    #[serde(default)]
    pub formats: Vec<S3dFormat>,

    /// print the decoded EDID as YAML instead of the text report
    #[structopt(long)]
    #[serde(default)]
    pub yaml: bool,

    /// leave the video mode list out of the text report
    #[structopt(long = "no-svds")]
    #[serde(default)]
    pub no_svds: bool,
}

impl ReportOpts {
    /// Requested formats in table order, all of them if none were named.
    pub fn formats(&self) -> Vec<S3dFormat> {
        if self.formats.is_empty() {
            return S3dFormat::ALL.to_vec();
        }
        self.formats.iter().copied().sorted().dedup().collect()
    }
}

// Normalized output for both config and CLI options.
#[derive(Debug)]
pub struct Config {
    pub report: ReportOpts,
    pub logging: LogOpts,
}

impl Config {
    pub fn from_yaml<R: std::io::Read>(r: R) -> Result<Self> {
        let opts: Opts = serde_yaml::from_reader(r)?;
        trace!("parsed config: {:?}", opts);

        Ok(Config {
            report: opts.report,
            logging: opts.logging,
        })
    }
}

impl TryFrom<PathBuf> for Config {
    type Error = anyhow::Error;

    fn try_from(path: PathBuf) -> Result<Self> {
        let f = std::fs::File::open(&path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        Config::from_yaml(f).with_context(|| format!("failed to parse config {}", path.display()))
    }
}

impl TryFrom<Opts> for Config {
    type Error = Error;

    fn try_from(opts: Opts) -> Result<Self> {
        match opts.config {
            Some(path) => path.try_into(),
            None => Ok(Config {
                report: opts.report,
                logging: opts.logging,
            }),
        }
    }
}
