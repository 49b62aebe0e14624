use serde::Deserialize;
use structopt::StructOpt;
pub use log::{debug, error, info, trace, warn};

use clap::arg_enum;

arg_enum! {
    #[derive(Debug, Deserialize, Eq, PartialEq, Clone, Copy, PartialOrd, Ord)]
    pub enum LevelFilter {
        Off,
        Error,
        Warn,
        Info,
        Debug,
        Trace,
    }
}

impl From<LevelFilter> for log::LevelFilter {
    fn from(w: LevelFilter) -> Self {
        match w {
            LevelFilter::Off => Self::Off,
            LevelFilter::Error => Self::Error,
            LevelFilter::Warn => Self::Warn,
            LevelFilter::Info => Self::Info,
            LevelFilter::Debug => Self::Debug,
            LevelFilter::Trace => Self::Trace,
        }
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        LevelFilter::Warn
    }
}

arg_enum! {
    #[derive(Eq, PartialEq, Debug, Clone, Copy, Deserialize, PartialOrd, Ord)]
    pub enum WriteStyle {
        Auto,
        Always,
        Never,
    }
}

impl From<WriteStyle> for env_logger::WriteStyle {
    fn from(w: WriteStyle) -> Self {
        match w {
            WriteStyle::Auto => Self::Auto,
            WriteStyle::Always => Self::Always,
            WriteStyle::Never => Self::Never,
        }
    }
}

impl Default for WriteStyle {
    fn default() -> Self {
        WriteStyle::Auto
    }
}

#[derive(StructOpt, Deserialize, Debug, Default)]
pub struct LogOpts {
    /// minimum log level printed to STDERR. Choose from:
    /// off, error, warn, info, debug, trace.
    #[structopt(long = "log-level", default_value)]
    #[serde(default)]
    pub level: LevelFilter,

    /// controls when log output is colored. Choose from: auto,
    /// always, and never. RUST_LOG env var may override this parameter.
    #[structopt(long = "log-style", default_value)]
    #[serde(default)]
    pub style: WriteStyle,
}

/// initializes logging from configuration. It uses the
/// configuration initially but allows environment overrides.
/// Stdout stays reserved for reports.
pub fn init_logger(opts: &LogOpts) -> anyhow::Result<()> {
    env_logger::Builder::default()
        .filter_level(opts.level.into())
        .write_style(opts.style.into())
        .target(env_logger::Target::Stderr)
        .parse_default_env()
        .try_init()?;

    trace!("logging initialized");
    Ok(())
}

/// routes log output through the test harness; safe to call from every test.
pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}
