use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "DetGeo Developers",
    version,
    about = "DetGeo CLI - Build layered detector geometries from declarative specifications and run the basic hit digitization chain.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a detector model from a TOML specification and export its
    /// sensitive readout map.
    Build(BuildArgs),
    /// Run the rescale + threshold digitization chain over a CSV hit file.
    Digitize(DigitizeArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the detector specification file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub spec: PathBuf,

    /// Optional TOML file with additional material definitions.
    #[arg(short, long, value_name = "PATH")]
    pub materials: Option<PathBuf>,

    /// Write the sensitive readout map as CSV to this path.
    #[arg(short, long, value_name = "PATH")]
    pub readout_map: Option<PathBuf>,
}

/// Arguments for the `digitize` subcommand.
#[derive(Args, Debug)]
pub struct DigitizeArgs {
    /// Path to the input hit file (CSV, energies in GeV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output hit file (CSV, energies in MIP counts).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// MIP value in GeV used for the energy rescale.
    #[arg(long, value_name = "GEV", default_value_t = detgeo::readout::DEFAULT_MIP_GEV)]
    pub mip_value: f64,

    /// Minimum energy in MIP counts for a hit to be kept (strictly greater).
    #[arg(long, value_name = "MIP", default_value_t = detgeo::readout::DEFAULT_THRESHOLD)]
    pub threshold: f64,
}
