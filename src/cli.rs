//! Command-line surface for `netfusion`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{
    DeployConfig, FailureMode, GenerateConfig, DEFAULT_DEPLOY_DIR, DEFAULT_OUTPUT_DIR,
    DEFAULT_TOPOLOGY_PATH,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "netfusion",
    version,
    about = "Generate device configs from a topology and simulate deploying them.",
    long_about = None
)]
pub struct Cli {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUST_LOG` or a default of `info` is used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render one config file per device in a topology document
    Generate(GenerateArgs),

    /// Copy generated configs into the deployment directory with a timestamp
    Deploy(DeployArgs),

    /// List built-in vendor templates
    Vendors,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Topology JSON document (`-` reads it from stdin)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TOPOLOGY_PATH)]
    pub topo: PathBuf,

    /// Directory to write `<name>.cfg` files into
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub outdir: PathBuf,

    /// Render every device and report all failures instead of stopping at the first
    #[arg(long)]
    pub keep_going: bool,

    /// Print rendered configs to stdout instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DeployArgs {
    /// Source folder with .cfg files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub src: PathBuf,

    /// Folder to deploy into
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DEPLOY_DIR)]
    pub dest: PathBuf,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<GenerateArgs> for GenerateConfig {
    fn from(args: GenerateArgs) -> Self {
        Self {
            topology_path: args.topo,
            output_dir: args.outdir,
            failure_mode: if args.keep_going {
                FailureMode::KeepGoing
            } else {
                FailureMode::FailFast
            },
            dry_run: args.dry_run,
        }
    }
}

impl From<DeployArgs> for DeployConfig {
    fn from(args: DeployArgs) -> Self {
        Self {
            source_dir: args.src,
            deploy_dir: args.dest,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
