use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::DeployConfig;
use crate::error::{NetfusionError, Result};
use crate::utils::CONFIG_EXTENSION;

/// Format of the timestamp appended to deployed configs
pub const DEPLOY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix of the line appended to deployed configs
pub const DEPLOY_MARKER: &str = "# Deployed at ";

/// One config copied into the deployment directory
#[derive(Debug, Clone, PartialEq)]
pub struct DeployedConfig {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Result of a deploy run
#[derive(Debug, Clone, PartialEq)]
pub enum DeployOutcome {
    /// The source directory does not exist; nothing to deploy
    SourceMissing,
    Deployed(Vec<DeployedConfig>),
}

/// Deploy configs from `config.source_dir` stamped with the current local time
pub fn run(config: &DeployConfig) -> Result<DeployOutcome> {
    deploy_configs(&config.source_dir, &config.deploy_dir, Local::now())
}

/// Copy every `*.cfg` directly under `source` into `dest`, appending a
/// deployment timestamp line to each copy.
///
/// A missing `source` is not an error, and a `source` that is not a
/// directory has nothing to deploy. `dest` is created on the first copy and
/// must not resolve to `source`. Files are processed in filename order; a
/// failure part-way leaves earlier copies in place.
pub fn deploy_configs(
    source: &Path,
    dest: &Path,
    deployed_at: DateTime<Local>,
) -> Result<DeployOutcome> {
    if !source.exists() {
        tracing::debug!("Source directory {} does not exist", source.display());
        return Ok(DeployOutcome::SourceMissing);
    }
    if !source.is_dir() {
        tracing::warn!("{} is not a directory, nothing to deploy", source.display());
        return Ok(DeployOutcome::Deployed(Vec::new()));
    }
    if is_same_file(source, dest) {
        return Err(NetfusionError::SameFile {
            src: source.to_path_buf(),
            dest: dest.to_path_buf(),
        });
    }

    let configs = list_configs(source)?;
    let stamp = deployment_stamp(&deployed_at);
    let mut deployed = Vec::with_capacity(configs.len());

    for cfg in configs {
        let Some(file_name) = cfg.file_name() else {
            continue;
        };
        fs::create_dir_all(dest).map_err(|e| NetfusionError::io(dest, e))?;
        let target = dest.join(file_name);

        deploy_config(&cfg, &target, &stamp)?;

        let copied = DeployedConfig {
            source: cfg,
            dest: target,
        };
        println!("Deployed {} -> {}", copied.source.display(), copied.dest.display());
        deployed.push(copied);
    }

    Ok(DeployOutcome::Deployed(deployed))
}

/// The block appended to a deployed config:
/// a blank separator line, then `# Deployed at YYYY-MM-DD HH:MM:SS`
pub fn deployment_stamp(deployed_at: &DateTime<Local>) -> String {
    format!(
        "\n{}{}\n",
        DEPLOY_MARKER,
        deployed_at.format(DEPLOY_TIMESTAMP_FORMAT)
    )
}

fn deploy_config(source: &Path, target: &Path, stamp: &str) -> Result<()> {
    if is_same_file(source, target) {
        return Err(NetfusionError::SameFile {
            src: source.to_path_buf(),
            dest: target.to_path_buf(),
        });
    }

    let mut input = File::open(source).map_err(|e| NetfusionError::io(source, e))?;
    let mut output = File::create(target).map_err(|e| NetfusionError::io(target, e))?;
    io::copy(&mut input, &mut output).map_err(|e| NetfusionError::io(target, e))?;
    output
        .write_all(stamp.as_bytes())
        .map_err(|e| NetfusionError::io(target, e))?;

    Ok(())
}

/// Both paths exist and resolve to the same filesystem entry
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn list_configs(source: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(source).map_err(|e| NetfusionError::io(source, e))?;

    let mut configs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| NetfusionError::io(source, e))?.path();
        let is_cfg = path
            .extension()
            .map(|ext| ext == CONFIG_EXTENSION)
            .unwrap_or(false);
        if is_cfg && path.is_file() {
            configs.push(path);
        }
    }
    configs.sort();

    Ok(configs)
}
