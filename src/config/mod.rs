use std::path::PathBuf;

pub const DEFAULT_TOPOLOGY_PATH: &str = "sample_topology.json";
pub const DEFAULT_OUTPUT_DIR: &str = "generated_configs";
pub const DEFAULT_DEPLOY_DIR: &str = "deployed";

/// How the generator reacts to a device that fails to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Abort the batch on the first failure
    #[default]
    FailFast,
    /// Render every device and report all failures at the end
    KeepGoing,
}

/// Settings for a `generate` run
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub topology_path: PathBuf,
    pub output_dir: PathBuf,
    pub failure_mode: FailureMode,
    pub dry_run: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            topology_path: PathBuf::from(DEFAULT_TOPOLOGY_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            failure_mode: FailureMode::default(),
            dry_run: false,
        }
    }
}

/// Settings for a `deploy` run
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub source_dir: PathBuf,
    pub deploy_dir: PathBuf,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            deploy_dir: PathBuf::from(DEFAULT_DEPLOY_DIR),
        }
    }
}
