use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::{FailureMode, GenerateConfig};
use crate::error::{NetfusionError, Result};
use crate::models::Topology;
use crate::render::render_config;
use crate::topology::load_topology;
use crate::utils::device_config_filename;

/// A config rendered for one device
#[derive(Debug, Clone)]
pub struct GeneratedConfig {
    pub device: String,
    pub path: PathBuf,
    pub text: String,
}

/// A device that failed to render in keep-going mode
#[derive(Debug)]
pub struct DeviceFailure {
    pub device: String,
    pub error: NetfusionError,
}

/// Outcome of a generate run
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub generated: Vec<GeneratedConfig>,
    pub failures: Vec<DeviceFailure>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Load the topology named by `config` and generate its configs
pub fn run(config: &GenerateConfig) -> Result<GenerateReport> {
    let topology = load_topology(&config.topology_path)?;
    tracing::info!(
        "Loaded {} devices from {}",
        topology.len(),
        config.topology_path.display()
    );
    generate_configs(&topology, config)
}

/// Render every device in topology order and write `<outdir>/<name>.cfg`.
///
/// In [`FailureMode::FailFast`] the first render failure is returned and
/// files already written stay on disk. In [`FailureMode::KeepGoing`] render
/// failures are collected in the report. Write failures always abort.
/// With `dry_run` nothing touches the filesystem.
///
/// A `Wrote <path>` line goes to stdout for every file written.
pub fn generate_configs(topology: &Topology, config: &GenerateConfig) -> Result<GenerateReport> {
    generate_configs_with_status(topology, config, &mut io::stdout().lock())
}

/// [`generate_configs`], writing the per-file status lines to `status`
pub fn generate_configs_with_status(
    topology: &Topology,
    config: &GenerateConfig,
    status: &mut impl Write,
) -> Result<GenerateReport> {
    let outdir = &config.output_dir;
    if !config.dry_run {
        fs::create_dir_all(outdir).map_err(|e| NetfusionError::io(outdir, e))?;
    }

    let mut report = GenerateReport::default();
    let mut seen = HashSet::new();

    for device in &topology.devices {
        let text = match render_config(device) {
            Ok(text) => text,
            Err(e) => match config.failure_mode {
                FailureMode::FailFast => {
                    tracing::error!("Failed to render {}: {}", device.name, e);
                    return Err(e);
                }
                FailureMode::KeepGoing => {
                    tracing::warn!("Skipping {}: {}", device.name, e);
                    report.failures.push(DeviceFailure {
                        device: device.name.clone(),
                        error: e,
                    });
                    continue;
                }
            },
        };

        let filename = device_config_filename(&device.name);
        if !seen.insert(filename.clone()) {
            tracing::warn!(
                "Duplicate device name {}, {} will be overwritten",
                device.name,
                filename
            );
        }
        let path = outdir.join(&filename);

        if !config.dry_run {
            fs::write(&path, &text).map_err(|e| NetfusionError::io(&path, e))?;
            let _ = writeln!(status, "Wrote {}", path.display());
        }

        report.generated.push(GeneratedConfig {
            device: device.name.clone(),
            path,
            text,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::parse_topology;
    use std::path::Path;

    fn config_for(outdir: &Path, failure_mode: FailureMode) -> GenerateConfig {
        GenerateConfig {
            output_dir: outdir.to_path_buf(),
            failure_mode,
            ..GenerateConfig::default()
        }
    }

    #[test]
    fn test_arista_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let topo_path = dir.path().join("topo.json");
        fs::write(
            &topo_path,
            r#"{"devices":[{"name":"sw1","vendor":"arista","mgmt_ip":"10.0.0.1"}]}"#,
        )
        .unwrap();
        let outdir = dir.path().join("generated_configs");

        let config = GenerateConfig {
            topology_path: topo_path,
            ..config_for(&outdir, FailureMode::FailFast)
        };
        let report = run(&config).unwrap();
        assert!(report.is_success());

        let text = fs::read_to_string(outdir.join("sw1.cfg")).unwrap();
        assert!(text.lines().any(|l| l == "hostname sw1"));
        assert!(text.contains("ip address 10.0.0.1/24"));
        assert!(text.ends_with("!\n"));
    }

    #[test]
    fn test_unknown_vendor_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let topology = parse_topology(
            r#"{"devices":[{"name":"fw1","vendor":"unknown","mgmt_ip":"10.0.0.9"}]}"#,
        )
        .unwrap();

        generate_configs(&topology, &config_for(dir.path(), FailureMode::FailFast)).unwrap();

        let text = fs::read_to_string(dir.path().join("fw1.cfg")).unwrap();
        assert!(text.contains("hostname fw1"));
        assert!(text.contains("management ip 10.0.0.9"));
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("a").join("b");
        let topology = parse_topology(r#"{"devices":[{"name":"r1","mgmt_ip":"10.0.0.2"}]}"#).unwrap();

        generate_configs(&topology, &config_for(&outdir, FailureMode::FailFast)).unwrap();
        assert!(outdir.join("r1.cfg").is_file());
    }

    #[test]
    fn test_fail_fast_keeps_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let topology = parse_topology(
            r#"{"devices":[
                {"name":"sw1","vendor":"arista","mgmt_ip":"10.0.0.1"},
                {"name":"sw2","vendor":"arista"},
                {"name":"sw3","vendor":"arista","mgmt_ip":"10.0.0.3"}
            ]}"#,
        )
        .unwrap();

        let result = generate_configs(&topology, &config_for(dir.path(), FailureMode::FailFast));
        match result {
            Err(NetfusionError::MissingField { device, field }) => {
                assert_eq!(device, "sw2");
                assert_eq!(field, "mgmt_ip");
            }
            other => panic!("Expected MissingField, got {:?}", other),
        }
        assert!(dir.path().join("sw1.cfg").is_file());
        assert!(!dir.path().join("sw2.cfg").exists());
        assert!(!dir.path().join("sw3.cfg").exists());
    }

    #[test]
    fn test_status_lines_for_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let topology = parse_topology(
            r#"{"devices":[
                {"name":"sw1","vendor":"arista","mgmt_ip":"10.0.0.1"},
                {"name":"sw2","vendor":"arista","mgmt_ip":"10.0.0.2"},
                {"name":"sw3","vendor":"arista"}
            ]}"#,
        )
        .unwrap();

        let mut status = Vec::new();
        let result = generate_configs_with_status(
            &topology,
            &config_for(dir.path(), FailureMode::FailFast),
            &mut status,
        );
        assert!(result.is_err());

        // files written before the failure are still reported
        let status = String::from_utf8(status).unwrap();
        let lines: Vec<_> = status.lines().collect();
        assert_eq!(
            lines,
            vec![
                format!("Wrote {}", dir.path().join("sw1.cfg").display()),
                format!("Wrote {}", dir.path().join("sw2.cfg").display()),
            ]
        );
    }

    #[test]
    fn test_dry_run_prints_no_status() {
        let dir = tempfile::tempdir().unwrap();
        let topology = parse_topology(r#"{"devices":[{"name":"r1","mgmt_ip":"10.0.0.2"}]}"#).unwrap();
        let config = GenerateConfig {
            dry_run: true,
            ..config_for(dir.path(), FailureMode::FailFast)
        };

        let mut status = Vec::new();
        generate_configs_with_status(&topology, &config, &mut status).unwrap();
        assert!(status.is_empty());
    }

    #[test]
    fn test_keep_going_collects_failures() {
        let dir = tempfile::tempdir().unwrap();
        let topology = parse_topology(
            r#"{"devices":[
                {"name":"sw1","vendor":"arista","mgmt_ip":"10.0.0.1"},
                {"name":"sw2","vendor":"cisco"},
                {"name":"sw3","mgmt_ip":"10.0.0.3"}
            ]}"#,
        )
        .unwrap();

        let report =
            generate_configs(&topology, &config_for(dir.path(), FailureMode::KeepGoing)).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].device, "sw2");
        let generated: Vec<_> = report.generated.iter().map(|g| g.device.as_str()).collect();
        assert_eq!(generated, vec!["sw1", "sw3"]);
        assert!(dir.path().join("sw1.cfg").is_file());
        assert!(!dir.path().join("sw2.cfg").exists());
        assert!(dir.path().join("sw3.cfg").is_file());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("out");
        let topology = parse_topology(
            r#"{"devices":[{"name":"pa1","vendor":"PaloAlto","mgmt_ip":"10.0.0.4"}]}"#,
        )
        .unwrap();

        let config = GenerateConfig {
            dry_run: true,
            ..config_for(&outdir, FailureMode::FailFast)
        };
        let report = generate_configs(&topology, &config).unwrap();

        assert!(!outdir.exists());
        assert_eq!(report.generated.len(), 1);
        assert_eq!(report.generated[0].path, outdir.join("pa1.cfg"));
        assert!(report.generated[0]
            .text
            .contains("set deviceconfig system hostname pa1"));
    }

    #[test]
    fn test_duplicate_names_last_writer_wins() {
        let dir = tempfile::tempdir().unwrap();
        let topology = parse_topology(
            r#"{"devices":[
                {"name":"sw1","vendor":"arista","mgmt_ip":"10.0.0.1"},
                {"name":"sw1","vendor":"cisco","mgmt_ip":"10.0.0.2"}
            ]}"#,
        )
        .unwrap();

        generate_configs(&topology, &config_for(dir.path(), FailureMode::FailFast)).unwrap();
        let text = fs::read_to_string(dir.path().join("sw1.cfg")).unwrap();
        assert!(text.contains("GigabitEthernet0/0"));
    }

    #[test]
    fn test_missing_topology_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerateConfig {
            topology_path: dir.path().join("absent.json"),
            ..config_for(&dir.path().join("out"), FailureMode::FailFast)
        };
        assert!(matches!(run(&config), Err(NetfusionError::NotFound { .. })));
    }
}
