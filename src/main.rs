mod cli;
mod config;
mod deploy;
mod error;
mod generate;
mod models;
mod render;
mod topology;
mod utils;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use config::{DeployConfig, GenerateConfig};
use deploy::DeployOutcome;
use models::Vendor;

fn main() -> anyhow::Result<()> {
    let cli = cli::parse();
    init_tracing(&cli);

    match cli.command {
        Command::Generate(args) => run_generate(GenerateConfig::from(args)),
        Command::Deploy(args) => run_deploy(DeployConfig::from(args)),
        Command::Vendors => {
            print_vendors();
            Ok(())
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = match cli.log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(format!("netfusion={}", level.as_filter())),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "netfusion=info".into()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_generate(cfg: GenerateConfig) -> anyhow::Result<()> {
    let report = generate::run(&cfg).with_context(|| {
        format!(
            "Failed to generate configs from {}",
            cfg.topology_path.display()
        )
    })?;

    if cfg.dry_run {
        for generated in &report.generated {
            println!("### {} ({})", generated.device, generated.path.display());
            print!("{}", generated.text);
            println!();
        }
    }

    if !report.is_success() {
        for failure in &report.failures {
            tracing::error!("{}: {}", failure.device, failure.error);
        }
        anyhow::bail!(
            "{} of {} devices failed to render",
            report.failures.len(),
            report.failures.len() + report.generated.len()
        );
    }

    tracing::info!(
        "Generated {} configs in {}",
        report.generated.len(),
        cfg.output_dir.display()
    );
    Ok(())
}

fn run_deploy(cfg: DeployConfig) -> anyhow::Result<()> {
    let outcome = deploy::run(&cfg).with_context(|| {
        format!(
            "Failed to deploy configs from {}",
            cfg.source_dir.display()
        )
    })?;

    match outcome {
        DeployOutcome::SourceMissing => {
            println!("No generated configs found. Run `netfusion generate` first.");
        }
        DeployOutcome::Deployed(deployed) => {
            tracing::info!(
                "Deployed {} configs to {}",
                deployed.len(),
                cfg.deploy_dir.display()
            );
        }
    }
    Ok(())
}

fn print_vendors() {
    for vendor in Vendor::BUILTIN.iter().chain(std::iter::once(&Vendor::Generic)) {
        let label = if vendor.is_fallback() {
            format!("{} (fallback)", vendor)
        } else {
            vendor.to_string()
        };
        println!("{}", label);
        println!("  requires: {}", vendor.required_fields().join(", "));
        for line in vendor.template().trim().lines() {
            println!("  | {}", line);
        }
        println!();
    }
}
