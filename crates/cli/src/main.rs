//! repset — preset-based replica scaling for Kubernetes namespaces
//!
//! Captures the replica counts of a namespace's Deployments and StatefulSets
//! into a portable YAML preset file, and restores them later.

mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use preset_lib::{ClusterAuth, Error as PresetError};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Preset-based replica scaling CLI
#[derive(Parser)]
#[command(name = "repset")]
#[command(author, version, about = "Capture and restore namespace replica counts", long_about = None)]
pub struct Cli {
    /// Path to kubeconfig file (uses default resolution if not specified)
    #[arg(long, short = 'k', global = true, conflicts_with = "service_account")]
    pub kubeconfig: Option<String>,

    /// Authenticate via the mounted service account instead of a kubeconfig
    #[arg(long, short = 's', global = true)]
    pub service_account: bool,

    /// Preview scale changes without writing to the cluster
    #[arg(long, short = 'd', global = true)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, global = true)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture the current replica counts of a namespace into a preset file
    Capture {
        /// Name of the preset (also the default file name stem)
        #[arg(long, short = 'p')]
        name: String,

        /// Namespace to read from
        #[arg(long, short)]
        namespace: String,

        /// File to write to (<name>.yml if not set)
        #[arg(long, short)]
        file: Option<String>,
    },

    /// Restore replica counts from a preset file
    Restore {
        /// Preset file to read from
        #[arg(long, short)]
        file: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            exit_code_for(&err)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load().unwrap_or_default();

    let format = cli
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|value| output::OutputFormat::from_str(value, true).ok())
        })
        .unwrap_or_default();

    let auth = cluster_auth(&cli, &config)?;
    debug!(?auth, "resolved cluster auth mode");

    match &cli.command {
        Commands::Capture {
            name,
            namespace,
            file,
        } => commands::capture::run(&auth, name, namespace, file.as_deref(), format).await,
        Commands::Restore { file } => {
            commands::restore::run(&auth, file, cli.dry_run, format).await
        }
    }
}

/// The two auth modes are mutually exclusive; the flag conflict is enforced
/// by clap and the enum makes mixing impossible past this point.
fn cluster_auth(cli: &Cli, config: &config::Config) -> Result<ClusterAuth> {
    if cli.service_account {
        return Ok(ClusterAuth::ServiceAccount);
    }
    let path: PathBuf = config::kubeconfig_path(cli.kubeconfig.as_deref(), config)?;
    Ok(ClusterAuth::Kubeconfig(path))
}

/// Map error categories to distinct exit codes: connection failures,
/// validation failures, and existing save targets are distinguishable to
/// scripts; everything else is a generic failure. Code 2 is left to clap's
/// usage errors.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<PresetError>() {
        Some(PresetError::ClusterConnection(_)) => ExitCode::from(3),
        Some(PresetError::Validation(_)) => ExitCode::from(4),
        Some(PresetError::FileExists(_)) => ExitCode::from(5),
        _ => ExitCode::FAILURE,
    }
}
