//! # Command Line Interface
//!
//! Runs one load against AWS and prints what was found.

pub mod output;

use clap::Parser;
use std::path::PathBuf;

use crate::config::{LoaderSettings, ObservabilityConfig, SettingsOverrides};
use crate::loader::AwsPropertySource;
use crate::observability::{init_logging, log_settings_info};
use output::{LoadReport, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "paramstore-loader")]
#[command(about = "Load configuration from AWS Parameter Store and Secrets Manager")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Parameter path prefix, e.g. /myapp/prod/
    #[arg(long)]
    pub parameter_prefix: Option<String>,

    /// Prefix for secret identifiers
    #[arg(long)]
    pub secrets_prefix: Option<String>,

    /// Secrets Manager endpoint URL or region
    #[arg(long)]
    pub secrets_endpoint: Option<String>,

    /// SSM endpoint URL override
    #[arg(long)]
    pub parameter_endpoint: Option<String>,

    /// AWS region for both clients
    #[arg(long)]
    pub region: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Print parameter values, not only keys
    #[arg(long)]
    pub show_values: bool,

    /// Do not publish resolved fields as system properties
    #[arg(long)]
    pub no_system_properties: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            parameter_prefix: self.parameter_prefix.clone(),
            secrets_prefix: self.secrets_prefix.clone(),
            secrets_endpoint: self.secrets_endpoint.clone(),
            parameter_endpoint: self.parameter_endpoint.clone(),
            region: self.region.clone(),
            publish_system_properties: self.no_system_properties.then_some(false),
        }
    }
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::from_env();
    if cli.verbose {
        observability.log_level = "debug".to_string();
    }
    init_logging(&observability);

    let settings = LoaderSettings::load(cli.config.as_deref(), &cli.overrides())?;
    log_settings_info(&settings);

    let mut source = AwsPropertySource::connect(settings).await?;
    let rendered = LoadReport::new(source.properties(), cli.show_values).render(cli.output);
    source.close().await;

    println!("{}", rendered?);
    Ok(())
}
