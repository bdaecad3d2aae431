//! Speclint - API specification analysis runner
//!
//! Fetches an API definition's specification from a registry, compiles
//! it with TypeSpec, and uploads the normalized report plus the run's
//! state transitions back to the registry.
//!
//! Exit codes:
//!   0 - Analysis completed and the report was uploaded
//!   1 - Runtime error (registry unreachable, compile fault, config error)

mod analysis;
mod analyzer;
mod cli;
mod config;
mod models;
mod registry;

use analyzer::{Analyzer, TypeSpecAnalyzer};
use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use models::AnalysisRequest;
use registry::client::RegistryConfig;
use registry::{HttpRegistryClient, RegistryClient};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        match handle_init_config() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    init_logging(&args);

    info!("Speclint v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            error!("Analysis run failed: {:#}", e);
            eprintln!("\nError: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .speclint.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".speclint.toml");

    if path.exists() {
        anyhow::bail!(".speclint.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .speclint.toml")?;

    println!("Created .speclint.toml with default settings.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run one analysis invocation end to end.
async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    let registry_url = config
        .registry
        .url
        .clone()
        .context("No registry URL configured")?;

    let request = AnalysisRequest {
        definition_id: args.definition().to_string(),
        ruleset_path: config.analyzer.ruleset.clone(),
    };

    let registry = HttpRegistryClient::new(RegistryConfig {
        base_url: registry_url,
        definition_id: request.definition_id.clone(),
        api_token: config.registry.api_token.clone(),
        timeout_seconds: config.registry.timeout_seconds,
    })?;

    let analyzer = TypeSpecAnalyzer::new(
        config.analyzer.command.clone(),
        request.ruleset_path.clone(),
    );

    if args.dry_run {
        return dry_run(&registry, &analyzer).await;
    }

    analysis::analyze_and_upload(&request, &registry, &analyzer).await?;

    if !args.quiet {
        println!("Analysis of {} uploaded to the registry.", request.definition_id);
    }
    Ok(())
}

/// Handle --dry-run: compile and print the report without touching the
/// registry's analysis state.
async fn dry_run<R: RegistryClient, A: Analyzer>(registry: &R, analyzer: &A) -> Result<()> {
    info!("Dry run: fetching and compiling without state updates");

    let content = registry.get_specification_content().await?;
    let diagnostics = analyzer.compile(&content).await?;
    let results = analysis::to_uniform_results(analyzer.id(), &diagnostics);

    println!("{}", serde_json::to_string_pretty(&results)?);
    info!("Dry run complete: {} results", results.len());
    Ok(())
}

/// Load configuration from file or use defaults, then merge CLI args.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        Config::load(config_path)?
    } else {
        match Config::load_default() {
            Ok(Some(config)) => {
                info!("Loaded default config from .speclint.toml");
                config
            }
            Ok(None) => {
                debug!("No config file found, using defaults");
                Config::default()
            }
            Err(e) => {
                warn!("Failed to load config: {}", e);
                Config::default()
            }
        }
    };

    config.merge_with_args(args);
    Ok(config)
}
