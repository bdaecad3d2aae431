//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Speclint - API specification analysis runner
///
/// Fetches an API definition's specification from a registry, runs the
/// TypeSpec compiler over it, and uploads the normalized report back to
/// the registry together with the run's state transitions.
///
/// Examples:
///   speclint --registry-url https://registry.example.com/v1 --definition petstore-v2
///   speclint --registry-url https://registry.example.com/v1 --definition petstore-v2 --ruleset rules.yaml
///   speclint --registry-url https://registry.example.com/v1 --definition petstore-v2 --dry-run
///   speclint --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Base URL of the registry service
    ///
    /// Can also be set via the SPECLINT_REGISTRY_URL env var or the
    /// `[registry] url` entry of .speclint.toml.
    #[arg(short, long, value_name = "URL", env = "SPECLINT_REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Registry identifier of the API definition to analyze
    #[arg(
        short,
        long,
        value_name = "ID",
        required_unless_present = "init_config"
    )]
    pub definition: Option<String>,

    /// Ruleset file passed to the compiler
    ///
    /// If not specified, the compiler runs with its built-in rules.
    #[arg(long, value_name = "FILE")]
    pub ruleset: Option<PathBuf>,

    /// Bearer token for registry requests
    #[arg(long, value_name = "TOKEN", env = "SPECLINT_API_TOKEN")]
    pub api_token: Option<String>,

    /// Registry request timeout in seconds
    ///
    /// Overrides the config file value when provided.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Compiler command to invoke
    ///
    /// Overrides the config file value when provided.
    #[arg(long, value_name = "CMD")]
    pub compiler: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .speclint.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Compile and print the report without updating registry state
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .speclint.toml and exit
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse arguments from the process environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("--verbose and --quiet are mutually exclusive".to_string());
        }

        if let Some(ref url) = self.registry_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("Registry URL must be http(s): {}", url));
            }
        }

        Ok(())
    }

    /// Logging level implied by the verbosity flags.
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::ERROR
        } else {
            tracing::Level::INFO
        }
    }

    /// The definition identifier; call only after clap validation passed.
    pub fn definition(&self) -> &str {
        self.definition.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_minimal_invocation() {
        let args = args_for(&[
            "speclint",
            "--registry-url",
            "https://registry.example.com/v1",
            "--definition",
            "petstore-v2",
        ]);
        assert_eq!(
            args.registry_url.as_deref(),
            Some("https://registry.example.com/v1")
        );
        assert_eq!(args.definition(), "petstore-v2");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_init_config_needs_no_registry() {
        let args = args_for(&["speclint", "--init-config"]);
        assert!(args.init_config);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_missing_definition_is_rejected() {
        let result = Args::try_parse_from(["speclint", "--registry-url", "https://r.example.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_url_may_come_from_config_file() {
        // The URL is resolved after config merging, so parsing must
        // accept its absence on the command line.
        let args = args_for(&["speclint", "--definition", "petstore-v2"]);
        assert_eq!(args.registry_url, None);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        let args = args_for(&[
            "speclint",
            "--registry-url",
            "ftp://registry.example.com",
            "--definition",
            "petstore-v2",
        ]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let args = args_for(&[
            "speclint",
            "--registry-url",
            "https://r.example.com",
            "--definition",
            "petstore-v2",
            "--verbose",
            "--quiet",
        ]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_levels() {
        let base = [
            "speclint",
            "--registry-url",
            "https://r.example.com",
            "--definition",
            "d",
        ];
        assert_eq!(args_for(&base).log_level(), tracing::Level::INFO);

        let mut verbose = base.to_vec();
        verbose.push("--verbose");
        assert_eq!(args_for(&verbose).log_level(), tracing::Level::DEBUG);

        let mut quiet = base.to_vec();
        quiet.push("--quiet");
        assert_eq!(args_for(&quiet).log_level(), tracing::Level::ERROR);
    }
}
