//! Command-line interface for farcaster-feed-export
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and CLI overrides
//! - Turning arguments into an [`ExportRequest`] and an output target
//! - Subcommands (version, completion, config)

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};

use crate::config::{Config, LogLevel};
use crate::error::{ConfigError, Result};
use crate::export::ExportRequest;

pub mod completion;

/// Export a Farcaster channel feed to CSV
#[derive(Parser, Debug)]
#[command(
    name = "farcaster-feed-export",
    version,
    about = "Export a Farcaster channel feed to CSV",
    long_about = "Pages through the Neynar channel feed and writes every cast to \
farcaster_feed_<CHANNEL>.csv, one row per cast."
)]
pub struct CliArgs {
    /// Channel to export (e.g. "memes")
    #[arg(value_name = "CHANNEL")]
    pub channel: Option<String>,

    /// Neynar API key
    #[arg(short = 'k', long, env = "NEYNAR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Maximum number of pages to fetch (values below 1 count as 1)
    #[arg(short = 'p', long, value_name = "N")]
    pub pages: Option<u32>,

    /// Casts requested per page (1-100)
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Output file, or "-" for stdout
    ///
    /// Defaults to farcaster_feed_<CHANNEL>.csv in the configured output directory.
    /// When a directory is given the default file name is used inside it.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Feed API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Do not show a progress bar
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for farcaster-feed-export
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type
        #[arg(value_enum, value_name = "SHELL")]
        shell: Shell,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// Where the CSV document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and apply argument overrides
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        Self::apply_args_to_config(&mut config, args);
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_api_args(config, args);
        Self::apply_export_args(config, args);
        Self::apply_logging_args(config, args);
    }

    fn apply_api_args(config: &mut Config, args: &CliArgs) {
        if let Some(key) = args.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            config.api.api_key = Some(key.to_string());
        }
        if let Some(url) = &args.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            config.api.timeout_secs = timeout;
        }
        if let Some(size) = args.page_size {
            config.api.page_size = size;
        }
    }

    fn apply_export_args(config: &mut Config, args: &CliArgs) {
        if let Some(pages) = args.pages {
            config.export.max_pages = pages;
        }
        config.export.max_pages = config.export.max_pages.max(1);
        if args.no_progress || args.quiet {
            config.export.progress = false;
        }
    }

    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Build the export request from the channel argument and configuration
    ///
    /// # Errors
    /// Returns a configuration error when no channel was given
    pub fn export_request(&self) -> Result<ExportRequest> {
        let channel = self
            .args
            .channel
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("channel id".to_string()))?;

        let request = ExportRequest::new(
            channel,
            self.config.export.max_pages,
            self.config.api.page_size,
        );
        request.validate()?;
        Ok(request)
    }

    /// Resolve the API credential (flag or env var, then config file)
    pub fn api_key(&self) -> Result<&str> {
        self.config
            .api
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingField("api key (--api-key or NEYNAR_API_KEY)".to_string())
                    .into()
            })
    }

    /// Decide where the document for `request` is written
    pub fn output_target(&self, request: &ExportRequest) -> OutputTarget {
        match self.args.output.as_deref() {
            Some(path) if path == Path::new("-") => OutputTarget::Stdout,
            Some(path) if path.is_dir() => OutputTarget::File(path.join(request.file_name())),
            Some(path) => OutputTarget::File(path.to_path_buf()),
            None => OutputTarget::File(self.config.export.output_dir.join(request.file_name())),
        }
    }

    /// Whether the progress bar should be drawn
    pub fn progress_enabled(&self) -> bool {
        self.config.export.progress
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(*shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("farcaster-feed-export version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show || !validate {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist, defaults apply");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("{}", self.config.to_toml_with_comments()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedExportError;

    fn cli(argv: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["farcaster-feed-export", "memes"]).unwrap();
        assert_eq!(args.channel.as_deref(), Some("memes"));
        assert!(args.pages.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from([
            "farcaster-feed-export",
            "memes",
            "-k",
            "key",
            "-p",
            "3",
            "--page-size",
            "50",
            "--no-progress",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.api_key.as_deref(), Some("key"));
        assert_eq!(args.pages, Some(3));
        assert_eq!(args.page_size, Some(50));
        assert!(args.no_progress);
        assert!(args.quiet);
    }

    #[test]
    fn test_subcommands() {
        let args = CliArgs::try_parse_from(["farcaster-feed-export", "completion", "zsh"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Completion { shell: Shell::Zsh })
        ));

        let args =
            CliArgs::try_parse_from(["farcaster-feed-export", "config", "--show"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Config {
                show: true,
                validate: false
            })
        ));
    }

    #[test]
    fn test_export_request_from_args() {
        let cli = cli(&["farcaster-feed-export", "abc", "-p", "3"]);
        let request = cli.export_request().unwrap();
        assert_eq!(request.channel_id, "abc");
        assert_eq!(request.max_pages, 3);
        assert_eq!(request.page_size, 25);
        assert_eq!(request.file_name(), "farcaster_feed_abc.csv");
    }

    #[test]
    fn test_zero_pages_coerced_to_one() {
        let cli = cli(&["farcaster-feed-export", "abc", "-p", "0"]);
        assert_eq!(cli.export_request().unwrap().max_pages, 1);
    }

    #[test]
    fn test_zero_pages_in_config_file_coerced_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export]\nmax_pages = 0\n").unwrap();

        let args = CliArgs::try_parse_from([
            "farcaster-feed-export",
            "abc",
            "-c",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let cli = CliInterface::from_args(args).unwrap();

        assert_eq!(cli.config().export.max_pages, 1);
        assert_eq!(cli.export_request().unwrap().max_pages, 1);
    }

    #[test]
    fn test_channel_passed_through_verbatim() {
        let cli = cli(&["farcaster-feed-export", " memes "]);
        let request = cli.export_request().unwrap();
        assert_eq!(request.channel_id, " memes ");
        assert_eq!(request.file_name(), "farcaster_feed_ memes .csv");
    }

    #[test]
    fn test_blank_channel_is_reported() {
        let cli = cli(&["farcaster-feed-export", "   "]);
        assert!(matches!(
            cli.export_request(),
            Err(FeedExportError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn test_default_pages_from_config() {
        let cli = cli(&["farcaster-feed-export", "abc"]);
        assert_eq!(cli.export_request().unwrap().max_pages, 10);
    }

    #[test]
    fn test_missing_channel_is_reported() {
        let cli = cli(&["farcaster-feed-export"]);
        assert!(matches!(
            cli.export_request(),
            Err(FeedExportError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn test_api_key_resolution() {
        let cli_with_key = cli(&["farcaster-feed-export", "abc", "--api-key", "secret"]);
        assert_eq!(cli_with_key.api_key().unwrap(), "secret");

        let args = CliArgs::try_parse_from(["farcaster-feed-export", "abc", "--api-key", ""])
            .unwrap();
        let mut config = Config::default();
        config.api.api_key = Some("from-file".to_string());
        CliInterface::apply_args_to_config(&mut config, &args);
        let cli_from_file = CliInterface { args, config };
        assert_eq!(cli_from_file.api_key().unwrap(), "from-file");
    }

    #[test]
    fn test_output_target() {
        let default = cli(&["farcaster-feed-export", "abc"]);
        let request = default.export_request().unwrap();
        assert_eq!(
            default.output_target(&request),
            OutputTarget::File(PathBuf::from(".").join("farcaster_feed_abc.csv"))
        );

        let stdout = cli(&["farcaster-feed-export", "abc", "-o", "-"]);
        assert_eq!(stdout.output_target(&request), OutputTarget::Stdout);

        let explicit = cli(&["farcaster-feed-export", "abc", "-o", "/nonexistent/out.csv"]);
        assert_eq!(
            explicit.output_target(&request),
            OutputTarget::File(PathBuf::from("/nonexistent/out.csv"))
        );

        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let into_dir = cli(&["farcaster-feed-export", "abc", "-o", dir_arg]);
        assert_eq!(
            into_dir.output_target(&request),
            OutputTarget::File(dir.path().join("farcaster_feed_abc.csv"))
        );
    }

    #[test]
    fn test_logging_level_flags() {
        assert_eq!(
            cli(&["farcaster-feed-export", "-v"]).config().logging.level,
            LogLevel::Debug
        );
        assert_eq!(
            cli(&["farcaster-feed-export", "--vv"]).config().logging.level,
            LogLevel::Trace
        );
        assert_eq!(
            cli(&["farcaster-feed-export", "-q"]).config().logging.level,
            LogLevel::Error
        );
    }

    #[test]
    fn test_quiet_disables_progress() {
        assert!(cli(&["farcaster-feed-export", "abc"]).progress_enabled());
        assert!(!cli(&["farcaster-feed-export", "abc", "-q"]).progress_enabled());
        assert!(!cli(&["farcaster-feed-export", "abc", "--no-progress"]).progress_enabled());
    }
}
