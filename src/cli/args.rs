//! Command line argument parsing and validation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Windows Package Manager publisher for release pipelines
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_winget",
    version,
    about = "Publish release installers to the winget community repository",
    long_about = "Hashes release installers, generates winget manifests and opens a pull request
against microsoft/winget-pkgs from a fork owned by the token's account.

Usage:
  kodegen_bundler_winget validate --config winget.yaml
  kodegen_bundler_winget publish --config winget.yaml --version 1.2.3 --dry-run
  kodegen_bundler_winget publish --config winget.json --version 1.2.3

The access token is read from `github_token` in the config file, or from
GITHUB_TOKEN when the file leaves it empty.

Exit code 0 = published (or would publish, with --dry-run)."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Hash installers, generate manifests and open the pull request
    Publish {
        /// Plugin configuration file (JSON for `.json`, YAML otherwise)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Version being released, substituted into installer URLs
        #[arg(long, value_name = "VERSION")]
        version: String,

        /// Render manifests only; download and submit nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Check a configuration file without touching the network
    Validate {
        /// Plugin configuration file (JSON for `.json`, YAML otherwise)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Show the plugin descriptor
    Info {
        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Command::Publish { version, .. } = &self.command {
            let version = version.trim();
            if version.is_empty() {
                return Err("Version cannot be empty".to_string());
            }
            if version.contains(char::is_whitespace) || version.contains('/') {
                return Err(format!("Invalid version: {version}"));
            }
        }
        Ok(())
    }
}
