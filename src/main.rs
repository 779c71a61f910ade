//! Kodegen Bundler Winget - publishes release installers to winget-pkgs.
//!
//! This binary hashes installers, generates winget manifests and opens the
//! pull request against the community repository.

use std::process;

use kodegen_bundler_winget::cli;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
