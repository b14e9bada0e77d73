//! Kodegen Bundler Deploy - deployment bundle packager.
//!
//! This binary builds an application and stages binary, source trees and
//! launcher scripts into a directory that can be copied to a target machine.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match kodegen_bundler_deploy::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
