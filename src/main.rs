//! innopack - Inno Setup installer packager.
//!
//! This binary packages a Windows executable and a bundled runtime into a
//! single installer with proper error handling and artifact verification.

use std::process;

#[tokio::main]
async fn main() {
    // Run CLI and get exit code
    let exit_code = match innopack::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
