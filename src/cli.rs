//! Command-line interface definitions for Prism.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Prism search server.
///
/// # Examples
///
/// ```sh
/// # Listen on the default port
/// prism
///
/// # Serve the frontend from ./public on port 8080
/// prism --port 8080 --public-dir ./public
///
/// # Tune timeouts from a YAML file and look up missing thumbnails
/// prism --config prism.yaml --enrich-thumbnails
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "PRISM_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3030)]
    pub port: u16,

    /// Optional path to a YAML config file (timeouts, headers, user agent)
    #[arg(short, long, env = "PRISM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of static frontend files to serve next to the API
    #[arg(long, env = "PRISM_PUBLIC_DIR")]
    pub public_dir: Option<PathBuf>,

    /// Fetch article pages to fill in missing news thumbnails
    #[arg(long, env = "PRISM_ENRICH_THUMBNAILS")]
    pub enrich_thumbnails: bool,
}
