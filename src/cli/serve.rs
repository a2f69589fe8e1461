//! Server command: logging setup and the async runtime around the MCP server

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::UploadConfig;
use crate::svg::SvgRasterizer;
use crate::upload::Uploader;

/// Log to stderr; stdout carries the protocol. `RUST_LOG` overrides the level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Execute the MCP server until the client disconnects
pub fn run_serve(config: UploadConfig) -> ExitCode {
    use tokio::runtime::Runtime;

    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to create async runtime: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if config.target().is_err() {
        tracing::warn!("UPLOAD_URL, FILE_KEY or FILE_NAME is not set; uploads will be refused");
    }

    let uploader = Uploader::new(config, reqwest::Client::new(), SvgRasterizer::with_system_fonts());

    match rt.block_on(crate::mcp::run_server(uploader)) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Fatal error in main(): {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
