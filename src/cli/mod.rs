//! Command-line interface implementation
//!
//! Parses the process arguments (each flag falls back to its environment
//! variable), installs logging and hands off to the MCP server.

mod serve;

use clap::Parser;
use std::process::ExitCode;

use crate::config::UploadConfig;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// Upload file MCP server - upload files and rasterized SVGs over the Model Context Protocol
#[derive(Debug, Parser)]
#[command(name = "upload-file-mcp")]
#[command(about = "MCP server that uploads files (or SVGs rendered to PNG) as multipart form data")]
#[command(version)]
pub struct Cli {
    /// Endpoint the multipart form is POSTed to
    #[arg(long, env = "UPLOAD_URL", hide_env_values = true)]
    pub upload_url: Option<String>,

    /// Form field name for the file part
    #[arg(long, env = "FILE_KEY")]
    pub file_key: Option<String>,

    /// Form field name for the file name text part
    #[arg(long, env = "FILE_NAME")]
    pub file_name: Option<String>,

    /// JSON object of extra form fields; non-string values are sent as JSON text
    #[arg(long, env = "EXTRA_FORM", hide_env_values = true)]
    pub extra_form: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> UploadConfig {
        UploadConfig {
            upload_url: self.upload_url,
            file_key: self.file_key,
            file_name: self.file_name,
            extra_form: self.extra_form,
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    serve::init_logging();
    serve::run_serve(cli.into_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_populate_config() {
        let cli = Cli::try_parse_from([
            "upload-file-mcp",
            "--upload-url",
            "https://files.example.test/upload",
            "--file-key",
            "file",
            "--file-name",
            "name",
            "--extra-form",
            r#"{"folder":"inbox"}"#,
        ])
        .unwrap();

        assert_eq!(
            cli.into_config(),
            UploadConfig {
                upload_url: Some("https://files.example.test/upload".into()),
                file_key: Some("file".into()),
                file_name: Some("name".into()),
                extra_form: Some(r#"{"folder":"inbox"}"#.into()),
            }
        );
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["upload-file-mcp", "--retries", "3"]).is_err());
    }
}
