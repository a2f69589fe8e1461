//! Upload file MCP server - uploads files and rendered SVGs on behalf of an agent

use std::process::ExitCode;

use upload_file_mcp::cli;

fn main() -> ExitCode {
    cli::run()
}
