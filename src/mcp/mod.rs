//! MCP (Model Context Protocol) server for uploads
//!
//! Exposes the upload pipeline as two MCP tools, `upload-file` and
//! `upload-svg`, served over stdin/stdout.

mod server;
pub mod tools;

pub use server::{run_server, UploadMcpServer, READY_MESSAGE};
