//! Upload file MCP server - library for uploading files to an HTTP endpoint
//!
//! This library provides functionality to:
//! - Resolve a source (HTTP URL, `file://` URI or local path) into bytes
//! - Rasterize SVG markup to PNG
//! - Assemble a multipart form and POST it to the configured endpoint
//! - Expose both uploads as MCP tools over stdio

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod mcp;
pub mod source;
pub mod svg;
pub mod upload;
