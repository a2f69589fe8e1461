//! Core MCP server implementation.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};

use super::tools::upload_file::{run_upload_file, UploadFileInput};
use super::tools::upload_svg::{run_upload_svg, UploadSvgInput};
use crate::upload::Uploader;

/// Line written to stderr once the stdio transport is up.
pub const READY_MESSAGE: &str = "Upload file MCP Server running on stdio";

/// The upload MCP server
///
/// Every tool call runs independently against the shared [`Uploader`].
#[derive(Debug, Clone)]
pub struct UploadMcpServer {
    uploader: Uploader,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl UploadMcpServer {
    pub fn new(uploader: Uploader) -> Self {
        Self { uploader, tool_router: Self::tool_router() }
    }

    #[tool(name = "upload-file", description = "upload file from a url or local file path")]
    async fn upload_file(
        &self,
        Parameters(input): Parameters<UploadFileInput>,
    ) -> Result<CallToolResult, McpError> {
        run_upload_file(&self.uploader, input).await
    }

    #[tool(
        name = "upload-svg",
        description = "convert an SVG string to PNG and upload it; width and height scale the image to fit while keeping its aspect ratio"
    )]
    async fn upload_svg(
        &self,
        Parameters(input): Parameters<UploadSvgInput>,
    ) -> Result<CallToolResult, McpError> {
        run_upload_svg(&self.uploader, input).await
    }
}

#[tool_handler]
impl ServerHandler for UploadMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "upload-file".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Upload files to the configured endpoint. Use upload-file for a URL, \
                 file:// URI or local path, and upload-svg to rasterize SVG markup to PNG \
                 before uploading. The tool text is the endpoint's response or a diagnostic."
                    .into(),
            ),
        }
    }
}

/// Run the MCP server on stdin/stdout
pub async fn run_server(uploader: Uploader) -> Result<(), Box<dyn std::error::Error>> {
    let server = UploadMcpServer::new(uploader);
    eprintln!("{}", READY_MESSAGE);
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
