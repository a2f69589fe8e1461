//! MCP upload-svg tool: rasterize SVG markup to PNG and upload it.

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use schemars::JsonSchema;
use serde::Deserialize;

use super::into_tool_result;
use crate::upload::Uploader;

/// Input parameters for the upload-svg tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadSvgInput {
    /// SVG markup to convert.
    #[schemars(description = "SVG markup to convert to PNG")]
    pub svg_string: String,

    /// Upload name; a trailing `.svg` becomes `.png`.
    #[schemars(description = "The file name (must be in English); a .svg extension is replaced by .png")]
    pub file_name: String,

    #[schemars(description = "Output width in pixels (optional, non-negative integer)")]
    pub width: Option<u32>,

    #[schemars(description = "Output height in pixels (optional, non-negative integer)")]
    pub height: Option<u32>,
}

/// Execute the upload-svg tool logic.
pub async fn run_upload_svg(
    uploader: &Uploader,
    input: UploadSvgInput,
) -> Result<CallToolResult, McpError> {
    let result = uploader
        .upload_svg(&input.svg_string, &input.file_name, input.width, input.height)
        .await;
    into_tool_result("upload-svg", result)
}
