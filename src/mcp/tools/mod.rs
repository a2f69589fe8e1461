//! MCP tool definitions for uploads
//!
//! Each tool wraps an [`Uploader`](crate::upload::Uploader) entry point. Both
//! success and user-facing failures come back as a single text item; only a
//! failed upload POST becomes a protocol error.

pub mod upload_file;
pub mod upload_svg;

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;

use crate::error::UploadResult;

/// Collapse an upload outcome into the tool response.
pub fn into_tool_result(
    tool: &str,
    result: UploadResult<String>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) if e.is_reported() => {
            tracing::warn!(tool, "{}", e);
            Ok(CallToolResult::success(vec![Content::text(e.to_string())]))
        }
        Err(e) => {
            tracing::error!(tool, "{}", e);
            Err(McpError::internal_error(e.to_string(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;

    fn text_of(result: &CallToolResult) -> &str {
        result.content[0].as_text().map(|t| t.text.as_str()).unwrap()
    }

    #[test]
    fn test_success_is_text() {
        let result = into_tool_result("upload-file", Ok("OK".into())).unwrap();
        assert_eq!(result.content.len(), 1);
        assert_eq!(text_of(&result), "OK");
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_reported_failure_is_ordinary_text() {
        let result = into_tool_result("upload-file", Err(UploadError::MissingConfig)).unwrap();
        assert_eq!(
            text_of(&result),
            "Missing required environment variables: UPLOAD_URL, FILE_KEY, FILE_NAME"
        );
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_not_found_is_ordinary_text() {
        let result =
            into_tool_result("upload-file", Err(UploadError::file_not_found("/x/y.png"))).unwrap();
        assert_eq!(text_of(&result), "File not found at path: /x/y.png");
    }
}
