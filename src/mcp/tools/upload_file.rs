//! MCP upload-file tool: upload a file from a URL or local path.

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use schemars::JsonSchema;
use serde::Deserialize;

use super::into_tool_result;
use crate::upload::Uploader;

/// Input parameters for the upload-file tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileInput {
    /// HTTP(S) URL, `file://` URI, or local file path.
    #[schemars(description = "url or local file path")]
    pub source: String,

    /// Name the file is uploaded under.
    #[schemars(description = "The file name (must be in English)")]
    pub file_name: String,
}

/// Execute the upload-file tool logic.
pub async fn run_upload_file(
    uploader: &Uploader,
    input: UploadFileInput,
) -> Result<CallToolResult, McpError> {
    into_tool_result("upload-file", uploader.upload_file(&input.source, &input.file_name).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;
    use crate::svg::SvgRasterizer;

    #[test]
    fn test_input_uses_camel_case() {
        let input: UploadFileInput =
            serde_json::from_value(serde_json::json!({ "source": "a.png", "fileName": "a.png" }))
                .unwrap();
        assert_eq!(input.source, "a.png");
        assert_eq!(input.file_name, "a.png");
    }

    #[test]
    fn test_schema_requires_both_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(UploadFileInput)).unwrap();
        let required: Vec<&str> =
            schema["required"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
        assert!(required.contains(&"source"));
        assert!(required.contains(&"fileName"));
    }

    #[tokio::test]
    async fn test_missing_config_returns_message() {
        let uploader =
            Uploader::new(UploadConfig::default(), reqwest::Client::new(), SvgRasterizer::new());
        let input = UploadFileInput { source: "/tmp/a.png".into(), file_name: "a.png".into() };

        let result = run_upload_file(&uploader, input).await.unwrap();
        let text = result.content[0].as_text().unwrap().text.clone();
        assert_eq!(text, "Missing required environment variables: UPLOAD_URL, FILE_KEY, FILE_NAME");
    }
}
