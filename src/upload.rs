//! Upload orchestration for the two tool entry points.
//!
//! Each call is a single linear pass: check configuration, obtain bytes
//! (resolve a source or rasterize SVG), assemble the form, POST it, and return
//! the endpoint's response body. Nothing is retried and nothing outlives the
//! call except the shared configuration.

use std::sync::Arc;

use crate::config::{UploadConfig, UploadTarget};
use crate::error::{UploadError, UploadResult};
use crate::form::{assemble, parse_extra_fields};
use crate::source::{FileBuffer, Source};
use crate::svg::{png_file_name, SvgRasterizer};

/// Runs uploads against the configured endpoint.
#[derive(Debug, Clone)]
pub struct Uploader {
    config: Arc<UploadConfig>,
    client: reqwest::Client,
    rasterizer: SvgRasterizer,
}

impl Uploader {
    pub fn new(config: UploadConfig, client: reqwest::Client, rasterizer: SvgRasterizer) -> Self {
        Self { config: Arc::new(config), client, rasterizer }
    }

    /// Upload a file fetched from a URL or read from local disk.
    ///
    /// Returns the endpoint's response body verbatim.
    pub async fn upload_file(&self, source: &str, file_name: &str) -> UploadResult<String> {
        let target = self.config.target()?;

        let source = Source::parse(source);
        tracing::info!(kind = source.kind(), file_name, "resolving upload source");
        let buffer = source.resolve(&self.client).await?;

        self.send(target, buffer, file_name).await
    }

    /// Rasterize SVG markup to PNG and upload it.
    ///
    /// A trailing `.svg` on `file_name` is rewritten to `.png`.
    pub async fn upload_svg(
        &self,
        svg: &str,
        file_name: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> UploadResult<String> {
        let target = self.config.target()?;

        tracing::info!(file_name, ?width, ?height, "converting SVG to PNG");
        let buffer = self.rasterizer.render_png_async(svg.to_string(), width, height).await?;

        self.send(target, buffer, &png_file_name(file_name)).await
    }

    async fn send(
        &self,
        target: UploadTarget<'_>,
        buffer: FileBuffer,
        file_name: &str,
    ) -> UploadResult<String> {
        let extra_fields = parse_extra_fields(self.config.extra_form());
        let size = buffer.len();
        let form =
            assemble(buffer, file_name, target.file_key, target.file_name_key, &extra_fields);

        tracing::info!(
            url = target.upload_url,
            file_name,
            bytes = size,
            extra_fields = extra_fields.len(),
            "uploading"
        );

        let response = self
            .client
            .post(target.upload_url)
            .multipart(form.into_multipart().map_err(UploadError::Upload)?)
            .send()
            .await
            .map_err(UploadError::Upload)?;

        let status = response.status();
        let text = response.text().await.map_err(UploadError::Upload)?;
        tracing::debug!(%status, "upload finished");

        Ok(text)
    }
}
