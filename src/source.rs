//! Source resolution: turn a source identifier into file bytes.
//!
//! A source is one of an `http(s)` URL, a `file://` URI, or a bare filesystem
//! path. The identifier is classified once by [`Source::parse`]; everything
//! downstream works on the variant, never on string prefixes.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{UploadError, UploadResult};

const FILE_SCHEME: &str = "file://";

/// Resolved content of a source, owned by the invocation that produced it.
pub type FileBuffer = Vec<u8>;

/// A classified source identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `http://` or `https://` URL, fetched with GET
    Http(String),
    /// `file://` URI, already decoded to a filesystem path
    FileUri(PathBuf),
    /// Anything else, used verbatim as a path
    Path(PathBuf),
}

impl Source {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Source::Http(source.to_string())
        } else if source.starts_with(FILE_SCHEME) {
            Source::FileUri(file_uri_to_path(source))
        } else {
            Source::Path(PathBuf::from(source))
        }
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Http(_) => "http",
            Source::FileUri(_) => "file-uri",
            Source::Path(_) => "path",
        }
    }

    /// Fetch or read the full content of this source.
    pub async fn resolve(&self, client: &reqwest::Client) -> UploadResult<FileBuffer> {
        match self {
            Source::Http(url) => fetch(client, url).await,
            Source::FileUri(path) | Source::Path(path) => read_local(path).await,
        }
    }
}

/// Decode a `file://` URI to a path.
///
/// The URI path component is percent-decoded, so spaces and non-ASCII
/// characters survive. If the URI cannot be parsed (or its path is not valid
/// UTF-8 once decoded) the `file://` prefix is stripped literally instead.
pub fn file_uri_to_path(uri: &str) -> PathBuf {
    let decoded = Url::parse(uri).ok().and_then(|url| {
        percent_decode_str(url.path()).decode_utf8().ok().map(|path| path.into_owned())
    });

    match decoded {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(uri.strip_prefix(FILE_SCHEME).unwrap_or(uri)),
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> UploadResult<FileBuffer> {
    let response = client.get(url).send().await.map_err(UploadError::Fetch)?;
    tracing::debug!(url, status = %response.status(), "fetched remote source");

    let bytes = response.bytes().await.map_err(UploadError::Fetch)?;
    Ok(bytes.to_vec())
}

async fn read_local(path: &Path) -> UploadResult<FileBuffer> {
    let display = path.display().to_string();

    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(UploadError::file_not_found(&display));
    }

    tokio::fs::read(path).await.map_err(|source| UploadError::ReadFile { path: display, source })
}
