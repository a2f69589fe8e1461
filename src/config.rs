//! Process-wide upload configuration
//!
//! Built once at startup from command-line flags, each of which falls back to
//! its environment variable (see [`crate::cli::Cli`]), and shared read-only
//! with every tool invocation. Required values are checked per invocation, not
//! at startup, so a misconfigured server still answers calls with a diagnostic.

use crate::error::{UploadError, UploadResult};

/// Upload endpoint and multipart field names.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Endpoint the multipart form is POSTed to
    pub upload_url: Option<String>,
    /// Field name of the binary file part
    pub file_key: Option<String>,
    /// Field name of the plain-text file name part
    pub file_name: Option<String>,
    /// Raw JSON object of additional form fields
    pub extra_form: Option<String>,
}

/// Validated view of the required configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTarget<'a> {
    pub upload_url: &'a str,
    pub file_key: &'a str,
    pub file_name_key: &'a str,
}

impl UploadConfig {
    /// Return the required values, or `MissingConfig` if any is absent or empty.
    pub fn target(&self) -> UploadResult<UploadTarget<'_>> {
        match (non_empty(&self.upload_url), non_empty(&self.file_key), non_empty(&self.file_name))
        {
            (Some(upload_url), Some(file_key), Some(file_name_key)) => {
                Ok(UploadTarget { upload_url, file_key, file_name_key })
            }
            _ => Err(UploadError::MissingConfig),
        }
    }

    /// Raw `EXTRA_FORM` text, treating an empty value as unset.
    pub fn extra_form(&self) -> Option<&str> {
        non_empty(&self.extra_form)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> UploadConfig {
        UploadConfig {
            upload_url: Some("http://localhost/upload".into()),
            file_key: Some("file".into()),
            file_name: Some("fileName".into()),
            extra_form: None,
        }
    }

    #[test]
    fn test_target_with_all_values() {
        let config = full();
        let target = config.target().unwrap();
        assert_eq!(target.upload_url, "http://localhost/upload");
        assert_eq!(target.file_key, "file");
        assert_eq!(target.file_name_key, "fileName");
    }

    #[test]
    fn test_target_missing_each_value() {
        for strip in 0..3 {
            let mut config = full();
            match strip {
                0 => config.upload_url = None,
                1 => config.file_key = None,
                _ => config.file_name = None,
            }
            assert!(matches!(config.target(), Err(UploadError::MissingConfig)));
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let config = UploadConfig { file_key: Some(String::new()), ..full() };
        assert!(matches!(config.target(), Err(UploadError::MissingConfig)));
    }

    #[test]
    fn test_extra_form_empty_is_unset() {
        let config = UploadConfig { extra_form: Some(String::new()), ..full() };
        assert_eq!(config.extra_form(), None);

        let config = UploadConfig { extra_form: Some("{}".into()), ..full() };
        assert_eq!(config.extra_form(), Some("{}"));
    }
}
