//! Multipart form assembly for uploads
//!
//! The form is built as an ordered list of [`FormPart`]s first and only turned
//! into a `reqwest` multipart body at send time, so its contents can be
//! inspected without encoding.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::source::FileBuffer;

/// Content type of the binary file part.
pub const FILE_MIME: &str = "application/octet-stream";

/// Additional string fields from `EXTRA_FORM`, in document order.
pub type ExtraFields = Vec<(String, String)>;

/// Value carried by a single form part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    /// Binary part with a declared file name
    File { bytes: FileBuffer, file_name: String },
    /// Plain string part
    Text(String),
}

/// A named part of an upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

/// An ordered multipart form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadForm {
    parts: Vec<FormPart>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, bytes: FileBuffer, file_name: &str) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: PartValue::File { bytes, file_name: file_name.to_string() },
        });
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts
            .push(FormPart { name: name.to_string(), value: PartValue::Text(value.to_string()) });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Bytes of the first file part, if any.
    pub fn file_bytes(&self) -> Option<&[u8]> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::File { bytes, .. } => Some(bytes.as_slice()),
            PartValue::Text(_) => None,
        })
    }

    /// Encode into a `multipart/form-data` body.
    ///
    /// Parts are appended in order; repeated names are sent as repeated parts
    /// and it is up to the receiving endpoint which one wins. File parts are
    /// typed `application/octet-stream`.
    pub fn into_multipart(self) -> Result<Form, reqwest::Error> {
        self.parts.into_iter().try_fold(Form::new(), |form, part| {
            Ok(match part.value {
                PartValue::File { bytes, file_name } => {
                    let file = Part::bytes(bytes).file_name(file_name).mime_str(FILE_MIME)?;
                    form.part(part.name, file)
                }
                PartValue::Text(value) => form.text(part.name, value),
            })
        })
    }
}

/// Build the upload form: the file under `file_key`, the file name under
/// `file_name_key`, then every extra field in order.
pub fn assemble(
    buffer: FileBuffer,
    file_name: &str,
    file_key: &str,
    file_name_key: &str,
    extra_fields: &ExtraFields,
) -> UploadForm {
    let form = UploadForm::new().file(file_key, buffer, file_name).text(file_name_key, file_name);

    extra_fields.iter().fold(form, |form, (key, value)| form.text(key, value))
}

/// Parse `EXTRA_FORM` into string fields.
///
/// String values are used as-is; any other JSON value is inserted as its JSON
/// text. Invalid JSON is logged and yields no fields; it never fails the
/// upload.
pub fn parse_extra_fields(raw: Option<&str>) -> ExtraFields {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect(),
        Ok(other) => {
            tracing::warn!("Failed to parse extra form fields: expected a JSON object, got {}", other);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Failed to parse extra form fields: {}", e);
            Vec::new()
        }
    }
}
