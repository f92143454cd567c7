use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The two upload formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Pdf,
    PlainText,
}

impl MediaKind {
    /// Maps a declared content type to a media kind, ignoring parameters like `charset`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(MediaKind::Pdf),
            "text/plain" => Some(MediaKind::PlainText),
            _ => None,
        }
    }

    /// Falls back to the file extension (`.pdf` / `.txt`) when no usable type was declared.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(MediaKind::Pdf),
            "txt" => Some(MediaKind::PlainText),
            _ => None,
        }
    }

    /// Resolves the kind of an upload. A declared type wins unless it is absent or the
    /// generic `application/octet-stream`.
    pub fn resolve(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        match content_type.map(str::trim) {
            Some(ct) if !ct.is_empty() && !ct.starts_with("application/octet-stream") => {
                Self::from_content_type(ct)
            }
            _ => file_name.and_then(Self::from_file_name),
        }
    }
}

/// An uploaded resume, consumed once by the loader.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub payload: Bytes,
    pub kind: MediaKind,
}

impl RawDocument {
    pub fn new(payload: impl Into<Bytes>, kind: MediaKind) -> Self {
        Self {
            payload: payload.into(),
            kind,
        }
    }
}
