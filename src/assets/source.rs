use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{GridError, GridResult};

/// Where the bytes of one collage image come from.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// File on disk.
    Path(PathBuf),
    /// `data:` URI, base64 or raw payload.
    DataUri(String),
    /// Already-read encoded bytes.
    Bytes(Arc<Vec<u8>>),
}

impl ImageSource {
    /// Interpret a command-line or preset string: `data:` URIs are kept inline, anything else is a path.
    pub fn parse(s: &str) -> Self {
        if s.trim_start().starts_with("data:") {
            Self::DataUri(s.trim().to_string())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }

    /// Wrap encoded bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Arc::new(bytes.into()))
    }

    /// Short label for logs.
    pub fn label(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::DataUri(uri) => {
                let head = uri.split(',').next().unwrap_or("data:");
                format!("{head},<{} chars>", uri.len())
            }
            Self::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }

    /// Fetch the encoded bytes.
    pub fn read_bytes(&self) -> GridResult<Vec<u8>> {
        match self {
            Self::Path(p) => read_file(p),
            Self::DataUri(uri) => decode_data_uri(uri),
            Self::Bytes(b) => Ok(b.as_ref().clone()),
        }
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ImageSource").field(&self.label()).finish()
    }
}

fn read_file(path: &Path) -> GridResult<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))
        .map_err(GridError::from)
}

/// Decode the payload of a `data:[<mime>][;base64],<payload>` URI.
pub fn decode_data_uri(uri: &str) -> GridResult<Vec<u8>> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| GridError::decode("data uri must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| GridError::decode("data uri is missing the ',' separator"))?;

    if meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(cleaned.as_bytes())
            .map_err(|e| GridError::decode(format!("data uri base64 payload: {e}")))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
