//! Attachment URL lookup
//!
//! Planka has stored attachment links under different keys across versions and
//! attachment types. The lookup walks a fixed list of known keys and reports
//! which one matched, or that none did.

use serde::Serialize;
use serde_json::Value;

/// Keys probed on the attachment `data` object, in order
pub const DATA_URL_KEYS: &[&str] = &["url", "downloadUrl", "download_url", "link", "href", "path"];

/// Keys probed on the nested `data.file` object, in order
pub const FILE_URL_KEYS: &[&str] = &[
    "url",
    "downloadUrl",
    "download_url",
    "path",
    "thumbnailUrl",
    "thumbUrl",
    "thumbnail_url",
];

/// Where an attachment URL was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UrlSource {
    Data(&'static str),
    File(&'static str),
    /// The attachment's own top-level `url` field
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttachmentUrl {
    Resolved { source: UrlSource, url: String },
    /// None of the known keys held a non-empty string
    Unrecognized,
}

impl AttachmentUrl {
    pub fn url(&self) -> Option<&str> {
        match self {
            AttachmentUrl::Resolved { url, .. } => Some(url),
            AttachmentUrl::Unrecognized => None,
        }
    }
}

/// Make a possibly relative URL absolute against the service base URL
///
/// Empty values yield `None`; absolute `http(s)` URLs are returned as-is.
pub fn normalize_url(base_url: Option<&str>, value: &str) -> Option<String> {
    let candidate = value.trim();
    if candidate.is_empty() {
        return None;
    }
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return Some(candidate.to_string());
    }
    match base_url {
        Some(base) => Some(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            candidate.trim_start_matches('/')
        )),
        None => Some(candidate.to_string()),
    }
}

fn first_string_key(object: &Value, keys: &[&'static str]) -> Option<(&'static str, String)> {
    keys.iter().find_map(|key| {
        object
            .get(*key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (*key, value.to_string()))
    })
}

/// Find the URL of an attachment
///
/// Probes `data` first, then `data.file`, then the attachment's own `url`.
pub fn extract_attachment_url(
    data: Option<&Value>,
    direct_url: Option<&str>,
    base_url: Option<&str>,
) -> AttachmentUrl {
    let data = data.filter(|value| value.is_object());

    let found = data
        .and_then(|data| first_string_key(data, DATA_URL_KEYS))
        .map(|(key, value)| (UrlSource::Data(key), value))
        .or_else(|| {
            data.and_then(|data| data.get("file"))
                .filter(|file| file.is_object())
                .and_then(|file| first_string_key(file, FILE_URL_KEYS))
                .map(|(key, value)| (UrlSource::File(key), value))
        })
        .or_else(|| {
            direct_url
                .filter(|value| !value.trim().is_empty())
                .map(|value| (UrlSource::Direct, value.to_string()))
        });

    match found.and_then(|(source, value)| normalize_url(base_url, &value).map(|url| (source, url)))
    {
        Some((source, url)) => AttachmentUrl::Resolved { source, url },
        None => AttachmentUrl::Unrecognized,
    }
}
