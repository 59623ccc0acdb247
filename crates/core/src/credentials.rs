//! Credential file format
//!
//! Credentials live in a dotenv file holding `PLANKA_URL`, `PLANKA_USERNAME`
//! and `PLANKA_PASSWORD`. Reading is left to a dotenv parser; this module
//! writes `KEY="value"` lines and leaves unrelated lines untouched.

use std::fmt;

pub const PLANKA_URL: &str = "PLANKA_URL";
pub const PLANKA_USERNAME: &str = "PLANKA_USERNAME";
pub const PLANKA_PASSWORD: &str = "PLANKA_PASSWORD";

/// Every key a complete credential set needs, in file order
pub const CREDENTIAL_KEYS: [&str; 3] = [PLANKA_URL, PLANKA_USERNAME, PLANKA_PASSWORD];

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("missing {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
}

/// Key assigned on a dotenv line, if the line is an assignment
fn assignment_key(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
    let (key, _) = line.split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then_some(key)
}

/// Value of `key`, the last assignment winning
pub fn env_value<'a>(entries: &'a [(String, String)], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, value)| value.as_str())
}

/// Render a `KEY="value"` line that dotenv readers decode back to `value`
///
/// Newlines are written as `\n` so every entry stays on one line, and `$` is
/// escaped so readers do not expand it.
pub fn render_entry(key: &str, value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    format!("{key}=\"{escaped}\"")
}

/// Set `updates` in dotenv text, keeping every other line as it was
///
/// The first assignment of an updated key is rewritten in place and later
/// duplicates are removed. Keys not present yet are appended.
pub fn upsert_env_keys(contents: &str, updates: &[(&str, &str)]) -> String {
    let mut written: Vec<&str> = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    for line in contents.lines() {
        let update = assignment_key(line)
            .and_then(|key| updates.iter().find(|(update_key, _)| *update_key == key));
        match update {
            Some((key, value)) => {
                if !written.contains(key) {
                    lines.push(render_entry(key, value));
                    written.push(*key);
                }
            }
            None => lines.push(line.to_string()),
        }
    }

    for (key, value) in updates {
        if !written.contains(key) {
            lines.push(render_entry(key, value));
        }
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

/// Resolve credentials, preferring `env` over the file entries
///
/// Empty values count as missing.
pub fn resolve_credentials<F>(
    env: F,
    file_entries: &[(String, String)],
) -> Result<Credentials, CredentialsError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| {
        env(key)
            .filter(|value| !value.is_empty())
            .or_else(|| env_value(file_entries, key).map(str::to_string))
            .filter(|value| !value.is_empty())
    };

    let values: Vec<Option<String>> = CREDENTIAL_KEYS.iter().map(|key| lookup(*key)).collect();
    let missing: Vec<&'static str> = CREDENTIAL_KEYS
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| *key)
        .collect();

    match values.as_slice() {
        [Some(url), Some(username), Some(password)] => Ok(Credentials {
            url: url.trim_end_matches('/').to_string(),
            username: username.clone(),
            password: password.clone(),
        }),
        _ => Err(CredentialsError::MissingKeys(missing)),
    }
}
