use crate::probe::ConnectionParameters;
use anyhow::{Context, Result};
use std::{fs, io, path::Path};

/// Render verified parameters as dotenv lines
#[must_use]
pub fn render(params: &ConnectionParameters) -> String {
    let port = params.port().to_string();
    let entries = [
        ("DB_NAME", params.database()),
        ("DB_USER", params.user()),
        ("DB_PASSWORD", params.password()),
        ("DB_HOST", params.host()),
        ("DB_PORT", port.as_str()),
    ];

    entries
        .iter()
        .map(|(key, value)| format!("{key}={}\n", quote(value)))
        .collect()
}

/// Replace the file at `path` with the dotenv rendering of `params`
///
/// The file holds the password, so on unix it is owner read/write only.
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write(path: &Path, params: &ConnectionParameters) -> Result<()> {
    write_private(path, render(params).as_bytes())
        .with_context(|| format!("Failed to write env file {}", path.display()))
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::{
        fs::OpenOptions,
        io::Write,
        os::unix::fs::{OpenOptionsExt, PermissionsExt},
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}

fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\' | '$'));

    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
