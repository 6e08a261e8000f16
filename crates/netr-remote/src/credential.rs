//! Credential sourcing: process environment first, secrets file fallback.
//!
//! Both lookups share the same key name. Blank values are treated as
//! missing so an empty export does not slip past the gatekeeper.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// The single key both lookups are keyed by.
pub const CREDENTIAL_NAME: &str = "GROQ_API_KEY";

/// Resolve a credential by name: environment variable first, then the
/// secrets file. Returns `None` when neither source has a non-blank value.
pub fn lookup(name: &str, secrets_path: &Path) -> Option<String> {
    if let Ok(value) = std::env::var(name)
        && !value.trim().is_empty()
    {
        debug!(name, "credential found in environment");
        return Some(value);
    }

    let contents = std::fs::read_to_string(secrets_path).ok()?;
    let found = find_secret(&contents, name);
    if found.is_some() {
        debug!(name, path = %secrets_path.display(), "credential found in secrets file");
    }
    found
}

/// Default secrets file location: `<config dir>/netr/secrets.toml`, or
/// `./netr-secrets.toml` when no config directory can be determined.
pub fn default_secrets_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("netr").join("secrets.toml"),
        None => PathBuf::from("netr-secrets.toml"),
    }
}

/// Look up a top-level string key in the TOML secrets file.
fn find_secret(contents: &str, name: &str) -> Option<String> {
    let table: toml::Value = match toml::from_str(contents) {
        Ok(table) => table,
        Err(err) => {
            warn!(%err, "secrets file is not valid TOML");
            return None;
        }
    };
    let value = table.get(name)?.as_str()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}
