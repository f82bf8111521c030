//! Environment variable handling.

use regex::{Captures, Regex};
use std::env;
use std::sync::OnceLock;

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}|\$([A-Za-z_][A-Za-z0-9_]*)")
            .expect("static pattern")
    })
}

/// Expand environment variables in the forms `$VAR`, `${VAR}` and
/// `${VAR:-default}`, plus a leading `~/`.
///
/// Unset variables without a default expand to the empty string.
pub fn expand_env_vars(value: &str) -> String {
    let expanded = var_pattern().replace_all(value, |cap: &Captures<'_>| {
        if let Some(name) = cap.get(1) {
            match env::var(name.as_str()) {
                Ok(v) => v,
                Err(_) => cap.get(2).map(|d| d.as_str().to_string()).unwrap_or_default(),
            }
        } else {
            cap.get(3)
                .and_then(|name| env::var(name.as_str()).ok())
                .unwrap_or_default()
        }
    });

    expand_tilde(&expanded)
}

fn expand_tilde(value: &str) -> String {
    if value == "~" || value.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &value[1..]);
        }
    }
    value.to_string()
}
