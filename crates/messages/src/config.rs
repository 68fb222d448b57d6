//! Environment-driven configuration.

use timeshare_observability::LogFormat;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "timeshare://vote";
pub const DEFAULT_CAPTION: &str = "I voted";

pub const BASE_URL_VAR: &str = "TIMESHARE_BASE_URL";
pub const CAPTION_VAR: &str = "TIMESHARE_CAPTION";
pub const LOG_FORMAT_VAR: &str = "TIMESHARE_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagesConfig {
    /// Outgoing message URLs are this URL with the poll as query.
    pub base_url: Url,
    /// Caption shown under the message summary.
    pub caption: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

impl MessagesConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unusable values warn and
    /// keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(BASE_URL_VAR) {
            match Url::parse(&raw) {
                Ok(url) => config.base_url = url,
                Err(err) => tracing::warn!(
                    value = %raw,
                    error = %err,
                    "{BASE_URL_VAR} is not a valid URL; using {DEFAULT_BASE_URL}"
                ),
            }
        }

        if let Some(caption) = lookup(CAPTION_VAR) {
            if caption.trim().is_empty() {
                tracing::warn!("{CAPTION_VAR} is empty; using default caption");
            } else {
                config.caption = caption;
            }
        }

        config
    }
}

/// Log format requested through `TIMESHARE_LOG_FORMAT` (pretty by default).
///
/// Read separately from [`MessagesConfig`] because it is needed before the
/// subscriber that would report config warnings exists.
pub fn log_format_from_env() -> LogFormat {
    std::env::var(LOG_FORMAT_VAR)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = MessagesConfig::from_lookup(lookup(&[]));
        assert_eq!(config, MessagesConfig::default());
        assert_eq!(config.base_url.as_str(), "timeshare://vote");
        assert_eq!(config.caption, "I voted");
    }

    #[test]
    fn variables_override_defaults() {
        let config = MessagesConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://polls.example.com/p"),
            (CAPTION_VAR, "Picked my dates"),
        ]));
        assert_eq!(config.base_url.as_str(), "https://polls.example.com/p");
        assert_eq!(config.caption, "Picked my dates");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = MessagesConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "not a url"),
            (CAPTION_VAR, "   "),
        ]));
        assert_eq!(config, MessagesConfig::default());
    }
}
