use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use client_core::{FormConfig, TermsPolicy};
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "originhash.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub require_terms: bool,
    pub redirect_delay_ms: u64,
    pub notification_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".into(),
            require_terms: false,
            redirect_delay_ms: 1500,
            notification_ms: 5000,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid api base url '{}'", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("api base url must be http or https, got '{}'", url.scheme());
        }
        Ok(())
    }

    pub fn form_config(&self) -> FormConfig {
        FormConfig {
            terms: if self.require_terms {
                TermsPolicy::Required
            } else {
                TermsPolicy::Optional
            },
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            notification_duration: Duration::from_millis(self.notification_ms),
            ..FormConfig::default()
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the optional toml file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<Settings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => tracing::warn!(
                path = %path.display(),
                error = %err,
                "ignoring unreadable settings file"
            ),
        }
    }

    apply_env_overrides(&mut settings, env);
    settings
}

pub fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("ORIGINHASH_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__REQUIRE_TERMS") {
        match parse_flag(&v) {
            Some(flag) => settings.require_terms = flag,
            None => tracing::warn!(value = %v, "APP__REQUIRE_TERMS is not a boolean; ignoring"),
        }
    }

    if let Some(v) = env("APP__REDIRECT_DELAY_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.redirect_delay_ms = parsed;
        }
    }

    if let Some(v) = env("APP__NOTIFICATION_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.notification_ms = parsed;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
