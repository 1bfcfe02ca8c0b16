use std::{fmt::Display, str::FromStr};

use tracing::{info, warn};
use worker::Env;

const DEFAULT_API_BASE: &str = "https://api.feedbackgrove.com";
const DEFAULT_BRAND_NAME: &str = "FeedbackGrove";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub public_origin: Option<String>,
    pub brand_name: String,
    pub strict_presentation: bool,
}

impl Config {
    pub fn load(env: &Env) -> Self {
        Self::from_lookup(|key| env.var(key).ok().map(|value| value.to_string()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = try_load(&lookup, "PROFILE_API_BASE", DEFAULT_API_BASE.to_string());
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            public_origin: var(&lookup, "PUBLIC_ORIGIN"),
            brand_name: try_load(&lookup, "BRAND_NAME", DEFAULT_BRAND_NAME.to_string()),
            strict_presentation: try_load(&lookup, "STRICT_PRESENTATION", false),
        }
    }

    /// Where the embedded feedback form posts.
    pub fn form_action(&self) -> String {
        format!("{}/feedback", self.api_base)
    }
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = var(lookup, key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.public_origin, None);
        assert_eq!(config.brand_name, "FeedbackGrove");
        assert!(!config.strict_presentation);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PROFILE_API_BASE", "https://profiles.test/v2/"),
            ("PUBLIC_ORIGIN", "https://fb.test"),
            ("BRAND_NAME", "Grove"),
            ("STRICT_PRESENTATION", "true"),
        ]);
        assert_eq!(config.api_base, "https://profiles.test/v2");
        assert_eq!(config.public_origin.as_deref(), Some("https://fb.test"));
        assert_eq!(config.brand_name, "Grove");
        assert!(config.strict_presentation);
        assert_eq!(config.form_action(), "https://profiles.test/v2/feedback");
    }

    #[test]
    fn bad_flag_falls_back_to_default() {
        let config = config(&[("STRICT_PRESENTATION", "yes please")]);
        assert!(!config.strict_presentation);
    }

    #[test]
    fn blank_origin_is_unset() {
        let config = config(&[("PUBLIC_ORIGIN", "   ")]);
        assert_eq!(config.public_origin, None);
    }
}
