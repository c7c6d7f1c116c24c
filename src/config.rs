//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::{DEFAULT_REQUEST_TIMEOUT, ProviderConfig};
use crate::locale::Locale;

/// Runtime behavior of the bot, independent of credentials.
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Bot name for identification in logs.
    pub name: String,
    /// Language of every user-facing message.
    pub locale: Locale,
    /// Sessions idle for this long are pruned.
    pub session_idle_timeout: Duration,
    /// How often the pruning task runs.
    pub prune_interval: Duration,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            name: "roadmap-bot".to_string(),
            locale: Locale::default(),
            session_idle_timeout: Duration::from_secs(3600), // 1 hour
            prune_interval: Duration::from_secs(600),        // 10 minutes
        }
    }
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: SecretString,
    /// Telegram usernames or numeric ids allowed to talk to the bot; `*` for everyone.
    pub allowed_users: Vec<String>,
    pub yandex: ProviderConfig,
    pub hyperbolic: ProviderConfig,
    /// Timeout for each provider request.
    pub request_timeout: Duration,
    /// Also read from stdin.
    pub cli_enabled: bool,
    pub settings: BotSettings,
}

impl BotConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let telegram_token = SecretString::from(required("TELEGRAM_API_TOKEN")?);
        let yandex = ProviderConfig::YandexGpt {
            api_key: SecretString::from(required("YANDEX_GPT_API_KEY")?),
            folder_id: required("YANDEX_FOLDER_ID")?,
            model: get("YANDEX_GPT_MODEL"),
            base_url: get("YANDEX_GPT_BASE_URL"),
        };
        let hyperbolic = ProviderConfig::Hyperbolic {
            api_key: SecretString::from(required("HYPERBOLIC_API_KEY")?),
            model: get("HYPERBOLIC_MODEL"),
            base_url: get("HYPERBOLIC_BASE_URL"),
        };

        let allowed_users: Vec<String> = get("TELEGRAM_ALLOWED_USERS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let locale = match get("ROADMAP_LOCALE") {
            Some(tag) => Locale::parse(&tag).ok_or_else(|| ConfigError::InvalidValue {
                key: "ROADMAP_LOCALE".to_string(),
                message: format!("unsupported locale '{tag}' (expected en or ru)"),
            })?,
            None => Locale::default(),
        };

        let request_timeout = match get("ROADMAP_REQUEST_TIMEOUT_SECS") {
            Some(v) => parse_secs("ROADMAP_REQUEST_TIMEOUT_SECS", &v)?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let mut settings = BotSettings {
            locale,
            ..BotSettings::default()
        };
        if let Some(v) = get("ROADMAP_SESSION_IDLE_SECS") {
            settings.session_idle_timeout = parse_secs("ROADMAP_SESSION_IDLE_SECS", &v)?;
        }

        let cli_enabled = get("ROADMAP_CLI")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Ok(Self {
            telegram_token,
            allowed_users,
            yandex,
            hyperbolic,
            request_timeout,
            cli_enabled,
            settings,
        })
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a positive number of seconds, got '{value}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("TELEGRAM_API_TOKEN", "123:ABC"),
            ("YANDEX_GPT_API_KEY", "ya-key"),
            ("YANDEX_FOLDER_ID", "b1g-folder"),
            ("HYPERBOLIC_API_KEY", "hb-key"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<BotConfig, ConfigError> {
        BotConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_with_required_vars() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.telegram_token.expose_secret(), "123:ABC");
        assert_eq!(config.allowed_users, vec!["*"]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.settings.locale, Locale::En);
        assert_eq!(config.settings.session_idle_timeout, Duration::from_secs(3600));
        assert!(!config.cli_enabled);
        match config.yandex {
            ProviderConfig::YandexGpt { folder_id, model, .. } => {
                assert_eq!(folder_id, "b1g-folder");
                assert!(model.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn each_required_var_is_reported() {
        for key in [
            "TELEGRAM_API_TOKEN",
            "YANDEX_GPT_API_KEY",
            "YANDEX_FOLDER_ID",
            "HYPERBOLIC_API_KEY",
        ] {
            let mut env = base_env();
            env.remove(key);
            match load(&env) {
                Err(ConfigError::MissingEnvVar(name)) => assert_eq!(name, key),
                other => panic!("expected MissingEnvVar({key}), got {other:?}"),
            }
        }
    }

    #[test]
    fn blank_required_var_counts_as_missing() {
        let mut env = base_env();
        env.insert("HYPERBOLIC_API_KEY", "   ");
        assert!(matches!(load(&env), Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn optional_overrides() {
        let mut env = base_env();
        env.insert("TELEGRAM_ALLOWED_USERS", "alice, 12345 ,");
        env.insert("ROADMAP_LOCALE", "ru");
        env.insert("ROADMAP_REQUEST_TIMEOUT_SECS", "10");
        env.insert("ROADMAP_SESSION_IDLE_SECS", "120");
        env.insert("ROADMAP_CLI", "true");
        env.insert("HYPERBOLIC_BASE_URL", "http://localhost:9000");

        let config = load(&env).unwrap();
        assert_eq!(config.allowed_users, vec!["alice", "12345"]);
        assert_eq!(config.settings.locale, Locale::Ru);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.settings.session_idle_timeout, Duration::from_secs(120));
        assert!(config.cli_enabled);
        match config.hyperbolic {
            ProviderConfig::Hyperbolic { base_url, .. } => {
                assert_eq!(base_url.as_deref(), Some("http://localhost:9000"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_values_rejected() {
        let mut env = base_env();
        env.insert("ROADMAP_REQUEST_TIMEOUT_SECS", "soon");
        assert!(matches!(load(&env), Err(ConfigError::InvalidValue { .. })));

        let mut env = base_env();
        env.insert("ROADMAP_REQUEST_TIMEOUT_SECS", "0");
        assert!(matches!(load(&env), Err(ConfigError::InvalidValue { .. })));

        let mut env = base_env();
        env.insert("ROADMAP_LOCALE", "fr");
        assert!(matches!(load(&env), Err(ConfigError::InvalidValue { key, .. }) if key == "ROADMAP_LOCALE"));
    }
}
