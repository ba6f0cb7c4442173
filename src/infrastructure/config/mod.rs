use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::security::keyring::{KeyringManager, SecretStore};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "grade-tracker.toml";
pub const ENV_PREFIX: &str = "GRADE_TRACKER_";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
const KEYRING_SERVICE: &str = "grade-tracker";
const KEYRING_ENTRY: &str = "gemini";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub log_filter: String,
    pub gemini: LLMConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            gemini: LLMConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the TOML file (missing file is fine), then `GRADE_TRACKER_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if path.is_some() && !file.exists() {
            return Err(AppError::ConfigError(format!(
                "Config file not found: {}",
                file.display()
            )));
        }

        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(AppError::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Explicit,
    ConfigFile,
    Keyring,
    Environment,
}

impl fmt::Display for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApiKeySource::Explicit => "command line",
            ApiKeySource::ConfigFile => "config file",
            ApiKeySource::Keyring => "keyring",
            ApiKeySource::Environment => API_KEY_ENV,
        };
        f.write_str(label)
    }
}

/// Picks the first non-blank candidate, trimmed.
pub fn first_api_key(
    candidates: impl IntoIterator<Item = (ApiKeySource, Option<String>)>,
) -> Option<(ApiKeySource, String)> {
    candidates.into_iter().find_map(|(source, value)| {
        let key = value?.trim().to_string();
        (!key.is_empty()).then_some((source, key))
    })
}

pub struct ConfigService {
    store: Box<dyn SecretStore + Send + Sync>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::with_store(Box::new(KeyringManager::new(KEYRING_SERVICE)))
    }

    pub fn with_store(store: Box<dyn SecretStore + Send + Sync>) -> Self {
        Self { store }
    }

    pub fn save_api_key(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::ValidationError(
                "API key must not be blank.".to_string(),
            ));
        }
        self.store.set_secret(KEYRING_ENTRY, key)
    }

    pub fn get_api_key(&self) -> Result<Option<String>> {
        self.store.get_secret(KEYRING_ENTRY)
    }

    pub fn delete_api_key(&self) -> Result<()> {
        self.store.delete_secret(KEYRING_ENTRY)
    }

    /// Explicit value, config file, keyring, then the `GEMINI_API_KEY` env var.
    pub fn resolve_api_key(
        &self,
        explicit: Option<&str>,
        config: &LLMConfig,
    ) -> Option<(ApiKeySource, String)> {
        let stored = self.get_api_key().unwrap_or_else(|err| {
            warn!(error = %err, "Could not read API key from keyring");
            None
        });

        first_api_key([
            (ApiKeySource::Explicit, explicit.map(str::to_string)),
            (ApiKeySource::ConfigFile, config.api_key.clone()),
            (ApiKeySource::Keyring, stored),
            (ApiKeySource::Environment, std::env::var(API_KEY_ENV).ok()),
        ])
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        secrets: Mutex<HashMap<String, String>>,
    }

    impl SecretStore for MemoryStore {
        fn set_secret(&self, key: &str, secret: &str) -> Result<()> {
            self.secrets
                .lock()
                .unwrap()
                .insert(key.to_string(), secret.to_string());
            Ok(())
        }

        fn get_secret(&self, key: &str) -> Result<Option<String>> {
            Ok(self.secrets.lock().unwrap().get(key).cloned())
        }

        fn delete_secret(&self, key: &str) -> Result<()> {
            self.secrets.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn service() -> ConfigService {
        ConfigService::with_store(Box::new(MemoryStore::default()))
    }

    #[test]
    fn test_load_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load(None).unwrap();
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.gemini.request_timeout_secs, 60);
            assert_eq!(config.gemini.connect_timeout_secs, 20);
            Ok(())
        });
    }

    #[test]
    fn test_load_merges_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                log_filter = "debug"

                [gemini]
                model = "gemini-from-file"
                request_timeout_secs = 30
                "#,
            )?;
            jail.set_env("GRADE_TRACKER_GEMINI__MODEL", "gemini-from-env");

            let config = AppConfig::load(None).unwrap();
            assert_eq!(config.log_filter, "debug");
            assert_eq!(config.gemini.model, "gemini-from-env");
            assert_eq!(config.gemini.request_timeout_secs, 30);
            assert_eq!(config.gemini.connect_timeout_secs, 20);
            Ok(())
        });
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        Jail::expect_with(|_jail| {
            let err = AppConfig::load(Some(Path::new("nope.toml"))).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }

    #[test]
    fn test_first_api_key_skips_blank_values() {
        let picked = first_api_key([
            (ApiKeySource::Explicit, Some("   ".to_string())),
            (ApiKeySource::ConfigFile, None),
            (ApiKeySource::Keyring, Some(" stored ".to_string())),
            (ApiKeySource::Environment, Some("env".to_string())),
        ]);
        assert_eq!(picked, Some((ApiKeySource::Keyring, "stored".to_string())));
        assert_eq!(first_api_key([(ApiKeySource::Explicit, None)]), None);
    }

    #[test]
    fn test_resolve_prefers_explicit_and_falls_back_to_env() {
        Jail::expect_with(|jail| {
            jail.set_env(API_KEY_ENV, "from-env");
            let service = service();
            let config = LLMConfig::default();

            assert_eq!(
                service.resolve_api_key(Some("from-cli"), &config),
                Some((ApiKeySource::Explicit, "from-cli".to_string()))
            );
            assert_eq!(
                service.resolve_api_key(None, &config),
                Some((ApiKeySource::Environment, "from-env".to_string()))
            );

            service.save_api_key("  from-keyring ").unwrap();
            assert_eq!(
                service.resolve_api_key(None, &config),
                Some((ApiKeySource::Keyring, "from-keyring".to_string()))
            );
            Ok(())
        });
    }

    #[test]
    fn test_resolve_without_any_source() {
        Jail::expect_with(|jail| {
            jail.set_env(API_KEY_ENV, "");
            assert_eq!(service().resolve_api_key(None, &LLMConfig::default()), None);
            Ok(())
        });
    }

    #[test]
    fn test_save_rejects_blank_key_and_delete_clears() {
        let service = service();
        assert!(matches!(
            service.save_api_key("  "),
            Err(AppError::ValidationError(_))
        ));

        service.save_api_key("abc").unwrap();
        assert_eq!(service.get_api_key().unwrap(), Some("abc".to_string()));
        service.delete_api_key().unwrap();
        assert_eq!(service.get_api_key().unwrap(), None);
    }
}
