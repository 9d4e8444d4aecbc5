use std::{env, path::PathBuf};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "data/workouts.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite { path: PathBuf },
    Memory { seed: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub store: StoreBackend,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("WORKOUT_STORE must be 'sqlite' or 'memory', got '{0}'")]
    UnknownStore(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let backend = lookup("WORKOUT_STORE").unwrap_or_else(|| "sqlite".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "sqlite" => StoreBackend::Sqlite {
                path: lookup("WORKOUT_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            },
            "memory" => StoreBackend::Memory {
                seed: lookup("WORKOUT_SEED_DEMO")
                    .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
                    .unwrap_or(true),
            },
            _ => return Err(ConfigError::UnknownStore(backend)),
        };

        Ok(Self { port, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_sqlite_on_8080() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.store,
            StoreBackend::Sqlite {
                path: PathBuf::from("data/workouts.db")
            }
        );
    }

    #[test]
    fn memory_backend_with_seed_toggle() {
        let config = config(&[("WORKOUT_STORE", "memory"), ("WORKOUT_SEED_DEMO", "false"), ("PORT", "3000")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.store, StoreBackend::Memory { seed: false });
    }

    #[test]
    fn rejects_unknown_backend() {
        assert_eq!(
            config(&[("WORKOUT_STORE", "postgres")]).unwrap_err(),
            ConfigError::UnknownStore("postgres".into())
        );
    }
}
