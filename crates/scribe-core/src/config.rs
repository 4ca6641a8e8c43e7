//! # Config Module
//!
//! Explicit store configuration.
//!
//! The classic declarative per-environment database file becomes plain data
//! here: a [`StoreProfiles`] map from [`Environment`] to [`Backend`], and a
//! [`StoreConfig`] that opens the selected backend. Nothing is looked up
//! implicitly; the only environment read is the opt-in
//! [`Environment::from_env`].

use crate::memory::MemoryStore;
use crate::storage::RedbStore;
use crate::store::{PostStore, StoreError};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable consulted by [`Environment::from_env`].
pub const ENV_VAR: &str = "SCRIBE_ENV";

/// Errors produced while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment name is not one of the recognized values.
    #[error("unknown environment {0:?}, expected development, test, or production")]
    UnknownEnvironment(String),

    /// No backend profile is registered for the environment.
    #[error("no store profile configured for environment {0}")]
    MissingProfile(Environment),
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// The recognized runtime environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Read the environment from `SCRIBE_ENV`, defaulting to development.
    ///
    /// An unset variable is the default; a set but unrecognized value is an
    /// error rather than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENV_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::Development),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// BACKEND AND CONFIG
// =============================================================================

/// Connection parameters for a store backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// In-memory store; contents are lost when the value is dropped.
    Memory,

    /// redb database at the given path.
    Redb {
        /// Path of the database file; created if missing.
        path: PathBuf,
    },
}

/// A resolved store configuration: one environment, one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Environment this configuration was resolved for.
    pub environment: Environment,

    /// Backend to open.
    pub backend: Backend,
}

impl StoreConfig {
    /// Pair an environment with a backend.
    #[must_use]
    pub fn new(environment: Environment, backend: Backend) -> Self {
        Self {
            environment,
            backend,
        }
    }

    /// Open the configured backend as a boxed store.
    pub fn open(&self) -> Result<Box<dyn PostStore>, StoreError> {
        match &self.backend {
            Backend::Memory => Ok(Box::new(MemoryStore::new())),
            Backend::Redb { path } => Ok(Box::new(RedbStore::open(path)?)),
        }
    }
}

/// Explicit map of environment to backend.
///
/// Built in code at startup, then selected from; there is no file parsing
/// and no global registry.
#[derive(Debug, Clone, Default)]
pub struct StoreProfiles {
    profiles: BTreeMap<Environment, Backend>,
}

impl StoreProfiles {
    /// An empty profile map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the backend for an environment.
    #[must_use]
    pub fn with(mut self, environment: Environment, backend: Backend) -> Self {
        self.profiles.insert(environment, backend);
        self
    }

    /// Resolve the configuration for an environment.
    pub fn select(&self, environment: Environment) -> Result<StoreConfig, ConfigError> {
        let backend = self
            .profiles
            .get(&environment)
            .ok_or(ConfigError::MissingProfile(environment))?;
        Ok(StoreConfig::new(environment, backend.clone()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostDraft;

    #[test]
    fn environment_parses_recognized_names() {
        assert_eq!("development".parse::<Environment>().ok(), Some(Environment::Development));
        assert_eq!("test".parse::<Environment>().ok(), Some(Environment::Test));
        assert_eq!("production".parse::<Environment>().ok(), Some(Environment::Production));
    }

    #[test]
    fn environment_rejects_unknown_names() {
        let err = "staging".parse::<Environment>().expect_err("should fail");
        assert!(matches!(err, ConfigError::UnknownEnvironment(name) if name == "staging"));
    }

    #[test]
    fn profiles_select_resolves_registered_backend() {
        let profiles = StoreProfiles::new()
            .with(Environment::Test, Backend::Memory)
            .with(
                Environment::Production,
                Backend::Redb {
                    path: PathBuf::from("/var/lib/scribe/posts.redb"),
                },
            );

        let config = profiles.select(Environment::Test).expect("select");
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.environment, Environment::Test);
    }

    #[test]
    fn profiles_select_missing_environment_fails() {
        let profiles = StoreProfiles::new().with(Environment::Test, Backend::Memory);

        let err = profiles
            .select(Environment::Production)
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::MissingProfile(Environment::Production)));
    }

    #[test]
    fn memory_config_opens_usable_store() {
        let config = StoreConfig::new(Environment::Test, Backend::Memory);
        let mut store = config.open().expect("open");

        let post = store
            .create(PostDraft::new("My title", "The post description"))
            .expect("create");
        assert_eq!(post.summary(), "My title - The post description");
        assert_eq!(store.last().expect("last"), Some(post));
    }

    #[test]
    fn redb_config_opens_store_at_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("posts.redb");

        let config = StoreConfig::new(
            Environment::Development,
            Backend::Redb { path: path.clone() },
        );
        let mut store = config.open().expect("open");
        store.create(PostDraft::new("t", "d")).expect("create");

        assert!(path.exists());
    }
}
