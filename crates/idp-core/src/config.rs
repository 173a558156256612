//! File-based configuration for the identity platform.
//!
//! The configuration is a process-wide, read-only snapshot built at
//! startup. Authenticator parameter maps mirror the static
//! `application-authentication` configuration file of the platform.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static GLOBAL: OnceLock<IdentityConfig> = OnceLock::new();

/// Process-wide identity platform configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Authenticator parameter maps, keyed by authenticator name.
    #[serde(default)]
    authenticators: HashMap<String, HashMap<String, String>>,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL for the server.
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:9443".to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolves a relative path to an absolute URL on this server.
    #[must_use]
    pub fn server_url(&self, relative: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            relative.trim_start_matches('/')
        )
    }
}

impl IdentityConfig {
    /// Creates an empty configuration with default server settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter map for an authenticator.
    #[must_use]
    pub fn with_authenticator(
        mut self,
        name: impl Into<String>,
        params: HashMap<String, String>,
    ) -> Self {
        self.authenticators.insert(name.into(), params);
        self
    }

    /// Sets the server base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.server.base_url = base_url.into();
        self
    }

    /// Returns the parameter map for an authenticator, if configured.
    ///
    /// The map is a snapshot returned by reference; it is never mutated
    /// after initialization.
    #[must_use]
    pub fn authenticator_params(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.authenticators.get(name)
    }

    /// Installs this configuration as the process-wide snapshot.
    ///
    /// ## Errors
    ///
    /// Returns `Error::AlreadyInitialized` if a snapshot was installed
    /// before.
    pub fn init(self) -> Result<()> {
        GLOBAL.set(self).map_err(|_| Error::AlreadyInitialized)
    }

    /// Returns the process-wide snapshot.
    ///
    /// ## Errors
    ///
    /// Returns `Error::NotInitialized` if `init` has not run.
    pub fn global() -> Result<&'static Self> {
        GLOBAL.get().ok_or(Error::NotInitialized)
    }
}
