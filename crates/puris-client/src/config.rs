//! Backend connection settings
//!
//! Settings come from a TOML file with two tables, `[backend]` and
//! `[forms]`; every key is optional. The base URL and API key can be
//! overridden from the environment.

use crate::error::ClientError;
use puris_forms::FormsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`ClientConfig::base_url`]
pub const ENV_BASE_URL: &str = "PURIS_BACKEND_BASE_URL";

/// Environment variable overriding [`ClientConfig::api_key`]
pub const ENV_API_KEY: &str = "PURIS_BACKEND_API_KEY";

/// Backend paths, relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub delivery: String,
    pub production: String,
    pub production_range: String,
    pub demand_capacity_notification: String,
    pub partners: String,
    pub materials: String,
    pub product_stocks: String,
    pub material_stocks: String,
    pub update_reported_product_stocks: String,
    pub update_reported_material_stocks: String,
    pub customers: String,
    pub suppliers: String,
    pub edc_catalog: String,
    pub edc_negotiations: String,
    pub edc_transfers: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            delivery: "delivery".into(),
            production: "production".into(),
            production_range: "production/range".into(),
            demand_capacity_notification: "demand-and-capacity-notification".into(),
            partners: "partners".into(),
            materials: "materials".into(),
            product_stocks: "stockView/product-stocks".into(),
            material_stocks: "stockView/material-stocks".into(),
            update_reported_product_stocks: "stockView/update-reported-product-stocks".into(),
            update_reported_material_stocks: "stockView/update-reported-material-stocks".into(),
            customers: "stockView/customer".into(),
            suppliers: "stockView/supplier".into(),
            edc_catalog: "edc/catalog".into(),
            edc_negotiations: "edc/contractnegotiations".into(),
            edc_transfers: "edc/transfers".into(),
        }
    }
}

/// Connection to one PURIS backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint is resolved against
    pub base_url: String,
    /// Value of the `X-API-KEY` header
    pub api_key: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081/catena/".into(),
            api_key: String::new(),
            timeout_ms: 10_000,
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    /// Config for `base_url` authenticated with `api_key`
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With endpoint table
    #[inline]
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Absolute URL of `endpoint`
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Apply overrides found through `lookup`
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            tracing::debug!(base_url = %url, "base url overridden from environment");
            self.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.api_key = key;
        }
        self
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }
}

/// Full settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: ClientConfig,
    pub forms: FormsConfig,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ClientError> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from `path`, then apply environment overrides
    ///
    /// Without a path, defaults plus environment overrides are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ClientError> {
        let mut settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ClientError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                })?;
                let settings = Self::from_toml_str(&text)?;
                tracing::info!(path = %path.display(), "settings loaded");
                settings
            }
            None => Self::default(),
        };
        settings.backend = settings.backend.with_env_overrides();
        Ok(settings)
    }
}
