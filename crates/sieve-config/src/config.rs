//! Top-level configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sieve_core::Schema;
use sieve_extract::{canonical_route, ExtractConfig};

use crate::{ConfigError, LogFormat, LoggingSection, RouteConfig};

/// Complete Sieve configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and the
/// environment.
///
/// # Example
///
/// ```
/// use sieve_config::SieveConfig;
///
/// let config = SieveConfig::default();
/// assert_eq!(config.extract.max_body_size, 1024 * 1024);
/// assert!(config.routes.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SieveConfig {
    /// Body size and multipart limits.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Logging output.
    #[serde(default)]
    pub logging: LoggingSection,

    /// Declared routes.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl SieveConfig {
    /// Debug-level pretty logging with source locations.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;
        config
    }

    /// Info-level JSON logging.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config
    }

    /// Validates limits, logging and route declarations.
    ///
    /// Routes are checked for shape and uniqueness only; see
    /// [`compile_routes`](Self::compile_routes) for parameter checks.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("extract.max_body_size", self.extract.max_body_size),
            ("extract.max_multipart_size", self.extract.max_multipart_size),
            ("extract.max_multipart_fields", self.extract.max_multipart_fields),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::invalid_value(field, "must be greater than 0"));
            }
        }

        self.logging
            .to_log_config()
            .validate()
            .map_err(|e| ConfigError::invalid_value("logging", e.to_string()))?;

        let mut seen = HashSet::new();
        for route in &self.routes {
            if !route.route.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    "routes.route",
                    format!("{:?} must start with '/'", route.route),
                ));
            }
            if !seen.insert(canonical_route(&route.route)) {
                return Err(ConfigError::validation_error(format!(
                    "route {} declared more than once",
                    route.route
                )));
            }
        }

        Ok(())
    }

    /// Compiles every declared route.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Schema`] for the first route that fails.
    pub fn compile_routes(&self) -> Result<Vec<Schema>, ConfigError> {
        let schemas = self
            .routes
            .iter()
            .map(RouteConfig::compile)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(routes = schemas.len(), "compiled configured routes");
        Ok(schemas)
    }
}
