//! Configuration sections.

use serde::{Deserialize, Serialize};
use sieve_core::{ParamSpec, Schema, SchemaBuilder};
use sieve_telemetry::LogConfig;

use crate::ConfigError;

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines.
    #[default]
    Json,
    /// Human-readable text.
    Pretty,
}

/// The `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable logging.
    pub enabled: bool,

    /// Filter directive (trace, debug, info, warn, error or a directive list).
    pub level: String,

    /// Output format.
    pub format: LogFormat,

    /// Include source file and line in log output.
    pub include_location: bool,

    /// Service name attached to log output.
    pub service_name: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: LogFormat::default(),
            include_location: false,
            service_name: sieve_telemetry::DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl LoggingSection {
    /// Converts the section into a subscriber configuration.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let base = match self.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            file_line_info: self.include_location,
            service_name: self.service_name.clone(),
            ..base
        }
    }
}

/// One `[[routes]]` entry: a route and the parameters it accepts.
///
/// Validators cannot be written in a file. Use [`RouteConfig::builder`] to
/// add parameters carrying validators before compiling.
///
/// ```toml
/// [[routes]]
/// route = "/api/find"
/// purpose = "find records"
/// help = true
///
/// [[routes.params]]
/// name = "q"
/// required = true
///
/// [[routes.params]]
/// name = "limit"
/// type = "int"
/// default = 20
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Route prefix, e.g. `/api/find`.
    pub route: String,

    /// What the route is for.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purpose: String,

    /// Add the implicit `help` flag.
    #[serde(default)]
    pub help: bool,

    /// Declared parameters.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl RouteConfig {
    /// Creates an empty route declaration.
    #[must_use]
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Self::default()
        }
    }

    /// Returns a schema builder seeded with this declaration.
    #[must_use]
    pub fn builder(&self) -> SchemaBuilder {
        let mut builder = Schema::builder(self.route.as_str()).params(self.params.iter().cloned());
        if !self.purpose.is_empty() {
            builder = builder.purpose(self.purpose.as_str());
        }
        if self.help {
            builder = builder.with_help();
        }
        builder
    }

    /// Compiles the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Schema`] if the declaration is invalid.
    pub fn compile(&self) -> Result<Schema, ConfigError> {
        self.builder()
            .compile()
            .map_err(|e| ConfigError::schema(self.route.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_core::ParamType;

    #[test]
    fn test_logging_defaults() {
        let section = LoggingSection::default();
        assert!(section.enabled);
        assert_eq!(section.level, "info");
        assert_eq!(section.format, LogFormat::Json);
    }

    #[test]
    fn test_to_log_config() {
        let section = LoggingSection {
            level: "sieve_core=debug".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            ..LoggingSection::default()
        };
        let config = section.to_log_config();
        assert!(!config.json_format);
        assert!(config.file_line_info);
        assert_eq!(config.level, "sieve_core=debug");
        assert_eq!(config.service_name, "sieve");
    }

    #[test]
    fn test_log_format_deserialize() {
        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
        assert!(serde_json::from_str::<LogFormat>(r#""xml""#).is_err());
    }

    #[test]
    fn test_route_compile() {
        let route: RouteConfig = serde_json::from_str(
            r#"{
                "route": "/find",
                "purpose": "find things",
                "help": true,
                "params": [
                    {"name": "q", "required": true},
                    {"name": "limit", "type": "int", "default": 20}
                ]
            }"#,
        )
        .unwrap();

        let schema = route.compile().unwrap();
        assert_eq!(schema.purpose(), "find things");
        assert!(schema.has_help());
        assert_eq!(schema.param("limit").unwrap().param_type(), ParamType::Int);
    }

    #[test]
    fn test_route_compile_error_names_route() {
        let mut route = RouteConfig::new("/broken");
        route.params = vec![ParamSpec::new("a"), ParamSpec::new("a")];
        let err = route.compile().unwrap_err();
        assert!(matches!(err, ConfigError::Schema { ref route, .. } if route == "/broken"));
    }
}
