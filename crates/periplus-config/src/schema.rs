//! Configuration schema types.
//!
//! This module defines the structure of every configuration section. Field
//! names are snake_case; the camelCase spellings used by JSON tooling
//! (`swaggerUi`, `swaggerJsonPath`, ...) are accepted as aliases.

use serde::{Deserialize, Serialize};

/// Contact information published in the document's `info` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContactConfig {
    /// Contact name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
}

/// License information published in the document's `info` block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
    /// License name (e.g. "Apache-2.0").
    pub name: String,
    /// License URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// One server entry of the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerEntry {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Options handed to the interactive documentation UI.
///
/// `swagger_options` is passed to the UI bundle verbatim, so any option the
/// bundle understands can be set without Periplus knowing about it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SwaggerUiOptions {
    /// Extra CSS injected into the page.
    #[serde(default, alias = "customCss")]
    pub custom_css: Option<String>,
    /// Page title. Defaults to the document title.
    #[serde(default, alias = "customSiteTitle")]
    pub custom_site_title: Option<String>,
    /// Show the document URL explorer bar.
    #[serde(default)]
    pub explorer: bool,
    /// Raw options merged into the UI bundle's configuration object.
    #[serde(default, alias = "swaggerOptions")]
    pub swagger_options: serde_json::Map<String, serde_json::Value>,
}

/// Documentation registry configuration.
///
/// # Example
///
/// ```
/// use periplus_config::OpenApiRegistryConfig;
///
/// let config: OpenApiRegistryConfig = serde_json::from_str(
///     r#"{ "title": "Pets", "swaggerJsonPath": "/openapi.json" }"#,
/// ).unwrap();
///
/// assert!(config.enabled);
/// assert_eq!(config.path, "/api/docs");
/// assert_eq!(config.swagger_json_path.as_deref(), Some("/openapi.json"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OpenApiRegistryConfig {
    /// Generate and mount documentation at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Mount path of the documentation UI.
    #[serde(default = "default_docs_path")]
    pub path: String,

    /// API version for `info.version`.
    #[serde(default)]
    pub version: Option<String>,

    /// API title for `info.title`.
    #[serde(default)]
    pub title: Option<String>,

    /// API description for `info.description`.
    #[serde(default)]
    pub description: Option<String>,

    /// Contact information.
    #[serde(default)]
    pub contact: Option<ContactConfig>,

    /// License information.
    #[serde(default)]
    pub license: Option<LicenseConfig>,

    /// Servers. `None` means a single localhost development server.
    #[serde(default)]
    pub servers: Option<Vec<ServerEntry>>,

    /// Interactive UI options.
    #[serde(default, alias = "swaggerUi")]
    pub swagger_ui: SwaggerUiOptions,

    /// Sub-path (relative to `path`) serving the raw JSON document.
    #[serde(default, alias = "swaggerJsonPath")]
    pub swagger_json_path: Option<String>,
}

impl Default for OpenApiRegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_docs_path(),
            version: None,
            title: None,
            description: None,
            contact: None,
            license: None,
            servers: None,
            swagger_ui: SwaggerUiOptions::default(),
            swagger_json_path: None,
        }
    }
}

impl OpenApiRegistryConfig {
    /// Configuration with documentation switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the API title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the API description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the mount path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Serves the raw JSON document at `path` below the mount path.
    #[must_use]
    pub fn with_swagger_json_path(mut self, path: impl Into<String>) -> Self {
        self.swagger_json_path = Some(path.into());
        self
    }

    /// Adds a server entry.
    #[must_use]
    pub fn with_server(mut self, url: impl Into<String>, description: Option<&str>) -> Self {
        self.servers.get_or_insert_with(Vec::new).push(ServerEntry {
            url: url.into(),
            description: description.map(str::to_string),
        });
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_docs_path() -> String {
    "/api/docs".to_string()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Converts to the telemetry crate's logging configuration.
    #[must_use]
    pub fn to_log_config(&self) -> periplus_telemetry::LogConfig {
        let base = match self.format {
            LogFormat::Json => periplus_telemetry::LogConfig::production(),
            LogFormat::Pretty => periplus_telemetry::LogConfig::development(),
        };
        periplus_telemetry::LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            ..base
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_defaults() {
        let config = OpenApiRegistryConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/api/docs");
        assert!(config.title.is_none());
        assert!(config.servers.is_none());
        assert!(config.swagger_json_path.is_none());
    }

    #[test]
    fn test_registry_camel_case_aliases() {
        let config: OpenApiRegistryConfig = serde_json::from_value(serde_json::json!({
            "swaggerJsonPath": "/json",
            "swaggerUi": {
                "customSiteTitle": "Docs",
                "explorer": true,
                "swaggerOptions": { "docExpansion": "none" }
            }
        }))
        .unwrap();

        assert_eq!(config.swagger_json_path.as_deref(), Some("/json"));
        assert_eq!(config.swagger_ui.custom_site_title.as_deref(), Some("Docs"));
        assert!(config.swagger_ui.explorer);
        assert_eq!(
            config.swagger_ui.swagger_options["docExpansion"],
            serde_json::json!("none")
        );
    }

    #[test]
    fn test_registry_unknown_field_rejected() {
        let result: Result<OpenApiRegistryConfig, _> =
            serde_json::from_value(serde_json::json!({ "mountPath": "/docs" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_from_toml() {
        let config: OpenApiRegistryConfig = toml::from_str(
            r#"
            title = "Inventory"
            version = "2.1.0"

            [contact]
            name = "Platform Team"
            email = "platform@example.com"

            [license]
            name = "MIT"

            [[servers]]
            url = "https://api.example.com"
            description = "Production"

            [swagger_ui.swagger_options]
            deepLinking = true
            "#,
        )
        .unwrap();

        assert_eq!(config.title.as_deref(), Some("Inventory"));
        assert_eq!(config.license.as_ref().map(|l| l.name.as_str()), Some("MIT"));
        assert_eq!(config.servers.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            config.swagger_ui.swagger_options["deepLinking"],
            serde_json::json!(true)
        );
    }

    #[test]
    fn test_registry_builder_methods() {
        let config = OpenApiRegistryConfig::default()
            .with_title("Pets")
            .with_path("/docs")
            .with_swagger_json_path("/spec.json")
            .with_server("http://localhost:8080", Some("local"));

        assert_eq!(config.path, "/docs");
        assert_eq!(config.swagger_json_path.as_deref(), Some("/spec.json"));
        assert_eq!(
            config.servers.unwrap()[0].description.as_deref(),
            Some("local")
        );
        assert!(!OpenApiRegistryConfig::disabled().enabled);
    }

    #[test]
    fn test_logging_to_log_config() {
        let pretty = LoggingConfig {
            enabled: true,
            level: "debug".to_string(),
            format: LogFormat::Pretty,
        };
        let log = pretty.to_log_config();
        assert!(!log.json_format);
        assert_eq!(log.level, "debug");

        let json = LoggingConfig::default().to_log_config();
        assert!(json.json_format);
        assert_eq!(json.level, "info");
    }
}
