//! Main configuration types.
//!
//! This module provides the top-level [`PeriplusConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, OpenApiRegistryConfig};

/// Complete Periplus configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use periplus_config::PeriplusConfig;
///
/// let config = PeriplusConfig::default();
/// assert_eq!(config.docs.path, "/api/docs");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PeriplusConfig {
    /// Documentation registry configuration.
    #[serde(default)]
    pub docs: OpenApiRegistryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PeriplusConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> PeriplusConfigBuilder {
        PeriplusConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `docs.path` does not start with `/`
    /// - `docs.swagger_json_path` is set but does not start with `/`
    /// - `logging.level` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.docs.path.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "docs.path",
                format!("must start with '/': {}", self.docs.path),
            ));
        }

        if let Some(json_path) = &self.docs.swagger_json_path {
            if !json_path.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    "docs.swagger_json_path",
                    format!("must start with '/': {json_path}"),
                ));
            }
        }

        if self.logging.enabled && self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "logging.level",
                "must not be empty when logging is enabled",
            ));
        }

        Ok(())
    }

    /// Development preset: pretty debug logs, raw JSON document exposed.
    ///
    /// # Example
    ///
    /// ```
    /// use periplus_config::PeriplusConfig;
    ///
    /// let config = PeriplusConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;

        config.docs.swagger_json_path = Some("/json".to_string());
        config.docs.swagger_ui.explorer = true;

        config
    }

    /// Production preset: JSON logs at info level.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;

        config
    }
}

/// Builder for [`PeriplusConfig`].
#[derive(Debug, Default)]
pub struct PeriplusConfigBuilder {
    docs: Option<OpenApiRegistryConfig>,
    logging: Option<LoggingConfig>,
}

impl PeriplusConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the documentation configuration.
    #[must_use]
    pub fn docs(mut self, docs: OpenApiRegistryConfig) -> Self {
        self.docs = Some(docs);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration. Unset sections use their defaults.
    #[must_use]
    pub fn build(self) -> PeriplusConfig {
        PeriplusConfig {
            docs: self.docs.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<PeriplusConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PeriplusConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.docs.enabled);
        assert!(config.logging.enabled);
    }

    #[test]
    fn test_builder_sections() {
        let config = PeriplusConfig::builder()
            .docs(OpenApiRegistryConfig::default().with_path("/reference"))
            .build();
        assert_eq!(config.docs.path, "/reference");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_validate_relative_docs_path() {
        let config = PeriplusConfig::builder()
            .docs(OpenApiRegistryConfig::default().with_path("docs"))
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.path"));
    }

    #[test]
    fn test_validate_relative_json_path() {
        let result = PeriplusConfig::builder()
            .docs(OpenApiRegistryConfig::default().with_swagger_json_path("json"))
            .build_validated();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_empty_log_level() {
        let mut config = PeriplusConfig::default();
        config.logging.level = "  ".to_string();
        assert!(config.validate().is_err());

        config.logging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = PeriplusConfig::development();
        assert_eq!(dev.logging.format, LogFormat::Pretty);
        assert_eq!(dev.docs.swagger_json_path.as_deref(), Some("/json"));
        assert!(dev.validate().is_ok());

        let prod = PeriplusConfig::production();
        assert_eq!(prod.logging.format, LogFormat::Json);
        assert!(prod.docs.swagger_json_path.is_none());
    }

    #[test]
    fn test_toml_round_trip_sections() {
        let config: PeriplusConfig = toml::from_str(
            r#"
            [docs]
            title = "Billing API"
            path = "/billing/docs"

            [logging]
            level = "warn"
            format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.docs.title.as_deref(), Some("Billing API"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(toml::to_string(&config).unwrap().contains("[docs]"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<PeriplusConfig, _> = toml::from_str("[server]\nport = 1\n");
        assert!(result.is_err());
    }
}
