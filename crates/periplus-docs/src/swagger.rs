//! Swagger UI page generation.
//!
//! [`SwaggerUi`] renders a complete HTML page that loads Swagger UI from a
//! CDN. The document is either embedded in the page or fetched from a URL,
//! usually the mount's raw-JSON sub-path.
//!
//! ## Usage
//!
//! ```
//! use periplus_config::SwaggerUiOptions;
//! use periplus_docs::{DocumentBuilder, SwaggerUi};
//!
//! let builder = DocumentBuilder::new();
//! let embedded = SwaggerUi::embedded(builder.document(), &SwaggerUiOptions::default()).unwrap();
//! assert!(embedded.html().contains("API Documentation - Swagger UI"));
//!
//! let linked = SwaggerUi::linked("/api/docs/json", builder.document(), &SwaggerUiOptions::default());
//! assert!(linked.html().contains(r#"url: "/api/docs/json""#));
//! ```

use bytes::Bytes;
use periplus_config::SwaggerUiOptions;
use serde_json::{Map, Value};

use crate::error::DocsResult;
use crate::openapi::OpenApi;

/// Swagger UI release loaded from the CDN.
pub const SWAGGER_UI_VERSION: &str = "5.18.2";

/// Where the page gets the document from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// Serialized document inlined into the page.
    Embedded(String),
    /// URL the page fetches the document from.
    Url(String),
}

/// Swagger UI page configuration and HTML generation.
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    source: SpecSource,
    title: String,
    explorer: bool,
    custom_css: Option<String>,
    options: Map<String, Value>,
    swagger_version: String,
}

impl SwaggerUi {
    /// A page with `spec` embedded at render time.
    ///
    /// Later changes to the document are not reflected in the page.
    pub fn embedded(spec: &OpenApi, options: &SwaggerUiOptions) -> DocsResult<Self> {
        let json = serde_json::to_string(spec)?;
        Ok(Self::with_source(SpecSource::Embedded(json), spec, options))
    }

    /// A page that fetches the document from `url`.
    #[must_use]
    pub fn linked(url: impl Into<String>, spec: &OpenApi, options: &SwaggerUiOptions) -> Self {
        Self::with_source(SpecSource::Url(url.into()), spec, options)
    }

    fn with_source(source: SpecSource, spec: &OpenApi, options: &SwaggerUiOptions) -> Self {
        let title = options
            .custom_site_title
            .clone()
            .unwrap_or_else(|| format!("{} - Swagger UI", spec.info.title));

        Self {
            source,
            title,
            explorer: options.explorer,
            custom_css: options.custom_css.clone(),
            options: options.swagger_options.clone(),
            swagger_version: SWAGGER_UI_VERSION.to_string(),
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the Swagger UI version to load.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
        self
    }

    /// Where the page reads the document from.
    #[must_use]
    pub fn source(&self) -> &SpecSource {
        &self.source
    }

    /// Generate the HTML page.
    #[must_use]
    pub fn html(&self) -> String {
        let source = match &self.source {
            SpecSource::Embedded(json) => format!("spec: {}", script_safe(json)),
            SpecSource::Url(url) => {
                format!("url: {}", script_safe(&Value::String(url.clone()).to_string()))
            }
        };
        let options = script_safe(&Value::Object(self.options.clone()).to_string());

        let mut styles = String::new();
        if !self.explorer {
            styles.push_str("        .swagger-ui .topbar {\n            display: none;\n        }\n");
        }
        if let Some(css) = &self.custom_css {
            styles.push_str(&css.replace("</", "<\\/"));
            styles.push('\n');
        }

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
    <style>
        html {{
            box-sizing: border-box;
            overflow-y: scroll;
        }}
        *,
        *:before,
        *:after {{
            box-sizing: inherit;
        }}
        body {{
            margin: 0;
            background: #fafafa;
        }}
{styles}    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {{
            const options = Object.assign({{
                {source},
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            }}, {options});

            window.ui = SwaggerUIBundle(options);
        }};
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            version = self.swagger_version,
            styles = styles,
            source = source,
            options = options,
        )
    }

    /// Generate the HTML as bytes for use in HTTP responses.
    #[must_use]
    pub fn html_bytes(&self) -> Bytes {
        Bytes::from(self.html())
    }
}

/// Simple HTML escape for XSS prevention in the title.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// JSON can only carry `<` inside strings, where `<` means the same.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use periplus_config::OpenApiRegistryConfig;

    fn spec(title: &str) -> OpenApi {
        DocumentBuilder::initialize(&OpenApiRegistryConfig::default().with_title(title))
            .document()
            .clone()
    }

    #[test]
    fn test_default_title_from_document() {
        let ui = SwaggerUi::embedded(&spec("Inventory"), &SwaggerUiOptions::default()).unwrap();
        assert!(ui.html().contains("<title>Inventory - Swagger UI</title>"));
    }

    #[test]
    fn test_custom_site_title_is_escaped() {
        let options = SwaggerUiOptions {
            custom_site_title: Some("<b>Docs</b>".to_string()),
            ..SwaggerUiOptions::default()
        };
        let ui = SwaggerUi::embedded(&spec("Inventory"), &options).unwrap();
        let html = ui.html();

        assert!(html.contains("<title>&lt;b&gt;Docs&lt;/b&gt;</title>"));
        assert!(!html.contains("Inventory - Swagger UI"));
    }

    #[test]
    fn test_embedded_document_cannot_close_script() {
        let ui = SwaggerUi::embedded(&spec("</script><script>alert(1)"), &SwaggerUiOptions::default())
            .unwrap();
        let html = ui.html();

        assert!(html.contains(r"\u003c/script>\u003cscript>alert(1)"));
        assert_eq!(html.matches("</script>").count(), 3);
    }

    #[test]
    fn test_embedded_source_holds_document() {
        let ui = SwaggerUi::embedded(&spec("Inventory"), &SwaggerUiOptions::default()).unwrap();
        let SpecSource::Embedded(json) = ui.source() else {
            panic!("expected embedded source");
        };
        let value: Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["info"]["title"], "Inventory");
        assert_eq!(value["openapi"], "3.0.3");
    }

    #[test]
    fn test_linked_mode_fetches_url() {
        let ui = SwaggerUi::linked("/api/docs/json", &spec("Inventory"), &SwaggerUiOptions::default());
        let html = ui.html();

        assert!(html.contains(r#"url: "/api/docs/json""#));
        assert!(!html.contains("spec: {"));
    }

    #[test]
    fn test_explorer_toggles_topbar() {
        let hidden = SwaggerUi::embedded(&spec("A"), &SwaggerUiOptions::default()).unwrap();
        assert!(hidden.html().contains(".swagger-ui .topbar"));

        let options = SwaggerUiOptions {
            explorer: true,
            ..SwaggerUiOptions::default()
        };
        let shown = SwaggerUi::embedded(&spec("A"), &options).unwrap();
        assert!(!shown.html().contains(".swagger-ui .topbar"));
    }

    #[test]
    fn test_custom_css_and_options_passthrough() {
        let mut swagger_options = Map::new();
        swagger_options.insert("docExpansion".to_string(), Value::from("none"));
        swagger_options.insert("persistAuthorization".to_string(), Value::Bool(true));
        let options = SwaggerUiOptions {
            custom_css: Some("body { color: red; } </style>".to_string()),
            swagger_options,
            ..SwaggerUiOptions::default()
        };
        let html = SwaggerUi::embedded(&spec("A"), &options).unwrap().html();

        assert!(html.contains("body { color: red; } <\\/style>"));
        assert!(html.contains(r#"{"docExpansion":"none","persistAuthorization":true}"#));
    }

    #[test]
    fn test_swagger_version_override() {
        let ui = SwaggerUi::embedded(&spec("A"), &SwaggerUiOptions::default())
            .unwrap()
            .swagger_version("5.0.0")
            .title("Custom");
        let html = ui.html();

        assert!(html.contains("swagger-ui-dist@5.0.0/swagger-ui-bundle.js"));
        assert!(html.contains("<title>Custom</title>"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_html_bytes() {
        let ui = SwaggerUi::embedded(&spec("A"), &SwaggerUiOptions::default()).unwrap();
        let bytes = ui.html_bytes();
        assert!(bytes.starts_with(b"<!DOCTYPE html>"));
    }
}
