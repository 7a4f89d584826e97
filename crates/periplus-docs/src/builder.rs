//! Document builder.
//!
//! [`DocumentBuilder`] owns the in-memory OpenAPI document and is the only
//! thing that mutates it. Every operation is total: there is no input for
//! which registering an operation, a scheme or an error schema fails, and
//! malformed configuration values are replaced by defaults.

use std::sync::OnceLock;

use indexmap::IndexMap;
use periplus_config::OpenApiRegistryConfig;
use periplus_core::{HttpMethod, Schema};
use regex::Regex;

use crate::openapi::{
    Components, Contact, Info, License, MediaType, OpenApi, Operation, Response, SecurityScheme,
    Server, OPENAPI_VERSION,
};

/// Content type used when a contract does not name one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

const DEFAULT_TITLE: &str = "API Documentation";
const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_DESCRIPTION: &str = "Generated API documentation";
const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
const DEFAULT_SERVER_DESCRIPTION: &str = "Development server";

/// Fixed description for a status code, used when a response declares none.
#[must_use]
pub fn status_description(status: &str) -> &'static str {
    match status {
        "200" => "Successful response",
        "201" => "Created successfully",
        "204" => "No content",
        "400" => "Bad request",
        "401" => "Unauthorized",
        "403" => "Forbidden",
        "404" => "Not found",
        "422" => "Validation error",
        "500" => "Internal server error",
        _ => "Response",
    }
}

fn path_param_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"/:([A-Za-z0-9_]+)").ok())
        .as_ref()
}

/// Converts colon path parameters to brace syntax.
///
/// `/users/:id` becomes `/users/{id}`. Literal segments are unchanged and an
/// already converted path converts to itself.
///
/// ```
/// use periplus_docs::convert_path;
///
/// assert_eq!(convert_path("/users/:id/orders/:orderId"), "/users/{id}/orders/{orderId}");
/// assert_eq!(convert_path("/users/{id}"), "/users/{id}");
/// ```
#[must_use]
pub fn convert_path(path: &str) -> String {
    match path_param_pattern() {
        Some(pattern) => pattern.replace_all(path, "/{${1}}").into_owned(),
        None => path.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Owns and incrementally mutates the OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBuilder {
    document: OpenApi,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Builder seeded with the default metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::initialize(&OpenApiRegistryConfig::default())
    }

    /// Builder seeded from `config`.
    ///
    /// Title, version and description fall back to fixed defaults when absent
    /// or blank. Servers fall back to a single localhost entry. Contact and
    /// license are only written when supplied.
    #[must_use]
    pub fn initialize(config: &OpenApiRegistryConfig) -> Self {
        let contact = config
            .contact
            .as_ref()
            .map(|c| Contact {
                name: non_blank(c.name.as_deref()),
                url: non_blank(c.url.as_deref()),
                email: non_blank(c.email.as_deref()),
            })
            .filter(|c| c != &Contact::default());

        let license = config.license.as_ref().and_then(|l| {
            non_blank(Some(&l.name)).map(|name| License {
                name,
                url: non_blank(l.url.as_deref()),
            })
        });

        let mut servers: Vec<Server> = config
            .servers
            .iter()
            .flatten()
            .filter_map(|entry| {
                non_blank(Some(&entry.url)).map(|url| Server {
                    url,
                    description: non_blank(entry.description.as_deref()),
                })
            })
            .collect();
        if servers.is_empty() {
            servers.push(Server {
                url: DEFAULT_SERVER_URL.to_string(),
                description: Some(DEFAULT_SERVER_DESCRIPTION.to_string()),
            });
        }

        let info = Info {
            title: non_blank(config.title.as_deref()).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            version: non_blank(config.version.as_deref())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            description: Some(
                non_blank(config.description.as_deref())
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            ),
            contact,
            license,
        };

        Self {
            document: OpenApi {
                openapi: OPENAPI_VERSION.to_string(),
                info,
                servers,
                paths: IndexMap::new(),
                components: Components::default(),
            },
        }
    }

    /// Registers `operation` under `method` at `path`.
    ///
    /// `path` may use colon parameters; it is converted first. Other methods
    /// already registered on the same path are kept.
    pub fn register_operation(&mut self, method: HttpMethod, path: &str, operation: Operation) {
        let path = convert_path(path);
        tracing::debug!(method = %method, path = %path, "operation registered");
        self.document
            .paths
            .entry(path)
            .or_default()
            .set_operation(method, operation);
    }

    /// Upserts `components.securitySchemes[name]`.
    pub fn register_security_scheme(&mut self, name: &str, scheme: SecurityScheme) {
        self.document
            .components
            .security_schemes
            .insert(name.to_string(), scheme);
    }

    /// Upserts a reusable error schema and a response referencing it.
    ///
    /// Both are stored under `name`, or `Error<status>` when no name is given.
    pub fn register_error_schema(
        &mut self,
        status: &str,
        schema: Schema,
        description: Option<&str>,
        name: Option<&str>,
    ) {
        let key = name.map_or_else(|| format!("Error{status}"), str::to_string);
        let reference = Schema::reference(format!("#/components/schemas/{key}"));

        let mut content = IndexMap::new();
        content.insert(
            DEFAULT_CONTENT_TYPE.to_string(),
            MediaType::with_schema(reference),
        );
        let response = Response {
            description: description
                .map_or_else(|| status_description(status).to_string(), str::to_string),
            content,
        };

        let components = &mut self.document.components;
        components.schemas.insert(key.clone(), schema);
        components.responses.insert(key, response);
    }

    /// Clears paths, component schemas and security schemes.
    ///
    /// Metadata, servers and reusable error responses are kept.
    pub fn reset(&mut self) {
        self.document.paths.clear();
        self.document.components.schemas.clear();
        self.document.components.security_schemes.clear();
    }

    /// The live document.
    #[must_use]
    pub fn document(&self) -> &OpenApi {
        &self.document
    }
}
