//! # Periplus Docs
//!
//! OpenAPI 3.0.3 documents generated from declarative route contracts.
//!
//! This crate provides:
//! - **Security scheme association** keyed by auth-handler identity
//! - **Incremental document building** with colon-to-brace path conversion
//! - **Contract translation** into OpenAPI operations
//! - **Route table walking** with three-level auth resolution
//! - **Swagger UI** mounted as an ordinary route handler
//!
//! ## Quick Start
//!
//! ```
//! use periplus_config::OpenApiRegistryConfig;
//! use periplus_core::{
//!     AuthPolicy, ContractRegistry, Request, Response, RouteContract, RouteDescription,
//!     RouteTable, ValidationSchema,
//! };
//! use periplus_docs::{
//!     OpenApiRegistry, RegistrationContext, SecurityScheme, SecuritySchemeDefinition,
//! };
//!
//! let mut registry = OpenApiRegistry::new(
//!     OpenApiRegistryConfig::default()
//!         .with_title("Inventory")
//!         .with_swagger_json_path("/json"),
//! );
//! let bearer = registry.documented_auth(
//!     |_req: &Request| -> Result<(), Response> { Ok(()) },
//!     SecuritySchemeDefinition::new("bearerAuth", SecurityScheme::bearer()),
//! );
//!
//! let mut contracts = ContractRegistry::new();
//! let get_item = contracts.handler(
//!     |_req: &Request| Response::default(),
//!     RouteContract::builder()
//!         .params(ValidationSchema::object(vec![("itemId", ValidationSchema::string())]))
//!         .response(200, ValidationSchema::object(vec![("id", ValidationSchema::string())]))
//!         .build(),
//! );
//!
//! let routes = RouteTable::new().route(
//!     "GET /items/:itemId",
//!     RouteDescription::new(get_item)
//!         .with_auth(bearer)
//!         .with_policy(AuthPolicy::Required),
//! );
//! let routes = registry.walk(&routes, &RegistrationContext::new(&contracts)).unwrap();
//!
//! assert!(routes.get("USE /api/docs").is_some());
//! let doc = registry.document();
//! assert!(doc.paths.contains_key("/items/{itemId}"));
//! assert!(doc.components.security_schemes.contains_key("bearerAuth"));
//! ```

#![doc(html_root_url = "https://docs.rs/periplus-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod error;
mod mount;
mod openapi;
mod registry;
mod security;
mod swagger;
mod translate;
mod walker;

pub use builder::{convert_path, status_description, DocumentBuilder, DEFAULT_CONTENT_TYPE};
pub use error::{DocsError, DocsResult};
pub use mount::DocsMount;
pub use openapi::{
    ApiKeyLocation, Components, Contact, Info, License, MediaType, OAuthFlow, OAuthFlows, OpenApi,
    Operation, Parameter, ParameterIn, PathItem, RequestBody, Response, SecurityRequirement,
    SecurityScheme, Server, OPENAPI_VERSION,
};
pub use registry::{OpenApiRegistry, MOUNT_DIRECTIVE};
pub use security::{SecuritySchemeDefinition, SecuritySchemeTable};
pub use swagger::{SpecSource, SwaggerUi, SWAGGER_UI_VERSION};
pub use translate::translate;
pub use walker::{RegistrationContext, RouteAuthResolution};
