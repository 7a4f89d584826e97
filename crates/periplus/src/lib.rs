//! # Periplus
//!
//! **OpenAPI documentation generated from declarative route contracts**
//!
//! Periplus mirrors what routes already declare into an OpenAPI 3.0.3
//! document, then serves it through Swagger UI:
//!
//! - **Contract-first** – every schema comes from the route's own contract
//! - **Auth-aware** – auth handlers map to named security schemes by identity
//! - **Incremental** – the document grows route by route and can be reset
//! - **Self-mounting** – the docs UI is appended to the route table as a handler
//!
//! ## Quick Start
//!
//! ```
//! use periplus::prelude::*;
//!
//! let config = PeriplusConfig::development();
//! let registry = OpenApiRegistry::new(config.docs.clone());
//!
//! let mut contracts = ContractRegistry::new();
//! let health = contracts.handler(
//!     |_req: &Request| Response::default(),
//!     RouteContract::builder().summary("Liveness probe").build(),
//! );
//!
//! let routes = RouteTable::new().route("GET /health", health);
//! let routes = registry
//!     .walk(&routes, &RegistrationContext::new(&contracts))
//!     .unwrap();
//!
//! assert!(routes.get("USE /api/docs").is_some());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! RouteTable → walker → translate → DocumentBuilder → OpenApi
//!                 ↑          ↑                           ↓
//!   SecuritySchemeTable  ContractLookup             DocsMount (Swagger UI / JSON)
//! ```

#![doc(html_root_url = "https://docs.rs/periplus/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;

// Re-export core types
pub use periplus_core as core;

// Re-export documentation types
pub use periplus_docs as docs;

// Re-export configuration types
pub use periplus_config as config;

// Re-export telemetry types
pub use periplus_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// The OpenAPI `Response` object is not included; it would clash with the
/// handler [`Response`](periplus_core::Response). Reach it as
/// `periplus::docs::Response`.
///
/// # Example
///
/// ```
/// use periplus::prelude::*;
/// ```
pub mod prelude {
    pub use periplus_core::{
        AuthDefaults, AuthHandler, AuthPolicy, AuthRef, CompileSchema, ContractLookup,
        ContractRegistry, Handler, HandlerRef, HttpMethod, Request, Response, ResponseSpec,
        RouteContract, RouteDescription, RouteTable, Schema, SchemaRef, SchemaType,
        ValidationSchema,
    };

    // Re-export document generation types
    pub use periplus_docs::{
        ApiKeyLocation, DocsError, DocsMount, DocsResult, OAuthFlow, OAuthFlows, OpenApi,
        OpenApiRegistry, Operation, RegistrationContext, SecurityScheme,
        SecuritySchemeDefinition,
    };

    // Re-export configuration types
    pub use periplus_config::{
        ConfigError, ConfigLoader, OpenApiRegistryConfig, PeriplusConfig, SwaggerUiOptions,
    };

    // Re-export logging setup
    pub use periplus_telemetry::{init_logging, LogConfig};
}
