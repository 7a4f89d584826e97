//! The documentation registry.
//!
//! [`OpenApiRegistry`] owns one document, the security scheme table that
//! feeds it, and the configuration it was built from. Create one per
//! process (or per test), document the auth handlers, then `walk` the route
//! table once at startup.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use periplus_config::OpenApiRegistryConfig;
use periplus_core::{
    AuthHandler, AuthPolicy, AuthRef, HandlerRef, ResponseSpec, RouteDescription, RouteTable,
};

use crate::builder::DocumentBuilder;
use crate::error::DocsResult;
use crate::mount::DocsMount;
use crate::openapi::OpenApi;
use crate::security::{SecuritySchemeDefinition, SecuritySchemeTable};
use crate::swagger::SwaggerUi;
use crate::walker::{register_routes, RegistrationContext};

/// Key prefix of the mount directive `walk` appends to the route table.
pub const MOUNT_DIRECTIVE: &str = "USE";

/// Owner of a generated OpenAPI document.
///
/// Registration takes the document's write lock; the mount and
/// [`document`](Self::document) take the read lock. `reset` must not race
/// with a registration pass.
///
/// # Example
///
/// ```
/// use periplus_config::OpenApiRegistryConfig;
/// use periplus_core::{ContractRegistry, Request, Response, RouteContract, RouteTable};
/// use periplus_docs::{OpenApiRegistry, RegistrationContext};
///
/// let mut contracts = ContractRegistry::new();
/// let list = contracts.handler(
///     |_req: &Request| Response::default(),
///     RouteContract::builder().operation_id("listItems").build(),
/// );
/// let routes = RouteTable::new().route("GET /items", list);
///
/// let registry = OpenApiRegistry::new(OpenApiRegistryConfig::default().with_title("Items"));
/// let mounted = registry.walk(&routes, &RegistrationContext::new(&contracts)).unwrap();
///
/// assert!(mounted.get("USE /api/docs").is_some());
/// assert_eq!(registry.document().info.title, "Items");
/// assert!(registry.document().paths.contains_key("/items"));
/// ```
#[derive(Debug)]
pub struct OpenApiRegistry {
    config: OpenApiRegistryConfig,
    builder: Arc<RwLock<DocumentBuilder>>,
    schemes: SecuritySchemeTable,
}

impl OpenApiRegistry {
    /// Creates a registry whose document is seeded from `config`.
    #[must_use]
    pub fn new(config: OpenApiRegistryConfig) -> Self {
        let builder = DocumentBuilder::initialize(&config);
        Self {
            config,
            builder: Arc::new(RwLock::new(builder)),
            schemes: SecuritySchemeTable::new(),
        }
    }

    /// The configuration this registry was created with.
    #[must_use]
    pub fn config(&self) -> &OpenApiRegistryConfig {
        &self.config
    }

    /// Whether `walk` documents anything.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Declares that `handler` implements `definition`.
    ///
    /// Routes guarded by this exact reference get the scheme in their
    /// operation's `security` list.
    pub fn document_auth(&mut self, handler: &AuthRef, definition: SecuritySchemeDefinition) {
        self.schemes.associate(handler, definition);
    }

    /// Wraps `handler` and declares the scheme it implements in one step.
    pub fn documented_auth(
        &mut self,
        handler: impl AuthHandler,
        definition: SecuritySchemeDefinition,
    ) -> AuthRef {
        self.schemes.documented(handler, definition)
    }

    /// The security scheme association table.
    #[must_use]
    pub fn security_schemes(&self) -> &SecuritySchemeTable {
        &self.schemes
    }

    /// Documents every route of `table` and returns it with the
    /// documentation mount appended under `USE <path>`.
    ///
    /// When the registry is disabled the table comes back unchanged and the
    /// document is left alone.
    pub fn walk(
        &self,
        table: &RouteTable,
        context: &RegistrationContext<'_>,
    ) -> DocsResult<RouteTable> {
        if !self.config.enabled {
            tracing::debug!("documentation disabled, route table left unchanged");
            return Ok(table.clone());
        }

        let summary = {
            let mut builder = self.builder.write();
            register_routes(table, context, &self.schemes, &mut builder)
        };

        let mount = self.mount()?;
        let mount_path = mount.path().to_string();

        let mut documented = table.clone();
        documented.insert(
            format!("{MOUNT_DIRECTIVE} {mount_path}"),
            RouteDescription::new(HandlerRef::new(mount)).with_policy(AuthPolicy::Disabled),
        );

        tracing::info!(
            documented = summary.documented,
            skipped = summary.skipped,
            mount = %mount_path,
            "OpenAPI document registered"
        );
        Ok(documented)
    }

    /// Builds the documentation mount for the current document.
    ///
    /// With a raw-JSON sub-path configured the page fetches the live
    /// document; otherwise the document as it is now is embedded.
    pub fn mount(&self) -> DocsResult<DocsMount> {
        let mount = DocsMount::new(
            &self.config.path,
            self.config.swagger_json_path.as_deref(),
            Arc::clone(&self.builder),
        );

        let html = {
            let builder = self.builder.read();
            match mount.json_path() {
                Some(url) => {
                    SwaggerUi::linked(url, builder.document(), &self.config.swagger_ui).html_bytes()
                }
                None => {
                    SwaggerUi::embedded(builder.document(), &self.config.swagger_ui)?.html_bytes()
                }
            }
        };

        Ok(mount.with_html(html))
    }

    /// Registers framework-level error responses.
    ///
    /// Entries without a schema are ignored.
    pub fn register_error_responses(&self, responses: &IndexMap<String, ResponseSpec>) {
        let mut builder = self.builder.write();
        for (status, spec) in responses {
            if let Some(schema) = spec.schema_ref() {
                builder.register_error_schema(
                    status,
                    schema.compile(),
                    spec.description(),
                    spec.name(),
                );
            }
        }
    }

    /// Clears paths, component schemas and security schemes.
    pub fn reset(&self) {
        tracing::debug!("OpenAPI document reset");
        self.builder.write().reset();
    }

    /// Read access to the live document.
    pub fn document(&self) -> MappedRwLockReadGuard<'_, OpenApi> {
        RwLockReadGuard::map(self.builder.read(), DocumentBuilder::document)
    }

    /// The document as compact JSON.
    pub fn to_json(&self) -> DocsResult<String> {
        Ok(serde_json::to_string(&*self.document())?)
    }

    /// The document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> DocsResult<String> {
        Ok(serde_json::to_string_pretty(&*self.document())?)
    }
}

impl Default for OpenApiRegistry {
    fn default() -> Self {
        Self::new(OpenApiRegistryConfig::default())
    }
}
