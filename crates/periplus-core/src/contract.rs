//! Route contracts.
//!
//! A [`RouteContract`] declares what a route accepts (path, query and header
//! parameters, request body) and what it may return (status-keyed response
//! bodies), independently of the handler that implements it. Contracts are
//! attached to handlers through a [`ContractLookup`] capability, usually a
//! [`ContractRegistry`].
//!
//! # Example
//!
//! ```
//! use periplus_core::{ContractRegistry, HandlerRef, Request, Response, ResponseSpec,
//!     RouteContract, ValidationSchema, ContractLookup};
//!
//! let contract = RouteContract::builder()
//!     .operation_id("getItem")
//!     .summary("Fetch one item")
//!     .tag("items")
//!     .params(ValidationSchema::object(vec![
//!         ("itemId", ValidationSchema::string().required()),
//!     ]))
//!     .response(200, ValidationSchema::object(vec![
//!         ("id", ValidationSchema::string().required()),
//!     ]))
//!     .response(404, ResponseSpec::described("No such item"))
//!     .build();
//!
//! let mut contracts = ContractRegistry::new();
//! let handler = contracts.handler(|_req: &Request| Response::default(), contract);
//!
//! assert_eq!(
//!     contracts.contract(&handler).and_then(|c| c.operation_id.as_deref()),
//!     Some("getItem")
//! );
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

use crate::handler::{Handler, HandlerId, HandlerRef};
use crate::structural::{CompileSchema, SchemaRef};

/// One declared response.
///
/// Either a bare schema, or a described entry whose schema may be absent
/// (for bodiless responses such as `204`).
#[derive(Debug, Clone)]
pub enum ResponseSpec {
    /// A bare schema; the description falls back to the status-code default.
    Schema(SchemaRef),
    /// A response with optional schema, description and component name.
    Described {
        /// Body schema, if the response has a body.
        schema: Option<SchemaRef>,
        /// Human-readable description.
        description: Option<String>,
        /// Component name used when registered as a reusable error response.
        name: Option<String>,
    },
}

impl ResponseSpec {
    /// A bare-schema response.
    #[must_use]
    pub fn schema(schema: impl Into<SchemaRef>) -> Self {
        Self::Schema(schema.into())
    }

    /// A described response without a body.
    #[must_use]
    pub fn described(description: impl Into<String>) -> Self {
        Self::Described {
            schema: None,
            description: Some(description.into()),
            name: None,
        }
    }

    /// A response with neither schema nor description.
    #[must_use]
    pub fn empty() -> Self {
        Self::Described {
            schema: None,
            description: None,
            name: None,
        }
    }

    /// Sets the body schema, keeping any description and name.
    #[must_use]
    pub fn with_schema(self, schema: impl Into<SchemaRef>) -> Self {
        let (_, description, name) = self.into_parts();
        Self::Described {
            schema: Some(schema.into()),
            description,
            name,
        }
    }

    /// Sets the description, keeping any schema and name.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        let (schema, _, name) = self.into_parts();
        Self::Described {
            schema,
            description: Some(description.into()),
            name,
        }
    }

    /// Sets the component name, keeping any schema and description.
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        let (schema, description, _) = self.into_parts();
        Self::Described {
            schema,
            description,
            name: Some(name.into()),
        }
    }

    fn into_parts(self) -> (Option<SchemaRef>, Option<String>, Option<String>) {
        match self {
            Self::Schema(schema) => (Some(schema), None, None),
            Self::Described {
                schema,
                description,
                name,
            } => (schema, description, name),
        }
    }

    /// Returns the body schema, if any.
    #[must_use]
    pub fn schema_ref(&self) -> Option<&SchemaRef> {
        match self {
            Self::Schema(schema) => Some(schema),
            Self::Described { schema, .. } => schema.as_ref(),
        }
    }

    /// Returns the declared description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Schema(_) => None,
            Self::Described { description, .. } => description.as_deref(),
        }
    }

    /// Returns the declared component name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Schema(_) => None,
            Self::Described { name, .. } => name.as_deref(),
        }
    }
}

impl From<SchemaRef> for ResponseSpec {
    fn from(schema: SchemaRef) -> Self {
        Self::Schema(schema)
    }
}

impl<T: CompileSchema + 'static> From<T> for ResponseSpec {
    fn from(schema: T) -> Self {
        Self::Schema(SchemaRef::new(schema))
    }
}

/// Declared request inputs.
#[derive(Debug, Clone, Default)]
pub struct RequestContract {
    /// Query-string parameters, as one object schema.
    pub query: Option<SchemaRef>,
    /// Path parameters, as one object schema.
    pub params: Option<SchemaRef>,
    /// Header parameters, as one object schema.
    pub headers: Option<SchemaRef>,
    /// Request body schema.
    pub body: Option<SchemaRef>,
    /// Accepted body content types. Empty means the default JSON type.
    pub content_types: Vec<String>,
}

/// Declared responses, keyed by status code.
#[derive(Debug, Clone, Default)]
pub struct ResponseContract {
    /// Content type of response bodies. `None` means the default JSON type.
    pub content_type: Option<String>,
    /// Responses by status code string (e.g. `"200"`), in declaration order.
    pub content: IndexMap<String, ResponseSpec>,
}

/// A route's declared input/output schemas and metadata.
#[derive(Debug, Clone, Default)]
pub struct RouteContract {
    /// Unique operation identifier.
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Tags for grouping, in order.
    pub tags: Vec<String>,
    /// Whether the route is deprecated.
    pub deprecated: bool,
    /// Declared inputs.
    pub request: Option<RequestContract>,
    /// Declared outputs.
    pub response: Option<ResponseContract>,
}

impl RouteContract {
    /// Creates a new contract builder.
    #[must_use]
    pub fn builder() -> RouteContractBuilder {
        RouteContractBuilder::default()
    }
}

/// Builder for [`RouteContract`].
#[derive(Debug, Default)]
pub struct RouteContractBuilder {
    contract: RouteContract,
}

impl RouteContractBuilder {
    /// Sets the operation ID.
    #[must_use]
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.contract.operation_id = Some(id.into());
        self
    }

    /// Sets the summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.contract.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.contract.description = Some(description.into());
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.contract.tags.push(tag.into());
        self
    }

    /// Marks the route as deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.contract.deprecated = true;
        self
    }

    fn request_mut(&mut self) -> &mut RequestContract {
        self.contract.request.get_or_insert_with(RequestContract::default)
    }

    fn response_mut(&mut self) -> &mut ResponseContract {
        self.contract
            .response
            .get_or_insert_with(ResponseContract::default)
    }

    /// Sets the query parameter schema.
    #[must_use]
    pub fn query(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.request_mut().query = Some(schema.into());
        self
    }

    /// Sets the path parameter schema.
    #[must_use]
    pub fn params(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.request_mut().params = Some(schema.into());
        self
    }

    /// Sets the header parameter schema.
    #[must_use]
    pub fn headers(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.request_mut().headers = Some(schema.into());
        self
    }

    /// Sets the request body schema.
    #[must_use]
    pub fn body(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.request_mut().body = Some(schema.into());
        self
    }

    /// Adds an accepted request body content type.
    #[must_use]
    pub fn request_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.request_mut().content_types.push(content_type.into());
        self
    }

    /// Declares a response for a status code. Redeclaring a status replaces it.
    #[must_use]
    pub fn response(mut self, status: impl fmt::Display, spec: impl Into<ResponseSpec>) -> Self {
        self.response_mut()
            .content
            .insert(status.to_string(), spec.into());
        self
    }

    /// Sets the response body content type.
    #[must_use]
    pub fn response_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.response_mut().content_type = Some(content_type.into());
        self
    }

    /// Builds the contract.
    #[must_use]
    pub fn build(self) -> RouteContract {
        self.contract
    }
}

/// Capability to retrieve the contract attached to a handler.
pub trait ContractLookup {
    /// Returns the handler's contract, or `None` if it has none.
    fn contract(&self, handler: &HandlerRef) -> Option<&RouteContract>;
}

/// Identity-keyed table of handler contracts.
///
/// Keeps a clone of every handler it knows so handler identities stay pinned.
#[derive(Default)]
pub struct ContractRegistry {
    entries: HashMap<HandlerId, (HandlerRef, RouteContract)>,
}

impl ContractRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a contract to a handler, replacing any previous one.
    pub fn attach(&mut self, handler: &HandlerRef, contract: RouteContract) {
        self.entries
            .insert(handler.id(), (handler.clone(), contract));
    }

    /// Wraps `handler` in a new reference and attaches `contract` to it.
    pub fn handler(&mut self, handler: impl Handler, contract: RouteContract) -> HandlerRef {
        let handler = HandlerRef::new(handler);
        self.attach(&handler, contract);
        handler
    }

    /// Returns the number of handlers with contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no contracts are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContractLookup for ContractRegistry {
    fn contract(&self, handler: &HandlerRef) -> Option<&RouteContract> {
        self.entries.get(&handler.id()).map(|(_, contract)| contract)
    }
}

impl fmt::Debug for ContractRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractRegistry")
            .field("handlers", &self.entries.len())
            .finish()
    }
}
