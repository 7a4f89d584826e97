//! # Periplus Core
//!
//! Core types for describing routes declaratively so that an API description
//! can be derived from them.
//!
//! This crate provides:
//!
//! - [`RouteContract`] - A route's declared inputs, outputs and metadata
//! - [`Schema`] - The structural (JSON-Schema-like) shape of a value
//! - [`CompileSchema`] / [`SchemaRef`] - The "compile to structural schema" capability
//! - [`ValidationSchema`] - A small validation-schema vocabulary that compiles
//! - [`HandlerRef`] / [`AuthRef`] - Request and authentication handlers with stable identity
//! - [`ContractRegistry`] - Identity-keyed handler → contract table
//! - [`RouteTable`] - `"METHOD /path"` keyed route descriptions

#![doc(html_root_url = "https://docs.rs/periplus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contract;
mod handler;
pub mod route;
pub mod schema;
mod structural;

pub use contract::{
    ContractLookup, ContractRegistry, RequestContract, ResponseContract, ResponseSpec,
    RouteContract, RouteContractBuilder,
};
pub use handler::{AuthHandler, AuthRef, Handler, HandlerId, HandlerRef, Request, Response};
pub use route::{AuthDefaults, AuthPolicy, HttpMethod, RouteDescription, RouteKey, RouteTable};
pub use schema::ValidationSchema;
pub use structural::{CompileSchema, Schema, SchemaRef, SchemaType};
