//! Route tables.
//!
//! A [`RouteTable`] maps `"METHOD /path"` keys to a [`RouteDescription`]: the
//! handler plus optional route-level authentication overrides. Keys that do
//! not start with a recognized HTTP method (for example `"USE /api/docs"`
//! mount directives) are legal entries; they are simply never documented.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::handler::{AuthRef, HandlerRef};

/// HTTP methods that can appear in the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// All recognized methods.
    pub const ALL: [HttpMethod; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Parses a method name, ignoring case.
    #[must_use]
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            "head" => Some(Self::Head),
            "options" => Some(Self::Options),
            _ => None,
        }
    }

    /// Lower-case name, as used for operation keys in the document.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        }
    }

    /// Whether requests with this method carry a documented body.
    #[must_use]
    pub fn is_body_bearing(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route-table key split into its method and path parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteKey {
    /// Method part, as written.
    pub method: String,
    /// Path part, as written.
    pub path: String,
}

impl RouteKey {
    /// Splits a key on its first run of whitespace.
    ///
    /// Returns `None` if either part is missing.
    ///
    /// ```
    /// use periplus_core::{HttpMethod, RouteKey};
    ///
    /// let key = RouteKey::parse("GET   /users/:id").unwrap();
    /// assert_eq!(key.path, "/users/:id");
    /// assert_eq!(key.http_method(), Some(HttpMethod::Get));
    /// assert!(RouteKey::parse("/no-method").is_none());
    /// ```
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let (method, rest) = key.split_once(char::is_whitespace)?;
        let path = rest.trim_start();
        if method.is_empty() || path.is_empty() {
            return None;
        }
        Some(Self {
            method: method.to_string(),
            path: path.to_string(),
        })
    }

    /// Returns the recognized HTTP method, if any.
    #[must_use]
    pub fn http_method(&self) -> Option<HttpMethod> {
        HttpMethod::parse(&self.method)
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Authentication policy for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthPolicy {
    /// Requests must authenticate.
    Required,
    /// Requests may authenticate.
    Optional,
    /// No authentication, regardless of any handler declared.
    Disabled,
}

impl AuthPolicy {
    /// Returns `true` for [`AuthPolicy::Disabled`].
    #[must_use]
    pub fn is_disabled(self) -> bool {
        self == Self::Disabled
    }
}

/// A route's handler and its route-level authentication overrides.
#[derive(Debug, Clone)]
pub struct RouteDescription {
    /// The request handler.
    pub handler: HandlerRef,
    /// Route-level authentication handler.
    pub auth_handler: Option<AuthRef>,
    /// Route-level authentication policy.
    pub auth_policy: Option<AuthPolicy>,
}

impl RouteDescription {
    /// Creates a description with no route-level overrides.
    #[must_use]
    pub fn new(handler: HandlerRef) -> Self {
        Self {
            handler,
            auth_handler: None,
            auth_policy: None,
        }
    }

    /// Sets the route-level authentication handler.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthRef) -> Self {
        self.auth_handler = Some(auth);
        self
    }

    /// Sets the route-level authentication policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AuthPolicy) -> Self {
        self.auth_policy = Some(policy);
        self
    }
}

impl From<HandlerRef> for RouteDescription {
    fn from(handler: HandlerRef) -> Self {
        Self::new(handler)
    }
}

/// Process-wide authentication defaults, applied when a route declares none.
#[derive(Debug, Clone, Default)]
pub struct AuthDefaults {
    /// Default authentication handler.
    pub handler: Option<AuthRef>,
    /// Default authentication policy.
    pub policy: Option<AuthPolicy>,
}

impl AuthDefaults {
    /// No defaults: routes without overrides are unauthenticated.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the default handler.
    #[must_use]
    pub fn with_handler(mut self, handler: AuthRef) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Sets the default policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AuthPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
}

/// Ordered `"METHOD /path"` → [`RouteDescription`] table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: IndexMap<String, RouteDescription>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route, builder style.
    #[must_use]
    pub fn route(mut self, key: impl Into<String>, route: impl Into<RouteDescription>) -> Self {
        self.insert(key, route);
        self
    }

    /// Adds or replaces a route. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, route: impl Into<RouteDescription>) {
        self.routes.insert(key.into(), route.into());
    }

    /// Looks up a route by its exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RouteDescription> {
        self.routes.get(key)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteDescription)> {
        self.routes.iter().map(|(key, route)| (key.as_str(), route))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<K, R> FromIterator<(K, R)> for RouteTable
where
    K: Into<String>,
    R: Into<RouteDescription>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, route) in iter {
            table.insert(key, route);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Request, Response};
    use proptest::prelude::*;

    fn noop() -> HandlerRef {
        HandlerRef::new(|_req: &Request| Response::default())
    }

    #[test]
    fn test_method_parse_ignores_case() {
        assert_eq!(HttpMethod::parse("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("Patch"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::parse("options"), Some(HttpMethod::Options));
        assert_eq!(HttpMethod::parse("USE"), None);
        assert_eq!(HttpMethod::parse("TRACE"), None);
    }

    #[test]
    fn test_body_bearing_methods() {
        let bearing: Vec<_> = HttpMethod::ALL
            .into_iter()
            .filter(|m| m.is_body_bearing())
            .collect();
        assert_eq!(
            bearing,
            vec![HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch]
        );
    }

    #[test]
    fn test_route_key_parse() {
        let key = RouteKey::parse("post /users").unwrap();
        assert_eq!(key.method, "post");
        assert_eq!(key.path, "/users");
        assert_eq!(key.to_string(), "post /users");

        let tabbed = RouteKey::parse("DELETE\t /users/:id").unwrap();
        assert_eq!(tabbed.path, "/users/:id");
        assert_eq!(tabbed.http_method(), Some(HttpMethod::Delete));
    }

    #[test]
    fn test_route_key_malformed() {
        assert!(RouteKey::parse("").is_none());
        assert!(RouteKey::parse("GET").is_none());
        assert!(RouteKey::parse("GET   ").is_none());
        assert!(RouteKey::parse(" /leading-space").is_none());
    }

    #[test]
    fn test_route_key_unrecognized_method() {
        let key = RouteKey::parse("USE /api/docs").unwrap();
        assert_eq!(key.http_method(), None);
    }

    #[test]
    fn test_route_description_from_handler() {
        let handler = noop();
        let route = RouteDescription::from(handler.clone());
        assert_eq!(route.handler, handler);
        assert!(route.auth_handler.is_none());
        assert!(route.auth_policy.is_none());
    }

    #[test]
    fn test_route_table_keeps_insertion_order() {
        let table = RouteTable::new()
            .route("GET /b", noop())
            .route("GET /a", noop())
            .route(
                "POST /a",
                RouteDescription::new(noop()).with_policy(AuthPolicy::Disabled),
            );

        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["GET /b", "GET /a", "POST /a"]);
        assert_eq!(
            table.get("POST /a").and_then(|r| r.auth_policy),
            Some(AuthPolicy::Disabled)
        );
    }

    #[test]
    fn test_auth_policy_serde() {
        let policy: AuthPolicy = serde_json::from_str("\"disabled\"").unwrap();
        assert!(policy.is_disabled());
        assert_eq!(
            serde_json::to_string(&AuthPolicy::Optional).unwrap(),
            "\"optional\""
        );
    }

    proptest! {
        #[test]
        fn prop_route_key_splits_method_and_path(
            method in "[A-Za-z]{1,8}",
            gap in "[ \t]{1,4}",
            path in "/[a-z:/{}]{0,20}",
        ) {
            let key = RouteKey::parse(&format!("{method}{gap}{path}")).unwrap();
            prop_assert_eq!(key.method, method);
            prop_assert_eq!(key.path, path);
        }
    }
}
