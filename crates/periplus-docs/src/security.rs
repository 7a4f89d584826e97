//! Security scheme association table.
//!
//! Maps authentication handlers, by reference identity, to the named scheme
//! they implement. The handler itself is never touched: the same middleware
//! can guard many routes and the documentation layer still knows which scheme
//! to advertise for each of them.

use std::collections::HashMap;
use std::fmt;

use periplus_core::{AuthHandler, AuthRef, HandlerId};

use crate::openapi::{SecurityRequirement, SecurityScheme};

/// A named security scheme plus the scopes operations require.
#[derive(Debug, Clone, PartialEq)]
pub struct SecuritySchemeDefinition {
    /// Name under `components.securitySchemes`.
    pub name: String,
    /// The scheme object.
    pub scheme: SecurityScheme,
    /// Scopes listed in each operation's requirement. `None` means `[]`.
    pub scopes: Option<Vec<String>>,
}

impl SecuritySchemeDefinition {
    /// Creates a definition without scopes.
    #[must_use]
    pub fn new(name: impl Into<String>, scheme: SecurityScheme) -> Self {
        Self {
            name: name.into(),
            scheme,
            scopes: None,
        }
    }

    /// Sets the required scopes.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// The one-entry requirement `{name: scopes}` for an operation.
    #[must_use]
    pub fn requirement(&self) -> SecurityRequirement {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(self.name.clone(), self.scopes.clone().unwrap_or_default());
        requirement
    }
}

/// Identity-keyed table of authentication handler → scheme definition.
///
/// # Example
///
/// ```
/// use periplus_core::{AuthRef, Request, Response};
/// use periplus_docs::{SecurityScheme, SecuritySchemeDefinition, SecuritySchemeTable};
///
/// let mut table = SecuritySchemeTable::new();
/// let bearer = table.documented(
///     |_req: &Request| -> Result<(), Response> { Ok(()) },
///     SecuritySchemeDefinition::new("bearerAuth", SecurityScheme::bearer()),
/// );
///
/// assert_eq!(table.lookup(&bearer).map(|d| d.name.as_str()), Some("bearerAuth"));
/// let lookalike = AuthRef::new(|_req: &Request| -> Result<(), Response> { Ok(()) });
/// assert!(table.lookup(&lookalike).is_none());
/// ```
#[derive(Default)]
pub struct SecuritySchemeTable {
    entries: HashMap<HandlerId, (AuthRef, SecuritySchemeDefinition)>,
}

impl SecuritySchemeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `handler` implements `definition`. Last writer wins.
    pub fn associate(&mut self, handler: &AuthRef, definition: SecuritySchemeDefinition) {
        self.entries
            .insert(handler.id(), (handler.clone(), definition));
    }

    /// Wraps `handler` in a new reference and associates `definition` with it.
    pub fn documented(
        &mut self,
        handler: impl AuthHandler,
        definition: SecuritySchemeDefinition,
    ) -> AuthRef {
        let handler = AuthRef::new(handler);
        self.associate(&handler, definition);
        handler
    }

    /// Returns the definition associated with `handler`.
    #[must_use]
    pub fn lookup(&self, handler: &AuthRef) -> Option<&SecuritySchemeDefinition> {
        self.entries
            .get(&handler.id())
            .map(|(_, definition)| definition)
    }

    /// Number of documented handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handler is documented.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SecuritySchemeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(id, (_, definition))| (id, &definition.name)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiKeyLocation;
    use periplus_core::{Request, Response};

    fn allow(_req: &Request) -> Result<(), Response> {
        Ok(())
    }

    #[test]
    fn test_associate_and_lookup() {
        let mut table = SecuritySchemeTable::new();
        let handler = AuthRef::new(allow);
        table.associate(
            &handler,
            SecuritySchemeDefinition::new("apiKey", SecurityScheme::api_key("X-Key", ApiKeyLocation::Header)),
        );

        let found = table.lookup(&handler).unwrap();
        assert_eq!(found.name, "apiKey");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_is_by_identity_not_value() {
        let mut table = SecuritySchemeTable::new();
        let documented = table.documented(allow, SecuritySchemeDefinition::new("a", SecurityScheme::basic()));
        let lookalike = AuthRef::new(allow);

        assert!(table.lookup(&documented).is_some());
        assert!(table.lookup(&documented.clone()).is_some());
        assert!(table.lookup(&lookalike).is_none());
    }

    #[test]
    fn test_last_writer_wins() {
        let mut table = SecuritySchemeTable::new();
        let handler = AuthRef::new(allow);
        table.associate(&handler, SecuritySchemeDefinition::new("first", SecurityScheme::basic()));
        table.associate(&handler, SecuritySchemeDefinition::new("second", SecurityScheme::bearer()));

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&handler).unwrap().name, "second");
    }

    #[test]
    fn test_requirement_scopes() {
        let plain = SecuritySchemeDefinition::new("bearerAuth", SecurityScheme::bearer());
        assert_eq!(plain.requirement()["bearerAuth"], Vec::<String>::new());

        let scoped = plain.with_scopes(["items:read", "items:write"]);
        assert_eq!(
            scoped.requirement()["bearerAuth"],
            vec!["items:read".to_string(), "items:write".to_string()]
        );
    }
}
