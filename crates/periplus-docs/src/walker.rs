//! Route table walker.
//!
//! Drives one registration pass: for each `"METHOD /path"` entry it resolves
//! authentication, looks up the handler's contract, translates it and hands
//! the operation to the [`DocumentBuilder`]. Entries that cannot be
//! documented are skipped, never reported as errors; the route still works,
//! it is just absent from the document.

use std::fmt;

use periplus_core::{
    AuthDefaults, AuthPolicy, AuthRef, ContractLookup, RouteDescription, RouteKey, RouteTable,
};

use crate::builder::DocumentBuilder;
use crate::openapi::SecurityRequirement;
use crate::security::{SecuritySchemeDefinition, SecuritySchemeTable};
use crate::translate::translate;

/// Inputs a registration pass consumes besides the route table.
#[derive(Clone)]
pub struct RegistrationContext<'a> {
    /// Where handler contracts come from.
    pub contracts: &'a dyn ContractLookup,
    /// Process-wide authentication defaults.
    pub defaults: AuthDefaults,
}

impl<'a> RegistrationContext<'a> {
    /// Context with no authentication defaults.
    #[must_use]
    pub fn new(contracts: &'a dyn ContractLookup) -> Self {
        Self {
            contracts,
            defaults: AuthDefaults::default(),
        }
    }

    /// Sets the process-wide authentication defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: AuthDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

impl fmt::Debug for RegistrationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationContext")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Effective authentication for one route.
///
/// Derived fresh on every pass; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAuthResolution {
    /// The handler that guards the route, if any.
    pub handler: Option<AuthRef>,
    /// The effective policy.
    pub policy: AuthPolicy,
    /// Scheme documented for the handler, if the handler is documented.
    pub scheme: Option<SecuritySchemeDefinition>,
}

impl RouteAuthResolution {
    /// Resolves authentication for `route`.
    ///
    /// Policy: the route's own, else the default, else disabled. A disabled
    /// policy means no handler whatever was declared. Otherwise the handler
    /// is the route's own, else the default handler.
    #[must_use]
    pub fn resolve(
        route: &RouteDescription,
        defaults: &AuthDefaults,
        schemes: &SecuritySchemeTable,
    ) -> Self {
        let policy = route
            .auth_policy
            .or(defaults.policy)
            .unwrap_or(AuthPolicy::Disabled);

        let handler = if policy.is_disabled() {
            None
        } else {
            route
                .auth_handler
                .as_ref()
                .or(defaults.handler.as_ref())
                .cloned()
        };

        let scheme = handler
            .as_ref()
            .and_then(|h| schemes.lookup(h))
            .cloned();

        Self {
            handler,
            policy,
            scheme,
        }
    }

    /// Names of the security schemes that apply.
    pub fn scheme_names(&self) -> impl Iterator<Item = &str> {
        self.scheme.iter().map(|s| s.name.as_str())
    }

    /// Security requirements for the route's operation.
    #[must_use]
    pub fn requirements(&self) -> Vec<SecurityRequirement> {
        self.scheme
            .iter()
            .map(SecuritySchemeDefinition::requirement)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    MalformedKey,
    UnrecognizedMethod,
    MissingContract,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MalformedKey => "malformed route key",
            Self::UnrecognizedMethod => "unrecognized method",
            Self::MissingContract => "no contract attached",
        })
    }
}

/// Counts from one registration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WalkSummary {
    pub(crate) documented: usize,
    pub(crate) skipped: usize,
}

/// Registers every documentable route of `table` into `builder`.
pub(crate) fn register_routes(
    table: &RouteTable,
    context: &RegistrationContext<'_>,
    schemes: &SecuritySchemeTable,
    builder: &mut DocumentBuilder,
) -> WalkSummary {
    let mut summary = WalkSummary::default();

    for (key, route) in table.iter() {
        match register_route(key, route, context, schemes, builder) {
            Ok(()) => summary.documented += 1,
            Err(reason) => {
                tracing::debug!(route = %key, %reason, "route skipped");
                summary.skipped += 1;
            }
        }
    }

    summary
}

fn register_route(
    key: &str,
    route: &RouteDescription,
    context: &RegistrationContext<'_>,
    schemes: &SecuritySchemeTable,
    builder: &mut DocumentBuilder,
) -> Result<(), SkipReason> {
    let key = RouteKey::parse(key).ok_or(SkipReason::MalformedKey)?;
    let method = key.http_method().ok_or(SkipReason::UnrecognizedMethod)?;

    let auth = RouteAuthResolution::resolve(route, &context.defaults, schemes);
    if let Some(definition) = &auth.scheme {
        builder.register_security_scheme(&definition.name, definition.scheme.clone());
    }

    let contract = context
        .contracts
        .contract(&route.handler)
        .ok_or(SkipReason::MissingContract)?;

    let operation = translate(method, contract, &auth.requirements());
    builder.register_operation(method, &key.path, operation);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::SecurityScheme;
    use periplus_core::{
        ContractRegistry, HandlerRef, HttpMethod, Request, Response, RouteContract,
    };

    fn ok(_req: &Request) -> Response {
        Response::default()
    }

    fn allow(_req: &Request) -> Result<(), Response> {
        Ok(())
    }

    struct Fixture {
        contracts: ContractRegistry,
        schemes: SecuritySchemeTable,
        bearer: AuthRef,
        api_key: AuthRef,
    }

    fn fixture() -> Fixture {
        let mut schemes = SecuritySchemeTable::new();
        let bearer = schemes.documented(
            allow,
            SecuritySchemeDefinition::new("bearerAuth", SecurityScheme::bearer()),
        );
        let api_key = schemes.documented(
            allow,
            SecuritySchemeDefinition::new("basicAuth", SecurityScheme::basic())
                .with_scopes(["admin"]),
        );
        Fixture {
            contracts: ContractRegistry::new(),
            schemes,
            bearer,
            api_key,
        }
    }

    fn route_with(f: &mut Fixture) -> RouteDescription {
        RouteDescription::new(f.contracts.handler(ok, RouteContract::default()))
    }

    #[test]
    fn test_resolve_without_any_policy_is_disabled() {
        let mut f = fixture();
        let route = route_with(&mut f).with_auth(f.bearer.clone());
        let auth = RouteAuthResolution::resolve(&route, &AuthDefaults::none(), &f.schemes);

        assert_eq!(auth.policy, AuthPolicy::Disabled);
        assert!(auth.handler.is_none());
        assert!(auth.requirements().is_empty());
    }

    #[test]
    fn test_resolve_route_disabled_beats_everything() {
        let mut f = fixture();
        let defaults = AuthDefaults::none()
            .with_handler(f.bearer.clone())
            .with_policy(AuthPolicy::Required);
        let route = route_with(&mut f)
            .with_auth(f.api_key.clone())
            .with_policy(AuthPolicy::Disabled);
        let auth = RouteAuthResolution::resolve(&route, &defaults, &f.schemes);

        assert!(auth.handler.is_none());
        assert!(auth.scheme.is_none());
    }

    #[test]
    fn test_resolve_route_handler_beats_default_handler() {
        let mut f = fixture();
        let defaults = AuthDefaults::none()
            .with_handler(f.bearer.clone())
            .with_policy(AuthPolicy::Required);
        let route = route_with(&mut f).with_auth(f.api_key.clone());
        let auth = RouteAuthResolution::resolve(&route, &defaults, &f.schemes);

        assert_eq!(auth.handler.as_ref(), Some(&f.api_key));
        assert_eq!(auth.scheme_names().collect::<Vec<_>>(), vec!["basicAuth"]);
        assert_eq!(auth.requirements()[0]["basicAuth"], vec!["admin".to_string()]);
    }

    #[test]
    fn test_resolve_falls_back_to_default_handler() {
        let mut f = fixture();
        let defaults = AuthDefaults::none()
            .with_handler(f.bearer.clone())
            .with_policy(AuthPolicy::Optional);
        let route = route_with(&mut f);
        let auth = RouteAuthResolution::resolve(&route, &defaults, &f.schemes);

        assert_eq!(auth.policy, AuthPolicy::Optional);
        assert_eq!(auth.handler.as_ref(), Some(&f.bearer));
        assert_eq!(auth.scheme_names().collect::<Vec<_>>(), vec!["bearerAuth"]);
    }

    #[test]
    fn test_resolve_route_policy_enables_route_handler() {
        let mut f = fixture();
        let route = route_with(&mut f)
            .with_auth(f.bearer.clone())
            .with_policy(AuthPolicy::Required);
        let auth = RouteAuthResolution::resolve(&route, &AuthDefaults::none(), &f.schemes);
        assert_eq!(auth.handler.as_ref(), Some(&f.bearer));
    }

    #[test]
    fn test_resolve_undocumented_handler_has_no_scheme() {
        let mut f = fixture();
        let undocumented = AuthRef::new(allow);
        let route = route_with(&mut f)
            .with_auth(undocumented.clone())
            .with_policy(AuthPolicy::Required);
        let auth = RouteAuthResolution::resolve(&route, &AuthDefaults::none(), &f.schemes);

        assert_eq!(auth.handler, Some(undocumented));
        assert!(auth.scheme.is_none());
        assert!(auth.requirements().is_empty());
    }

    #[test]
    fn test_register_routes_skips_undocumentable_entries() {
        let mut f = fixture();
        let documented = f.contracts.handler(ok, RouteContract::default());
        let bare = HandlerRef::new(ok);
        let table = RouteTable::new()
            .route("GET /items/:id", documented.clone())
            .route("TRACE /items", documented.clone())
            .route("USE /api/docs", documented.clone())
            .route("/no-method", documented)
            .route("GET /bare", bare);

        let mut builder = DocumentBuilder::new();
        let context = RegistrationContext::new(&f.contracts);
        let summary = register_routes(&table, &context, &f.schemes, &mut builder);

        assert_eq!(summary, WalkSummary { documented: 1, skipped: 4 });
        let paths: Vec<_> = builder.document().paths.keys().collect();
        assert_eq!(paths, vec!["/items/{id}"]);
    }

    #[test]
    fn test_register_routes_registers_scheme_and_requirement() {
        let mut f = fixture();
        let handler = f.contracts.handler(ok, RouteContract::default());
        let table = RouteTable::new().route(
            "post /items",
            RouteDescription::new(handler).with_auth(f.bearer.clone()),
        );
        let context = RegistrationContext::new(&f.contracts).with_defaults(
            AuthDefaults::none().with_policy(AuthPolicy::Required),
        );

        let mut builder = DocumentBuilder::new();
        register_routes(&table, &context, &f.schemes, &mut builder);

        let doc = builder.document();
        assert!(doc.components.security_schemes.contains_key("bearerAuth"));
        let op = doc.paths["/items"].operation(HttpMethod::Post).unwrap();
        assert_eq!(op.security.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_scheme_registered_even_when_contract_missing() {
        let f = fixture();
        let table = RouteTable::new().route(
            "GET /private",
            RouteDescription::new(HandlerRef::new(ok))
                .with_auth(f.bearer.clone())
                .with_policy(AuthPolicy::Required),
        );
        let context = RegistrationContext::new(&f.contracts);

        let mut builder = DocumentBuilder::new();
        let summary = register_routes(&table, &context, &f.schemes, &mut builder);

        assert_eq!(summary.documented, 0);
        assert!(builder.document().paths.is_empty());
        assert!(builder
            .document()
            .components
            .security_schemes
            .contains_key("bearerAuth"));
    }
}
