//! Request and authentication handler references.
//!
//! Handlers are stored behind `Arc`s so that the same physical handler can be
//! mounted on many routes. Side tables (contracts, security schemes) key on a
//! [`HandlerId`] derived from the `Arc` allocation, so two structurally
//! identical handlers stay distinct unless the same reference is reused.

use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

/// HTTP request type seen by handlers.
pub type Request = http::Request<Bytes>;

/// HTTP response type produced by handlers.
pub type Response = http::Response<Bytes>;

/// A synchronous request handler.
///
/// Any `Fn(&Request) -> Response` closure is a handler.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use periplus_core::{HandlerRef, Request, Response};
///
/// let handler = HandlerRef::new(|_req: &Request| Response::new(Bytes::from_static(b"pong")));
/// let response = handler.call(&Request::new(Bytes::new()));
/// assert_eq!(response.body().as_ref(), b"pong");
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles a request and returns a response.
    fn call(&self, request: &Request) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync + 'static,
{
    fn call(&self, request: &Request) -> Response {
        self(request)
    }
}

/// An authentication handler (middleware) guarding a route.
///
/// Returns `Ok(())` to let the request through, or the rejection response.
pub trait AuthHandler: Send + Sync + 'static {
    /// Authenticates a request.
    fn authenticate(&self, request: &Request) -> Result<(), Response>;
}

impl<F> AuthHandler for F
where
    F: Fn(&Request) -> Result<(), Response> + Send + Sync + 'static,
{
    fn authenticate(&self, request: &Request) -> Result<(), Response> {
        self(request)
    }
}

/// Reference identity of a handler.
///
/// Valid for as long as some clone of the originating reference is alive;
/// tables keyed by `HandlerId` keep a clone to pin it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(usize);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

fn id_of<T: ?Sized>(arc: &Arc<T>) -> HandlerId {
    HandlerId(Arc::as_ptr(arc).cast::<()>() as usize)
}

/// Shared reference to a request handler.
#[derive(Clone)]
pub struct HandlerRef(Arc<dyn Handler>);

impl HandlerRef {
    /// Wraps a handler in a new reference with its own identity.
    #[must_use]
    pub fn new(handler: impl Handler) -> Self {
        Self(Arc::new(handler))
    }

    /// Wraps an already shared handler, keeping its identity.
    #[must_use]
    pub fn from_arc(handler: Arc<dyn Handler>) -> Self {
        Self(handler)
    }

    /// Returns the reference identity of this handler.
    #[must_use]
    pub fn id(&self) -> HandlerId {
        id_of(&self.0)
    }

    /// Invokes the handler.
    pub fn call(&self, request: &Request) -> Response {
        self.0.call(request)
    }
}

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for HandlerRef {}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerRef").field(&self.id()).finish()
    }
}

/// Shared reference to an authentication handler.
#[derive(Clone)]
pub struct AuthRef(Arc<dyn AuthHandler>);

impl AuthRef {
    /// Wraps an authentication handler in a new reference with its own identity.
    #[must_use]
    pub fn new(handler: impl AuthHandler) -> Self {
        Self(Arc::new(handler))
    }

    /// Wraps an already shared authentication handler, keeping its identity.
    #[must_use]
    pub fn from_arc(handler: Arc<dyn AuthHandler>) -> Self {
        Self(handler)
    }

    /// Returns the reference identity of this handler.
    #[must_use]
    pub fn id(&self) -> HandlerId {
        id_of(&self.0)
    }

    /// Runs the authentication check.
    pub fn authenticate(&self, request: &Request) -> Result<(), Response> {
        self.0.authenticate(request)
    }
}

impl PartialEq for AuthRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for AuthRef {}

impl fmt::Debug for AuthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthRef").field(&self.id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn ok(_req: &Request) -> Response {
        Response::new(Bytes::from_static(b"ok"))
    }

    fn deny(_req: &Request) -> Result<(), Response> {
        let mut response = Response::new(Bytes::new());
        *response.status_mut() = StatusCode::UNAUTHORIZED;
        Err(response)
    }

    #[test]
    fn test_handler_call() {
        let handler = HandlerRef::new(ok);
        let response = handler.call(&Request::new(Bytes::new()));
        assert_eq!(response.body().as_ref(), b"ok");
    }

    #[test]
    fn test_clones_share_identity() {
        let handler = HandlerRef::new(ok);
        let clone = handler.clone();
        assert_eq!(handler.id(), clone.id());
        assert_eq!(handler, clone);
    }

    #[test]
    fn test_identical_handlers_are_distinct() {
        let first = HandlerRef::new(ok);
        let second = HandlerRef::new(ok);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_from_arc_keeps_identity() {
        let shared: Arc<dyn AuthHandler> = Arc::new(deny);
        let a = AuthRef::from_arc(Arc::clone(&shared));
        let b = AuthRef::from_arc(shared);
        assert_eq!(a, b);
    }

    #[test]
    fn test_auth_handler_rejects() {
        let auth = AuthRef::new(deny);
        let result = auth.authenticate(&Request::new(Bytes::new()));
        assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_debug_shows_identity() {
        let handler = HandlerRef::new(ok);
        let rendered = format!("{handler:?}");
        assert!(rendered.starts_with("HandlerRef("));
    }
}
