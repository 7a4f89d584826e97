//! Ready-made authentication handlers.
//!
//! Small header-checking guards for demos and tests. Pair them with a
//! [`SecuritySchemeDefinition`](periplus_docs::SecuritySchemeDefinition)
//! through [`OpenApiRegistry::documented_auth`](periplus_docs::OpenApiRegistry::documented_auth)
//! so the routes they guard are documented as secured.

use bytes::Bytes;
use http::{header, HeaderValue, StatusCode};
use periplus_core::{AuthHandler, Request, Response};

/// Accepts requests carrying `Authorization: Bearer <token>`.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use periplus::auth::bearer_token;
/// use periplus::prelude::*;
///
/// let guard = AuthRef::new(bearer_token("s3cret"));
/// let request = http::Request::builder()
///     .header("authorization", "Bearer s3cret")
///     .body(Bytes::new())
///     .unwrap();
/// assert!(guard.authenticate(&request).is_ok());
/// ```
pub fn bearer_token(token: impl Into<String>) -> impl AuthHandler {
    let expected = format!("Bearer {}", token.into());
    move |request: &Request| -> Result<(), Response> {
        match request.headers().get(header::AUTHORIZATION) {
            Some(value) if value.as_bytes() == expected.as_bytes() => Ok(()),
            Some(_) => {
                tracing::debug!("bearer token rejected");
                Err(unauthorized(Some("Bearer")))
            }
            None => Err(unauthorized(Some("Bearer"))),
        }
    }
}

/// Accepts requests whose `header` equals `key`.
pub fn api_key(header: &'static str, key: impl Into<String>) -> impl AuthHandler {
    let key = key.into();
    move |request: &Request| -> Result<(), Response> {
        match request.headers().get(header) {
            Some(value) if value.as_bytes() == key.as_bytes() => Ok(()),
            _ => {
                tracing::debug!(header, "API key missing or rejected");
                Err(unauthorized(None))
            }
        }
    }
}

fn unauthorized(challenge: Option<&'static str>) -> Response {
    let mut response = Response::new(Bytes::new());
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    if let Some(challenge) = challenge {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use periplus_core::AuthRef;

    fn request(name: &str, value: &str) -> Request {
        http::Request::builder()
            .header(name, value)
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_bearer_token() {
        let guard = AuthRef::new(bearer_token("abc"));

        assert!(guard.authenticate(&request("authorization", "Bearer abc")).is_ok());

        let wrong = guard
            .authenticate(&request("authorization", "Bearer xyz"))
            .unwrap_err();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let missing = guard
            .authenticate(&http::Request::new(Bytes::new()))
            .unwrap_err();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_api_key() {
        let guard = AuthRef::new(api_key("x-api-key", "k-1"));

        assert!(guard.authenticate(&request("x-api-key", "k-1")).is_ok());
        let rejected = guard.authenticate(&request("x-api-key", "k-2")).unwrap_err();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
        assert!(rejected.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
