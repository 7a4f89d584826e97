//! Documentation mount.
//!
//! [`DocsMount`] is an ordinary route handler. It answers `GET` and `HEAD`
//! at its base path with the Swagger UI page and, when a raw-JSON sub-path
//! is configured, with the live document at `<base><sub-path>`.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::{header, HeaderValue, Method, StatusCode};
use parking_lot::RwLock;
use periplus_core::{Handler, Request, Response};

use crate::builder::DocumentBuilder;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const JSON_CONTENT_TYPE: &str = "application/json";
const ALLOWED_METHODS: &str = "GET, HEAD";

/// Handler serving the documentation UI and, optionally, the raw document.
#[derive(Clone)]
pub struct DocsMount {
    base_path: String,
    json_path: Option<String>,
    html: Bytes,
    builder: Arc<RwLock<DocumentBuilder>>,
}

impl DocsMount {
    pub(crate) fn new(
        base_path: &str,
        json_sub_path: Option<&str>,
        builder: Arc<RwLock<DocumentBuilder>>,
    ) -> Self {
        let base_path = base_path.trim_end_matches('/').to_string();
        let json_path = json_sub_path.map(|sub| join_path(&base_path, sub));
        Self {
            base_path,
            json_path,
            html: Bytes::new(),
            builder,
        }
    }

    pub(crate) fn with_html(mut self, html: Bytes) -> Self {
        self.html = html;
        self
    }

    /// Path the UI is served at, without a trailing slash.
    #[must_use]
    pub fn path(&self) -> &str {
        if self.base_path.is_empty() {
            "/"
        } else {
            &self.base_path
        }
    }

    /// Full path of the raw JSON document, when served.
    #[must_use]
    pub fn json_path(&self) -> Option<&str> {
        self.json_path.as_deref()
    }

    fn document_json(&self) -> Response {
        match serde_json::to_vec(self.builder.read().document()) {
            Ok(json) => build_response(StatusCode::OK, Some(JSON_CONTENT_TYPE), Bytes::from(json)),
            Err(error) => {
                tracing::error!(error = %error, "failed to serialize OpenAPI document");
                build_response(StatusCode::INTERNAL_SERVER_ERROR, None, Bytes::new())
            }
        }
    }
}

impl Handler for DocsMount {
    fn call(&self, request: &Request) -> Response {
        let path = request.uri().path().trim_end_matches('/');

        let response = if path == self.base_path {
            build_response(StatusCode::OK, Some(HTML_CONTENT_TYPE), self.html.clone())
        } else if self.json_path.as_deref() == Some(path) {
            self.document_json()
        } else {
            return build_response(StatusCode::NOT_FOUND, None, Bytes::new());
        };

        match *request.method() {
            Method::GET => response,
            Method::HEAD => {
                let (parts, _) = response.into_parts();
                Response::from_parts(parts, Bytes::new())
            }
            _ => {
                let mut not_allowed =
                    build_response(StatusCode::METHOD_NOT_ALLOWED, None, Bytes::new());
                not_allowed
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
                not_allowed
            }
        }
    }
}

impl fmt::Debug for DocsMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocsMount")
            .field("base_path", &self.path())
            .field("json_path", &self.json_path)
            .field("html_len", &self.html.len())
            .finish_non_exhaustive()
    }
}

fn join_path(base: &str, sub: &str) -> String {
    let sub = sub.trim_end_matches('/');
    if sub.starts_with('/') {
        format!("{base}{sub}")
    } else {
        format!("{base}/{sub}")
    }
}

fn build_response(status: StatusCode, content_type: Option<&'static str>, body: Bytes) -> Response {
    let length = body.len();
    let mut response = Response::new(body);
    *response.status_mut() = status;

    let headers = response.headers_mut();
    if let Some(content_type) = content_type {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}
