use std::io::{Cursor, Read};
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::{error, info, warn};

use crate::error::{PipelineError, Result};
use crate::pipeline::AppContext;
use crate::server::handlers;
use crate::server::multipart::{extract_boundary, MultipartForm};

// ---------------------------------------------------------------------------
// Transport-independent request / response
// ---------------------------------------------------------------------------

/// A fully read request. Handlers only see this, so they can be exercised
/// without a socket.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// URL path without the query string.
    pub path: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str, content_type: &str, body: Vec<u8>) -> ApiRequest {
        let path = path.split('?').next().unwrap_or_default().to_string();
        ApiRequest { method, path, content_type: content_type.to_string(), body }
    }

    pub fn multipart(&self) -> Result<MultipartForm> {
        if !self.content_type.to_ascii_lowercase().starts_with("multipart/form-data") {
            return Err(PipelineError::invalid_input("Expected a multipart/form-data upload"));
        }
        let boundary = extract_boundary(&self.content_type)
            .ok_or_else(|| PipelineError::invalid_input("Multipart upload has no boundary"))?;
        Ok(MultipartForm::parse(&self.body, &boundary))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if self.body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(PipelineError::invalid_input("Missing JSON body"));
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, value: &T) -> ApiResponse {
        match serde_json::to_vec(value) {
            Ok(body) => ApiResponse { status, content_type: "application/json", body },
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                ApiResponse {
                    status: 500,
                    content_type: "application/json",
                    body: br#"{"error":"Internal error: response serialization failed"}"#.to_vec(),
                }
            }
        }
    }

    pub fn text(status: u16, body: &str) -> ApiResponse {
        ApiResponse { status, content_type: "text/plain; charset=utf-8", body: body.as_bytes().to_vec() }
    }

    pub fn no_content() -> ApiResponse {
        ApiResponse { status: 204, content_type: "text/plain; charset=utf-8", body: Vec::new() }
    }

    pub fn from_error(err: &PipelineError) -> ApiResponse {
        let status = err.status();
        if status >= 500 {
            error!(error = %err, status, "request failed");
        } else {
            warn!(error = %err, status, "request rejected");
        }
        ApiResponse::json(status, &err.to_json())
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }

    fn into_http(self, cors_origin: &str) -> Response<Cursor<Vec<u8>>> {
        let headers = response_headers(self.content_type, cors_origin);
        let len = self.body.len();
        Response::new(StatusCode(self.status), headers, Cursor::new(self.body), Some(len), None)
    }
}

/// Content type plus the CORS headers every response carries.
fn response_headers(content_type: &str, cors_origin: &str) -> Vec<Header> {
    [
        ("Content-Type", content_type),
        ("Access-Control-Allow-Origin", cors_origin),
        ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
    ]
    .iter()
    .filter_map(|(k, v)| Header::from_bytes(k.as_bytes(), v.as_bytes()).ok())
    .collect()
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

const ROUTES: &[&str] = &[
    "/",
    "/health",
    "/api/detect-disease",
    "/analyze",
    "/api/fertilizer-recommendation",
    "/api/recommend-plants",
    "/recommend",
    "/api/detect-soil",
];

/// Routes a request to its handler. Never panics on bad input; every error
/// becomes a JSON body with the matching status.
pub fn handle(req: &ApiRequest, ctx: &AppContext) -> ApiResponse {
    let result = match (&req.method, req.path.as_str()) {
        (Method::Options, _) => Ok(ApiResponse::no_content()),

        (Method::Get, "/") => Ok(ApiResponse::text(200, "AI Backend is Running")),
        (Method::Get, "/health") => handlers::health::handle(ctx),

        (Method::Post, "/api/detect-disease") => handlers::disease::detect_disease(req, ctx),
        (Method::Post, "/analyze") => handlers::disease::analyze(req, ctx),
        (Method::Post, "/api/fertilizer-recommendation") => handlers::fertilizer::handle(req, ctx),
        (Method::Post, "/api/recommend-plants") => handlers::plants::handle(req, ctx),
        (Method::Post, "/recommend") => handlers::plants::quick(req, ctx),
        (Method::Post, "/api/detect-soil") => handlers::soil::handle(req, ctx),

        (_, path) if ROUTES.contains(&path) => {
            Ok(ApiResponse::json(405, &serde_json::json!({ "error": "Method not allowed" })))
        }
        _ => Ok(ApiResponse::json(404, &serde_json::json!({ "error": "Not found" }))),
    };
    result.unwrap_or_else(|e| ApiResponse::from_error(&e))
}

fn read_body(request: &mut Request, limit: usize) -> Result<Vec<u8>> {
    if request.body_length().is_some_and(|len| len > limit) {
        return Err(PipelineError::PayloadTooLarge { limit });
    }
    let mut body = Vec::new();
    request.as_reader().take(limit as u64 + 1).read_to_end(&mut body)?;
    if body.len() > limit {
        return Err(PipelineError::PayloadTooLarge { limit });
    }
    Ok(body)
}

/// Reads, handles and answers one request on the calling thread.
pub fn dispatch(mut request: Request, ctx: Arc<AppContext>) {
    let started = Instant::now();
    let method = request.method().clone();
    let url = request.url().to_owned();
    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let response = match read_body(&mut request, ctx.max_upload_bytes) {
        Ok(body) => handle(&ApiRequest::new(method.clone(), &url, &content_type, body), &ctx),
        Err(e) => ApiResponse::from_error(&e),
    };
    let status = response.status;

    if let Err(e) = request.respond(response.into_http(&ctx.cors_origin)) {
        warn!(error = %e, "failed to write response");
    }
    info!(
        method = %method,
        path = %url,
        status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agronomy::RuleBook;
    use crate::server::test_support::tiny_classifier;

    fn ctx() -> AppContext {
        AppContext::new(Box::new(tiny_classifier()), RuleBook::builtin())
    }

    fn post_json(path: &str, body: &str) -> ApiRequest {
        ApiRequest::new(Method::Post, path, "application/json", body.as_bytes().to_vec())
    }

    #[test]
    fn root_is_plain_text() {
        let res = handle(&ApiRequest::new(Method::Get, "/", "", vec![]), &ctx());
        assert_eq!(res.status, 200);
        assert_eq!(res.body, b"AI Backend is Running");
    }

    #[test]
    fn preflight_and_unknown_routes() {
        let res = handle(&ApiRequest::new(Method::Options, "/api/detect-disease", "", vec![]), &ctx());
        assert_eq!(res.status, 204);
        let res = handle(&ApiRequest::new(Method::Get, "/nope", "", vec![]), &ctx());
        assert_eq!(res.status, 404);
        assert_eq!(res.body_json()["error"], "Not found");
        let res = handle(&ApiRequest::new(Method::Get, "/api/recommend-plants", "", vec![]), &ctx());
        assert_eq!(res.status, 405);
    }

    #[test]
    fn query_string_is_ignored_for_routing() {
        let res = handle(&ApiRequest::new(Method::Get, "/health?verbose=1", "", vec![]), &ctx());
        assert_eq!(res.status, 200);
    }

    #[test]
    fn malformed_json_is_a_client_error() {
        let res = handle(&post_json("/api/fertilizer-recommendation", "{not json"), &ctx());
        assert_eq!(res.status, 400);
        assert!(res.body_json()["error"].as_str().unwrap().starts_with("Invalid JSON body"));
        let res = handle(&post_json("/api/recommend-plants", ""), &ctx());
        assert_eq!(res.status, 400);
    }

    #[test]
    fn responses_carry_cors_headers() {
        let headers = response_headers("application/json", "http://localhost:5173");
        let origin = headers
            .iter()
            .find(|h| h.field.equiv("Access-Control-Allow-Origin"))
            .map(|h| h.value.as_str().to_owned());
        assert_eq!(origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(headers.len(), 4);
    }
}
