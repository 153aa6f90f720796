use crate::core::error::AppError;
use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        // Parse origins into HeaderValue
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Whether an `Authorization` header carries exactly `credentials`
/// (`"user:password"`) as HTTP basic auth
pub fn basic_credentials_match(auth_header: Option<&str>, credentials: &str) -> bool {
    auth_header
        .and_then(|h| h.strip_prefix("Basic "))
        .and_then(|encoded| BASE64_STANDARD.decode(encoded.trim()).ok())
        .and_then(|decoded| String::from_utf8(decoded).ok())
        .is_some_and(|creds| creds == credentials)
}

/// HTTP basic auth guard. `realm` is echoed in the `WWW-Authenticate`
/// challenge so browsers prompt for the right credentials.
pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
    realm: &'static str,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if basic_credentials_match(auth_header, &credentials) {
                return Ok(next.run(req).await);
            }

            tracing::warn!(
                "Rejected {} {} (realm '{}'): bad or missing credentials",
                req.method(),
                req.uri().path(),
                realm
            );

            let mut response =
                AppError::Unauthorized("Valid credentials required".to_string()).into_response();
            let challenge = HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm))
                .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, challenge);

            Err(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(creds: &str) -> String {
        format!("Basic {}", BASE64_STANDARD.encode(creds))
    }

    #[test]
    fn test_basic_credentials_match() {
        let header = basic("owner:secret");
        assert!(basic_credentials_match(Some(&header), "owner:secret"));
        assert!(!basic_credentials_match(Some(&header), "owner:other"));
        assert!(!basic_credentials_match(Some("Bearer abc"), "owner:secret"));
        assert!(!basic_credentials_match(Some("Basic !!!"), "owner:secret"));
        assert!(!basic_credentials_match(None, "owner:secret"));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let request = axum::http::Request::new(());
        let mut maker = MakeRequestUuid;
        let a = maker.make_request_id(&request).unwrap();
        let b = maker.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
