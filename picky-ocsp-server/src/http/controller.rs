use crate::authority::{AuthorityError, OcspAuthority};
use crate::http::middleware::log_middleware;
use crate::http::utils::method_not_allowed;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::{middleware, Router};
use std::sync::Arc;

const OCSP_RESPONSE_CONTENT_TYPE: &str = "application/ocsp-response";

/// Routes:
/// - `/statuses/{serial}`: `GET` reads and `POST` sets the status of a serial
/// - `/{base64 OCSP request}`: `GET` answers an OCSP request
pub fn router(authority: Arc<OcspAuthority>) -> Router {
    Router::new()
        .route("/statuses/", status_routes())
        .route("/statuses/*serial", status_routes())
        .fallback(ocsp_request)
        .layer(middleware::from_fn(log_middleware))
        .with_state(authority)
}

/// `HEAD` is routed explicitly, otherwise `get` would answer it.
fn status_routes() -> MethodRouter<Arc<OcspAuthority>> {
    get(get_status)
        .post(post_status)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

/// `/statuses/` addresses the empty serial.
fn serial_or_empty(serial: Option<Path<String>>) -> String {
    serial.map(|Path(serial)| serial).unwrap_or_default()
}

async fn get_status(State(authority): State<Arc<OcspAuthority>>, serial: Option<Path<String>>) -> String {
    authority.status(&serial_or_empty(serial)).to_string()
}

async fn post_status(
    State(authority): State<Arc<OcspAuthority>>,
    serial: Option<Path<String>>,
    body: Bytes,
) -> Result<String, AuthorityError> {
    Ok(authority.set_status(&serial_or_empty(serial), &body)?.to_string())
}

async fn ocsp_request(State(authority): State<Arc<OcspAuthority>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return method_not_allowed().await.into_response();
    }

    let path = uri.path();
    let encoded_request = path.strip_prefix('/').unwrap_or(path);

    match authority.respond(encoded_request) {
        Ok(der) => {
            let headers = [
                (CONTENT_TYPE, HeaderValue::from_static(OCSP_RESPONSE_CONTENT_TYPE)),
                (CONTENT_LENGTH, HeaderValue::from(der.len())),
            ];
            (headers, der).into_response()
        }
        Err(e) => e.into_response(),
    }
}
