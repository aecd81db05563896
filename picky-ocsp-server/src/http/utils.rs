use crate::authority::AuthorityError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl AuthorityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthorityError::NonUtf8Status(_)
            | AuthorityError::InvalidStatus(_)
            | AuthorityError::InvalidPercentEncoding(_)
            | AuthorityError::InvalidBase64(_)
            | AuthorityError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AuthorityError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthorityError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        (status, self.to_string()).into_response()
    }
}

pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
