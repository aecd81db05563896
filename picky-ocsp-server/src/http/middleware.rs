use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

pub async fn log_middleware(request: Request, next: Next) -> Response {
    let uri = request.uri().path().to_owned();
    let method = request.method().to_owned();
    let response = next.run(request).await;
    log::info!("{} {} {}", method, uri, response.status());
    response
}
