use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

/// Adds CORS headers to every response, errors and preflights included.
/// The caller's `Origin` is echoed back verbatim, `*` when there is none.
pub async fn cors_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .cloned()
        .unwrap_or(HeaderValue::from_static("*"));

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.append(header::VARY, HeaderValue::from_static("Origin"));

    response
}
