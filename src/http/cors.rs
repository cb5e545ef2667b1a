use axum::http::HeaderValue;
use axum::response::Response;

/// Attach `Access-Control-Allow-Origin: *` to a response.
///
/// Applied as a `map_response` layer so every response, including error
/// bodies and preflights, carries the header.
pub async fn add_cors(mut resp: Response) -> Response {
    resp.headers_mut()
        .insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    resp
}

/// Attach the headers only a preflight response carries.
pub fn add_preflight_headers(mut resp: Response) -> Response {
    let headers = resp.headers_mut();
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    resp
}
