//! Cross-origin access for the relay endpoint.
//!
//! The endpoint is meant to be called from arbitrary pages, so responses
//! carry `Access-Control-*` headers derived from the configured origin
//! allow-list, and `OPTIONS` preflights are answered directly.

use fastly::http::{header, StatusCode};
use fastly::Response;

use crate::http_wrapper::RequestWrapper;
use crate::settings::Settings;

/// How long browsers may cache a preflight grant, in seconds.
pub const PREFLIGHT_MAX_AGE_SECS: u32 = 86_400;

const WILDCARD_ORIGIN: &str = "*";

/// Resolves the `Access-Control-Allow-Origin` value for a request.
///
/// No `Origin` header or a wildcard configuration yields `*`; an origin
/// present in the configured list is echoed back; anything else yields
/// `null`, which browsers reject.
pub fn resolve_allowed_origin<T: RequestWrapper>(settings: &Settings, req: &T) -> String {
    let origin = req
        .get_header(header::ORIGIN)
        .and_then(|v| v.to_str().ok());

    match origin {
        None => WILDCARD_ORIGIN.to_string(),
        Some(origin) => {
            let allowed = &settings.cors.allowed_origins;
            if allowed.iter().any(|o| o == WILDCARD_ORIGIN) {
                WILDCARD_ORIGIN.to_string()
            } else if allowed.iter().any(|o| o == origin) {
                origin.to_string()
            } else {
                "null".to_string()
            }
        }
    }
}

/// Adds the cross-origin access headers to a response.
pub fn apply_cors_headers<T: RequestWrapper>(
    settings: &Settings,
    req: &T,
    response: &mut Response,
) {
    response.set_header(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        resolve_allowed_origin(settings, req),
    );
    response.set_header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS");
    response.set_header(header::ACCESS_CONTROL_ALLOW_HEADERS, "*");
    response.set_header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
}

/// Answers a CORS preflight with the access grant and a cache lifetime.
pub fn handle_preflight<T: RequestWrapper>(settings: &Settings, req: &T) -> Response {
    let mut response = Response::from_status(StatusCode::NO_CONTENT);
    apply_cors_headers(settings, req, &mut response);
    response.set_header(
        header::ACCESS_CONTROL_MAX_AGE,
        PREFLIGHT_MAX_AGE_SECS.to_string(),
    );
    response
}
