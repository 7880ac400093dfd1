//! Geolocation header relay.
//!
//! The upstream edge network annotates every request with a set of
//! `CF-*` geolocation headers. This module reads the fixed allow-list of
//! those headers and echoes the ones present back as a flat JSON object.
//! Nothing is computed or validated; values pass through unchanged.

use fastly::http::{header, Method, StatusCode};
use fastly::Response;

use error_stack::Report;
use http::header::HeaderName;
use serde::{Deserialize, Serialize};

use crate::constants::{
    HEADER_CF_IPCITY, HEADER_CF_IPCONTINENT, HEADER_CF_IPCOUNTRY, HEADER_CF_IPLATITUDE,
    HEADER_CF_IPLONGITUDE, HEADER_CF_METRO_CODE, HEADER_CF_POSTAL_CODE, HEADER_CF_REGION,
    HEADER_CF_REGION_CODE, HEADER_CF_TIMEZONE,
};
use crate::cors::{apply_cors_headers, handle_preflight};
use crate::error::WhereAmIError;
use crate::http_wrapper::RequestWrapper;
use crate::settings::Settings;

/// Geolocation headers relayed from a single request.
///
/// Fields map one-to-one onto the allow-listed header names; a field is
/// `None` when the header was missing or empty, and `None` fields are
/// omitted from the serialized object entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    /// Two-letter country code (e.g., "US", "GB")
    #[serde(rename = "CF-IPCountry", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// City name
    #[serde(rename = "CF-IPCity", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Continent code
    #[serde(rename = "CF-IPContinent", skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    /// Longitude coordinate
    #[serde(rename = "CF-IPLongitude", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    /// Latitude coordinate
    #[serde(rename = "CF-IPLatitude", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    /// Region name
    #[serde(rename = "CF-Region", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Region code
    #[serde(rename = "CF-Region-Code", skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    /// DMA (Designated Market Area) / metro code
    #[serde(rename = "CF-Metro-Code", skip_serializing_if = "Option::is_none")]
    pub metro_code: Option<String>,
    /// Postal code
    #[serde(rename = "CF-Postal-Code", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// IANA timezone name
    #[serde(rename = "CF-Timezone", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl LocationSnapshot {
    /// Creates a new `LocationSnapshot` from the request's headers.
    ///
    /// Only the allow-listed header names are read. Lookup is
    /// case-insensitive, missing and empty values are skipped, and values
    /// are relayed unchanged.
    pub fn from_request<T: RequestWrapper>(req: &T) -> Self {
        Self {
            country: header_string(req, HEADER_CF_IPCOUNTRY),
            city: header_string(req, HEADER_CF_IPCITY),
            continent: header_string(req, HEADER_CF_IPCONTINENT),
            longitude: header_string(req, HEADER_CF_IPLONGITUDE),
            latitude: header_string(req, HEADER_CF_IPLATITUDE),
            region: header_string(req, HEADER_CF_REGION),
            region_code: header_string(req, HEADER_CF_REGION_CODE),
            metro_code: header_string(req, HEADER_CF_METRO_CODE),
            postal_code: header_string(req, HEADER_CF_POSTAL_CODE),
            timezone: header_string(req, HEADER_CF_TIMEZONE),
        }
    }

    /// Checks if no geolocation headers were present on the request.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn header_string<T: RequestWrapper>(req: &T, name: HeaderName) -> Option<String> {
    req.get_header(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Handles `/where-am-i` requests.
///
/// `GET` responds 200 with the location snapshot as JSON (`{}` when the
/// request carried none of the geolocation headers); `OPTIONS` answers the
/// CORS preflight; other methods are rejected.
///
/// # Errors
///
/// Returns an error only if the snapshot fails to serialize.
pub fn handle_where_am_i<T: RequestWrapper>(
    settings: &Settings,
    req: &T,
) -> Result<Response, Report<WhereAmIError>> {
    match *req.get_method() {
        Method::GET => {
            let snapshot = LocationSnapshot::from_request(req);
            if snapshot.is_empty() {
                log::debug!("no geolocation headers on request; headers present:");
                for (name, value) in req.get_headers() {
                    log::debug!("  {}: {:?}", name, value);
                }
            }

            let body = serde_json::to_string(&snapshot).map_err(|e| {
                Report::new(WhereAmIError::Json {
                    message: e.to_string(),
                })
            })?;

            let mut response = Response::from_status(StatusCode::OK)
                .with_header(header::CONTENT_TYPE, "application/json")
                .with_body(body);
            apply_cors_headers(settings, req, &mut response);
            Ok(response)
        }
        Method::OPTIONS => Ok(handle_preflight(settings, req)),
        _ => Ok(Response::from_status(StatusCode::METHOD_NOT_ALLOWED)
            .with_body("Method not allowed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::{create_test_settings, TestRequest};
    use fastly::http::{header, StatusCode};
    use serde_json::Value;

    fn body_json(resp: &mut Response) -> Value {
        serde_json::from_str(&resp.take_body_str()).expect("body should be valid JSON")
    }

    #[test]
    fn test_snapshot_relays_present_headers() {
        let req = TestRequest::get("https://edge.example/where-am-i")
            .with_header("CF-IPCountry", "US")
            .with_header("CF-IPCity", "Springfield");

        let snapshot = LocationSnapshot::from_request(&req);
        assert_eq!(snapshot.country.as_deref(), Some("US"));
        assert_eq!(snapshot.city.as_deref(), Some("Springfield"));
        assert!(snapshot.timezone.is_none());
    }

    #[test]
    fn test_snapshot_lookup_is_case_insensitive() {
        let req = TestRequest::get("https://edge.example/where-am-i")
            .with_header("cf-ipcountry", "DE");

        let snapshot = LocationSnapshot::from_request(&req);
        assert_eq!(snapshot.country.as_deref(), Some("DE"));
    }

    #[test]
    fn test_snapshot_skips_empty_values() {
        let req = TestRequest::get("https://edge.example/where-am-i")
            .with_header("CF-IPCity", "")
            .with_header("CF-IPCountry", "US");

        let snapshot = LocationSnapshot::from_request(&req);
        assert_eq!(snapshot.country.as_deref(), Some("US"));
        assert!(snapshot.city.is_none());
    }

    #[test]
    fn test_handler_returns_json_with_cors() {
        let settings = create_test_settings();
        let req = TestRequest::get("https://edge.example/where-am-i")
            .with_header("CF-IPCountry", "US")
            .with_header("CF-IPCity", "Springfield");

        let mut resp = handle_where_am_i(&settings, &req).expect("handler should succeed");
        assert_eq!(resp.get_status(), StatusCode::OK);
        assert_eq!(
            resp.get_header(header::CONTENT_TYPE)
                .and_then(|h| h.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            resp.get_header(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|h| h.to_str().ok()),
            Some("*")
        );

        let json = body_json(&mut resp);
        assert_eq!(json["CF-IPCountry"], "US");
        assert_eq!(json["CF-IPCity"], "Springfield");
    }

    #[test]
    fn test_handler_empty_request_returns_empty_object() {
        let settings = create_test_settings();
        let req = TestRequest::get("https://edge.example/where-am-i");

        let mut resp = handle_where_am_i(&settings, &req).expect("handler should succeed");
        assert_eq!(resp.get_status(), StatusCode::OK);
        assert_eq!(resp.take_body_str(), "{}");
    }

    #[test]
    fn test_handler_excludes_unlisted_headers() {
        let settings = create_test_settings();
        let req = TestRequest::get("https://edge.example/where-am-i")
            .with_header("CF-IPLatitude", "37.7749")
            .with_header("CF-IPLongitude", "-122.4194")
            .with_header("X-Custom", "foo");

        let mut resp = handle_where_am_i(&settings, &req).expect("handler should succeed");
        let json = body_json(&mut resp);
        let obj = json.as_object().expect("body should be an object");

        assert_eq!(obj.len(), 2);
        assert_eq!(json["CF-IPLatitude"], "37.7749");
        assert_eq!(json["CF-IPLongitude"], "-122.4194");
        assert!(!obj.contains_key("X-Custom"));
    }

    #[test]
    fn test_handler_is_idempotent() {
        let settings = create_test_settings();
        let make_request = || {
            TestRequest::get("https://edge.example/where-am-i")
                .with_header("CF-IPCountry", "FR")
                .with_header("CF-Timezone", "Europe/Paris")
        };

        let mut first = handle_where_am_i(&settings, &make_request()).expect("first request");
        let mut second = handle_where_am_i(&settings, &make_request()).expect("second request");
        assert_eq!(first.take_body_str(), second.take_body_str());
    }

    #[test]
    fn test_handler_answers_preflight() {
        let settings = create_test_settings();
        let req = TestRequest::options("https://edge.example/where-am-i")
            .with_header("Origin", "https://anything.example.com");

        let resp = handle_where_am_i(&settings, &req).expect("handler should succeed");
        assert_eq!(resp.get_status(), StatusCode::NO_CONTENT);
        assert!(resp
            .get_header(header::ACCESS_CONTROL_ALLOW_METHODS)
            .is_some());
    }

    #[test]
    fn test_handler_rejects_other_methods() {
        let settings = create_test_settings();
        let req = TestRequest::post("https://edge.example/where-am-i");

        let resp = handle_where_am_i(&settings, &req).expect("handler should succeed");
        assert_eq!(resp.get_status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
