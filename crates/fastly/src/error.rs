use error_stack::Report;
use fastly::http::header;
use fastly::Response;

use where_am_i_common::error::WhereAmIError;

/// Converts an error report into the HTTP error response sent to clients.
///
/// The full report (with attachments) goes to the log; clients only see
/// the top-level message.
pub fn to_error_response(err: &Report<WhereAmIError>) -> Response {
    log::error!("request failed: {:?}", err);

    let context = err.current_context();
    Response::from_status(context.status_code())
        .with_header(header::CONTENT_TYPE, "application/json")
        .with_body(serde_json::json!({ "error": context.to_string() }).to_string())
}
