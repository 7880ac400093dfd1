use derive_more::{Display, Error};
use fastly::http::StatusCode;

/// Error type for the where-am-i service.
///
/// The relay itself has no failure branches; these variants cover the
/// ambient concerns around it (configuration, serialization, routing).
#[derive(Debug, Display, Error)]
pub enum WhereAmIError {
    /// Configuration could not be loaded or parsed.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// The response body could not be serialized.
    #[display("JSON error: {message}")]
    Json { message: String },

    /// No handler matched the request.
    #[display("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl WhereAmIError {
    /// The HTTP status code this error renders as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration { .. } | Self::Json { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}
