use http::header::{HeaderName, HeaderValue};
use http::Method;

/// Read-only view of an incoming request.
///
/// Header lookup is case-insensitive by construction: `HeaderName`
/// normalizes to lowercase, and multi-valued headers yield their first
/// value.
pub trait RequestWrapper {
    fn get_header(&self, name: HeaderName) -> Option<&HeaderValue>;

    fn get_headers(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)>;

    fn get_method(&self) -> &Method;
}
