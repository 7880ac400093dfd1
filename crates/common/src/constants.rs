use http::header::HeaderName;

pub const HEADER_CF_IPCOUNTRY: HeaderName = HeaderName::from_static("cf-ipcountry");
pub const HEADER_CF_IPCITY: HeaderName = HeaderName::from_static("cf-ipcity");
pub const HEADER_CF_IPCONTINENT: HeaderName = HeaderName::from_static("cf-ipcontinent");
pub const HEADER_CF_IPLONGITUDE: HeaderName = HeaderName::from_static("cf-iplongitude");
pub const HEADER_CF_IPLATITUDE: HeaderName = HeaderName::from_static("cf-iplatitude");
pub const HEADER_CF_REGION: HeaderName = HeaderName::from_static("cf-region");
pub const HEADER_CF_REGION_CODE: HeaderName = HeaderName::from_static("cf-region-code");
pub const HEADER_CF_METRO_CODE: HeaderName = HeaderName::from_static("cf-metro-code");
pub const HEADER_CF_POSTAL_CODE: HeaderName = HeaderName::from_static("cf-postal-code");
pub const HEADER_CF_TIMEZONE: HeaderName = HeaderName::from_static("cf-timezone");
