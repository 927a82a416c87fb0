/// Transport protocol tokens accepted in a service type
pub const PROTOCOL_TCP: &str = "_tcp";
pub const PROTOCOL_UDP: &str = "_udp";

/// Default mDNS domain
pub const LOCAL_DOMAIN: &str = "local.";

/// Marker label placed between a subtype and its parent service type
pub const SUBTYPE_MARKER: &str = "_sub";

/// RFC 6335 allows 15 bytes after the leading underscore. Longer names are
/// logged, not rejected.
pub const SERVICE_NAME_ADVISORY_BYTES: usize = 16;

/// RFC 1035 label limit
pub const MAX_LABEL_BYTES: usize = 63;

/// Largest port number
pub const MAX_PORT: i64 = 0xFFFF;

/// A single TXT string is length-prefixed by one byte
pub const MAX_TXT_ENTRY_BYTES: usize = 255;

/// RFC 6763 section 6.2 recommends keeping the whole TXT record below this
pub const MAX_TXT_RECORD_BYTES: usize = 1300;

/// Default tag used in label error messages
pub const DEFAULT_LABEL_TAG: &str = "label";
