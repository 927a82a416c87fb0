/// Result alias for validator calls
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A value rejected before it reaches a DNS-SD record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Protocol must be _tcp or _udp, got '{0}'")]
    InvalidProtocol(String),

    #[error("Service name can't be an empty string")]
    EmptyServiceName,

    #[error("Service '{0}' must start with '_'")]
    MissingUnderscore(String),

    #[error("Service '{0}' must start and end with a letter or digit")]
    ServiceBoundary(String),

    #[error("Service '{0}' should be only letters, digits, and hyphens")]
    ServiceCharset(String),

    #[error("Service '{0}' must not have consecutive hyphens")]
    ConsecutiveHyphens(String),

    #[error("Service '{0}' must have at least 1 letter")]
    NoLetter(String),

    #[error("Malformed service type '{0}', expected _name._tcp or _name._udp")]
    MalformedServiceType(String),

    #[error("{tag} name can't be an empty string")]
    EmptyLabel { tag: String },

    #[error("{tag} name '{value}' can't contain control chars")]
    ControlChars { tag: String, value: String },

    #[error("{tag} must be <= 63 bytes. {value} is {len}")]
    LabelTooLong { tag: String, value: String, len: usize },

    #[error("Port must be an integer between 0 and 65535, got {0}")]
    InvalidPort(String),

    #[error("Key '{0}' in TXT contains a '='")]
    KeyContainsEquals(String),

    #[error("Key '{0}' in TXT is not printable ascii")]
    KeyNotPrintable(String),

    #[error("Key '{0}' in TXT occurs more than once. (case insensitive)")]
    DuplicateKey(String),

    #[error("TXT values must be a string, buffer, number, or boolean. got {0}")]
    UnsupportedValue(String),

    #[error("Each key/value in TXT must be <= 255 bytes, '{key}' is {size}")]
    EntryTooLarge { key: String, size: usize },

    #[error("TXT record is > 1300 bytes, reached {0} at this entry")]
    RecordTooLarge(usize),
}
