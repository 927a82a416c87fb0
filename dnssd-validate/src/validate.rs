use std::collections::HashSet;
use crate::error::{Result, ValidationError};
use crate::protocol::{
    DEFAULT_LABEL_TAG, MAX_LABEL_BYTES, MAX_PORT, MAX_TXT_ENTRY_BYTES, MAX_TXT_RECORD_BYTES,
    PROTOCOL_TCP, PROTOCOL_UDP, SERVICE_NAME_ADVISORY_BYTES,
};
use crate::types::TxtRecord;

/// Validates a transport protocol token
pub fn protocol(value: &str) -> Result<()> {
    if value != PROTOCOL_TCP && value != PROTOCOL_UDP {
        return Err(ValidationError::InvalidProtocol(value.to_string()));
    }

    Ok(())
}

/// Validates a service name such as `_http`.
///
/// Names longer than 15 bytes after the underscore are accepted; they only
/// produce a debug event.
pub fn service_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyServiceName);
    }

    let Some(body) = value.strip_prefix('_') else {
        return Err(ValidationError::MissingUnderscore(value.to_string()));
    };

    if value.len() > SERVICE_NAME_ADVISORY_BYTES {
        tracing::debug!("Service '{}' is > 15 bytes", value);
    }

    let starts_ok = body.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let ends_ok = body.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
    if !starts_ok || !ends_ok {
        return Err(ValidationError::ServiceBoundary(value.to_string()));
    }

    if !body.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::ServiceCharset(value.to_string()));
    }

    if body.contains("--") {
        return Err(ValidationError::ConsecutiveHyphens(value.to_string()));
    }

    if !body.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::NoLetter(value.to_string()));
    }

    Ok(())
}

/// Validates a DNS label, reporting failures as `label`
pub fn label(value: &str) -> Result<()> {
    label_as(value, DEFAULT_LABEL_TAG)
}

/// Validates a DNS label. `tag` names the field in error messages
/// (e.g. "Instance", "Hostname") and has no effect on the outcome.
pub fn label_as(value: &str, tag: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyLabel { tag: tag.to_string() });
    }

    if value.chars().any(|c| c.is_ascii_control()) {
        return Err(ValidationError::ControlChars {
            tag: tag.to_string(),
            value: value.to_string(),
        });
    }

    if value.len() > MAX_LABEL_BYTES {
        return Err(ValidationError::LabelTooLong {
            tag: tag.to_string(),
            value: value.to_string(),
            len: value.len(),
        });
    }

    Ok(())
}

/// Validates an integer port, returning it narrowed to `u16`
pub fn port(value: i64) -> Result<u16> {
    if value <= 0 || value > MAX_PORT {
        return Err(ValidationError::InvalidPort(value.to_string()));
    }
    u16::try_from(value).map_err(|_| ValidationError::InvalidPort(value.to_string()))
}

/// Validates a port supplied as a float. Fractional, NaN and infinite
/// values are rejected.
pub fn port_number(value: f64) -> Result<u16> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ValidationError::InvalidPort(value.to_string()));
    }
    if value <= 0.0 || value > MAX_PORT as f64 {
        return Err(ValidationError::InvalidPort(value.to_string()));
    }
    Ok(value as u16)
}

/// Validates the rdata of a TXT record.
///
/// Entries are checked in record order and the first violation is returned.
/// The size limits count each entry as its key, plus `=value` and the length
/// byte for anything that is not a boolean.
pub fn txt(record: &TxtRecord) -> Result<()> {
    let mut size_total = 0usize;
    let mut seen = HashSet::new();

    for (key, value) in record.iter() {
        let mut size = key.len();

        if key.contains('=') {
            return Err(ValidationError::KeyContainsEquals(key.to_string()));
        }

        if !key.chars().all(|c| (' '..='~').contains(&c)) {
            return Err(ValidationError::KeyNotPrintable(key.to_string()));
        }

        if !seen.insert(key.to_lowercase()) {
            return Err(ValidationError::DuplicateKey(key.to_string()));
        }

        if !value.is_supported() {
            return Err(ValidationError::UnsupportedValue(value.type_name().to_string()));
        }

        if let Some(encoded) = value.encoded() {
            // '=' separator plus the length byte ahead of "key=value"
            size += encoded.len() + 2;
        }

        size_total += size;

        if size > MAX_TXT_ENTRY_BYTES {
            return Err(ValidationError::EntryTooLarge {
                key: key.to_string(),
                size,
            });
        }

        if size_total > MAX_TXT_RECORD_BYTES {
            return Err(ValidationError::RecordTooLarge(size_total));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TxtValue;

    #[test]
    fn test_protocol_accepts_only_tcp_and_udp() {
        assert!(protocol("_tcp").is_ok());
        assert!(protocol("_udp").is_ok());

        for bad in ["", "tcp", "_TCP", "_sctp", "_tcp ", " _udp"] {
            assert!(
                matches!(protocol(bad), Err(ValidationError::InvalidProtocol(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_protocol_error_message() {
        let err = protocol("_xyz").unwrap_err();
        assert_eq!(err.to_string(), "Protocol must be _tcp or _udp, got '_xyz'");

        let err = protocol("").unwrap_err();
        assert_eq!(err.to_string(), "Protocol must be _tcp or _udp, got ''");
    }

    #[test]
    fn test_service_name_valid() {
        assert!(service_name("_http").is_ok());
        assert!(service_name("_a-b").is_ok());
        assert!(service_name("_ipp").is_ok());
        assert!(service_name("_x1").is_ok());
    }

    #[test]
    fn test_service_name_invalid() {
        assert_eq!(service_name(""), Err(ValidationError::EmptyServiceName));
        assert!(matches!(service_name("http"), Err(ValidationError::MissingUnderscore(_))));
        assert!(matches!(service_name("_"), Err(ValidationError::ServiceBoundary(_))));
        assert!(matches!(service_name("_-http"), Err(ValidationError::ServiceBoundary(_))));
        assert!(matches!(service_name("_http-"), Err(ValidationError::ServiceBoundary(_))));
        assert!(matches!(service_name("_ht_tp"), Err(ValidationError::ServiceCharset(_))));
        assert!(matches!(service_name("_ht.tp"), Err(ValidationError::ServiceCharset(_))));
        assert!(matches!(service_name("_ht--tp"), Err(ValidationError::ConsecutiveHyphens(_))));
        assert!(matches!(service_name("_123"), Err(ValidationError::NoLetter(_))));
        assert!(matches!(service_name("_1-2"), Err(ValidationError::NoLetter(_))));
    }

    #[test]
    fn test_service_name_non_ascii_letters_rejected() {
        assert!(matches!(service_name("_héllo"), Err(ValidationError::ServiceCharset(_))));
    }

    #[test]
    fn test_service_name_long_is_advisory_only() {
        let long = format!("_{}", "a".repeat(40));
        assert!(long.len() > SERVICE_NAME_ADVISORY_BYTES);
        assert!(service_name(&long).is_ok());
    }

    #[test]
    fn test_label_length_boundary() {
        assert!(label(&"a".repeat(63)).is_ok());

        let err = label(&"a".repeat(64)).unwrap_err();
        assert!(matches!(err, ValidationError::LabelTooLong { len: 64, .. }));
    }

    #[test]
    fn test_label_counts_bytes_not_chars() {
        // 32 two-byte characters
        let label_value = "é".repeat(32);
        assert_eq!(label_value.chars().count(), 32);
        assert!(matches!(label(&label_value), Err(ValidationError::LabelTooLong { len: 64, .. })));
    }

    #[test]
    fn test_label_rejects_empty_and_control_chars() {
        assert!(matches!(label(""), Err(ValidationError::EmptyLabel { .. })));
        assert!(matches!(label("a\x01b"), Err(ValidationError::ControlChars { .. })));
        assert!(matches!(label("tab\there"), Err(ValidationError::ControlChars { .. })));
        assert!(matches!(label("del\x7f"), Err(ValidationError::ControlChars { .. })));
        assert!(label("Living Room Speaker").is_ok());
        assert!(label("Café (2)").is_ok());
    }

    #[test]
    fn test_label_tag_only_changes_message() {
        let default = label("").unwrap_err();
        let tagged = label_as("", "Instance").unwrap_err();

        assert_eq!(default.to_string(), "label name can't be an empty string");
        assert_eq!(tagged.to_string(), "Instance name can't be an empty string");
        assert!(label_as("ok", "Instance").is_ok());
    }

    #[test]
    fn test_port_bounds() {
        assert!(port(0).is_err());
        assert!(port(-1).is_err());
        assert_eq!(port(1), Ok(1));
        assert_eq!(port(65535), Ok(65535));
        assert!(port(65536).is_err());
    }

    #[test]
    fn test_port_number_rejects_non_integers() {
        assert_eq!(port_number(8080.0), Ok(8080));
        assert!(matches!(port_number(3.5), Err(ValidationError::InvalidPort(_))));
        assert!(port_number(f64::NAN).is_err());
        assert!(port_number(f64::INFINITY).is_err());
        assert!(port_number(0.0).is_err());
        assert!(port_number(65536.0).is_err());
    }

    #[test]
    fn test_txt_simple_record() {
        let record = TxtRecord::new().with("foo", "bar");
        assert!(txt(&record).is_ok());
        assert!(txt(&TxtRecord::new()).is_ok());
    }

    #[test]
    fn test_txt_duplicate_key_case_insensitive() {
        let record = TxtRecord::new().with("Foo", "1").with("foo", "2");
        let err = txt(&record).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateKey("foo".to_string()));
    }

    #[test]
    fn test_txt_key_rules() {
        let record = TxtRecord::new().with("a=b", "x");
        assert!(matches!(txt(&record), Err(ValidationError::KeyContainsEquals(_))));

        let record = TxtRecord::new().with("caf\u{e9}", "x");
        assert!(matches!(txt(&record), Err(ValidationError::KeyNotPrintable(_))));

        let record = TxtRecord::new().with("new\nline", "x");
        assert!(matches!(txt(&record), Err(ValidationError::KeyNotPrintable(_))));
    }

    #[test]
    fn test_txt_rejects_non_finite_numbers() {
        let record = TxtRecord::new().with("n", TxtValue::Num(f64::NAN));
        let err = txt(&record).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedValue("number".to_string()));

        let record = TxtRecord::new().with("n", 42);
        assert!(txt(&record).is_ok());
    }

    #[test]
    fn test_txt_boolean_counts_key_only() {
        // 255-byte key alone fits; as key=value it would not
        let key = "k".repeat(255);
        assert!(txt(&TxtRecord::new().with(key.as_str(), true)).is_ok());
        assert!(txt(&TxtRecord::new().with(key.as_str(), false)).is_ok());

        let err = txt(&TxtRecord::new().with(key.as_str(), "")).unwrap_err();
        assert!(matches!(err, ValidationError::EntryTooLarge { size: 257, .. }));
    }

    #[test]
    fn test_txt_entry_limit() {
        // 1 + 252 + 2 = 255
        let record = TxtRecord::new().with("k", "v".repeat(252));
        assert!(txt(&record).is_ok());

        let record = TxtRecord::new().with("k", "v".repeat(253));
        assert!(matches!(txt(&record), Err(ValidationError::EntryTooLarge { size: 256, .. })));

        let record = TxtRecord::new().with("buf", vec![0u8; 250]);
        assert!(txt(&record).is_ok());
        let record = TxtRecord::new().with("buf", vec![0u8; 251]);
        assert!(txt(&record).is_err());
    }

    #[test]
    fn test_txt_total_limit_fails_at_crossing_entry() {
        // Each entry: 2-byte key + 46-byte value + 2 = 50 bytes
        let mut record = TxtRecord::new();
        for i in 0..26 {
            record.insert(format!("{:02}", i), "v".repeat(46));
        }
        // 26 * 50 = 1300, exactly at the limit
        assert!(txt(&record).is_ok());

        record.insert("zz", "v".repeat(46));
        let err = txt(&record).unwrap_err();
        assert_eq!(err, ValidationError::RecordTooLarge(1350));
    }

    #[test]
    fn test_txt_first_violation_wins() {
        let record = TxtRecord::new()
            .with("ok", "1")
            .with("a=b", "2")
            .with("OK", "3");
        assert!(matches!(txt(&record), Err(ValidationError::KeyContainsEquals(_))));
    }

    #[test]
    fn test_validators_are_idempotent() {
        let record = TxtRecord::new().with("Foo", "1").with("foo", "2");
        assert_eq!(txt(&record), txt(&record));
        assert_eq!(service_name("_ht--tp"), service_name("_ht--tp"));
        assert_eq!(label("a\x01"), label("a\x01"));
        assert_eq!(port(0), port(0));
        assert_eq!(protocol("_tcp"), protocol("_tcp"));
    }
}
