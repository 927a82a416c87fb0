use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::error::{Result, ValidationError};
use crate::protocol::{LOCAL_DOMAIN, SUBTYPE_MARKER};
use crate::validate;

/// A TXT record value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxtValue {
    /// Encoded as a bare key with no `=value`
    Bool(bool),
    Num(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl TxtValue {
    /// Name used in "unsupported value" errors
    pub fn type_name(&self) -> &'static str {
        match self {
            TxtValue::Bool(_) => "boolean",
            TxtValue::Num(_) => "number",
            TxtValue::Str(_) => "string",
            TxtValue::Bytes(_) => "buffer",
        }
    }

    /// NaN and infinities are not usable numbers
    pub fn is_supported(&self) -> bool {
        match self {
            TxtValue::Num(n) => n.is_finite(),
            _ => true,
        }
    }

    /// Bytes written after `key=`, or `None` for booleans which are written
    /// as a bare key.
    pub fn encoded(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            TxtValue::Bool(_) => None,
            TxtValue::Num(n) => Some(Cow::Owned(number_text(*n).into_bytes())),
            TxtValue::Str(s) => Some(Cow::Borrowed(s.as_bytes())),
            TxtValue::Bytes(b) => Some(Cow::Borrowed(b.as_slice())),
        }
    }
}

/// Decimal text of a TXT number: shortest round-trip digits, exponent form
/// below 1e-6 and from 1e21 up, and no sign on zero.
fn number_text(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    } else {
        n.to_string()
    }
}

impl From<&str> for TxtValue {
    fn from(value: &str) -> Self {
        TxtValue::Str(value.to_string())
    }
}

impl From<String> for TxtValue {
    fn from(value: String) -> Self {
        TxtValue::Str(value)
    }
}

impl From<bool> for TxtValue {
    fn from(value: bool) -> Self {
        TxtValue::Bool(value)
    }
}

impl From<f64> for TxtValue {
    fn from(value: f64) -> Self {
        TxtValue::Num(value)
    }
}

impl From<i32> for TxtValue {
    fn from(value: i32) -> Self {
        TxtValue::Num(f64::from(value))
    }
}

impl From<u16> for TxtValue {
    fn from(value: u16) -> Self {
        TxtValue::Num(f64::from(value))
    }
}

impl From<Vec<u8>> for TxtValue {
    fn from(value: Vec<u8>) -> Self {
        TxtValue::Bytes(value)
    }
}

/// Key/value pairs of a TXT record in insertion order.
///
/// Keys that differ only by case are kept side by side; rejecting them is
/// the validator's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxtRecord {
    entries: Vec<(String, TxtValue)>,
}

impl TxtRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`TxtRecord::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TxtValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TxtValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TxtValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<TxtValue>> FromIterator<(K, V)> for TxtRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = TxtRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for TxtRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TxtRecordVisitor;

impl<'de> Visitor<'de> for TxtRecordVisitor {
    type Value = TxtRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a table of TXT keys to strings, numbers, booleans or byte arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<TxtRecord, A::Error> {
        let mut record = TxtRecord::new();
        while let Some((key, value)) = access.next_entry::<String, TxtValue>()? {
            record.insert(key, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for TxtRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TxtRecordVisitor)
    }
}

/// A DNS-SD service type, e.g. `_http._tcp` with optional subtypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceType {
    pub name: String,
    pub protocol: String,
    pub subtypes: Vec<String>,
}

impl ServiceType {
    pub fn new(name: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protocol: protocol.into(),
            subtypes: Vec::new(),
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtypes.push(subtype.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate::service_name(&self.name)?;
        validate::protocol(&self.protocol)?;
        for subtype in &self.subtypes {
            validate::label_as(subtype, "Subtype")?;
        }
        Ok(())
    }

    /// Type qualified with a domain, e.g. `_http._tcp.local.`
    pub fn qualified(&self, domain: &str) -> String {
        format!("{}.{}.{}", self.name, self.protocol, domain)
    }

    /// Type qualified with the mDNS `local.` domain
    pub fn domain(&self) -> String {
        self.qualified(LOCAL_DOMAIN)
    }

    /// Subtype browse names, e.g. `_printer._sub._http._tcp.local.`
    pub fn subtype_domains(&self, domain: &str) -> Vec<String> {
        self.subtypes
            .iter()
            .map(|sub| format!("{}.{}.{}", sub, SUBTYPE_MARKER, self.qualified(domain)))
            .collect()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.protocol)?;
        for subtype in &self.subtypes {
            write!(f, ",{}", subtype)?;
        }
        Ok(())
    }
}

/// Parses `_name._proto[,_sub...]`. A trailing `.local.` is tolerated.
/// Only the shape is checked here; see [`ServiceType::validate`].
impl FromStr for ServiceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ValidationError::MalformedServiceType(s.to_string());

        let mut parts = s.split(',').map(str::trim);
        let main = parts.next().ok_or_else(malformed)?;
        let main = main
            .strip_suffix(".local.")
            .or_else(|| main.strip_suffix(".local"))
            .unwrap_or(main);

        let (name, protocol) = main.rsplit_once('.').ok_or_else(malformed)?;
        if name.is_empty() || protocol.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            name: name.to_string(),
            protocol: protocol.to_string(),
            subtypes: parts.map(str::to_string).collect(),
        })
    }
}

impl TryFrom<String> for ServiceType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ServiceType> for String {
    fn from(value: ServiceType) -> Self {
        value.to_string()
    }
}

/// One service advertisement as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Instance name, e.g. "Office Printer"
    pub instance: String,

    #[serde(rename = "type")]
    pub service_type: ServiceType,

    /// Port as given; may be fractional or out of range until validated
    pub port: f64,

    /// Host label without the domain, e.g. "printer-box"
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub addresses: Vec<String>,

    #[serde(default)]
    pub txt: TxtRecord,
}

impl ServiceDefinition {
    /// Runs every check in advertisement order and returns the first failure
    pub fn validate(&self) -> Result<()> {
        validate::label_as(&self.instance, "Instance")?;
        self.service_type.validate()?;
        validate::port_number(self.port)?;
        if let Some(host) = &self.host {
            validate::label_as(host, "Hostname")?;
        }
        validate::txt(&self.txt)?;
        Ok(())
    }
}
