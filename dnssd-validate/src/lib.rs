//! Input validation for DNS Service Discovery advertisements.
//!
//! Every check is a plain function that returns `Ok` for a usable value or a
//! [`ValidationError`] describing the first rule the value breaks. Nothing is
//! retained between calls.

pub mod error;
pub mod protocol;
pub mod types;
pub mod validate;

pub use error::{Result, ValidationError};
pub use types::{ServiceDefinition, ServiceType, TxtRecord, TxtValue};
