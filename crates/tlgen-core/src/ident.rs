//! Minimal identifier normalization. Everything else (casing, keywords) is
//! the backend's business.

use tlgen_schema::NAMESPACE_SEPARATOR;

/// Prefix of synthesized vector wrapper names.
pub const VECTOR_WRAPPER_PREFIX: &str = "Vector_";

/// `messages.getHistory` -> `messages_getHistory`
#[must_use]
pub fn message_name(name: &str) -> String {
    name.replace(NAMESPACE_SEPARATOR, "_")
}

/// Field name after collision resolution; `index` is zero-based.
#[must_use]
pub fn disambiguated(name: &str, index: usize) -> String {
    format!("{name}_{}", index + 1)
}

#[must_use]
pub fn vector_wrapper_name(element: &str) -> String {
    format!("{VECTOR_WRAPPER_PREFIX}{element}")
}

///
/// TESTS
///
