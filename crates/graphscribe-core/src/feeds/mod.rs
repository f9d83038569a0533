//! # Feed Mapping
//!
//! Fixed schema-mapping tables that turn collaborator feed payloads into
//! graphs. Each source has one explicit table: the raw payload
//! deserializes into a validated intermediate record first, and only the
//! record is mapped to triples — no inline branching on raw field
//! presence.
//!
//! The fetchers themselves (HTTP, pagination, auth) are collaborators
//! and live outside this crate; these modules consume the payloads they
//! hand over.

pub mod news;
pub mod papers;

/// Collapse runs of whitespace (including newlines the feed wraps into
/// titles and abstracts) into single spaces.
pub(crate) fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Treat empty strings from the payload as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
