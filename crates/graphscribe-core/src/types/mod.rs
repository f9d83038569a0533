//! # Core Type Definitions
//!
//! This module contains the term-level types for the Graphscribe
//! deterministic graph core:
//! - Node identifiers (`Iri`, `BlankNode`)
//! - Data values (`Literal`)
//! - The term union (`Term`) and statements (`Triple`, `TriplePattern`)
//! - Error types (`ScribeError`) and the explicit skip value (`SkipReason`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module implement `Ord` for deterministic ordering in
//! `BTreeMap`/`BTreeSet`. Blank-node labels carry no identity outside the
//! graph that minted them.
//!
//! ## Textual surface
//!
//! `Display` renders the N-Triples-style diagnostic form: `<iri>`,
//! `_:label`, `"value"`, `"value"^^<datatype>`, `"value"@tag`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// NODE IDENTIFIERS
// =============================================================================

/// A globally unique identifier naming a resource or relation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Iri(pub String);

impl Iri {
    /// Create a new IRI from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the IRI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// A locally-scoped graph node with no identity outside its originating
/// graph. Two graphs may reuse the same label without denoting the same
/// node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlankNode(pub String);

impl BlankNode {
    /// Create a blank node with the given local label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Get the local label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

// =============================================================================
// LITERAL
// =============================================================================

/// A typed or language-tagged data value.
///
/// Invariant: a literal carries at most one of {datatype, language tag}.
/// The checked constructor [`Literal::with_parts`] is the only way to
/// supply both options, and it rejects the combination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    value: String,
    datatype: Option<Iri>,
    language: Option<String>,
}

impl Literal {
    /// Create a plain literal.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Create a literal with a datatype IRI.
    #[must_use]
    pub fn typed(value: impl Into<String>, datatype: Iri) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype),
            language: None,
        }
    }

    /// Create a language-tagged literal.
    #[must_use]
    pub fn lang_tagged(value: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: Some(tag.into()),
        }
    }

    /// Checked constructor for data-driven call sites where both options
    /// may arrive populated. A literal cannot be both typed and tagged.
    pub fn with_parts(
        value: impl Into<String>,
        datatype: Option<Iri>,
        language: Option<String>,
    ) -> Result<Self, ScribeError> {
        if datatype.is_some() && language.is_some() {
            return Err(ScribeError::Validation(
                "literal cannot carry both a datatype and a language tag".into(),
            ));
        }
        Ok(Self {
            value: value.into(),
            datatype,
            language,
        })
    }

    /// The lexical value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The datatype IRI, if any.
    #[must_use]
    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }

    /// The language tag, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.value.chars() {
            match c {
                '\\' => write!(f, "\\\\")?,
                '"' => write!(f, "\\\"")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                '\t' => write!(f, "\\t")?,
                _ => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")?;
        if let Some(dt) = &self.datatype {
            write!(f, "^^{dt}")?;
        } else if let Some(tag) = &self.language {
            write!(f, "@{tag}")?;
        }
        Ok(())
    }
}

// =============================================================================
// TERM
// =============================================================================

/// The term union: every position in a triple holds one of these.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A named node.
    Iri(Iri),
    /// A graph-scoped anonymous node.
    Blank(BlankNode),
    /// A data value; never a subject or predicate.
    Literal(Literal),
}

impl Term {
    /// True for terms that may appear in subject position.
    #[must_use]
    pub fn is_subject(&self) -> bool {
        !matches!(self, Term::Literal(_))
    }

    /// Borrow the IRI if this term is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Borrow the blank node if this term is one.
    #[must_use]
    pub fn as_blank(&self) -> Option<&BlankNode> {
        match self {
            Term::Blank(node) => Some(node),
            _ => None,
        }
    }

    /// Borrow the literal if this term is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::Blank(node)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => iri.fmt(f),
            Term::Blank(node) => node.fmt(f),
            Term::Literal(lit) => lit.fmt(f),
        }
    }
}

// =============================================================================
// TRIPLE
// =============================================================================

/// A single (subject, predicate, object) statement.
///
/// Compared by structural equality of all three terms. The predicate is
/// always an IRI; the subject is never a literal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    subject: Term,
    predicate: Iri,
    object: Term,
}

impl Triple {
    /// Checked constructor: rejects literal subjects.
    pub fn new(
        subject: impl Into<Term>,
        predicate: Iri,
        object: impl Into<Term>,
    ) -> Result<Self, ScribeError> {
        let subject = subject.into();
        if !subject.is_subject() {
            return Err(ScribeError::Validation(format!(
                "literal {subject} cannot be a triple subject"
            )));
        }
        Ok(Self {
            subject,
            predicate,
            object: object.into(),
        })
    }

    /// Unchecked constructor for call sites where the subject is already
    /// known to be an IRI or blank node (e.g. a freshly minted node).
    #[must_use]
    pub fn new_unchecked(subject: impl Into<Term>, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    /// The subject term.
    #[must_use]
    pub fn subject(&self) -> &Term {
        &self.subject
    }

    /// The predicate IRI.
    #[must_use]
    pub fn predicate(&self) -> &Iri {
        &self.predicate
    }

    /// The object term.
    #[must_use]
    pub fn object(&self) -> &Term {
        &self.object
    }

    /// True if the given term occurs in subject or object position.
    #[must_use]
    pub fn mentions(&self, term: &Term) -> bool {
        &self.subject == term || &self.object == term
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

// =============================================================================
// TRIPLE PATTERN
// =============================================================================

/// A wildcard match pattern over triples. `None` matches any term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    /// Subject to match, or any.
    pub subject: Option<Term>,
    /// Predicate to match, or any.
    pub predicate: Option<Iri>,
    /// Object to match, or any.
    pub object: Option<Term>,
}

impl TriplePattern {
    /// Create a pattern from optional components.
    #[must_use]
    pub fn new(subject: Option<Term>, predicate: Option<Iri>, object: Option<Term>) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// The pattern that matches every triple.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Every triple with the given subject, any predicate, any object.
    #[must_use]
    pub fn about(subject: Term) -> Self {
        Self::new(Some(subject), None, None)
    }

    /// Check a triple against this pattern.
    #[must_use]
    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject
            .as_ref()
            .is_none_or(|s| s == triple.subject())
            && self
                .predicate
                .as_ref()
                .is_none_or(|p| p == triple.predicate())
            && self.object.as_ref().is_none_or(|o| o == triple.object())
    }
}

// =============================================================================
// SKIP REASON
// =============================================================================

/// Explicit per-document skip value for the orchestrating caller.
///
/// One document failing to assemble must never abort the surrounding
/// batch, so assembly returns this value instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkipReason {
    /// The graph contains no typed document node.
    NoDocumentNode,
    /// The document node has neither a headline nor a name.
    NoHeadline,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoDocumentNode => write!(f, "no document node in graph"),
            SkipReason::NoHeadline => write!(f, "document has no headline"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Graphscribe core.
///
/// - No silent failures
/// - Use `Result<T, ScribeError>` for fallible operations
/// - The core should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum ScribeError {
    /// A term or feed record violates a construction rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A required single-value lookup found nothing. Not always fatal;
    /// callers decide whether absence matters.
    #[error("no value for ({subject} {predicate})")]
    PatternMiss {
        /// Rendered subject term.
        subject: String,
        /// Rendered predicate IRI.
        predicate: String,
    },

    /// A location-promotion step failed; the original graph is untouched.
    #[error("location promotion aborted at step {step}: {reason}")]
    SurgeryAbort {
        /// Which of the four steps failed (1-based).
        step: u8,
        /// What went wrong.
        reason: String,
    },

    /// The canonical encoder was given unparseable markup.
    #[error("markup parse error: {0}")]
    Parse(String),

    /// A publishing collaborator reported failure.
    #[error("publish failed: {0}")]
    Publish(String),
}

// =============================================================================
// TESTS
// =============================================================================
