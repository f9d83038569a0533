//! # graphscribe-core
//!
//! The deterministic knowledge-graph core for Graphscribe - THE LOGIC.
//!
//! This crate turns collaborator-supplied feed payloads into reconciled,
//! publishable graphs: an in-memory triple store with set semantics, a
//! named-graph dataset, a merge operator, an entity-reconciliation
//! graph-surgery protocol, a blank-node-to-persistent-URI identity
//! promoter, and a canonical XML literal encoder.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Performs no I/O: fetchers, the text-understanding service and the
//!   push client are collaborators behind trait contracts
//! - Is deterministic: `BTreeMap`/`BTreeSet` only, no randomness
//! - Follows "single writer, then read-only": each graph is mutated
//!   during one construction pass over one document, then treated as
//!   immutable once handed to the publisher
//! - Never reads ambient state; configuration is an explicit value
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod dataset;
pub mod feeds;
pub mod graph;
pub mod identity;
pub mod linker;
pub mod merge;
pub mod publish;
pub mod settings;
pub mod types;
pub mod vocab;
pub mod xmlc14n;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    BlankNode, Iri, Literal, ScribeError, SkipReason, Term, Triple, TriplePattern,
};

// =============================================================================
// RE-EXPORTS: Graph Model
// =============================================================================

pub use dataset::Dataset;
pub use graph::{Graph, Resource};
pub use merge::merge;

// =============================================================================
// RE-EXPORTS: Transformation Algorithms
// =============================================================================

pub use identity::IdentityPromoter;
pub use linker::{EntityCandidate, EntityLinker};
pub use xmlc14n::CanonicalXmlEncoder;

// =============================================================================
// RE-EXPORTS: Feed Mapping & Publishing
// =============================================================================

pub use feeds::news::ArticleRecord;
pub use feeds::papers::{PaperRecord, PapersFeed};
pub use publish::{
    DEFAULT_ENTITY_KINDS, EntityReconciler, ItemPublisher, PreparedDocument,
    finalize_for_publication, prepare_document, slugify,
};
pub use settings::Settings;
