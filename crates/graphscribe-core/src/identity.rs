//! # Identity Promoter
//!
//! Rewrites a blank node to a minted persistent URI throughout a graph.
//! Blank-node labels have no meaning outside the process that created
//! them, so this must run before a graph is handed to the publishing
//! collaborator.

use crate::graph::Graph;
use crate::types::{BlankNode, Iri, Term, Triple};
use crate::vocab::foaf;

/// Stateless promotion operations.
pub struct IdentityPromoter;

impl IdentityPromoter {
    /// The persistent entity URI minted for a published document: the
    /// document resource URI plus a `#this` fragment.
    #[must_use]
    pub fn topic_iri(document: &Iri) -> Iri {
        Iri::new(format!("{}#this", document.as_str()))
    }

    /// Rewrite every occurrence of `node` (subject or object) to `iri`,
    /// leaving all other triples untouched. Triple count is preserved
    /// exactly. If `node` does not occur, returns the graph unchanged —
    /// a no-op, not an error.
    #[must_use]
    pub fn rename(graph: &Graph, node: &BlankNode, iri: &Iri) -> Graph {
        let target = Term::Blank(node.clone());
        if !graph.occurs(&target) {
            return graph.clone();
        }

        let replacement = Term::Iri(iri.clone());
        graph
            .iter()
            .map(|t| {
                let subject = if t.subject() == &target {
                    replacement.clone()
                } else {
                    t.subject().clone()
                };
                let object = if t.object() == &target {
                    replacement.clone()
                } else {
                    t.object().clone()
                };
                Triple::new_unchecked(subject, t.predicate().clone(), object)
            })
            .collect()
    }

    /// Promote `node` to the persistent URI derived from `document`
    /// (see [`IdentityPromoter::topic_iri`]) and add one
    /// `foaf:primaryTopic` edge from the document resource to it, so a
    /// consumer can navigate from the published document to the entity
    /// it primarily describes.
    ///
    /// If `node` does not occur, returns the graph unchanged with no
    /// topic edge added.
    #[must_use]
    pub fn promote(graph: &Graph, node: &BlankNode, document: &Iri) -> Graph {
        if !graph.occurs(&Term::Blank(node.clone())) {
            return graph.clone();
        }

        let topic = Self::topic_iri(document);
        let mut promoted = Self::rename(graph, node, &topic);
        promoted.add(Triple::new_unchecked(
            Term::Iri(document.clone()),
            foaf::PRIMARY_TOPIC.clone(),
            Term::Iri(topic),
        ));
        promoted
    }
}

// =============================================================================
// TESTS
// =============================================================================
