//! # Entity Linker
//!
//! Turns entity candidates proposed by the text-understanding
//! collaborator into a typed subgraph, and performs the
//! location-promotion surgery that replaces a document's raw place node
//! with direct knowledge-base links.
//!
//! The linker never talks to the collaborator itself; it consumes the
//! already-parsed candidate list. An empty list means "no entities
//! found" and produces an empty subgraph, never an error.

use crate::graph::Graph;
use crate::types::{Iri, Literal, ScribeError, Term, Triple, TriplePattern};
use crate::vocab::{owl, rdf, schema};
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// ENTITY CANDIDATES
// =============================================================================

/// One candidate from the text-understanding collaborator: a surface
/// name, a raw type string, and zero or more knowledge-base URIs the
/// collaborator reconciled the name against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCandidate {
    /// Surface form of the entity as it appeared in the text.
    pub name: String,

    /// Raw type string; mapped through the fixed class table with a
    /// generic fallback, so unknown values are legal.
    #[serde(rename = "type")]
    pub kind: String,

    /// Knowledge-base URIs, one per base the collaborator matched.
    /// Empty strings are ignored during linking.
    #[serde(rename = "knowledgeBaseUris", default)]
    pub knowledge_base_uris: Vec<String>,
}

impl EntityCandidate {
    /// Create a candidate.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        knowledge_base_uris: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            knowledge_base_uris,
        }
    }

    /// Parse a collaborator response. Accepts either a bare JSON array of
    /// candidates or an object with an `entities` array. Entries missing
    /// a name or type are dropped rather than failing the batch.
    pub fn from_response_json(json: &str) -> Result<Vec<Self>, ScribeError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Response {
            Wrapped { entities: Vec<EntityCandidate> },
            Bare(Vec<EntityCandidate>),
        }

        let parsed: Response =
            serde_json::from_str(json).map_err(|e| ScribeError::Validation(e.to_string()))?;
        let candidates = match parsed {
            Response::Wrapped { entities } => entities,
            Response::Bare(entities) => entities,
        };
        Ok(candidates
            .into_iter()
            .filter(|c| !c.name.is_empty() && !c.kind.is_empty())
            .collect())
    }
}

// =============================================================================
// ENTITY LINKER
// =============================================================================

/// Stateless linking and graph-surgery operations.
pub struct EntityLinker;

impl EntityLinker {
    /// Fixed type table. Unrecognized kinds map to the generic Thing
    /// class; this is a fallback, never an error.
    #[must_use]
    pub fn class_for(kind: &str) -> Iri {
        match kind {
            "Person" => schema::PERSON.clone(),
            "Organization" => schema::ORGANIZATION.clone(),
            "Place" => schema::PLACE.clone(),
            _ => schema::THING.clone(),
        }
    }

    /// Build the entity subgraph for a document.
    ///
    /// Per candidate: one fresh blank node typed via the class table,
    /// named, linked with one `owl:sameAs` edge per non-empty
    /// knowledge-base URI (all of them; downstream consumers pick their
    /// preference), and connected from the document via `schema:mentions`.
    ///
    /// The returned graph mints `e…` blank labels so it can be merged
    /// with feed-produced graphs without label collisions.
    #[must_use]
    pub fn link(document: &Term, candidates: &[EntityCandidate]) -> Graph {
        Self::link_with_prefix(document, candidates, "e")
    }

    /// [`EntityLinker::link`] with an explicit blank-label prefix.
    /// Callers merging the output of several link passes over the same
    /// document give each pass its own prefix.
    #[must_use]
    pub fn link_with_prefix(
        document: &Term,
        candidates: &[EntityCandidate],
        prefix: &str,
    ) -> Graph {
        let mut graph = Graph::with_blank_prefix(prefix);

        for candidate in candidates {
            if candidate.name.is_empty() {
                continue;
            }

            let node = Term::Blank(graph.fresh_blank());
            let mut entity = graph.resource(node.clone());
            entity.set(rdf::TYPE.clone(), Term::Iri(Self::class_for(&candidate.kind)));
            entity.set(schema::NAME.clone(), Literal::new(candidate.name.clone()));

            for uri in &candidate.knowledge_base_uris {
                if !uri.is_empty() {
                    graph.add(Triple::new_unchecked(
                        node.clone(),
                        owl::SAME_AS.clone(),
                        Term::Iri(Iri::new(uri.clone())),
                    ));
                }
            }

            graph.add(Triple::new_unchecked(
                document.clone(),
                schema::MENTIONS.clone(),
                node,
            ));
        }

        debug!(candidates = candidates.len(), triples = graph.len(), "linked entities");
        graph
    }

    /// Location-promotion surgery.
    ///
    /// Invoked only when a document's location text was separately and
    /// successfully reconciled. `reconciled` is the [`EntityLinker::link`]
    /// output for that location text. Four steps, applied copy-then-swap:
    /// `article` is replaced only if all four succeed, otherwise it is
    /// left untouched and a [`ScribeError::SurgeryAbort`] is returned.
    ///
    /// 1. Remove the document's content-location edge to `old_location`.
    /// 2. Remove every triple whose subject is `old_location`.
    /// 3. Add a direct content-location edge from the document to every
    ///    same-as target of the reconciled place(s).
    /// 4. Drop the mentions edge and entity node the standard linking
    ///    step created for the location text; the result is returned as
    ///    the trimmed reconciled graph.
    ///
    /// The end state never carries both a mentions-entity node and a
    /// content-location edge describing the same place.
    pub fn promote_location(
        article: &mut Graph,
        reconciled: &Graph,
        document: &Term,
        old_location: &Term,
    ) -> Result<Graph, ScribeError> {
        let mut patched = article.clone();

        // Step 1: detach the stale location edge.
        let removed = patched.remove(&TriplePattern::new(
            Some(document.clone()),
            Some(schema::CONTENT_LOCATION.clone()),
            Some(old_location.clone()),
        ));
        if removed == 0 {
            return Err(ScribeError::SurgeryAbort {
                step: 1,
                reason: format!("document has no content-location edge to {old_location}"),
            });
        }

        // Step 2: delete the stale place entity entirely.
        patched.remove(&TriplePattern::about(old_location.clone()));

        // Step 3: link the document to every reconciled target.
        let place_class = Term::Iri(schema::PLACE.clone());
        let places: Vec<Term> = reconciled
            .subjects_with(&rdf::TYPE, &place_class)
            .cloned()
            .collect();
        let targets: Vec<Term> = places
            .iter()
            .flat_map(|place| reconciled.objects(place, &owl::SAME_AS))
            .cloned()
            .collect();
        if targets.is_empty() {
            return Err(ScribeError::SurgeryAbort {
                step: 3,
                reason: "reconciliation produced no same-as target".into(),
            });
        }
        for target in targets {
            patched.add(Triple::new_unchecked(
                document.clone(),
                schema::CONTENT_LOCATION.clone(),
                target,
            ));
        }

        // Step 4: the place is now a dedicated relation, not a mention.
        let mut trimmed = reconciled.clone();
        for place in &places {
            trimmed.remove(&TriplePattern::new(
                Some(document.clone()),
                Some(schema::MENTIONS.clone()),
                Some(place.clone()),
            ));
            trimmed.remove(&TriplePattern::about(place.clone()));
        }

        *article = patched;
        Ok(trimmed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
