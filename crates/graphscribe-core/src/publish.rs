//! # Publishing Contracts & Per-Document Assembly
//!
//! The core never performs network calls; the text-understanding and
//! push collaborators live behind the traits defined here. What the core
//! does own is the pure per-document assembly: feed graph + linked
//! entities (+ location surgery) merged into one publishable graph, and
//! the final identity promotion once the publisher has minted an item
//! URI.
//!
//! One document failing to assemble must never abort the batch, so
//! assembly returns an explicit [`SkipReason`] instead of an error.

use crate::graph::Graph;
use crate::identity::IdentityPromoter;
use crate::linker::{EntityCandidate, EntityLinker};
use crate::merge::merge;
use crate::types::{Iri, ScribeError, SkipReason, Term};
use crate::vocab::{rdf, schema};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, warn};

/// Entity kinds requested from the text-understanding collaborator when
/// the caller has no preference.
pub const DEFAULT_ENTITY_KINDS: &[&str] = &["Person", "Organization", "Place"];

// =============================================================================
// COLLABORATOR CONTRACTS
// =============================================================================

/// The text-understanding collaborator: proposes candidate entities and
/// knowledge-base links for a piece of text.
///
/// An empty result means "no entities found" — implementations report
/// their own failures the same way, and the core simply proceeds with
/// zero entities for that call.
pub trait EntityReconciler {
    /// Propose candidates of the whitelisted kinds for `text`.
    fn reconcile(&self, text: &str, entity_kinds: &[&str]) -> Vec<EntityCandidate>;
}

/// The publishing collaborator: mints item URIs in a container and
/// pushes finished graphs.
pub trait ItemPublisher {
    /// Create an item under `container`; returns the new item URI.
    fn create_item(&mut self, container: &Iri, title: &str, slug: &str)
    -> Result<Iri, ScribeError>;

    /// Push a finished graph to the item; returns the status code.
    fn push(&mut self, item: &Iri, graph: &Graph) -> Result<u16, ScribeError>;
}

/// Derive a URL-safe slug from a title: lowercase, spaces to dashes,
/// everything outside the unreserved set percent-encoded.
#[must_use]
pub fn slugify(title: &str) -> String {
    const SLUG_SET: &AsciiSet = &NON_ALPHANUMERIC
        .remove(b'-')
        .remove(b'_')
        .remove(b'.')
        .remove(b'~');
    let lowered = title.to_lowercase().replace(' ', "-");
    utf8_percent_encode(&lowered, SLUG_SET).to_string()
}

// =============================================================================
// PER-DOCUMENT ASSEMBLY
// =============================================================================

/// A document graph assembled and ready for an item URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDocument {
    /// The merged graph: feed triples, linked entities, promoted location.
    pub graph: Graph,
    /// The document node within [`PreparedDocument::graph`].
    pub document: Term,
    /// Headline used for item creation.
    pub headline: String,
    /// Slug derived from the headline.
    pub slug: String,
}

/// Assemble one document: link entities found in the body, promote the
/// location when it reconciles, and merge everything into a single
/// graph.
///
/// A failed location promotion is not fatal — the raw place survives and
/// the abort is logged. Missing document node or headline yields a
/// [`SkipReason`] so the orchestrating caller can log and continue with
/// the next document.
pub fn prepare_document<R>(
    article: &Graph,
    reconciler: &R,
    entity_kinds: &[&str],
) -> Result<PreparedDocument, SkipReason>
where
    R: EntityReconciler + ?Sized,
{
    let document = article
        .first_subject(&rdf::TYPE, &Term::Iri(schema::ARTICLE.clone()))
        .or_else(|| {
            article.first_subject(&rdf::TYPE, &Term::Iri(schema::SCHOLARLY_ARTICLE.clone()))
        })
        .cloned()
        .ok_or(SkipReason::NoDocumentNode)?;

    let headline = article
        .value(&document, &schema::HEADLINE)
        .or_else(|| article.value(&document, &schema::NAME))
        .and_then(Term::as_literal)
        .map(|l| l.value().to_string())
        .ok_or(SkipReason::NoHeadline)?;

    let mut working = article.clone();
    let mut sections: Vec<Graph> = Vec::new();

    // Entities mentioned in the body text.
    if let Some(Term::Literal(body)) = article.value(&document, &schema::ARTICLE_BODY) {
        let candidates = reconciler.reconcile(body.value(), entity_kinds);
        if candidates.is_empty() {
            debug!("no entities found in body");
        } else {
            sections.push(EntityLinker::link(&document, &candidates));
        }
    }

    // Location promotion, when the feed supplied a place and the
    // collaborator reconciles it.
    if let Some(old_location) = article.value(&document, &schema::CONTENT_LOCATION).cloned() {
        let place_text = article
            .value(&old_location, &schema::NAME)
            .or_else(|| article.value(&old_location, &schema::ADDRESS_COUNTRY))
            .and_then(Term::as_literal)
            .map(|l| l.value().to_string());

        if let Some(text) = place_text {
            let candidates = reconciler.reconcile(&text, &["Place"]);
            if !candidates.is_empty() {
                // Distinct prefix: this is a second link pass over the
                // same document, and its labels must not collide with
                // the body-entity pass when the graphs are merged.
                let reconciled = EntityLinker::link_with_prefix(&document, &candidates, "l");
                match EntityLinker::promote_location(
                    &mut working,
                    &reconciled,
                    &document,
                    &old_location,
                ) {
                    Ok(trimmed) => sections.push(trimmed),
                    Err(error) => {
                        warn!(%error, "location promotion aborted; keeping raw location");
                    }
                }
            }
        }
    }

    let graph = merge(std::iter::once(&working).chain(sections.iter()));
    let slug = slugify(&headline);
    Ok(PreparedDocument {
        graph,
        document,
        headline,
        slug,
    })
}

/// Give the assembled document its permanent identity. Blank document
/// nodes are promoted to `{item}#this` with a primary-topic edge;
/// documents that already carry an IRI pass through unchanged.
#[must_use]
pub fn finalize_for_publication(prepared: &PreparedDocument, item: &Iri) -> Graph {
    match &prepared.document {
        Term::Blank(node) => IdentityPromoter::promote(&prepared.graph, node, item),
        _ => prepared.graph.clone(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Literal, Triple, TriplePattern};
    use crate::vocab::{foaf, owl};

    /// Canned collaborator: returns fixed candidates per input text.
    struct FixedReconciler(Vec<(&'static str, Vec<EntityCandidate>)>);

    impl EntityReconciler for FixedReconciler {
        fn reconcile(&self, text: &str, _entity_kinds: &[&str]) -> Vec<EntityCandidate> {
            self.0
                .iter()
                .find(|(needle, _)| text.contains(needle))
                .map(|(_, candidates)| candidates.clone())
                .unwrap_or_default()
        }
    }

    fn article_graph() -> Graph {
        let mut graph = Graph::new();
        let article = Term::Blank(graph.fresh_blank());
        let place = Term::Blank(graph.fresh_blank());
        let mut doc = graph.resource(article.clone());
        doc.set(rdf::TYPE.clone(), Term::Iri(schema::ARTICLE.clone()));
        doc.set(schema::HEADLINE.clone(), Literal::new("Summit in Paris"));
        doc.set(
            schema::ARTICLE_BODY.clone(),
            Literal::new("Delegates from ACME Corp met in Paris."),
        );
        graph.add(Triple::new_unchecked(
            article.clone(),
            schema::CONTENT_LOCATION.clone(),
            place.clone(),
        ));
        let mut location = graph.resource(place);
        location.set(rdf::TYPE.clone(), Term::Iri(schema::PLACE.clone()));
        location.set(schema::NAME.clone(), Literal::new("Paris"));
        graph
    }

    #[test]
    fn slugify_matches_expected_form() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Graphs & Streams"), "graphs-%26-streams");
        assert_eq!(slugify("Rust 2024"), "rust-2024");
    }

    #[test]
    fn prepare_links_entities_and_promotes_location() {
        let reconciler = FixedReconciler(vec![
            (
                "Delegates",
                vec![EntityCandidate::new(
                    "ACME Corp",
                    "Organization",
                    vec!["http://www.wikidata.org/entity/Q99999".into()],
                )],
            ),
            (
                "Paris",
                vec![EntityCandidate::new(
                    "Paris",
                    "Place",
                    vec!["http://www.wikidata.org/entity/Q90".into()],
                )],
            ),
        ]);

        let prepared = prepare_document(&article_graph(), &reconciler, DEFAULT_ENTITY_KINDS)
            .expect("prepare");

        // The body entity is mentioned, with its knowledge-base link.
        let mentions = TriplePattern::new(
            Some(prepared.document.clone()),
            Some(schema::MENTIONS.clone()),
            None,
        );
        assert_eq!(prepared.graph.matching(&mentions).count(), 1);
        let same_as = TriplePattern::new(None, Some(owl::SAME_AS.clone()), None);
        assert_eq!(prepared.graph.matching(&same_as).count(), 1);

        // The location is now a direct knowledge-base edge, and the raw
        // place node is gone.
        let target = Term::Iri(Iri::new("http://www.wikidata.org/entity/Q90"));
        assert!(prepared.graph.contains(&Triple::new_unchecked(
            prepared.document.clone(),
            schema::CONTENT_LOCATION.clone(),
            target,
        )));
        assert!(
            prepared
                .graph
                .matching(&TriplePattern::new(
                    None,
                    Some(schema::NAME.clone()),
                    Some(Term::Literal(Literal::new("Paris")))
                ))
                .count()
                == 0
        );

        assert_eq!(prepared.headline, "Summit in Paris");
        assert_eq!(prepared.slug, "summit-in-paris");
    }

    #[test]
    fn prepare_without_entities_keeps_feed_graph() {
        let reconciler = FixedReconciler(Vec::new());
        let article = article_graph();

        let prepared =
            prepare_document(&article, &reconciler, DEFAULT_ENTITY_KINDS).expect("prepare");

        // No reconciliation: the raw location survives untouched.
        assert_eq!(prepared.graph, article);
    }

    #[test]
    fn prepare_skips_graph_without_document() {
        let reconciler = FixedReconciler(Vec::new());
        let result = prepare_document(&Graph::new(), &reconciler, DEFAULT_ENTITY_KINDS);
        assert_eq!(result.err(), Some(SkipReason::NoDocumentNode));
    }

    #[test]
    fn prepare_skips_document_without_headline() {
        let mut graph = Graph::new();
        let article = Term::Blank(graph.fresh_blank());
        graph.add(Triple::new_unchecked(
            article,
            rdf::TYPE.clone(),
            Term::Iri(schema::ARTICLE.clone()),
        ));

        let reconciler = FixedReconciler(Vec::new());
        let result = prepare_document(&graph, &reconciler, DEFAULT_ENTITY_KINDS);
        assert_eq!(result.err(), Some(SkipReason::NoHeadline));
    }

    #[test]
    fn finalize_promotes_blank_documents() {
        let reconciler = FixedReconciler(Vec::new());
        let prepared = prepare_document(&article_graph(), &reconciler, DEFAULT_ENTITY_KINDS)
            .expect("prepare");

        let item = Iri::new("https://news.example/articles/summit-in-paris/");
        let published = finalize_for_publication(&prepared, &item);

        assert!(!published.occurs(&prepared.document));
        let topic = IdentityPromoter::topic_iri(&item);
        assert!(published.contains(&Triple::new_unchecked(
            Term::Iri(item),
            foaf::PRIMARY_TOPIC.clone(),
            Term::Iri(topic),
        )));
    }

    #[test]
    fn headline_falls_back_to_name() {
        let mut graph = Graph::new();
        let paper = Term::Blank(graph.fresh_blank());
        let mut doc = graph.resource(paper);
        doc.set(rdf::TYPE.clone(), Term::Iri(schema::SCHOLARLY_ARTICLE.clone()));
        doc.set(schema::NAME.clone(), Literal::new("A Study"));

        let reconciler = FixedReconciler(Vec::new());
        let prepared =
            prepare_document(&graph, &reconciler, DEFAULT_ENTITY_KINDS).expect("prepare");
        assert_eq!(prepared.headline, "A Study");
    }
}
