//! # Pipeline Tests
//!
//! End-to-end scenarios over the per-document flow: feed payload →
//! validated record → graph → entity linking and location promotion →
//! merge → identity promotion → publisher hand-off.

use graphscribe_core::{
    ArticleRecord, EntityCandidate, EntityLinker, EntityReconciler, Graph, IdentityPromoter, Iri,
    ItemPublisher, Literal, PaperRecord, PapersFeed, ScribeError, SkipReason, Term, Triple,
    TriplePattern, finalize_for_publication, prepare_document, slugify,
};
use graphscribe_core::vocab::{foaf, owl, rdf, schema};

// =============================================================================
// CANNED COLLABORATORS
// =============================================================================

/// Reconciler that answers with fixed candidates keyed by substring.
struct CannedReconciler {
    answers: Vec<(&'static str, Vec<EntityCandidate>)>,
}

impl EntityReconciler for CannedReconciler {
    fn reconcile(&self, text: &str, _entity_kinds: &[&str]) -> Vec<EntityCandidate> {
        self.answers
            .iter()
            .find(|(needle, _)| text.contains(needle))
            .map(|(_, candidates)| candidates.clone())
            .unwrap_or_default()
    }
}

/// Publisher that mints item URIs locally and records every push.
#[derive(Default)]
struct RecordingPublisher {
    pushed: Vec<(Iri, Graph)>,
}

impl ItemPublisher for RecordingPublisher {
    fn create_item(
        &mut self,
        container: &Iri,
        _title: &str,
        slug: &str,
    ) -> Result<Iri, ScribeError> {
        Ok(Iri::new(format!("{}{}/", container.as_str(), slug)))
    }

    fn push(&mut self, item: &Iri, graph: &Graph) -> Result<u16, ScribeError> {
        self.pushed.push((item.clone(), graph.clone()));
        Ok(201)
    }
}

// =============================================================================
// LOCATION PROMOTION SCENARIO
// =============================================================================

/// The canonical surgery scenario: a document located at a raw place
/// node ends up located at the knowledge-base target, with the raw node
/// and its name gone.
#[test]
fn location_promotion_end_state() {
    let mut article = Graph::new();
    let doc = Term::Iri(Iri::new("http://example.org/doc"));
    let loc1 = Term::Blank(article.fresh_blank());
    article.add(Triple::new_unchecked(
        doc.clone(),
        schema::CONTENT_LOCATION.clone(),
        loc1.clone(),
    ));
    article.add(Triple::new_unchecked(
        loc1.clone(),
        rdf::TYPE.clone(),
        Term::Iri(schema::PLACE.clone()),
    ));
    article.add(Triple::new_unchecked(
        loc1.clone(),
        schema::NAME.clone(),
        Literal::new("Paris"),
    ));

    let reconciled = EntityLinker::link(
        &doc,
        &[EntityCandidate::new(
            "Paris",
            "Place",
            vec!["http://www.wikidata.org/entity/Q90".into()],
        )],
    );

    let trimmed = EntityLinker::promote_location(&mut article, &reconciled, &doc, &loc1)
        .expect("surgery succeeds");

    let target = Term::Iri(Iri::new("http://www.wikidata.org/entity/Q90"));
    assert!(article.contains(&Triple::new_unchecked(
        doc.clone(),
        schema::CONTENT_LOCATION.clone(),
        target.clone(),
    )));
    assert!(!article.contains(&Triple::new_unchecked(
        doc.clone(),
        schema::CONTENT_LOCATION.clone(),
        loc1.clone(),
    )));
    assert!(!article.contains(&Triple::new_unchecked(
        loc1,
        schema::NAME.clone(),
        Literal::new("Paris"),
    )));

    // Never both representations: no mentions edge survives for the
    // promoted place, in either graph.
    let mentions = TriplePattern::new(Some(doc), Some(schema::MENTIONS.clone()), None);
    assert_eq!(article.matching(&mentions).count(), 0);
    assert_eq!(trimmed.matching(&mentions).count(), 0);
    assert!(!trimmed.occurs(&target));
}

// =============================================================================
// NEWS ARTICLE FLOW
// =============================================================================

fn paris_article_json() -> &'static str {
    r#"{
        "uri": "8920966279",
        "title": "Summit in Paris",
        "body": "Delegates from ACME Corp met in Paris to discuss graphs.",
        "url": "https://news.example/summit-in-paris",
        "dateTime": "2025-10-02T08:30:00Z",
        "source": {"title": "Example Wire", "url": "https://wire.example/"},
        "location": {"label": {"eng": "Paris"}, "country": {"label": {"eng": "France"}}}
    }"#
}

#[test]
fn news_article_reaches_publisher_with_permanent_identity() {
    let record = ArticleRecord::from_article_json(paris_article_json()).expect("record");
    let article = record.to_graph();

    let reconciler = CannedReconciler {
        answers: vec![
            (
                "Delegates",
                vec![
                    EntityCandidate::new(
                        "ACME Corp",
                        "Organization",
                        vec!["http://www.wikidata.org/entity/Q99999".into()],
                    ),
                    EntityCandidate::new("graphs", "Concept", Vec::new()),
                ],
            ),
            (
                "Paris",
                vec![EntityCandidate::new(
                    "Paris",
                    "Place",
                    vec![
                        "http://dbpedia.org/resource/Paris".into(),
                        "http://www.wikidata.org/entity/Q90".into(),
                    ],
                )],
            ),
        ],
    };

    let prepared = prepare_document(&article, &reconciler, &["Person", "Organization", "Place"])
        .expect("prepared");

    // Location: both knowledge-base targets, no raw place left.
    let location_edges = TriplePattern::new(
        Some(prepared.document.clone()),
        Some(schema::CONTENT_LOCATION.clone()),
        None,
    );
    assert_eq!(prepared.graph.matching(&location_edges).count(), 2);

    // Entities: the organization is mentioned with its link, the
    // unrecognized kind fell back to Thing.
    let thing_class = Term::Iri(schema::THING.clone());
    assert_eq!(
        prepared
            .graph
            .subjects_with(&rdf::TYPE, &thing_class)
            .count(),
        1
    );

    // Publisher hand-off.
    let mut publisher = RecordingPublisher::default();
    let container = Iri::new("https://news.example/articles/");
    let item = publisher
        .create_item(&container, &prepared.headline, &prepared.slug)
        .expect("item");
    assert_eq!(
        item.as_str(),
        "https://news.example/articles/summit-in-paris/"
    );

    let published = finalize_for_publication(&prepared, &item);
    let status = publisher.push(&item, &published).expect("push");
    assert_eq!(status, 201);

    // The pushed graph carries no blank document node and navigates from
    // the item to its primary topic.
    let (pushed_item, pushed_graph) = &publisher.pushed[0];
    assert_eq!(pushed_item, &item);
    assert!(!pushed_graph.occurs(&prepared.document));
    let topic = IdentityPromoter::topic_iri(&item);
    assert!(pushed_graph.contains(&Triple::new_unchecked(
        Term::Iri(item),
        foaf::PRIMARY_TOPIC.clone(),
        Term::Iri(topic.clone()),
    )));

    // Entity links survive promotion.
    let same_as = TriplePattern::new(None, Some(owl::SAME_AS.clone()), None);
    assert_eq!(pushed_graph.matching(&same_as).count(), 1);
    let mentions = TriplePattern::new(
        Some(Term::Iri(topic)),
        Some(schema::MENTIONS.clone()),
        None,
    );
    assert_eq!(pushed_graph.matching(&mentions).count(), 2);
}

#[test]
fn failed_reconciliation_is_not_an_error() {
    let record = ArticleRecord::from_article_json(paris_article_json()).expect("record");
    let article = record.to_graph();

    let reconciler = CannedReconciler { answers: vec![] };
    let prepared = prepare_document(&article, &reconciler, &["Person"]).expect("prepared");

    // Zero entities: the feed graph passes through unchanged, raw
    // location included.
    assert_eq!(prepared.graph, article);
}

#[test]
fn documents_without_headline_skip_explicitly() {
    let mut graph = Graph::new();
    let node = Term::Blank(graph.fresh_blank());
    graph.add(Triple::new_unchecked(
        node,
        rdf::TYPE.clone(),
        Term::Iri(schema::ARTICLE.clone()),
    ));

    let reconciler = CannedReconciler { answers: vec![] };
    let result = prepare_document(&graph, &reconciler, &["Person"]);
    assert_eq!(result.err(), Some(SkipReason::NoHeadline));
}

// =============================================================================
// PAPERS FLOW
// =============================================================================

#[test]
fn paper_graphs_promote_independently() {
    let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://papers.example/abs/2501.0001v1</id>
    <title>First Paper</title>
    <author><name>Ada</name></author>
  </entry>
  <entry>
    <id>http://papers.example/abs/2501.0002v1</id>
    <title>Second Paper</title>
    <author><name>Grace</name></author>
  </entry>
</feed>"#;

    let records = PaperRecord::from_atom_xml(atom).expect("records");
    let feed = PapersFeed::default();
    let dataset = feed.to_dataset(&records);
    assert_eq!(dataset.len(), 2);

    let reconciler = CannedReconciler { answers: vec![] };
    let mut publisher = RecordingPublisher::default();
    let container = Iri::new("https://papers.example/papers/");

    for (_, graph) in dataset.named_graphs() {
        let prepared = prepare_document(graph, &reconciler, &["Person"]).expect("prepared");
        let item = publisher
            .create_item(&container, &prepared.headline, &slugify(&prepared.headline))
            .expect("item");
        let published = finalize_for_publication(&prepared, &item);
        publisher.push(&item, &published).expect("push");
    }

    assert_eq!(publisher.pushed.len(), 2);
    for (item, graph) in &publisher.pushed {
        let topic = Term::Iri(IdentityPromoter::topic_iri(item));
        assert!(graph.contains(&Triple::new_unchecked(
            Term::Iri(item.clone()),
            foaf::PRIMARY_TOPIC.clone(),
            topic.clone(),
        )));
        // The paper node itself now carries the item-derived identity.
        assert!(
            graph
                .matching(&TriplePattern::new(
                    Some(topic),
                    Some(rdf::TYPE.clone()),
                    Some(Term::Iri(schema::SCHOLARLY_ARTICLE.clone())),
                ))
                .count()
                == 1
        );
    }
}
