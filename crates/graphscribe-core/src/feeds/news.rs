//! News feed mapping: collaborator JSON → validated [`ArticleRecord`] →
//! schema.org article graph.
//!
//! Two payload shapes are supported: the search endpoint's
//! `{"articles": {"results": [...]}}` envelope with basic metadata, and
//! the per-article detail object with the full body, concepts and
//! location. Both shapes produce the same record type; fields the
//! payload omits stay `None` and emit nothing.

use crate::feeds::non_empty;
use crate::graph::Graph;
use crate::types::{Iri, Literal, ScribeError, Term, Triple};
use crate::vocab::{feed, rdf, schema, xsd};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// VALIDATED RECORDS
// =============================================================================

/// Publisher of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Display name of the publishing organization.
    pub name: Option<String>,
    /// Home page URL, already resolved to an absolute URL by the fetcher.
    pub url: Option<String>,
}

/// Spatial context of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Place name, if the feed labelled the location.
    pub name: Option<String>,
    /// Country name, if present.
    pub country: Option<String>,
}

/// One news article, validated and cleaned. Empty payload strings have
/// been dropped; nothing here triggers conditional mapping logic beyond
/// plain field presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Opaque source-side identifier, kept so the detail endpoint can be
    /// queried later.
    pub external_id: Option<String>,
    /// Headline.
    pub title: Option<String>,
    /// Full article body.
    pub body: Option<String>,
    /// Author names; the raw payload may carry a list or a single string.
    pub authors: Vec<String>,
    /// Canonical article URL.
    pub url: Option<String>,
    /// Publication date with day precision (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Publication instant; used only when no day-precision date exists.
    pub date_time: Option<String>,
    /// Publishing organization.
    pub source: Option<SourceRecord>,
    /// Lead image URL.
    pub image: Option<String>,
    /// Spatial context, when the feed resolved one.
    pub location: Option<LocationRecord>,
}

// Raw payload shapes, private to the mapping table.

#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(default)]
    articles: RawArticleList,
}

#[derive(Debug, Default, Deserialize)]
struct RawArticleList {
    #[serde(default)]
    results: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticle {
    uri: Option<String>,
    title: Option<String>,
    body: Option<String>,
    authors: Option<RawAuthors>,
    url: Option<String>,
    date: Option<String>,
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    source: Option<RawSource>,
    image: Option<String>,
    location: Option<RawLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAuthors {
    Many(Vec<RawAuthor>),
    One(String),
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    title: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    label: Option<RawLabel>,
    country: Option<RawCountry>,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    eng: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    label: Option<RawLabel>,
}

impl From<RawArticle> for ArticleRecord {
    fn from(raw: RawArticle) -> Self {
        let authors = match raw.authors {
            Some(RawAuthors::Many(list)) => list
                .into_iter()
                .filter_map(|a| non_empty(a.name))
                .collect(),
            Some(RawAuthors::One(name)) => non_empty(Some(name)).into_iter().collect(),
            None => Vec::new(),
        };
        let source = raw.source.and_then(|s| {
            let record = SourceRecord {
                name: non_empty(s.title),
                url: non_empty(s.url),
            };
            (record.name.is_some() || record.url.is_some()).then_some(record)
        });
        let location = raw.location.and_then(|l| {
            let record = LocationRecord {
                name: non_empty(l.label.and_then(|label| label.eng)),
                country: non_empty(l.country.and_then(|c| c.label).and_then(|label| label.eng)),
            };
            (record.name.is_some() || record.country.is_some()).then_some(record)
        });

        Self {
            external_id: non_empty(raw.uri),
            title: non_empty(raw.title),
            body: non_empty(raw.body),
            authors,
            url: non_empty(raw.url),
            date: non_empty(raw.date),
            date_time: non_empty(raw.date_time),
            source,
            image: non_empty(raw.image),
            location,
        }
    }
}

impl ArticleRecord {
    /// Parse the search endpoint envelope into validated records.
    pub fn from_feed_json(json: &str) -> Result<Vec<Self>, ScribeError> {
        let raw: RawFeed =
            serde_json::from_str(json).map_err(|e| ScribeError::Validation(e.to_string()))?;
        let records: Vec<Self> = raw.articles.results.into_iter().map(Self::from).collect();
        info!(articles = records.len(), "mapped news feed payload");
        Ok(records)
    }

    /// Parse one per-article detail object into a validated record.
    pub fn from_article_json(json: &str) -> Result<Self, ScribeError> {
        let raw: RawArticle =
            serde_json::from_str(json).map_err(|e| ScribeError::Validation(e.to_string()))?;
        Ok(Self::from(raw))
    }

    /// Map this record into a fresh graph. The article and its
    /// sub-resources are blank nodes scoped to that graph.
    #[must_use]
    pub fn to_graph(&self) -> Graph {
        let mut graph = Graph::new();
        self.write_into(&mut graph);
        graph
    }

    /// Apply the fixed field table, writing into an existing graph.
    /// Returns the article node.
    pub fn write_into(&self, graph: &mut Graph) -> Term {
        let article = Term::Blank(graph.fresh_blank());
        {
            let mut doc = graph.resource(article.clone());
            doc.set(rdf::TYPE.clone(), Term::Iri(schema::ARTICLE.clone()));
            if let Some(id) = &self.external_id {
                doc.add(feed::SOURCE_ID.clone(), Literal::new(id.clone()));
            }
            if let Some(title) = &self.title {
                doc.set(schema::HEADLINE.clone(), Literal::new(title.clone()));
            }
            if let Some(body) = &self.body {
                doc.set(schema::ARTICLE_BODY.clone(), Literal::new(body.clone()));
            }
            for author in &self.authors {
                doc.add(schema::AUTHOR.clone(), Literal::new(author.clone()));
            }
            if let Some(url) = &self.url {
                doc.set(schema::URL.clone(), Term::Iri(Iri::new(url.clone())));
            }
            // Day precision wins over instant precision.
            if let Some(date) = &self.date {
                doc.set(
                    schema::DATE_PUBLISHED.clone(),
                    Literal::typed(date.clone(), xsd::DATE.clone()),
                );
            } else if let Some(instant) = &self.date_time {
                doc.set(
                    schema::DATE_PUBLISHED.clone(),
                    Literal::typed(instant.clone(), xsd::DATE_TIME.clone()),
                );
            }
            if let Some(image) = &self.image {
                doc.set(schema::IMAGE.clone(), Term::Iri(Iri::new(image.clone())));
            }
        }

        if let Some(source) = &self.source {
            let publisher = Term::Blank(graph.fresh_blank());
            let mut org = graph.resource(publisher.clone());
            org.set(rdf::TYPE.clone(), Term::Iri(schema::ORGANIZATION.clone()));
            if let Some(name) = &source.name {
                org.set(schema::NAME.clone(), Literal::new(name.clone()));
            }
            if let Some(url) = &source.url {
                org.set(schema::URL.clone(), Term::Iri(Iri::new(url.clone())));
            }
            graph.add(Triple::new_unchecked(
                article.clone(),
                schema::PUBLISHER.clone(),
                publisher,
            ));
        }

        if let Some(location) = &self.location {
            let place = Term::Blank(graph.fresh_blank());
            let mut resource = graph.resource(place.clone());
            resource.set(rdf::TYPE.clone(), Term::Iri(schema::PLACE.clone()));
            if let Some(name) = &location.name {
                resource.set(schema::NAME.clone(), Literal::new(name.clone()));
            }
            if let Some(country) = &location.country {
                resource.set(schema::ADDRESS_COUNTRY.clone(), Literal::new(country.clone()));
            }
            graph.add(Triple::new_unchecked(
                article.clone(),
                schema::CONTENT_LOCATION.clone(),
                place,
            ));
        }

        article
    }
}

// =============================================================================
// TESTS
// =============================================================================
