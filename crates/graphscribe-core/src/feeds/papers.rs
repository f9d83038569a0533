//! Papers feed mapping: collaborator Atom XML → validated
//! [`PaperRecord`] → one named graph per paper.
//!
//! Each paper gets its own named graph keyed by a deterministic IRI
//! derived from the paper's external identifier, so repeated runs place
//! the same paper in the same graph.

use crate::dataset::Dataset;
use crate::feeds::{collapse_whitespace, non_empty};
use crate::graph::Graph;
use crate::settings::Settings;
use crate::types::{Iri, Literal, ScribeError, Term, Triple};
use crate::vocab::{feed, rdf, schema, xsd};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default base IRI for per-paper graph names.
pub const DEFAULT_GRAPH_BASE: &str = "https://w3id.org/graphscribe/paper/";

// =============================================================================
// VALIDATED RECORD
// =============================================================================

/// One research paper, validated and cleaned. `external_id` is the only
/// mandatory field: a paper without an identifier has no graph name and
/// is dropped during parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// External identifier (the tail of the entry's `/abs/` URL).
    pub external_id: String,
    /// Title, whitespace-collapsed.
    pub title: Option<String>,
    /// Abstract, whitespace-collapsed.
    pub summary: Option<String>,
    /// Author names in feed order.
    pub authors: Vec<String>,
    /// Category keywords.
    pub categories: Vec<String>,
    /// Submission instant.
    pub published: Option<String>,
    /// Last-update instant.
    pub updated: Option<String>,
    /// Link to the PDF rendition.
    pub pdf_url: Option<String>,
    /// External same-as identifier (a DOI-style URI).
    pub same_as: Option<String>,
    /// Journal reference, when the paper appeared in an issue.
    pub journal_ref: Option<String>,
    /// Abstract page URL.
    pub url: Option<String>,
}

impl PaperRecord {
    /// Parse a papers feed Atom payload into validated records.
    pub fn from_atom_xml(xml: &str) -> Result<Vec<Self>, ScribeError> {
        let mut reader = Reader::from_str(xml);

        let mut records: Vec<Self> = Vec::new();
        let mut current: Option<Self> = None;
        let mut path: Vec<String> = Vec::new();

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ScribeError::Parse(e.to_string()))?;
            match event {
                Event::Start(start) => {
                    let name = local_name_of(&start)?;
                    if name == "entry" {
                        current = Some(Self::default());
                    }
                    if let Some(record) = current.as_mut() {
                        record.apply_attributes(&name, &start)?;
                    }
                    path.push(name);
                }
                Event::Empty(start) => {
                    let name = local_name_of(&start)?;
                    if let Some(record) = current.as_mut() {
                        record.apply_attributes(&name, &start)?;
                    }
                }
                Event::Text(text) => {
                    if let Some(record) = current.as_mut() {
                        let value = text
                            .unescape()
                            .map_err(|e| ScribeError::Parse(e.to_string()))?;
                        record.apply_text(path.last().map(String::as_str), &value);
                    }
                }
                Event::End(end) => {
                    let qname = end.name();
                    let name = std::str::from_utf8(qname.local_name().as_ref())
                        .map_err(|e| ScribeError::Parse(e.to_string()))?
                        .to_string();
                    if name == "entry" {
                        if let Some(record) = current.take() {
                            if record.external_id.is_empty() {
                                debug!("dropped paper entry without identifier");
                            } else {
                                records.push(record);
                            }
                        }
                    }
                    path.pop();
                }
                Event::CData(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        info!(papers = records.len(), "mapped papers feed payload");
        Ok(records)
    }

    fn apply_attributes(&mut self, name: &str, start: &BytesStart<'_>) -> Result<(), ScribeError> {
        match name {
            "category" => {
                if let Some(term) = attribute_value(start, "term")? {
                    if !term.is_empty() {
                        self.categories.push(term);
                    }
                }
            }
            "link" => {
                let href = attribute_value(start, "href")?;
                let kind = attribute_value(start, "type")?;
                if let Some(href) = non_empty(href) {
                    if kind.as_deref() == Some("application/pdf") {
                        self.pdf_url = Some(href);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_text(&mut self, element: Option<&str>, value: &str) {
        match element {
            Some("id") => {
                let trimmed = value.trim();
                self.url = non_empty(Some(trimmed.to_string()));
                self.external_id = trimmed
                    .rsplit_once("/abs/")
                    .map_or_else(|| trimmed.to_string(), |(_, id)| id.to_string());
            }
            Some("title") => self.title = non_empty(Some(collapse_whitespace(value))),
            Some("summary") => self.summary = non_empty(Some(collapse_whitespace(value))),
            Some("name") => {
                let name = value.trim();
                if !name.is_empty() {
                    self.authors.push(name.to_string());
                }
            }
            Some("published") => self.published = non_empty(Some(value.trim().to_string())),
            Some("updated") => self.updated = non_empty(Some(value.trim().to_string())),
            Some("doi") => {
                let doi = value.trim();
                if !doi.is_empty() {
                    self.same_as = Some(format!("https://doi.org/{doi}"));
                }
            }
            Some("journal_ref") => {
                self.journal_ref = non_empty(Some(collapse_whitespace(value)));
            }
            _ => {}
        }
    }

    /// Apply the fixed field table, writing into an existing graph.
    /// Returns the paper node.
    pub fn write_into(&self, graph: &mut Graph) -> Term {
        let paper = Term::Blank(graph.fresh_blank());
        {
            let mut doc = graph.resource(paper.clone());
            doc.set(rdf::TYPE.clone(), Term::Iri(schema::SCHOLARLY_ARTICLE.clone()));
            doc.add(feed::PAPER_ID.clone(), Literal::new(self.external_id.clone()));
            if let Some(title) = &self.title {
                doc.set(schema::HEADLINE.clone(), Literal::new(title.clone()));
                doc.set(schema::NAME.clone(), Literal::new(title.clone()));
            }
            if let Some(summary) = &self.summary {
                doc.set(schema::ABSTRACT.clone(), Literal::new(summary.clone()));
            }
            if let Some(published) = &self.published {
                doc.set(
                    schema::DATE_PUBLISHED.clone(),
                    Literal::typed(published.clone(), xsd::DATE_TIME.clone()),
                );
            }
            if let Some(updated) = &self.updated {
                doc.set(
                    schema::DATE_MODIFIED.clone(),
                    Literal::typed(updated.clone(), xsd::DATE_TIME.clone()),
                );
            }
            for category in &self.categories {
                doc.add(schema::KEYWORDS.clone(), Literal::new(category.clone()));
            }
            if let Some(pdf) = &self.pdf_url {
                doc.set(schema::ENCODING.clone(), Term::Iri(Iri::new(pdf.clone())));
            }
            if let Some(same_as) = &self.same_as {
                doc.set(schema::SAME_AS.clone(), Term::Iri(Iri::new(same_as.clone())));
            }
            if let Some(url) = &self.url {
                doc.set(schema::URL.clone(), Term::Iri(Iri::new(url.clone())));
            }
        }

        for author in &self.authors {
            let person = Term::Blank(graph.fresh_blank());
            let mut resource = graph.resource(person.clone());
            resource.set(rdf::TYPE.clone(), Term::Iri(schema::PERSON.clone()));
            resource.set(schema::NAME.clone(), Literal::new(author.clone()));
            graph.add(Triple::new_unchecked(
                paper.clone(),
                schema::AUTHOR.clone(),
                person,
            ));
        }

        if let Some(reference) = &self.journal_ref {
            let issue = Term::Blank(graph.fresh_blank());
            let mut resource = graph.resource(issue.clone());
            resource.set(rdf::TYPE.clone(), Term::Iri(schema::PUBLICATION_ISSUE.clone()));
            resource.set(schema::NAME.clone(), Literal::new(reference.clone()));
            graph.add(Triple::new_unchecked(
                paper.clone(),
                schema::IS_PART_OF.clone(),
                issue,
            ));
        }

        paper
    }
}

// =============================================================================
// DATASET MAPPING
// =============================================================================

/// Maps paper records into a dataset, one independent named graph per
/// paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PapersFeed {
    graph_base: Iri,
}

impl Default for PapersFeed {
    fn default() -> Self {
        Self {
            graph_base: Iri::new(DEFAULT_GRAPH_BASE),
        }
    }
}

impl PapersFeed {
    /// Create a feed mapper with an explicit graph-name base.
    #[must_use]
    pub fn new(graph_base: Iri) -> Self {
        Self { graph_base }
    }

    /// Create a feed mapper from settings, falling back to
    /// [`DEFAULT_GRAPH_BASE`].
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        settings
            .paper_graph_base
            .as_deref()
            .map_or_else(Self::default, |base| Self::new(Iri::new(base)))
    }

    /// Deterministic graph name for a paper.
    #[must_use]
    pub fn graph_name(&self, external_id: &str) -> Iri {
        Iri::new(format!("{}{}", self.graph_base.as_str(), external_id))
    }

    /// Map records into a dataset. The default graph stays empty.
    #[must_use]
    pub fn to_dataset(&self, records: &[PaperRecord]) -> Dataset {
        let mut dataset = Dataset::new();
        for record in records {
            let name = self.graph_name(&record.external_id);
            record.write_into(dataset.graph(&name));
        }
        dataset
    }
}

fn local_name_of(start: &BytesStart<'_>) -> Result<String, ScribeError> {
    let qname = start.name();
    Ok(std::str::from_utf8(qname.local_name().as_ref())
        .map_err(|e| ScribeError::Parse(e.to_string()))?
        .to_string())
}

fn attribute_value(start: &BytesStart<'_>, name: &str) -> Result<Option<String>, ScribeError> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ScribeError::Parse(e.to_string()))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|e| ScribeError::Parse(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

// =============================================================================
// TESTS
// =============================================================================
