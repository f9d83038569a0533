//! Common vocabularies and namespaces used by the feed mapping tables,
//! the entity linker and the identity promoter.

use crate::types::Iri;
use std::sync::LazyLock;

/// RDF vocabulary namespace
pub mod rdf {
    use super::*;

    /// The RDF namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type predicate
    pub static TYPE: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}type", NAMESPACE)));

    /// rdf:HTML datatype
    pub static HTML: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}HTML", NAMESPACE)));

    /// rdf:XMLLiteral datatype
    pub static XML_LITERAL: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}XMLLiteral", NAMESPACE)));
}

/// schema.org vocabulary namespace
pub mod schema {
    use super::*;

    /// The schema.org namespace IRI
    pub const NAMESPACE: &str = "http://schema.org/";

    // Classes

    /// schema:Article class
    pub static ARTICLE: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}Article", NAMESPACE)));

    /// schema:ScholarlyArticle class
    pub static SCHOLARLY_ARTICLE: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}ScholarlyArticle", NAMESPACE)));

    /// schema:Person class
    pub static PERSON: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}Person", NAMESPACE)));

    /// schema:Organization class
    pub static ORGANIZATION: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}Organization", NAMESPACE)));

    /// schema:Place class
    pub static PLACE: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}Place", NAMESPACE)));

    /// schema:Thing class — the fallback for unrecognized entity kinds
    pub static THING: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}Thing", NAMESPACE)));

    /// schema:PublicationIssue class
    pub static PUBLICATION_ISSUE: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}PublicationIssue", NAMESPACE)));

    // Properties

    /// schema:headline predicate
    pub static HEADLINE: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}headline", NAMESPACE)));

    /// schema:articleBody predicate
    pub static ARTICLE_BODY: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}articleBody", NAMESPACE)));

    /// schema:abstract predicate
    pub static ABSTRACT: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}abstract", NAMESPACE)));

    /// schema:author predicate
    pub static AUTHOR: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}author", NAMESPACE)));

    /// schema:name predicate
    pub static NAME: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}name", NAMESPACE)));

    /// schema:url predicate
    pub static URL: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}url", NAMESPACE)));

    /// schema:datePublished predicate
    pub static DATE_PUBLISHED: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}datePublished", NAMESPACE)));

    /// schema:dateModified predicate
    pub static DATE_MODIFIED: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}dateModified", NAMESPACE)));

    /// schema:publisher predicate
    pub static PUBLISHER: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}publisher", NAMESPACE)));

    /// schema:image predicate
    pub static IMAGE: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}image", NAMESPACE)));

    /// schema:contentLocation predicate — the dedicated location relation
    pub static CONTENT_LOCATION: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}contentLocation", NAMESPACE)));

    /// schema:addressCountry predicate
    pub static ADDRESS_COUNTRY: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}addressCountry", NAMESPACE)));

    /// schema:mentions predicate — generic document-to-entity edge
    pub static MENTIONS: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}mentions", NAMESPACE)));

    /// schema:keywords predicate
    pub static KEYWORDS: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}keywords", NAMESPACE)));

    /// schema:encoding predicate — link to the media object (PDF)
    pub static ENCODING: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}encoding", NAMESPACE)));

    /// schema:sameAs predicate — external identifier of the document itself
    pub static SAME_AS: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}sameAs", NAMESPACE)));

    /// schema:isPartOf predicate
    pub static IS_PART_OF: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}isPartOf", NAMESPACE)));
}

/// OWL vocabulary namespace
pub mod owl {
    use super::*;

    /// The OWL namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

    /// owl:sameAs predicate — entity-level knowledge-base link
    pub static SAME_AS: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}sameAs", NAMESPACE)));
}

/// FOAF vocabulary namespace
pub mod foaf {
    use super::*;

    /// The FOAF namespace IRI
    pub const NAMESPACE: &str = "http://xmlns.com/foaf/0.1/";

    /// foaf:primaryTopic predicate — document resource to described entity
    pub static PRIMARY_TOPIC: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}primaryTopic", NAMESPACE)));
}

/// XSD datatype namespace
pub mod xsd {
    use super::*;

    /// The XSD namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:date datatype — day precision
    pub static DATE: LazyLock<Iri> = LazyLock::new(|| Iri::new(format!("{}date", NAMESPACE)));

    /// xsd:dateTime datatype — instant precision
    pub static DATE_TIME: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}dateTime", NAMESPACE)));
}

/// XHTML namespace, used as the default namespace of canonical fragments
pub mod xhtml {
    /// The XHTML namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
}

/// Feed-internal properties carried through from collaborator payloads
pub mod feed {
    use super::*;

    /// The Graphscribe feed-property namespace IRI
    pub const NAMESPACE: &str = "https://w3id.org/graphscribe/feed#";

    /// Opaque source-side article identifier, kept so full details can be
    /// fetched later
    pub static SOURCE_ID: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}sourceId", NAMESPACE)));

    /// External paper identifier
    pub static PAPER_ID: LazyLock<Iri> =
        LazyLock::new(|| Iri::new(format!("{}paperId", NAMESPACE)));
}
