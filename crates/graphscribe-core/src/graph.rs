//! # Triple Store
//!
//! The deterministic in-memory graph for the Graphscribe core.
//!
//! A [`Graph`] is a deduplicated set of triples backed by a `BTreeSet`,
//! so iteration order is deterministic and adding the same statement
//! twice is a no-op. Blank-node labels are minted from a per-graph
//! counter and carry no identity outside their graph.
//!
//! The mutation discipline is "single writer, then read-only": a graph
//! is built during one construction pass (feed mapping, linking, merge,
//! promotion) and treated as immutable once handed to a publisher. The
//! graph itself enforces no locking; concurrent callers must give each
//! document its own instance.

use crate::types::{BlankNode, Iri, ScribeError, Term, Triple, TriplePattern};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// GRAPH
// =============================================================================

/// A set of triples with pattern query, add/remove and atomic
/// replace-one-property.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Triple storage in deterministic order.
    triples: BTreeSet<Triple>,

    /// Prefix for minted blank-node labels.
    blank_prefix: String,

    /// Next blank-node ordinal.
    next_blank_id: u64,
}

impl Graph {
    /// Create a new empty graph minting `b0, b1, …` blank labels.
    #[must_use]
    pub fn new() -> Self {
        Self::with_blank_prefix("b")
    }

    /// Create a new empty graph whose minted blank labels use the given
    /// prefix. Producers that build graphs destined to be merged should
    /// use distinct prefixes so their local labels can never collide.
    #[must_use]
    pub fn with_blank_prefix(prefix: impl Into<String>) -> Self {
        Self {
            triples: BTreeSet::new(),
            blank_prefix: prefix.into(),
            next_blank_id: 0,
        }
    }

    /// Mint a blank node scoped to this graph.
    pub fn fresh_blank(&mut self) -> BlankNode {
        let node = BlankNode::new(format!("{}{}", self.blank_prefix, self.next_blank_id));
        self.next_blank_id = self.next_blank_id.saturating_add(1);
        node
    }

    /// Insert a triple. Returns whether it was newly inserted; adding a
    /// statement the graph already holds leaves the graph unchanged.
    pub fn add(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Checked insert from raw terms; rejects literal subjects.
    pub fn insert(
        &mut self,
        subject: impl Into<Term>,
        predicate: Iri,
        object: impl Into<Term>,
    ) -> Result<bool, ScribeError> {
        Ok(self.add(Triple::new(subject, predicate, object)?))
    }

    /// Remove every triple matching the pattern. Returns the count removed.
    pub fn remove(&mut self, pattern: &TriplePattern) -> usize {
        let before = self.triples.len();
        self.triples.retain(|t| !pattern.matches(t));
        before - self.triples.len()
    }

    /// Atomic replace-one-property: removes all `(subject, predicate, *)`
    /// triples, then adds `(subject, predicate, object)`.
    pub fn set(
        &mut self,
        subject: impl Into<Term>,
        predicate: Iri,
        object: impl Into<Term>,
    ) -> Result<(), ScribeError> {
        let subject = subject.into();
        let replacement = Triple::new(subject.clone(), predicate.clone(), object)?;
        self.remove(&TriplePattern::new(Some(subject), Some(predicate), None));
        self.add(replacement);
        Ok(())
    }

    /// Lazy, finite, restartable sequence of triples matching the pattern.
    /// No snapshot isolation beyond single-threaded use.
    pub fn matching<'a, 'p>(
        &'a self,
        pattern: &'p TriplePattern,
    ) -> impl Iterator<Item = &'a Triple> + use<'a, 'p> {
        self.triples.iter().filter(move |t| pattern.matches(t))
    }

    /// Check whether the graph holds exactly this triple.
    #[must_use]
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// True if the term occurs anywhere in subject or object position.
    #[must_use]
    pub fn occurs(&self, term: &Term) -> bool {
        self.triples.iter().any(|t| t.mentions(term))
    }

    /// Triple count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// True if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// First object of `(subject, predicate, *)`, or `None`.
    #[must_use]
    pub fn value(&self, subject: &Term, predicate: &Iri) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| t.subject() == subject && t.predicate() == predicate)
            .map(Triple::object)
    }

    /// First object of `(subject, predicate, *)`, or a `PatternMiss`.
    /// Absence is not always an error; callers that require the value
    /// use this, callers that don't use [`Graph::value`].
    pub fn require_value(&self, subject: &Term, predicate: &Iri) -> Result<&Term, ScribeError> {
        self.value(subject, predicate)
            .ok_or_else(|| ScribeError::PatternMiss {
                subject: subject.to_string(),
                predicate: predicate.to_string(),
            })
    }

    /// All objects of `(subject, predicate, *)` in deterministic order.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Term,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.subject() == subject && t.predicate() == predicate)
            .map(Triple::object)
    }

    /// All subjects of `(*, predicate, object)` in deterministic order.
    pub fn subjects_with<'a, 'p, 'o>(
        &'a self,
        predicate: &'p Iri,
        object: &'o Term,
    ) -> impl Iterator<Item = &'a Term> + use<'a, 'p, 'o> {
        self.triples
            .iter()
            .filter(move |t| t.predicate() == predicate && t.object() == object)
            .map(Triple::subject)
    }

    /// First subject of `(*, predicate, object)`, or `None`.
    #[must_use]
    pub fn first_subject<'a>(&'a self, predicate: &Iri, object: &Term) -> Option<&'a Term> {
        self.subjects_with(predicate, object).next()
    }

    /// Absorb every triple of `other` into this graph (set union).
    pub fn absorb(&mut self, other: &Graph) {
        for triple in &other.triples {
            self.triples.insert(triple.clone());
        }
    }

    /// A view bound to one subject in this graph. The subject should be
    /// an IRI or a blank node; writes through the view assume it is.
    pub fn resource(&mut self, subject: Term) -> Resource<'_> {
        Resource {
            graph: self,
            subject,
        }
    }
}

/// Graphs compare by triple content only; the blank-label allocator is
/// bookkeeping, not state.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.triples == other.triples
    }
}

impl Eq for Graph {}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in &self.triples {
            writeln!(f, "{triple}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::collections::btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

// =============================================================================
// RESOURCE VIEW
// =============================================================================

/// A convenience view over one subject in one graph: get/set/add without
/// repeating the subject. Not an owned entity; it borrows the graph.
pub struct Resource<'g> {
    graph: &'g mut Graph,
    subject: Term,
}

impl Resource<'_> {
    /// The subject this view is bound to.
    #[must_use]
    pub fn subject(&self) -> &Term {
        &self.subject
    }

    /// First object for the predicate, or `None`.
    #[must_use]
    pub fn get(&self, predicate: &Iri) -> Option<&Term> {
        self.graph.value(&self.subject, predicate)
    }

    /// Replace-one-property through to the graph.
    pub fn set(&mut self, predicate: Iri, object: impl Into<Term>) {
        let replacement = Triple::new_unchecked(self.subject.clone(), predicate.clone(), object);
        self.graph.remove(&TriplePattern::new(
            Some(self.subject.clone()),
            Some(predicate),
            None,
        ));
        self.graph.add(replacement);
    }

    /// Add a (possibly additional) value for the predicate.
    pub fn add(&mut self, predicate: Iri, object: impl Into<Term>) -> bool {
        self.graph
            .add(Triple::new_unchecked(self.subject.clone(), predicate, object))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Literal;
    use crate::vocab::{rdf, schema};

    fn doc() -> Term {
        Term::Iri(Iri::new("http://example.org/doc"))
    }

    #[test]
    fn add_is_idempotent() {
        let mut graph = Graph::new();
        let triple = Triple::new_unchecked(
            doc(),
            schema::HEADLINE.clone(),
            Literal::new("Breaking news"),
        );

        assert!(graph.add(triple.clone()));
        assert_eq!(graph.len(), 1);
        assert!(!graph.add(triple));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn remove_counts_matches() {
        let mut graph = Graph::new();
        graph.add(Triple::new_unchecked(
            doc(),
            schema::AUTHOR.clone(),
            Literal::new("Alice"),
        ));
        graph.add(Triple::new_unchecked(
            doc(),
            schema::AUTHOR.clone(),
            Literal::new("Bob"),
        ));
        graph.add(Triple::new_unchecked(
            doc(),
            schema::HEADLINE.clone(),
            Literal::new("Title"),
        ));

        let removed = graph.remove(&TriplePattern::new(
            Some(doc()),
            Some(schema::AUTHOR.clone()),
            None,
        ));
        assert_eq!(removed, 2);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn set_replaces_all_previous_values() {
        let mut graph = Graph::new();
        graph
            .set(doc(), schema::HEADLINE.clone(), Literal::new("First"))
            .expect("set");
        graph
            .set(doc(), schema::HEADLINE.clone(), Literal::new("Second"))
            .expect("set");

        let pattern = TriplePattern::new(Some(doc()), Some(schema::HEADLINE.clone()), None);
        let matches: Vec<_> = graph.matching(&pattern).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches[0].object(),
            &Term::Literal(Literal::new("Second"))
        );
    }

    #[test]
    fn set_rejects_literal_subject() {
        let mut graph = Graph::new();
        let result = graph.set(
            Literal::new("not a node"),
            schema::NAME.clone(),
            Literal::new("x"),
        );
        assert!(result.is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn matching_is_restartable() {
        let mut graph = Graph::new();
        graph.add(Triple::new_unchecked(
            doc(),
            rdf::TYPE.clone(),
            Term::Iri(schema::ARTICLE.clone()),
        ));
        graph.add(Triple::new_unchecked(
            doc(),
            schema::HEADLINE.clone(),
            Literal::new("Title"),
        ));

        let pattern = TriplePattern::about(doc());
        let first: Vec<_> = graph.matching(&pattern).collect();
        let second: Vec<_> = graph.matching(&pattern).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn fresh_blanks_are_distinct_within_a_graph() {
        let mut graph = Graph::new();
        let a = graph.fresh_blank();
        let b = graph.fresh_blank();
        assert_ne!(a, b);
        assert_eq!(a.label(), "b0");
        assert_eq!(b.label(), "b1");
    }

    #[test]
    fn blank_prefix_separates_producers() {
        let mut feed_graph = Graph::new();
        let mut linker_graph = Graph::with_blank_prefix("e");
        assert_ne!(
            feed_graph.fresh_blank().label(),
            linker_graph.fresh_blank().label()
        );
    }

    #[test]
    fn value_returns_first_object() {
        let mut graph = Graph::new();
        graph.add(Triple::new_unchecked(
            doc(),
            schema::HEADLINE.clone(),
            Literal::new("Title"),
        ));

        assert_eq!(
            graph.value(&doc(), &schema::HEADLINE),
            Some(&Term::Literal(Literal::new("Title")))
        );
        assert_eq!(graph.value(&doc(), &schema::NAME), None);
    }

    #[test]
    fn require_value_reports_pattern_miss() {
        let graph = Graph::new();
        let result = graph.require_value(&doc(), &schema::HEADLINE);
        assert!(matches!(result, Err(ScribeError::PatternMiss { .. })));
    }

    #[test]
    fn resource_view_delegates() {
        let mut graph = Graph::new();
        let subject = Term::Blank(graph.fresh_blank());

        let mut article = graph.resource(subject.clone());
        article.set(rdf::TYPE.clone(), Term::Iri(schema::ARTICLE.clone()));
        article.set(schema::HEADLINE.clone(), Literal::new("First"));
        article.set(schema::HEADLINE.clone(), Literal::new("Second"));
        assert!(article.add(schema::AUTHOR.clone(), Literal::new("Alice")));

        assert_eq!(
            article.get(&schema::HEADLINE),
            Some(&Term::Literal(Literal::new("Second")))
        );
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn graphs_compare_by_content() {
        let mut a = Graph::new();
        let mut b = Graph::with_blank_prefix("x");
        a.add(Triple::new_unchecked(
            doc(),
            schema::NAME.clone(),
            Literal::new("same"),
        ));
        b.add(Triple::new_unchecked(
            doc(),
            schema::NAME.clone(),
            Literal::new("same"),
        ));
        // Allocator state differs; content does not.
        let _ = b.fresh_blank();
        assert_eq!(a, b);
    }

    #[test]
    fn occurs_checks_both_positions() {
        let mut graph = Graph::new();
        let node = Term::Blank(BlankNode::new("b7"));
        graph.add(Triple::new_unchecked(
            node.clone(),
            schema::NAME.clone(),
            Literal::new("Paris"),
        ));

        assert!(graph.occurs(&node));
        assert!(!graph.occurs(&Term::Blank(BlankNode::new("b8"))));
    }
}
