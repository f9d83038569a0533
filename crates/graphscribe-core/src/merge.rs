//! # Merge
//!
//! Unions a sequence of graphs into one. Set semantics make the
//! operation idempotent and, over triple content, commutative and
//! associative.
//!
//! Blank nodes are NOT renamed during merge: if two inputs independently
//! use the same local label for logically distinct entities, the union
//! unifies them. Producers in this crate avoid that by minting labels
//! under distinct prefixes (feed mapping `b…`, entity linking `e…`);
//! callers merging graphs from other sources carry the same obligation.

use crate::graph::Graph;

/// Union all input graphs, in the given order, into a new graph.
pub fn merge<'a, I>(graphs: I) -> Graph
where
    I: IntoIterator<Item = &'a Graph>,
{
    let mut merged = Graph::new();
    for graph in graphs {
        merged.absorb(graph);
    }
    merged
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Iri, Literal, Term, Triple};
    use crate::vocab::schema;

    fn statement(subject: &str, name: &str) -> Triple {
        Triple::new_unchecked(
            Term::Iri(Iri::new(subject)),
            schema::NAME.clone(),
            Literal::new(name),
        )
    }

    #[test]
    fn merge_deduplicates_across_inputs() {
        let mut a = Graph::new();
        a.add(statement("http://example.org/1", "one"));
        a.add(statement("http://example.org/2", "two"));

        let mut b = Graph::new();
        b.add(statement("http://example.org/2", "two"));
        b.add(statement("http://example.org/3", "three"));

        let merged = merge([&a, &b]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn merge_is_commutative_over_content() {
        let mut a = Graph::new();
        a.add(statement("http://example.org/1", "one"));
        let mut b = Graph::new();
        b.add(statement("http://example.org/2", "two"));

        assert_eq!(merge([&a, &b]), merge([&b, &a]));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut a = Graph::new();
        a.add(statement("http://example.org/1", "one"));
        let mut b = Graph::new();
        b.add(statement("http://example.org/2", "two"));

        let once = merge([&a, &b]);
        let twice = merge([&once, &b]);
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_is_associative_over_content() {
        let mut a = Graph::new();
        a.add(statement("http://example.org/1", "one"));
        let mut b = Graph::new();
        b.add(statement("http://example.org/2", "two"));
        let mut c = Graph::new();
        c.add(statement("http://example.org/3", "three"));

        let left = merge([&merge([&a, &b]), &c]);
        let right = merge([&a, &merge([&b, &c])]);
        assert_eq!(left, right);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let merged = merge(std::iter::empty::<&Graph>());
        assert!(merged.is_empty());
    }
}
