//! # Canonical XML Encoder
//!
//! Produces deterministic canonical markup for embedding as a typed
//! literal. Downstream stores validate embedded markup by byte
//! comparison, so the same input tree must serialize to the same bytes
//! on every call:
//!
//! 1. the fragment is wrapped in a single container element whose markup
//!    namespace is the unprefixed default namespace;
//! 2. attributes are emitted in a fixed order (namespace declarations
//!    first, then lexicographic), whitespace inside tags collapses to
//!    single separators, and every empty element becomes an explicit
//!    open/close pair — some validators treat self-closing shorthand as
//!    a canonical-form violation;
//! 3. the result is normalized to Unicode canonical composition form.
//!
//! Malformed input yields a [`ScribeError::Parse`] and no partial output.

use crate::types::{Literal, ScribeError};
use crate::vocab::{rdf, xhtml};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use unicode_normalization::UnicodeNormalization;

/// Stateless canonical encoding operations.
pub struct CanonicalXmlEncoder;

impl CanonicalXmlEncoder {
    /// Encode a markup fragment as one canonical container element.
    pub fn encode(fragment: &str) -> Result<String, ScribeError> {
        let wrapped = format!("<div xmlns=\"{}\">{}</div>", xhtml::NAMESPACE, fragment);
        Self::canonicalize(&wrapped)
    }

    /// Canonicalize a complete document without adding a wrapper.
    /// `canonicalize(encode(x)?)` is a fixed point.
    pub fn canonicalize(document: &str) -> Result<String, ScribeError> {
        let mut reader = Reader::from_str(document);
        reader.config_mut().expand_empty_elements = true;

        let mut out = String::with_capacity(document.len());
        loop {
            let event = reader
                .read_event()
                .map_err(|e| ScribeError::Parse(e.to_string()))?;
            match event {
                Event::Start(start) => Self::write_start(&start, &mut out)?,
                Event::End(end) => {
                    let name = end.name();
                    let name = std::str::from_utf8(name.as_ref())
                        .map_err(|e| ScribeError::Parse(e.to_string()))?;
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
                Event::Empty(start) => {
                    Self::write_start(&start, &mut out)?;
                    let name = start.name();
                    let name = std::str::from_utf8(name.as_ref())
                        .map_err(|e| ScribeError::Parse(e.to_string()))?;
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
                Event::Text(text) => {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| ScribeError::Parse(e.to_string()))?;
                    escape_text(&unescaped, &mut out);
                }
                Event::CData(cdata) => {
                    let bytes = cdata.into_inner();
                    let text = std::str::from_utf8(bytes.as_ref())
                        .map_err(|e| ScribeError::Parse(e.to_string()))?;
                    escape_text(text, &mut out);
                }
                // Canonical form carries no comments, declarations or
                // processing instructions.
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        Ok(out.nfc().collect())
    }

    /// Encode a fragment as an `rdf:XMLLiteral` typed literal.
    pub fn xml_literal(fragment: &str) -> Result<Literal, ScribeError> {
        Ok(Literal::typed(Self::encode(fragment)?, rdf::XML_LITERAL.clone()))
    }

    /// Convert plain text to canonical XHTML paragraphs — one `<p>` per
    /// non-blank line — typed `rdf:HTML`.
    pub fn html_literal(text: &str) -> Result<Literal, ScribeError> {
        let fragment = Self::paragraphs_to_xhtml(text);
        Ok(Literal::typed(Self::encode(&fragment)?, rdf::HTML.clone()))
    }

    /// Wrap each non-blank line of `text` in a `<p>` element, escaping
    /// markup-significant characters.
    #[must_use]
    pub fn paragraphs_to_xhtml(text: &str) -> String {
        let mut out = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("<p>");
            escape_text(trimmed, &mut out);
            out.push_str("</p>");
        }
        out
    }

    fn write_start(start: &BytesStart<'_>, out: &mut String) -> Result<(), ScribeError> {
        let name = start.name();
        let name =
            std::str::from_utf8(name.as_ref()).map_err(|e| ScribeError::Parse(e.to_string()))?;
        out.push('<');
        out.push_str(name);

        let mut attrs: Vec<(String, String)> = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ScribeError::Parse(e.to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| ScribeError::Parse(e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| ScribeError::Parse(e.to_string()))?
                .into_owned();
            attrs.push((key, value));
        }

        // Namespace declarations precede ordinary attributes; each group
        // sorts lexicographically.
        attrs.sort_by(|a, b| {
            let a_key = (!is_namespace_decl(&a.0), a.0.as_str());
            let b_key = (!is_namespace_decl(&b.0), b.0.as_str());
            a_key.cmp(&b_key)
        });

        for (key, value) in &attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_attribute(value, out);
            out.push('"');
        }
        out.push('>');
        Ok(())
    }
}

fn is_namespace_decl(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

fn escape_text(input: &str, out: &mut String) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(input: &str, out: &mut String) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(c),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
