//! Structured query model for the search backend.
//!
//! The backend consumes JSON request bodies; these types model that
//! representation explicitly instead of string-templating it. Query text
//! itself is opaque here: the backend's own query-string grammar applies,
//! and a malformed query surfaces as the backend's parse error, unmodified.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::search::scope::Facet;

/// How a parsed query string combines its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Every term must match (conjunctive).
    And,
    /// Any term may match (disjunctive).
    Or,
}

/// A field reference with a relevance multiplier, rendered `name^boost`.
///
/// The boost is a relative weight; `1` is the baseline and renders as the
/// bare field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBoost {
    pub name: &'static str,
    pub boost: u32,
}

impl FieldBoost {
    pub const fn new(name: &'static str, boost: u32) -> Self {
        Self { name, boost }
    }

    pub fn render(&self) -> String {
        if self.boost == 1 {
            self.name.to_owned()
        } else {
            format!("{}^{}", self.name, self.boost)
        }
    }
}

impl Serialize for FieldBoost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

/// A parsed-text query restricted to a weighted field set.
#[derive(Debug, Clone, Serialize)]
pub struct SimpleQueryString {
    pub query: String,
    pub fields: Vec<FieldBoost>,
    pub default_operator: Operator,
}

impl SimpleQueryString {
    pub fn new(query: impl Into<String>, fields: &[FieldBoost], default_operator: Operator) -> Self {
        Self {
            query: query.into(),
            fields: fields.to_vec(),
            default_operator,
        }
    }
}

/// An exact-match filter over one facet field.
///
/// Serializes as `{"terms": {"<field>": [..]}}`. Filters do not contribute
/// to scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsFilter {
    pub facet: Facet,
    pub values: Vec<String>,
}

impl TermsFilter {
    pub fn new(facet: Facet, values: Vec<String>) -> Self {
        Self { facet, values }
    }
}

impl Serialize for TermsFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Body<'a> {
            field: &'static str,
            values: &'a [String],
        }

        impl Serialize for Body<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(self.field, self.values)?;
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            "terms",
            &Body {
                field: self.facet.field(),
                values: &self.values,
            },
        )?;
        map.end()
    }
}

/// Boolean combinator. `should` clauses are alternatives whose scores add
/// up, so a document matching several alternatives outranks one matching a
/// single alternative, with no explicit per-clause weighting needed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<TermsFilter>,
}

/// A query tree node. Externally tagged, so each variant serializes under
/// its backend name (`simple_query_string`, `bool`).
#[derive(Debug, Clone, Serialize)]
pub enum Query {
    #[serde(rename = "simple_query_string")]
    SimpleQueryString(SimpleQueryString),
    #[serde(rename = "bool")]
    Bool(BoolQuery),
}

/// Snippet encoding applied to highlighted fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoder {
    Default,
    /// HTML-entity encoding, the defense against injected markup in
    /// highlighted content.
    Html,
}

/// Highlighting parameters: encoder, per-field fragment cap, and the
/// fields snippets are produced for.
#[derive(Debug, Clone, Serialize)]
pub struct HighlightOptions {
    pub encoder: Encoder,
    pub number_of_fragments: usize,
    #[serde(serialize_with = "fields_as_empty_objects")]
    pub fields: Vec<&'static str>,
}

/// The backend expects highlight fields as a `name -> options` map; we
/// carry no per-field options, so every value is an empty object.
fn fields_as_empty_objects<S: Serializer>(
    fields: &[&'static str],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for field in fields {
        map.serialize_entry(field, &serde_json::Map::new())?;
    }
    map.end()
}

/// Payload field selection. `excludes` withholds large stored fields from
/// the response to bound transfer size.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

/// A complete request body: query tree, highlighting, payload selection,
/// and the result-page cap.
#[derive(Debug, Clone, Serialize)]
pub struct SearchBody {
    pub query: Query,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightOptions>,
    #[serde(rename = "_source")]
    pub source: SourceFilter,
    pub size: usize,
}
