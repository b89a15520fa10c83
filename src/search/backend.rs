//! The search backend contract.
//!
//! The index, its schema, and its query-string grammar live elsewhere; this
//! crate only constructs requests and consumes ranked responses. Backend
//! failures (network errors, unparsable query strings) are the backend's
//! own errors and pass through unmodified.

use std::future::Future;

use ahash::AHashMap;

use crate::search::query::SearchBody;

/// A fully-built request: the indices to query and the body to send.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub indices: Vec<String>,
    pub body: SearchBody,
}

impl SearchRequest {
    /// The request body as the JSON document the backend consumes.
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.body).unwrap_or_default()
    }
}

/// One ranked document.
///
/// `highlights` maps field names to snippet fragments. Fragments arrive
/// from the backend as raw excerpt text; encoding and the per-field
/// fragment cap are applied by [`FacetedSearch::execute`], in one place.
///
/// [`FacetedSearch::execute`]: crate::search::faceted::FacetedSearch::execute
#[derive(Debug, Clone)]
pub struct ScoredDoc {
    /// Index the document came from.
    pub index: String,
    pub id: String,
    pub score: f32,
    /// Stored fields, minus whatever the request's source filter excluded.
    pub source: serde_json::Value,
    pub highlights: AHashMap<String, Vec<String>>,
}

impl ScoredDoc {
    pub fn new(index: impl Into<String>, id: impl Into<String>, score: f32) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
            score,
            source: serde_json::Value::Null,
            highlights: AHashMap::new(),
        }
    }

    pub fn with_source(mut self, source: serde_json::Value) -> Self {
        self.source = source;
        self
    }

    pub fn with_highlight(mut self, field: impl Into<String>, fragments: Vec<String>) -> Self {
        self.highlights.insert(field.into(), fragments);
        self
    }
}

/// Ranked results, highest score first.
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub hits: Vec<ScoredDoc>,
}

/// A search index capable of executing [`SearchRequest`]s.
///
/// One round-trip per call, no intermediate suspension points; timeout and
/// retry policy belong to the caller.
pub trait SearchBackend {
    fn execute(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = anyhow::Result<SearchResponse>> + Send;
}
