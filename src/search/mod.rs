//! Faceted full-text search over the external documentation index.
//!
//! This module builds weighted boolean queries; it does not own the index.
//! [`FacetedSearch`] selects a per-scope field/boost table, parses the same
//! query text conjunctively and disjunctively, OR-combines the two, applies
//! declared facet filters, and hands the structured request to a
//! [`SearchBackend`] after the scope's before-search hook has had a chance
//! to rewrite it.

pub mod backend;
pub mod faceted;
pub mod hooks;
pub mod query;
pub mod scope;

pub use backend::{ScoredDoc, SearchBackend, SearchRequest, SearchResponse};
pub use faceted::{FacetedSearch, MAX_FRAGMENTS, PAGE_SIZE};
pub use hooks::{BeforeSearchHook, SearchHooks, UserIdentity};
pub use query::{
    BoolQuery, Encoder, FieldBoost, HighlightOptions, Operator, Query, SearchBody,
    SimpleQueryString, SourceFilter, TermsFilter,
};
pub use scope::{Facet, SearchScope};
