//! Weighted, faceted search request construction and execution.

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::search::backend::{ScoredDoc, SearchBackend, SearchRequest};
use crate::search::hooks::{SearchHooks, UserIdentity};
use crate::search::query::{
    BoolQuery, Encoder, HighlightOptions, Operator, Query, SearchBody, SimpleQueryString,
    SourceFilter, TermsFilter,
};
use crate::search::scope::{Facet, SearchScope};

/// Results per request. Not configurable; pagination is the serving
/// layer's concern.
pub const PAGE_SIZE: usize = 25;

/// Highlight fragments retained per matched field.
pub const MAX_FRAGMENTS: usize = 3;

/// Large stored fields withheld from every payload.
const EXCLUDED_SOURCE_FIELDS: &[&str] = &["content", "headers"];

/// Builds and executes one faceted search.
///
/// The same free-text query is parsed twice, once requiring all terms and
/// once allowing any, and the two interpretations are OR-combined, so a
/// document satisfying the conjunctive reading scores higher than one
/// satisfying only the disjunctive reading. Facet selections become
/// exact-match filters; keys the scope does not declare are dropped.
///
/// ```
/// use dochost::search::{Facet, FacetedSearch, SearchScope, UserIdentity};
///
/// let request = FacetedSearch::new(SearchScope::Pages, UserIdentity::Anonymous)
///     .query("install guide")
///     .filter(Facet::Project, ["myproj"])
///     .build();
/// assert_eq!(request.indices, vec!["pages".to_owned()]);
/// ```
pub struct FacetedSearch {
    scope: SearchScope,
    user: UserIdentity,
    query: String,
    filters: AHashMap<Facet, Vec<String>>,
    exclude_fields: Vec<String>,
}

impl FacetedSearch {
    pub fn new(scope: SearchScope, user: UserIdentity) -> Self {
        Self {
            scope,
            user,
            query: String::new(),
            filters: AHashMap::new(),
            exclude_fields: EXCLUDED_SOURCE_FIELDS
                .iter()
                .map(|&f| f.to_owned())
                .collect(),
        }
    }

    /// Free-text query. Passed to the backend verbatim, unvalidated; with
    /// no query text the request matches everything the filters allow.
    pub fn query(mut self, text: impl Into<String>) -> Self {
        self.query = text.into();
        self
    }

    /// Select facet values to filter by. Selections for the same facet
    /// accumulate. Facets the scope does not declare are ignored at build
    /// time.
    pub fn filter<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters
            .entry(facet)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Replace the default payload exclusions (`content`, `headers`).
    pub fn exclude_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    /// Construct the request. Pure; no backend contact.
    pub fn build(&self) -> SearchRequest {
        let should = if self.query.is_empty() {
            Vec::new()
        } else {
            vec![
                Query::SimpleQueryString(SimpleQueryString::new(
                    &self.query,
                    self.scope.fields(),
                    Operator::And,
                )),
                Query::SimpleQueryString(SimpleQueryString::new(
                    &self.query,
                    self.scope.fields(),
                    Operator::Or,
                )),
            ]
        };

        let mut filter: Vec<TermsFilter> = Vec::with_capacity(self.filters.len());
        for (&facet, values) in &self.filters {
            if self.scope.declares(facet) {
                filter.push(TermsFilter::new(facet, values.clone()));
            } else {
                tracing::debug!(
                    facet = facet.as_str(),
                    scope = ?self.scope,
                    "dropping facet not declared for this scope"
                );
            }
        }
        // Stable clause order regardless of map iteration order.
        filter.sort_by_key(|f| f.facet.as_str());

        SearchRequest {
            indices: self.scope.indices().iter().map(|&s| s.to_owned()).collect(),
            body: SearchBody {
                query: Query::Bool(BoolQuery { should, filter }),
                highlight: Some(HighlightOptions {
                    encoder: Encoder::Html,
                    number_of_fragments: MAX_FRAGMENTS,
                    fields: self.scope.fields().iter().map(|f| f.name).collect(),
                }),
                source: SourceFilter {
                    excludes: self.exclude_fields.clone(),
                },
                size: PAGE_SIZE,
            },
        }
    }

    /// Build the request, run the scope's before-search hook over it, and
    /// execute it.
    ///
    /// Backend errors propagate verbatim as [`Error::Backend`]. On
    /// success, the page cap and the per-field fragment cap are enforced
    /// and every highlight fragment is HTML-entity-encoded, so the caller
    /// can render snippets without further sanitization.
    pub async fn execute<B: SearchBackend>(
        &self,
        backend: &B,
        hooks: &SearchHooks,
    ) -> Result<Vec<ScoredDoc>> {
        let request = hooks.apply(self.scope, self.build(), &self.user);

        let mut response = backend.execute(&request).await.map_err(Error::backend)?;

        // Caps are enforced on the response as well as requested in the
        // body: a hook that swapped in a wider request cannot widen the
        // page handed to the caller.
        response.hits.truncate(PAGE_SIZE);
        for hit in &mut response.hits {
            for fragments in hit.highlights.values_mut() {
                fragments.truncate(MAX_FRAGMENTS);
                for fragment in fragments.iter_mut() {
                    *fragment = html_escape::encode_text(fragment).into_owned();
                }
            }
        }

        Ok(response.hits)
    }
}
