//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `path_config`: shared-domain serving (`/docs/{slug}/` prefixes)
//! - `subdomain_config`: subdomain serving (`{slug}.readthedocs.example`)
//!
//! # Helpers
//!
//! - Project graph builders (`standalone`, `translation_pair`,
//!   `subproject_pair`) over the in-memory `ProjectRecord`
//! - [`RecordingBackend`]: captures the request it was sent and answers
//!   with a canned response
//! - [`FailingBackend`]: always fails, for error-propagation tests
//! - [`BrokenProvider`]: a `ProjectLike` whose default-version lookup fails

use std::sync::{Arc, Mutex};

use rstest::fixture;

use dochost::project::{Domain, ProjectLike, ProjectRecord};
use dochost::search::{ScoredDoc, SearchBackend, SearchRequest, SearchResponse};
use dochost::{Result, ServeConfig};

/// Production domain used across the resolution suites.
pub const PRODUCTION_DOMAIN: &str = "readthedocs.example";

#[fixture]
pub fn path_config() -> ServeConfig {
    ServeConfig::new(PRODUCTION_DOMAIN).unwrap()
}

#[fixture]
pub fn subdomain_config() -> ServeConfig {
    ServeConfig::new(PRODUCTION_DOMAIN).unwrap().with_subdomain(true)
}

/// A plain project: language `en`, default version `latest`, no relations.
#[allow(dead_code)] // Helpers used across different integration test crates
pub fn standalone(slug: &str) -> ProjectRecord {
    ProjectRecord::new(slug)
}

/// A main project plus a translation of it in the given language.
#[allow(dead_code)]
pub fn translation_pair(main_slug: &str, language: &str) -> (Arc<ProjectRecord>, ProjectRecord) {
    let main = Arc::new(ProjectRecord::new(main_slug));
    let translation = ProjectRecord::new(format!("{}-{}", main_slug, language))
        .with_language(language)
        .translation_of(&main);
    (main, translation)
}

/// A parent project plus a subproject nested under it.
#[allow(dead_code)]
pub fn subproject_pair(parent_slug: &str, child_slug: &str) -> (Arc<ProjectRecord>, ProjectRecord) {
    let parent = Arc::new(ProjectRecord::new(parent_slug));
    let child = ProjectRecord::new(child_slug).subproject_of(&parent);
    (parent, child)
}

/// A `ProjectLike` whose default-version lookup always fails, standing in
/// for a data provider with broken storage behind it.
#[allow(dead_code)]
pub struct BrokenProvider {
    pub slug: String,
}

#[allow(dead_code)]
impl BrokenProvider {
    pub fn new(slug: &str) -> Self {
        Self {
            slug: slug.to_owned(),
        }
    }
}

impl ProjectLike for BrokenProvider {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn language(&self) -> &str {
        "en"
    }

    fn is_single_version(&self) -> bool {
        false
    }

    fn default_version(&self) -> Result<String> {
        Err(dochost::Error::provider(anyhow::anyhow!(
            "version storage unreachable"
        )))
    }

    fn main_translation(&self) -> Option<&dyn ProjectLike> {
        None
    }

    fn superproject(&self) -> Option<&dyn ProjectLike> {
        None
    }

    fn canonical_domain(&self) -> Option<&Domain> {
        None
    }
}

/// Search backend double that records the request it receives and returns
/// a canned response.
#[allow(dead_code)]
pub struct RecordingBackend {
    response: SearchResponse,
    last: Mutex<Option<SearchRequest>>,
}

#[allow(dead_code)]
impl RecordingBackend {
    /// Backend answering every request with `response`.
    pub fn returning(response: SearchResponse) -> Self {
        Self {
            response,
            last: Mutex::new(None),
        }
    }

    /// Backend answering every request with no hits.
    pub fn empty() -> Self {
        Self::returning(SearchResponse::default())
    }

    /// The most recent request this backend executed.
    pub fn last_request(&self) -> Option<SearchRequest> {
        self.last.lock().unwrap().clone()
    }
}

impl SearchBackend for RecordingBackend {
    async fn execute(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        *self.last.lock().unwrap() = Some(request.clone());
        Ok(self.response.clone())
    }
}

/// Search backend double that always fails with the given message, the way
/// a real backend surfaces network failures or unparsable query strings.
#[allow(dead_code)]
pub struct FailingBackend(pub &'static str);

impl SearchBackend for FailingBackend {
    async fn execute(&self, _request: &SearchRequest) -> anyhow::Result<SearchResponse> {
        Err(anyhow::anyhow!("{}", self.0))
    }
}

/// A response of `count` ranked hits with descending scores.
#[allow(dead_code)]
pub fn hits(count: usize) -> SearchResponse {
    #[allow(clippy::cast_precision_loss)]
    let hits = (0..count)
        .map(|i| ScoredDoc::new("pages", format!("doc-{}", i), (count - i) as f32))
        .collect();
    SearchResponse { hits }
}
