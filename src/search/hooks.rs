//! Before-search customization hooks.
//!
//! The serving layer may register one callback per document scope. The
//! callback sees the built request and the requesting user, and may return
//! a replacement request (e.g. to narrow results by the user's access). A
//! failing hook never fails the search: the error is logged and the
//! unmodified request proceeds.

use crate::search::backend::SearchRequest;
use crate::search::scope::SearchScope;

/// The requesting user, or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserIdentity {
    #[default]
    Anonymous,
    User(String),
}

impl UserIdentity {
    pub fn user(name: impl Into<String>) -> Self {
        Self::User(name.into())
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

/// A registered before-search callback.
pub type BeforeSearchHook =
    dyn Fn(&SearchRequest, &UserIdentity) -> anyhow::Result<SearchRequest> + Send + Sync;

/// Per-scope hook registry. All slots start empty.
#[derive(Default)]
pub struct SearchHooks {
    domains: Option<Box<BeforeSearchHook>>,
    pages: Option<Box<BeforeSearchHook>>,
    projects: Option<Box<BeforeSearchHook>>,
    all: Option<Box<BeforeSearchHook>>,
}

impl SearchHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_domains<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SearchRequest, &UserIdentity) -> anyhow::Result<SearchRequest>
            + Send
            + Sync
            + 'static,
    {
        self.domains = Some(Box::new(hook));
        self
    }

    pub fn on_pages<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SearchRequest, &UserIdentity) -> anyhow::Result<SearchRequest>
            + Send
            + Sync
            + 'static,
    {
        self.pages = Some(Box::new(hook));
        self
    }

    pub fn on_projects<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SearchRequest, &UserIdentity) -> anyhow::Result<SearchRequest>
            + Send
            + Sync
            + 'static,
    {
        self.projects = Some(Box::new(hook));
        self
    }

    pub fn on_all<F>(mut self, hook: F) -> Self
    where
        F: Fn(&SearchRequest, &UserIdentity) -> anyhow::Result<SearchRequest>
            + Send
            + Sync
            + 'static,
    {
        self.all = Some(Box::new(hook));
        self
    }

    fn for_scope(&self, scope: SearchScope) -> Option<&BeforeSearchHook> {
        let slot = match scope {
            SearchScope::Domains => &self.domains,
            SearchScope::Pages => &self.pages,
            SearchScope::Projects => &self.projects,
            SearchScope::All => &self.all,
        };
        slot.as_deref()
    }

    /// Run the hook registered for `scope`, if any. A returned replacement
    /// substitutes the request; an error degrades to the original.
    pub(crate) fn apply(
        &self,
        scope: SearchScope,
        request: SearchRequest,
        user: &UserIdentity,
    ) -> SearchRequest {
        let Some(hook) = self.for_scope(scope) else {
            return request;
        };

        match hook(&request, user) {
            Ok(replacement) => replacement,
            Err(err) => {
                tracing::error!(
                    scope = ?scope,
                    error = %err,
                    "before-search hook failed to return a usable request, continuing unmodified"
                );
                request
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::faceted::FacetedSearch;
    use assert2::check;

    fn request() -> SearchRequest {
        FacetedSearch::new(SearchScope::Pages, UserIdentity::Anonymous)
            .query("foo")
            .build()
    }

    #[test]
    fn unregistered_scope_passes_the_request_through() {
        let hooks = SearchHooks::new();
        let applied = hooks.apply(SearchScope::Pages, request(), &UserIdentity::Anonymous);
        check!(applied.indices == vec!["pages".to_owned()]);
    }

    #[test]
    fn hook_replacement_substitutes_the_request() {
        let hooks = SearchHooks::new().on_pages(|req, _user| {
            let mut replacement = req.clone();
            replacement.indices = vec!["pages-restricted".to_owned()];
            Ok(replacement)
        });

        let applied = hooks.apply(SearchScope::Pages, request(), &UserIdentity::Anonymous);
        check!(applied.indices == vec!["pages-restricted".to_owned()]);
    }

    #[test]
    fn failing_hook_degrades_to_the_original_request() {
        let hooks = SearchHooks::new().on_pages(|_req, _user| Err(anyhow::anyhow!("broken hook")));

        let applied = hooks.apply(SearchScope::Pages, request(), &UserIdentity::Anonymous);
        check!(applied.indices == vec!["pages".to_owned()]);
    }

    #[test]
    fn hooks_are_scoped() {
        let hooks = SearchHooks::new().on_all(|req, _user| {
            let mut replacement = req.clone();
            replacement.indices.clear();
            Ok(replacement)
        });

        // A pages search must not trip the all-scope hook.
        let applied = hooks.apply(SearchScope::Pages, request(), &UserIdentity::Anonymous);
        check!(applied.indices == vec!["pages".to_owned()]);
    }
}
