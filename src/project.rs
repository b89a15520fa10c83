//! Read contracts over the project data layer.
//!
//! The resolver never talks to storage directly; it consumes a
//! [`ProjectLike`] record exposed by the hosting platform's persistence
//! layer. [`ProjectRecord`] is the bundled in-memory implementation, useful
//! both as a plain data carrier and as the fixture type for tests.

use std::sync::Arc;

use crate::error::Result;

/// A custom hostname bound to a project.
///
/// The host string arrives already cleaned and validated by the data layer;
/// it is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    host: String,
    canonical: bool,
}

impl Domain {
    /// A domain binding that is not the preferred host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            canonical: false,
        }
    }

    /// A domain binding flagged as the preferred (canonical) host.
    pub fn canonical(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            canonical: true,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical
    }
}

/// Read access to a documentation project record.
///
/// Everything the resolver needs, nothing it doesn't: identity, locale,
/// versioning mode, relation references, and the canonical domain binding.
/// `default_version` may hit external storage and is therefore fallible;
/// failures propagate to the caller unmodified.
pub trait ProjectLike {
    /// Unique, stable, URL-safe identifier.
    fn slug(&self) -> &str;

    /// Localization code (e.g. `en`, `pt-br`).
    fn language(&self) -> &str;

    /// Whether language/version path segments are omitted entirely.
    fn is_single_version(&self) -> bool;

    /// Slug of the version served when none is requested. May require a
    /// non-trivial lookup; caching is the provider's concern.
    fn default_version(&self) -> Result<String>;

    /// The main-language project this record is a translation of.
    fn main_translation(&self) -> Option<&dyn ProjectLike>;

    /// The parent this record is nested under, if any. Providers with a
    /// many-relation model must surface only the first relation here.
    fn superproject(&self) -> Option<&dyn ProjectLike>;

    /// The first domain binding flagged canonical, if any.
    fn canonical_domain(&self) -> Option<&Domain>;

    /// Slug variant safe for use as a DNS label.
    fn subdomain_slug(&self) -> String {
        self.slug().replace('_', "-")
    }
}

/// How a project relates to the rest of the platform for resolution.
///
/// A project is in at most one role. When a record carries both a
/// translation reference and a superproject relation, translation wins and
/// the subproject relation is ignored.
#[derive(Clone, Copy)]
pub enum RelationRole<'a> {
    /// No parent of either kind.
    Standalone,
    /// A localized variant of `main`, sharing its slug namespace while
    /// keeping its own language segment.
    Translation { main: &'a dyn ProjectLike },
    /// Nested under `parent`'s namespace as `projects/{slug}/`.
    Subproject { parent: &'a dyn ProjectLike },
}

impl<'a> RelationRole<'a> {
    /// Classify a project with the fixed precedence
    /// Translation > Subproject > Standalone.
    pub fn of(project: &'a dyn ProjectLike) -> Self {
        if let Some(main) = project.main_translation() {
            Self::Translation { main }
        } else if let Some(parent) = project.superproject() {
            Self::Subproject { parent }
        } else {
            Self::Standalone
        }
    }

    /// The project whose identity governs domain resolution: the
    /// translation main, the superproject parent, or the project itself.
    pub fn canonical_project(self, project: &'a dyn ProjectLike) -> &'a dyn ProjectLike {
        match self {
            Self::Translation { main } => main,
            Self::Subproject { parent } => parent,
            Self::Standalone => project,
        }
    }
}

/// In-memory [`ProjectLike`] implementation.
///
/// Relation targets are shared via `Arc`, so a parent record can back any
/// number of translations and subprojects.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    slug: String,
    language: String,
    default_version: String,
    single_version: bool,
    main_translation: Option<Arc<ProjectRecord>>,
    superprojects: Vec<Arc<ProjectRecord>>,
    domains: Vec<Domain>,
}

impl ProjectRecord {
    /// A standalone project with platform defaults: language `en`, default
    /// version `latest`, versioned serving, no relations, no domains.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            language: "en".to_owned(),
            default_version: "latest".to_owned(),
            single_version: false,
            main_translation: None,
            superprojects: Vec::new(),
            domains: Vec::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = version.into();
        self
    }

    pub fn single_version(mut self, enabled: bool) -> Self {
        self.single_version = enabled;
        self
    }

    /// Mark this record as a translation of `main`.
    pub fn translation_of(mut self, main: &Arc<ProjectRecord>) -> Self {
        self.main_translation = Some(Arc::clone(main));
        self
    }

    /// Nest this record under `parent`. May be called repeatedly, but only
    /// the first relation is ever consulted: a project has a single
    /// canonical parent, and later relations are deliberately ignored.
    pub fn subproject_of(mut self, parent: &Arc<ProjectRecord>) -> Self {
        self.superprojects.push(Arc::clone(parent));
        self
    }

    /// Bind a domain to this record.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domains.push(domain);
        self
    }
}

impl ProjectLike for ProjectRecord {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn is_single_version(&self) -> bool {
        self.single_version
    }

    fn default_version(&self) -> Result<String> {
        Ok(self.default_version.clone())
    }

    fn main_translation(&self) -> Option<&dyn ProjectLike> {
        self.main_translation
            .as_deref()
            .map(|p| p as &dyn ProjectLike)
    }

    fn superproject(&self) -> Option<&dyn ProjectLike> {
        self.superprojects.first().map(|p| &**p as &dyn ProjectLike)
    }

    fn canonical_domain(&self) -> Option<&Domain> {
        self.domains.iter().find(|d| d.is_canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn translation_takes_precedence_over_subproject() {
        let main = Arc::new(ProjectRecord::new("main"));
        let parent = Arc::new(ProjectRecord::new("parent"));
        let project = ProjectRecord::new("child")
            .translation_of(&main)
            .subproject_of(&parent);

        match RelationRole::of(&project) {
            RelationRole::Translation { main } => {
                check!(main.slug() == "main");
            }
            _ => panic!("expected translation role"),
        }
    }

    #[test]
    fn only_first_superproject_relation_is_used() {
        let first = Arc::new(ProjectRecord::new("first"));
        let second = Arc::new(ProjectRecord::new("second"));
        let project = ProjectRecord::new("child")
            .subproject_of(&first)
            .subproject_of(&second);

        check!(project.superproject().unwrap().slug() == "first");
    }

    #[test]
    fn canonical_domain_skips_non_canonical_bindings() {
        let project = ProjectRecord::new("proj")
            .with_domain(Domain::new("mirror.example"))
            .with_domain(Domain::canonical("docs.example"))
            .with_domain(Domain::canonical("late.example"));

        check!(project.canonical_domain().unwrap().host() == "docs.example");
    }

    #[test]
    fn subdomain_slug_replaces_underscores() {
        let project = ProjectRecord::new("my_proj_v2");
        check!(project.subdomain_slug() == "my-proj-v2");
    }
}
