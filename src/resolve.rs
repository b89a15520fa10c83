//! Canonical URL resolution.
//!
//! Every file of a hosted project is served under exactly one path and one
//! host, both derived deterministically from the project record and the
//! serving configuration. The producible path shapes:
//!
//! Subdomain or custom domain:
//!
//! - `/{lang}/{version}/{filename}`
//! - `/{filename}` (single version)
//! - `/projects/{subproject}/{lang}/{version}/{filename}`
//! - `/projects/{subproject}/{filename}` (subproject, single version)
//!
//! Shared-domain serving:
//!
//! - `/docs/{project}/{lang}/{version}/{filename}`
//! - `/docs/{project}/{filename}` (single version)
//! - `/docs/{project}/projects/{subproject}/{lang}/{version}/{filename}`
//! - `/docs/{project}/projects/{subproject}/{filename}`
//!
//! Resolution is pure: no I/O beyond the record's own accessors, no shared
//! state, and identical inputs always yield identical strings.

use crate::config::ServeConfig;
use crate::error::Result;
use crate::project::{Domain, ProjectLike, RelationRole};

/// The path template behind every served URL: plain blank-filling with no
/// validation. Slugs are assumed URL-safe by contract; the only text
/// adjustment is stripping a single leading `/` from the filename.
#[derive(Debug, Clone)]
pub struct PathTemplate<'a> {
    pub project_slug: &'a str,
    pub filename: &'a str,
    pub version_slug: &'a str,
    pub language: &'a str,
    pub single_version: bool,
    pub subproject_slug: Option<&'a str>,
    /// Serving directly from a subdomain or custom domain (path prefix `/`
    /// instead of `/docs/{project}/`).
    pub direct_serving: bool,
}

impl PathTemplate<'_> {
    /// Fill in the template. An empty filename yields a directory-style
    /// path ending in `/`.
    pub fn render(&self) -> String {
        let filename = self.filename.strip_prefix('/').unwrap_or(self.filename);

        let mut url = if self.direct_serving {
            "/".to_owned()
        } else {
            format!("/docs/{}/", self.project_slug)
        };

        if let Some(subproject) = self.subproject_slug.filter(|s| !s.is_empty()) {
            url.push_str(&format!("projects/{}/", subproject));
        }

        if self.single_version {
            url.push_str(filename);
        } else {
            url.push_str(&format!(
                "{}/{}/{}",
                self.language, self.version_slug, filename
            ));
        }

        url
    }
}

/// Caller-supplied overrides for [`Resolver::resolve_path`]. Unset fields
/// fall back to the project record; subdomain serving is intentionally not
/// overridable here and always follows the configuration.
#[derive(Debug, Clone, Default)]
pub struct ResolveOverrides {
    /// File to resolve, relative to the version root. Empty resolves the
    /// version's directory path.
    pub filename: String,
    /// Version slug to serve instead of the project's default version.
    pub version: Option<String>,
    /// Language segment to serve instead of the project's language.
    /// Ignored for translations, which always keep their own language.
    pub language: Option<String>,
    /// Force single-version paths; OR-ed with the project's own flag.
    pub single_version: bool,
    /// Serve under this domain instead of the project's canonical domain.
    pub domain: Option<Domain>,
}

impl ResolveOverrides {
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn single_version(mut self, enabled: bool) -> Self {
        self.single_version = enabled;
        self
    }

    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }
}

/// Resolves canonical paths, hosts, and absolute URLs for project records.
///
/// Holds only a reference to the serving configuration; every method is a
/// pure function of (record, overrides, config).
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a ServeConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ServeConfig) -> Self {
        Self { config }
    }

    /// Resolve the canonical path for `project`, with any subset of fields
    /// overridden.
    ///
    /// Fallback order: domain override, then the project's canonical
    /// domain; version override, then the provider's default version;
    /// language override, then the project language. Identity follows
    /// [`RelationRole`]: a translation serves under its main project's slug
    /// but keeps its own language (even against an override); a subproject
    /// serves under its parent's slug with a `projects/{slug}/` segment.
    pub fn resolve_path(
        &self,
        project: &dyn ProjectLike,
        overrides: &ResolveOverrides,
    ) -> Result<String> {
        let domain = overrides
            .domain
            .as_ref()
            .or_else(|| project.canonical_domain());

        let version_slug = match &overrides.version {
            Some(version) => version.clone(),
            None => project.default_version()?,
        };

        let mut language = overrides
            .language
            .as_deref()
            .unwrap_or_else(|| project.language());

        let (project_slug, subproject_slug) = match RelationRole::of(project) {
            RelationRole::Translation { main } => {
                // Translations share the main project's slug namespace but
                // always carry their own language segment.
                language = project.language();
                (main.slug(), None)
            }
            RelationRole::Subproject { parent } => (parent.slug(), Some(project.slug())),
            RelationRole::Standalone => (project.slug(), None),
        };

        let single_version = project.is_single_version() || overrides.single_version;

        tracing::trace!(
            project = project.slug(),
            served_as = project_slug,
            single_version,
            "resolving path"
        );

        Ok(PathTemplate {
            project_slug,
            filename: &overrides.filename,
            version_slug: &version_slug,
            language,
            single_version,
            subproject_slug,
            direct_serving: self.config.use_subdomain || domain.is_some(),
        }
        .render())
    }

    /// Resolve the canonical path with every field derived from the record
    /// itself. Equivalent to [`Resolver::resolve_path`] with empty
    /// overrides: single-version status in particular comes only from the
    /// project's own flag.
    pub fn smart_resolve_path(&self, project: &dyn ProjectLike, filename: &str) -> Result<String> {
        self.resolve_path(project, &ResolveOverrides::default().filename(filename))
    }

    /// Resolve the host `project` is served from.
    ///
    /// The governing identity is the translation main, else the
    /// superproject parent, else the project itself; subprojects never get
    /// a host of their own. A bound canonical domain wins outright, then
    /// subdomain serving computes `{slug}.{production_domain}`, and the
    /// bare production domain is the final fallback.
    pub fn resolve_domain(&self, project: &dyn ProjectLike) -> String {
        let canonical = RelationRole::of(project).canonical_project(project);

        if let Some(domain) = canonical.canonical_domain() {
            return domain.host().to_owned();
        }

        if self.config.use_subdomain {
            format!(
                "{}.{}",
                canonical.subdomain_slug(),
                self.config.production_domain
            )
        } else {
            self.config.production_domain.clone()
        }
    }

    /// Compose the absolute canonical URL for `project` with overrides.
    pub fn resolve(&self, project: &dyn ProjectLike, overrides: &ResolveOverrides) -> Result<String> {
        Ok(format!(
            "{}://{}{}",
            self.config.scheme,
            self.resolve_domain(project),
            self.resolve_path(project, overrides)?
        ))
    }

    /// Compose the absolute canonical URL with every field derived from
    /// the record.
    pub fn smart_resolve(&self, project: &dyn ProjectLike, filename: &str) -> Result<String> {
        self.resolve(project, &ResolveOverrides::default().filename(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn template<'a>(direct: bool, single: bool, subproject: Option<&'a str>) -> PathTemplate<'a> {
        PathTemplate {
            project_slug: "proj",
            filename: "index.html",
            version_slug: "stable",
            language: "en",
            single_version: single,
            subproject_slug: subproject,
            direct_serving: direct,
        }
    }

    #[rstest]
    #[case(false, false, None, "/docs/proj/en/stable/index.html")]
    #[case(false, true, None, "/docs/proj/index.html")]
    #[case(false, false, Some("sub"), "/docs/proj/projects/sub/en/stable/index.html")]
    #[case(false, true, Some("sub"), "/docs/proj/projects/sub/index.html")]
    #[case(true, false, None, "/en/stable/index.html")]
    #[case(true, true, None, "/index.html")]
    #[case(true, false, Some("sub"), "/projects/sub/en/stable/index.html")]
    #[case(true, true, Some("sub"), "/projects/sub/index.html")]
    fn render_covers_every_url_shape(
        #[case] direct: bool,
        #[case] single: bool,
        #[case] subproject: Option<&str>,
        #[case] expected: &str,
    ) {
        check!(template(direct, single, subproject).render() == expected);
    }

    #[test]
    fn render_strips_one_leading_slash() {
        let mut t = template(true, true, None);
        t.filename = "/guide/install.html";
        check!(t.render() == "/guide/install.html");

        // Only a single slash is stripped; the rest of the name is kept.
        t.filename = "//guide.html";
        check!(t.render() == "//guide.html");
    }

    #[test]
    fn render_empty_filename_is_a_directory_path() {
        let mut t = template(false, false, None);
        t.filename = "";
        check!(t.render() == "/docs/proj/en/stable/");
    }

    #[test]
    fn render_skips_empty_subproject_slug() {
        let t = template(false, false, Some(""));
        check!(t.render() == "/docs/proj/en/stable/index.html");
    }
}
