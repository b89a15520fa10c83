//! Document scopes and their field, facet, and index tables.

use crate::search::query::FieldBoost;

/// A filter dimension over search results. The set is fixed; each scope
/// declares the subset it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Project,
    Version,
    DocType,
    Language,
    /// Which index a document came from; only meaningful for [`SearchScope::All`].
    Index,
}

impl Facet {
    /// Facet name as callers select it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Version => "version",
            Self::DocType => "doc_type",
            Self::Language => "language",
            Self::Index => "index",
        }
    }

    /// Backing document field the filter matches against. The index facet
    /// filters on the backend's index metadata field rather than a stored
    /// document field.
    pub fn field(self) -> &'static str {
        match self {
            Self::Index => "_index",
            other => other.as_str(),
        }
    }
}

const DOMAIN_FIELDS: &[FieldBoost] = &[
    FieldBoost::new("display_name", 5),
    FieldBoost::new("name", 1),
];

const PAGE_FIELDS: &[FieldBoost] = &[
    FieldBoost::new("title", 10),
    FieldBoost::new("headers", 5),
    FieldBoost::new("content", 1),
];

const PROJECT_FIELDS: &[FieldBoost] = &[
    FieldBoost::new("name", 10),
    FieldBoost::new("slug", 5),
    FieldBoost::new("description", 1),
];

// Union scope: a project name match is the strongest signal of all, ahead
// of page titles.
const ALL_FIELDS: &[FieldBoost] = &[
    FieldBoost::new("title", 10),
    FieldBoost::new("headers", 5),
    FieldBoost::new("content", 1),
    FieldBoost::new("name", 20),
    FieldBoost::new("slug", 5),
    FieldBoost::new("description", 1),
    FieldBoost::new("display_name", 5),
];

const DOMAIN_FACETS: &[Facet] = &[Facet::Project, Facet::Version, Facet::DocType];
const PAGE_FACETS: &[Facet] = &[Facet::Project, Facet::Version];
const PROJECT_FACETS: &[Facet] = &[Facet::Language];
const ALL_FACETS: &[Facet] = &[
    Facet::Project,
    Facet::Version,
    Facet::DocType,
    Facet::Language,
    Facet::Index,
];

/// Which document shapes a search runs over: one of the three indices, or
/// the union of all of them with its own boost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Custom-domain records.
    Domains,
    /// Per-page records.
    Pages,
    /// Per-project records.
    Projects,
    /// All three, searched together.
    All,
}

impl SearchScope {
    /// Named indices this scope queries.
    pub fn indices(self) -> &'static [&'static str] {
        match self {
            Self::Domains => &["domains"],
            Self::Pages => &["pages"],
            Self::Projects => &["projects"],
            Self::All => &["domains", "pages", "projects"],
        }
    }

    /// Weighted field table queries run against.
    pub fn fields(self) -> &'static [FieldBoost] {
        match self {
            Self::Domains => DOMAIN_FIELDS,
            Self::Pages => PAGE_FIELDS,
            Self::Projects => PROJECT_FIELDS,
            Self::All => ALL_FIELDS,
        }
    }

    /// Facets callers may filter this scope by.
    pub fn facets(self) -> &'static [Facet] {
        match self {
            Self::Domains => DOMAIN_FACETS,
            Self::Pages => PAGE_FACETS,
            Self::Projects => PROJECT_FACETS,
            Self::All => ALL_FACETS,
        }
    }

    pub fn declares(self, facet: Facet) -> bool {
        self.facets().contains(&facet)
    }
}
