//! Canonical URL resolution and faceted search query construction for
//! multi-tenant documentation hosting.
//!
//! Two independent components, no shared runtime state:
//!
//! - [`resolve`] derives the one canonical path and host any file of a
//!   hosted project is served under, from the project record and the
//!   serving configuration.
//! - [`search`] builds weighted, faceted boolean queries and executes them
//!   against an external search backend.
//!
//! The persistence layer, the search index, routing, and rendering are all
//! external; they are consumed through the read contracts in [`project`]
//! and [`search::backend`].

pub mod config;
pub mod error;
pub mod project;
pub mod resolve;
pub mod search;
pub mod tracing;

pub use config::{Scheme, ServeConfig};
pub use error::{Error, Result};
pub use project::{Domain, ProjectLike, ProjectRecord, RelationRole};
pub use resolve::{PathTemplate, ResolveOverrides, Resolver};
pub use search::{FacetedSearch, SearchBackend, SearchHooks, SearchScope, UserIdentity};
