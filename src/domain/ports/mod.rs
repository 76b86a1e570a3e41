//! Port trait definitions (Hexagonal Architecture)
//!
//! - RepositoryGateway: read-only queries against the hosted repository
//!
//! Adapters live in `crate::adapters`; services depend only on these traits.

pub mod repository_gateway;

pub use repository_gateway::RepositoryGateway;
