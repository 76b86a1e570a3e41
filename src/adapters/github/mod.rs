//! GitHub REST API v3 adapter.
//!
//! Implements the repository gateway port over the branches, contents,
//! pulls and commits endpoints.

pub mod client;
pub mod models;

pub use client::GitHubClient;
