//! Adapters implementing the repository gateway port.

pub mod github;
pub mod scripted;

pub use github::GitHubClient;
pub use scripted::ScriptedGateway;
