//! ghsync - propagate a submodule pointer from a CI build into another
//! GitHub repository.
//!
//! The pipeline:
//! 1. Build [`origin::OriginMetadata`] for the triggering build
//! 2. Open a [`repository::ContentRepository`] on the target repository
//! 3. Fetch the submodule entry and update it to the origin sha
//! 4. Resolve a safe base commit, commit the new gitlink, and open a PR

pub mod auth;
pub mod content;
pub mod error;
pub mod github;
pub mod origin;
pub mod push;
pub mod repository;
pub mod types;
