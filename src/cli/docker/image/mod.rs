//! Builder image management.
//!
//! The builder image is published per Servoy version; the setup step checks
//! the registry for it and pulls it, the cleanup step removes it again.

mod age;
mod availability;
mod config;
mod manager;
mod manifest;
mod utils;

pub use availability::check_docker_available;
pub use manager::{ImageRemoval, inspect_manifest, pull_image, remove_local_image};
