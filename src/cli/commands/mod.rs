//! The three action steps.
//!
//! - `setup` (pre) - validate inputs, check the registry, pull the builder image
//! - `build` (main) - substitute templates, run the builder, report markers
//! - `cleanup` (post) - remove the local builder image

mod build;
mod cleanup;
mod setup;

pub use build::build;
pub use cleanup::cleanup;
pub use setup::setup;
