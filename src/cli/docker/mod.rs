//! Docker integration for the Servoy WAR builder.
//!
//! # Module Structure
//!
//! - `container_runner` - Runs the builder container with streaming output and a timeout
//! - `image` - Builder image availability, pull, age and removal
//! - `oom_detector` - Recognizes builder runs that ran out of memory

pub mod container_runner;
pub mod image;
pub mod oom_detector;

pub use container_runner::ContainerRunner;
