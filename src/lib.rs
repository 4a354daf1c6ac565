//! compws: competition workspace
//!
//! Browse competitions and their experiments as a lazily expanded tree,
//! create projects, and run simulated experiments with cancellable progress.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
