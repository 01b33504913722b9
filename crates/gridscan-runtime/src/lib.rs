#![warn(missing_docs)]

//! gridscan runtime crate: the plumbing between kernel launchers and a compute backend.

#[macro_use]
extern crate derive_new;

/// Identifier types.
pub mod id;

/// Compute channel module.
pub mod channel;
/// Compute client module.
pub mod client;
/// Global configuration and logging.
pub mod config;
/// Kernel metadata.
pub mod kernel;
/// Memory management module.
pub mod memory_management;
/// Compute server module.
pub mod server;
/// Compute storage module.
pub mod storage;

mod base;
pub use base::*;
