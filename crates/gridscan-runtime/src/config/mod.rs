/// Compilation config module.
pub mod compilation;
/// Dispatch config module.
pub mod dispatch;
/// Scan strategy config module.
pub mod scan;

mod base;
mod logger;

pub use base::*;
pub use logger::*;
