mod compiled;
mod kernel;
mod launcher;

pub use compiled::*;
pub use kernel::*;
pub use launcher::*;
