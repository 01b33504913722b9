mod compute;
mod kernel;
mod server;

pub use compute::*;
pub use kernel::*;
pub use server::*;
