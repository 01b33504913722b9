#[macro_use]
extern crate derive_new;


pub mod compute;
pub mod device;
pub mod runtime;

pub use device::HostDevice;
pub use runtime::*;
