//! gridscan core crate: shapes, tensor handles and the kernel contract.
//!
//! A kernel is a pure function from an output coordinate to one `f32` value,
//! together with the source text it would be emitted as on a device.

#[macro_use]
extern crate derive_new;

/// Kernel contract and launching.
pub mod compute;

mod error;
mod runtime;
mod shape;
mod tensor;

pub use error::*;
pub use runtime::*;
pub use shape::*;
pub use tensor::*;

pub use gridscan_runtime::channel;
pub use gridscan_runtime::client;
pub use gridscan_runtime::config;
pub use gridscan_runtime::id;
pub use gridscan_runtime::kernel;
pub use gridscan_runtime::memory_management;
pub use gridscan_runtime::server;

/// Export everything needed to write a kernel and launch it.
pub mod prelude {
    pub use crate::client::ComputeClient;
    pub use crate::compute::{launch, CompiledKernel, Inputs, Kernel, KernelInput, TensorView};
    pub use crate::id::KernelId;
    pub use crate::kernel::KernelMetadata;
    pub use crate::{ConfigurationError, Coordinate, Runtime, Shape, TensorHandle, TensorHandleRef};
}
