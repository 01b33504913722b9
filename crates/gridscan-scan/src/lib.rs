//! Associative scans along any axis of tensors of rank 1 to 4.
//!
//! A scan is expressed as a chain of dispatches whose invocations never synchronize: short
//! axes are folded by a single sequential kernel, longer ones are contracted pairwise,
//! scanned recursively and merged back.

#[macro_use]
extern crate derive_new;

pub mod axis;
pub mod instructions;
pub mod kernels;

mod descriptor;
mod error;
mod orchestrator;
mod strategy;

pub use descriptor::*;
pub use error::*;
pub use orchestrator::*;
pub use strategy::*;

#[cfg(feature = "export_tests")]
pub mod tests;

use gridscan_core::prelude::*;

use crate::instructions::ScanInstruction;

/// Entry point for scans.
///
/// Returns a new tensor holding the scan of `input` along `axis`. When no strategy is given,
/// the one of the [global configuration](gridscan_core::config::GlobalConfig) is used.
///
/// Scans accumulate in `f32`, see [precision](ScanInstruction#precision).
pub fn associative_scan<R: Runtime, I: ScanInstruction>(
    client: &ComputeClient<R::Server, R::Channel>,
    input: TensorHandleRef<'_, R>,
    instruction: I,
    axis: usize,
    inclusive: bool,
    strategy: Option<ScanStrategy>,
) -> Result<TensorHandle<R>, ScanError> {
    let descriptor = ScanDescriptor::new(input.shape.clone(), axis, instruction, inclusive)?;
    let strategy = strategy.unwrap_or_else(ScanStrategy::from_config);

    ScanOrchestrator::new(client, strategy).scan(&descriptor, input)
}
