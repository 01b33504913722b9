use gridscan_runtime::{client::ComputeClient, server::LaunchError};

use super::Kernel;
use crate::{Runtime, TensorHandle, TensorHandleRef};

/// Launch a kernel over the given inputs, returning the freshly allocated output.
///
/// The inputs must be given in the order declared by [Kernel::inputs]. The compiled source is
/// emitted on the compilation loggers when they are enabled.
pub fn launch<R: Runtime, K: Kernel>(
    client: &ComputeClient<R::Server, R::Channel>,
    kernel: K,
    inputs: &[TensorHandleRef<'_, R>],
) -> Result<TensorHandle<R>, LaunchError> {
    if client.compilation_logging_enabled() {
        client.log_compilation(&kernel.compile());
    }

    let output = TensorHandle::<R>::empty(client, kernel.output_shape().clone());
    let mut bindings = inputs
        .iter()
        .map(|input| input.binding())
        .collect::<Vec<_>>();
    bindings.push(output.handle.clone().binding());

    log::trace!("Launching {} on output {}", kernel.id(), output.shape);
    let kernel: Box<dyn Kernel> = Box::new(kernel);
    client.execute(kernel, bindings)?;

    Ok(output)
}
