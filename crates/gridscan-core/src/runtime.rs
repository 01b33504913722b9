use crate::compute::Kernel;
use gridscan_runtime::{channel::ComputeChannel, client::ComputeClient, server::ComputeServer};

/// Runtime for gridscan.
pub trait Runtime: Send + Sync + 'static + core::fmt::Debug {
    /// The compute server used to run kernels.
    type Server: ComputeServer<Kernel = Box<dyn Kernel>>;
    /// The channel used to communicate with the compute server.
    type Channel: ComputeChannel<Self::Server>;
    /// The device used to retrieve the compute client.
    type Device: Default + Clone + core::fmt::Debug + core::hash::Hash + Eq + Send + Sync;

    /// Retrieve the compute client from the runtime device.
    fn client(device: &Self::Device) -> ComputeClient<Self::Server, Self::Channel>;

    /// The runtime name.
    fn name() -> &'static str;
}
