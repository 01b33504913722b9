use gridscan_runtime::{channel::MutexComputeChannel, client::ComputeClient, ComputeRuntime};

use super::DummyServer;

/// The dummy device.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DummyDevice;

pub type DummyChannel = MutexComputeChannel<DummyServer>;
pub type DummyClient = ComputeClient<DummyServer, DummyChannel>;

static RUNTIME: ComputeRuntime<DummyDevice, DummyServer, DummyChannel> = ComputeRuntime::new();

pub fn init_client() -> DummyClient {
    let server = DummyServer::new();
    let channel = MutexComputeChannel::new(server);
    ComputeClient::new(channel)
}

pub fn test_client(device: &DummyDevice) -> DummyClient {
    RUNTIME.client(device, init_client)
}
