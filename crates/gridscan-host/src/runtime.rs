use gridscan_core::{channel::MutexComputeChannel, client::ComputeClient, Runtime};
use gridscan_runtime::{memory_management::MemoryManagement, storage::BytesStorage, ComputeRuntime};

use crate::{compute::HostServer, device::HostDevice};

#[derive(Debug)]
pub struct HostRuntime;

static RUNTIME: ComputeRuntime<HostDevice, Server, Channel> = ComputeRuntime::new();

type Server = HostServer;
type Channel = MutexComputeChannel<Server>;

fn create_client() -> ComputeClient<Server, Channel> {
    let memory_management = MemoryManagement::new(BytesStorage::default());
    let server = HostServer::new(memory_management);

    ComputeClient::new(MutexComputeChannel::new(server))
}

impl Runtime for HostRuntime {
    type Server = Server;
    type Channel = Channel;
    type Device = HostDevice;

    fn client(device: &Self::Device) -> ComputeClient<Self::Server, Self::Channel> {
        RUNTIME.client(device, create_client)
    }

    fn name() -> &'static str {
        "host"
    }
}
