use gridscan_runtime::{
    memory_management::{MemoryManagement, MemoryUsage},
    server::{Binding, ComputeServer, Handle, IoError, LaunchError},
    storage::BytesStorage,
};

use super::DummyKernel;

/// The dummy server is used to test the gridscan-runtime infrastructure.
/// It uses a bytes storage on the host, without asynchronous tasks.
#[derive(Debug)]
pub struct DummyServer {
    memory_management: MemoryManagement<BytesStorage>,
}

impl DummyServer {
    pub fn new() -> Self {
        Self {
            memory_management: MemoryManagement::new(BytesStorage::default()),
        }
    }
}

impl ComputeServer for DummyServer {
    type Kernel = Box<dyn DummyKernel>;

    fn read(&mut self, bindings: Vec<Binding>) -> Result<Vec<Vec<u8>>, IoError> {
        bindings
            .iter()
            .map(|binding| {
                self.memory_management
                    .get(&binding.memory)
                    .map(|bytes| bytes.to_vec())
                    .ok_or(IoError::InvalidHandle)
            })
            .collect()
    }

    fn create(&mut self, data: &[u8]) -> Handle {
        let handle = self.empty(data.len());
        let binding = handle.clone().binding();
        if let Some(bytes) = self.memory_management.get_mut(&binding.memory) {
            bytes.copy_from_slice(data);
        }
        handle
    }

    fn empty(&mut self, size: usize) -> Handle {
        Handle::new(self.memory_management.reserve(size), size)
    }

    fn execute(&mut self, kernel: Self::Kernel, bindings: Vec<Binding>) -> Result<(), LaunchError> {
        let inputs = bindings[..bindings.len() - 1]
            .iter()
            .map(|binding| self.memory_management.get(&binding.memory).unwrap().to_vec())
            .collect::<Vec<_>>();
        let output = kernel.compute(&inputs);

        let out = bindings.last().unwrap();
        self.memory_management
            .get_mut(&out.memory)
            .unwrap()
            .copy_from_slice(&output);
        Ok(())
    }

    fn sync(&mut self) {
        // Nothing to do with dummy backend.
    }

    fn memory_usage(&self) -> MemoryUsage {
        self.memory_management.memory_usage()
    }

    fn memory_cleanup(&mut self) {
        self.memory_management.cleanup();
    }
}
