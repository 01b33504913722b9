use crate::{
    memory_management::MemoryUsage,
    server::{Binding, ComputeServer, Handle, IoError, LaunchError},
};

/// The ComputeChannel trait links the ComputeClient to the ComputeServer
/// while ensuring thread-safety
pub trait ComputeChannel<Server: ComputeServer>: Clone + core::fmt::Debug + Send + Sync {
    /// Given bindings, returns owned resources as bytes
    fn read(&self, bindings: Vec<Binding>) -> Result<Vec<Vec<u8>>, IoError>;

    /// Given a resource as bytes, stores it and returns the resource handle
    fn create(&self, data: &[u8]) -> Handle;

    /// Reserves `size` bytes in the storage, and returns a handle over them
    fn empty(&self, size: usize) -> Handle;

    /// Executes the `kernel` over the given `bindings`.
    fn execute(&self, kernel: Server::Kernel, bindings: Vec<Binding>) -> Result<(), LaunchError>;

    /// Wait for the completion of every task in the server.
    fn sync(&self);

    /// Get the current memory usage of the server.
    fn memory_usage(&self) -> MemoryUsage;

    /// Ask the server to release memory that it can release.
    fn memory_cleanup(&self);
}
