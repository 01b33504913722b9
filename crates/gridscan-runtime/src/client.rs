use core::fmt::Display;
use std::{
    marker::PhantomData,
    sync::Arc,
    time::{Duration, Instant},
};

use spin::Mutex;

use crate::{
    channel::ComputeChannel,
    config::{dispatch::DispatchLogLevel, Logger},
    id::KernelId,
    kernel::KernelMetadata,
    memory_management::MemoryUsage,
    server::{Binding, ComputeServer, Handle, IoError, LaunchError},
};

/// The ComputeClient is the entry point to require tasks from the ComputeServer.
/// It should be obtained for a specific device via the [compute runtime](crate::ComputeRuntime).
#[derive(Debug)]
pub struct ComputeClient<Server: ComputeServer, Channel> {
    channel: Channel,
    logger: Arc<Mutex<Logger>>,
    _server: PhantomData<Server>,
}

impl<S, C> Clone for ComputeClient<S, C>
where
    S: ComputeServer,
    C: ComputeChannel<S>,
{
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
            logger: self.logger.clone(),
            _server: PhantomData,
        }
    }
}

impl<Server, Channel> ComputeClient<Server, Channel>
where
    Server: ComputeServer,
    Channel: ComputeChannel<Server>,
{
    /// Create a new client.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            logger: Arc::new(Mutex::new(Logger::new())),
            _server: PhantomData,
        }
    }

    /// Given bindings, returns owned resources as bytes.
    pub fn read(&self, handles: Vec<Handle>) -> Result<Vec<Vec<u8>>, IoError> {
        self.channel
            .read(handles.into_iter().map(|handle| handle.binding()).collect())
    }

    /// Given a handle, returns the owned resource as bytes.
    pub fn read_one(&self, handle: Handle) -> Result<Vec<u8>, IoError> {
        let mut bytes = self.read(vec![handle])?;
        Ok(bytes.remove(0))
    }

    /// Given a resource, stores it and returns the resource handle.
    pub fn create(&self, data: &[u8]) -> Handle {
        self.channel.create(data)
    }

    /// Reserves `size` bytes in the storage, and returns a handle over them.
    pub fn empty(&self, size: usize) -> Handle {
        self.channel.empty(size)
    }

    /// Executes the `kernel` over the given `bindings`.
    ///
    /// The dispatch is synchronous: when this returns, the output binding holds the result.
    pub fn execute(&self, kernel: Server::Kernel, bindings: Vec<Binding>) -> Result<(), LaunchError> {
        let level = self.logger.lock().log_level_dispatch();

        match level {
            DispatchLogLevel::Disabled => self.channel.execute(kernel, bindings),
            DispatchLogLevel::Basic => {
                let (id, dims) = (kernel.id(), kernel.output_dims().to_vec());
                let result = self.channel.execute(kernel, bindings);
                self.logger
                    .lock()
                    .log_dispatch(&dispatch_line(&id, &dims, None));
                result
            }
            DispatchLogLevel::Full => {
                let (id, dims) = (kernel.id(), kernel.output_dims().to_vec());
                let start = Instant::now();
                let result = self.channel.execute(kernel, bindings);
                let elapsed = start.elapsed();
                self.logger
                    .lock()
                    .log_dispatch(&dispatch_line(&id, &dims, Some(elapsed)));
                result
            }
        }
    }

    /// Log a compiled kernel on the compilation loggers, if any is enabled.
    pub fn log_compilation<S: Display>(&self, msg: &S) {
        self.logger.lock().log_compilation(msg);
    }

    /// Whether compiled kernels should be emitted on the compilation loggers.
    pub fn compilation_logging_enabled(&self) -> bool {
        self.logger.lock().compilation_enabled()
    }

    /// Wait for the completion of every task in the server.
    pub fn sync(&self) {
        self.channel.sync()
    }

    /// Get the current memory usage of this client.
    pub fn memory_usage(&self) -> MemoryUsage {
        self.channel.memory_usage()
    }

    /// Ask the client to release memory that it can release.
    pub fn memory_cleanup(&self) {
        self.channel.memory_cleanup()
    }
}

fn dispatch_line(id: &KernelId, dims: &[usize], elapsed: Option<Duration>) -> String {
    match elapsed {
        Some(elapsed) => format!("| {elapsed:>12.3?} | {id:?} -> {dims:?}"),
        None => format!("| {id} -> {dims:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_lines_carry_the_output_shape() {
        let id = KernelId::new::<Vec<f32>>().info(3);

        assert_eq!(dispatch_line(&id, &[2, 8], None), "| Vec(3) -> [2, 8]");
        let full = dispatch_line(&id, &[2, 8], Some(Duration::from_micros(5)));
        assert!(full.ends_with("| alloc::vec::Vec<f32>(3) -> [2, 8]"), "{full}");
    }
}
