use core::fmt::Debug;

use thiserror::Error;

use crate::{
    id::{BindingRef, HandleRef},
    kernel::KernelMetadata,
    memory_management::MemoryUsage,
    storage::StorageId,
};

/// The compute server is responsible for handling resources and computations over resources.
///
/// Everything in the server is mutable, therefore it should be solely accessed through the
/// [compute channel](crate::channel::ComputeChannel) for thread safety.
pub trait ComputeServer: Send + Debug + 'static
where
    Self: Sized,
{
    /// The kernel type defines the computation algorithms.
    type Kernel: KernelMetadata;

    /// Given bindings, returns owned resources as bytes.
    fn read(&mut self, bindings: Vec<Binding>) -> Result<Vec<Vec<u8>>, IoError>;

    /// Given a resource as bytes, stores it and returns the memory handle.
    fn create(&mut self, data: &[u8]) -> Handle;

    /// Reserves `size` bytes in the storage, and returns a handle over them.
    fn empty(&mut self, size: usize) -> Handle;

    /// Executes the `kernel` over the given memory `bindings`.
    ///
    /// The bindings list every input in the order declared by the kernel, followed by the
    /// output. A dispatch is atomic: it either writes its whole output or returns an error
    /// without touching it.
    fn execute(&mut self, kernel: Self::Kernel, bindings: Vec<Binding>)
        -> Result<(), LaunchError>;

    /// Wait for the completion of every task in the server.
    fn sync(&mut self);

    /// The current memory usage of the server.
    fn memory_usage(&self) -> MemoryUsage;

    /// Ask the server to release memory that it can release.
    fn memory_cleanup(&mut self);
}

/// Server handle containing the memory handle.
#[derive(new, Clone, Debug, PartialEq, Eq)]
pub struct Handle {
    /// Memory handle.
    pub memory: HandleRef<StorageId>,
    /// Size of the buffer in bytes.
    pub size: usize,
}

impl Handle {
    /// If the tensor handle can be reused inplace.
    pub fn can_mut(&self) -> bool {
        self.memory.can_mut()
    }

    /// Convert the [handle](Handle) into a [binding](Binding).
    pub fn binding(self) -> Binding {
        Binding {
            memory: self.memory.binding(),
            size: self.size,
        }
    }
}

/// Binding of a [handle](Handle) to a kernel argument.
#[derive(Clone, Debug)]
pub struct Binding {
    /// Memory binding.
    pub memory: BindingRef<StorageId>,
    /// Size of the buffer in bytes.
    pub size: usize,
}

/// Kernel launch errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LaunchError {
    /// The number of bindings doesn't match what the kernel declared.
    #[error("Kernel {kernel} expects {expected} bindings, got {actual}")]
    BindingCount {
        /// The kernel being launched.
        kernel: String,
        /// The declared number of bindings, output included.
        expected: usize,
        /// The number of bindings provided.
        actual: usize,
    },

    /// A binding is smaller than the tensor the kernel reads or writes through it.
    #[error("Binding `{name}` of kernel {kernel} holds {actual} bytes, {expected} bytes required")]
    BindingSize {
        /// The kernel being launched.
        kernel: String,
        /// The name of the kernel argument.
        name: String,
        /// Required size in bytes.
        expected: usize,
        /// Size of the bound buffer in bytes.
        actual: usize,
    },

    /// A binding points to memory that isn't owned by this server.
    #[error("Binding `{name}` of kernel {kernel} doesn't belong to this server")]
    UnknownBinding {
        /// The kernel being launched.
        kernel: String,
        /// The name of the kernel argument.
        name: String,
    },
}

/// Errors that can happen when moving data between the host and a server.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IoError {
    /// The handle doesn't point to memory owned by this server.
    #[error("Can't read a binding that isn't owned by the server")]
    InvalidHandle,

    /// The data can't be interpreted as the requested element type.
    #[error("Buffer of {size} bytes isn't a multiple of the element size {elem_size}")]
    Misaligned {
        /// Size of the buffer in bytes.
        size: usize,
        /// Size of one element in bytes.
        elem_size: usize,
    },
}
