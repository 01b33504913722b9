use crate::id::KernelId;

/// Implement this trait to make a kernel launchable on a [server](crate::server::ComputeServer).
pub trait KernelMetadata: Send + Sync + 'static {
    /// Name of the kernel for debugging.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Identifier for the kernel, used for logging and caching kernel compilation.
    fn id(&self) -> KernelId;

    /// Dimensions of the output written by the kernel, empty when unknown.
    fn output_dims(&self) -> &[usize] {
        &[]
    }
}

impl<K: KernelMetadata + ?Sized> KernelMetadata for Box<K> {
    fn name(&self) -> &'static str {
        self.as_ref().name()
    }

    fn id(&self) -> KernelId {
        self.as_ref().id()
    }

    fn output_dims(&self) -> &[usize] {
        self.as_ref().output_dims()
    }
}
