use core::{
    any::TypeId,
    fmt::{Debug, Display},
};
use std::sync::Arc;

#[macro_export(local_inner_macros)]
/// Create a new storage ID type.
macro_rules! storage_id_type {
    ($name:ident) => {
        /// Storage ID.
        #[derive(Copy, Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
        pub struct $name {
            value: usize,
        }

        impl $name {
            /// Create a new ID.
            pub fn new() -> Self {
                use core::sync::atomic::{AtomicUsize, Ordering};

                static COUNTER: AtomicUsize = AtomicUsize::new(0);

                let value = COUNTER.fetch_add(1, Ordering::Relaxed);
                if value == usize::MAX {
                    core::panic!("Memory ID overflowed");
                }
                Self { value }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Reference to a buffer handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandleRef<Id> {
    id: Arc<Id>,
    all: Arc<()>,
}

/// Reference to buffer binding.
#[derive(Clone, Debug)]
pub struct BindingRef<Id> {
    id: Id,
    _all: Arc<()>,
}

impl<Id> BindingRef<Id>
where
    Id: Clone + Debug,
{
    /// The id associated to the buffer.
    pub fn id(&self) -> &Id {
        &self.id
    }
}

impl<Id> HandleRef<Id>
where
    Id: Clone + Debug,
{
    /// Create a new handle.
    pub(crate) fn new(id: Id) -> Self {
        Self {
            id: Arc::new(id),
            all: Arc::new(()),
        }
    }

    /// The id associated to the handle.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Get the binding.
    pub(crate) fn binding(self) -> BindingRef<Id> {
        BindingRef {
            id: self.id.as_ref().clone(),
            _all: self.all,
        }
    }

    /// If the handle can be mut.
    pub(crate) fn can_mut(&self) -> bool {
        // 1 memory management reference with 1 tensor reference.
        Arc::strong_count(&self.id) <= 2
    }

    /// If the resource is free.
    pub(crate) fn is_free(&self) -> bool {
        Arc::strong_count(&self.all) <= 1
    }
}

/// Kernel unique identifier.
///
/// Two kernels share an id when they are the same type built with the same info,
/// meaning they would emit the same source.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct KernelId {
    type_name: &'static str,
    type_id: TypeId,
    info: Option<String>,
}

impl KernelId {
    /// Create a new [kernel id](KernelId) for a type.
    pub fn new<T: 'static>() -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            info: None,
        }
    }

    /// Attach the construction info that distinguishes two kernels of the same type.
    pub fn info<I: Debug>(mut self, info: I) -> Self {
        self.info = Some(format!("{info:?}"));
        self
    }

    /// The short name of the kernel type, without its module path or generics.
    pub fn short_name(&self) -> &'static str {
        let name = self.type_name.split('<').next().unwrap_or(self.type_name);
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl Debug for KernelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.info {
            Some(info) => write!(f, "{}({info})", self.type_name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

impl Display for KernelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.info {
            Some(info) => write!(f, "{}({info})", self.short_name()),
            None => f.write_str(self.short_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Kernel<T>(T);

    #[test]
    fn kernel_id_includes_info() {
        let a = KernelId::new::<Kernel<f32>>().info((4, true));
        let b = KernelId::new::<Kernel<f32>>().info((4, false));
        let c = KernelId::new::<Kernel<f32>>().info((4, true));

        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.to_string(), "Kernel((4, true))");
    }

    #[test]
    fn handle_is_free_once_bindings_are_dropped() {
        let handle = HandleRef::new(3usize);
        let binding = handle.clone().binding();
        assert!(!handle.is_free());

        core::mem::drop(binding);
        assert!(handle.is_free());
        assert_eq!(*handle.id(), 3);
    }
}
