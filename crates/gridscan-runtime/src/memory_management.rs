use core::fmt::Display;

use hashbrown::HashMap;

use crate::{
    id::{BindingRef, HandleRef},
    storage::{ComputeStorage, StorageHandle, StorageId},
};

/// Amount of memory in use by a server.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    /// The number of live allocations.
    pub number_allocs: u64,
    /// The number of bytes held by live allocations.
    pub bytes_in_use: u64,
}

impl Display for MemoryUsage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Memory Usage Report:")?;
        writeln!(f, "  Number of allocations: {}", self.number_allocs)?;
        write!(f, "  Bytes in use: {}", self.bytes_in_use)
    }
}

/// Keeps track of every allocation handed out by a server.
///
/// An allocation is reclaimed once the management holds the only reference left,
/// meaning every handle and binding pointing to it has been dropped.
#[derive(Debug)]
pub struct MemoryManagement<Storage: ComputeStorage> {
    storage: Storage,
    allocations: HashMap<StorageId, (HandleRef<StorageId>, StorageHandle)>,
}

impl<Storage: ComputeStorage> MemoryManagement<Storage> {
    /// Create a new memory management on top of the given storage.
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            allocations: HashMap::new(),
        }
    }

    /// Reserve a new allocation of `size` bytes, zero initialized.
    pub fn reserve(&mut self, size: usize) -> HandleRef<StorageId> {
        self.cleanup();

        let storage = self.storage.alloc(size);
        let handle = HandleRef::new(storage.id);
        self.allocations
            .insert(storage.id, (handle.clone(), storage));

        handle
    }

    /// Returns the bytes of a binding.
    pub fn get(&self, binding: &BindingRef<StorageId>) -> Option<&[u8]> {
        let (_, storage) = self.allocations.get(binding.id())?;
        self.storage.get(storage)
    }

    /// Returns the mutable bytes of a binding.
    pub fn get_mut(&mut self, binding: &BindingRef<StorageId>) -> Option<&mut [u8]> {
        let (_, storage) = self.allocations.get(binding.id())?;
        self.storage.get_mut(storage)
    }

    /// Release every allocation that is no longer referenced.
    pub fn cleanup(&mut self) {
        let storage = &mut self.storage;
        self.allocations.retain(|id, (handle, _)| {
            let free = handle.is_free();
            if free {
                storage.dealloc(*id);
            }
            !free
        });
    }

    /// The current memory usage.
    pub fn memory_usage(&self) -> MemoryUsage {
        MemoryUsage {
            number_allocs: self.allocations.len() as u64,
            bytes_in_use: self
                .allocations
                .values()
                .map(|(_, storage)| storage.size as u64)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BytesStorage;

    #[test]
    fn dropped_handles_are_reclaimed() {
        let mut memory = MemoryManagement::new(BytesStorage::default());
        let kept = memory.reserve(16);
        let dropped = memory.reserve(32);

        assert_eq!(memory.memory_usage().bytes_in_use, 48);

        core::mem::drop(dropped);
        memory.cleanup();

        assert_eq!(
            memory.memory_usage(),
            MemoryUsage {
                number_allocs: 1,
                bytes_in_use: 16
            }
        );
        assert_eq!(memory.get(&kept.binding()).map(|b| b.len()), Some(16));
    }

    #[test]
    fn bindings_keep_allocations_alive() {
        let mut memory = MemoryManagement::new(BytesStorage::default());
        let binding = memory.reserve(8).binding();

        memory.cleanup();

        assert_eq!(memory.get(&binding), Some(&[0u8; 8][..]));
    }
}
