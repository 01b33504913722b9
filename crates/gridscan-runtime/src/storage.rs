use hashbrown::HashMap;

use crate::storage_id_type;

// This ID is used to map a handle to its actual data.
storage_id_type!(StorageId);

/// Defines if data uses a full memory chunk or a slice of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageHandle {
    /// Storage id.
    pub id: StorageId,
    /// Size of the allocation in bytes.
    pub size: usize,
}

/// Storage types are responsible for allocating and deallocating memory.
pub trait ComputeStorage: Send + core::fmt::Debug {
    /// Allocates `size` units of memory and returns a handle to it.
    fn alloc(&mut self, size: usize) -> StorageHandle;

    /// Deallocates the memory pointed by the given storage id.
    fn dealloc(&mut self, id: StorageId);

    /// Returns the bytes behind a storage handle, if it is still allocated.
    fn get(&self, handle: &StorageHandle) -> Option<&[u8]>;

    /// Returns the mutable bytes behind a storage handle, if it is still allocated.
    fn get_mut(&mut self, handle: &StorageHandle) -> Option<&mut [u8]>;
}

/// The bytes storage maps ids to host allocated byte buffers.
#[derive(Default, Debug)]
pub struct BytesStorage {
    memory: HashMap<StorageId, Vec<u8>>,
}

impl ComputeStorage for BytesStorage {
    fn alloc(&mut self, size: usize) -> StorageHandle {
        let id = StorageId::new();
        self.memory.insert(id, vec![0; size]);

        StorageHandle { id, size }
    }

    fn dealloc(&mut self, id: StorageId) {
        self.memory.remove(&id);
    }

    fn get(&self, handle: &StorageHandle) -> Option<&[u8]> {
        self.memory
            .get(&handle.id)
            .map(|bytes| &bytes[..handle.size])
    }

    fn get_mut(&mut self, handle: &StorageHandle) -> Option<&mut [u8]> {
        self.memory
            .get_mut(&handle.id)
            .map(|bytes| &mut bytes[..handle.size])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_alloc_and_dealloc() {
        let mut storage = BytesStorage::default();
        let handle = storage.alloc(64);

        assert_eq!(storage.get(&handle).map(|b| b.len()), Some(64));
        storage.dealloc(handle.id);
        assert!(storage.get(&handle).is_none());
    }

    #[test]
    fn test_slices() {
        let mut storage = BytesStorage::default();
        let handle = storage.alloc(4);

        storage.get_mut(&handle).unwrap().copy_from_slice(&[1, 2, 3, 4]);

        assert_eq!(storage.get(&handle).unwrap(), &[1, 2, 3, 4]);
    }
}
