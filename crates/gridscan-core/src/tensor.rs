use core::marker::PhantomData;

use gridscan_runtime::{
    client::ComputeClient,
    server::{Binding, Handle, IoError},
};

use crate::{ConfigurationError, Runtime, Shape};

/// Tensor representation containing a [server handle](Handle) as well as its shape.
///
/// Tensors are always contiguous and hold `f32` elements.
pub struct TensorHandle<R: Runtime> {
    /// The buffer where the data are stored.
    pub handle: Handle,
    /// The shape of the tensor.
    pub shape: Shape,
    runtime: PhantomData<R>,
}

impl<R: Runtime> core::fmt::Debug for TensorHandle<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "Tensor {{ shape: {}, strides: {:?}, runtime: {}}}",
            self.shape,
            self.shape.strides(),
            R::name(),
        ))
    }
}

impl<R: Runtime> Clone for TensorHandle<R> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            shape: self.shape.clone(),
            runtime: PhantomData,
        }
    }
}

impl<R: Runtime> TensorHandle<R> {
    /// Create a new tensor.
    pub fn new(handle: Handle, shape: impl Into<Shape>) -> Self {
        Self {
            handle,
            shape: shape.into(),
            runtime: PhantomData,
        }
    }

    /// Upload host data as a new tensor.
    pub fn from_data(
        client: &ComputeClient<R::Server, R::Channel>,
        data: &[f32],
        shape: impl Into<Shape>,
    ) -> Result<Self, ConfigurationError> {
        let shape = shape.into();
        if shape.num_elements() != data.len() {
            return Err(ConfigurationError::DataLength {
                shape: shape.to_string(),
                expected: shape.num_elements(),
                actual: data.len(),
            });
        }

        let handle = client.create(bytemuck::cast_slice(data));
        Ok(Self::new(handle, shape))
    }

    /// Allocate a zeroed tensor.
    pub fn empty(client: &ComputeClient<R::Server, R::Channel>, shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let handle = client.empty(shape.num_elements() * core::mem::size_of::<f32>());

        Self::new(handle, shape)
    }

    /// Download the tensor's elements.
    pub fn read(&self, client: &ComputeClient<R::Server, R::Channel>) -> Result<Vec<f32>, IoError> {
        let bytes = client.read_one(self.handle.clone())?;
        let elem_size = core::mem::size_of::<f32>();
        if bytes.len() % elem_size != 0 {
            return Err(IoError::Misaligned {
                size: bytes.len(),
                elem_size,
            });
        }

        let mut values = bytemuck::pod_collect_to_vec::<u8, f32>(&bytes);
        values.truncate(self.shape.num_elements());
        Ok(values)
    }

    /// Check if the tensor is safe to mutate.
    pub fn can_mut(&self) -> bool {
        self.handle.can_mut()
    }

    /// Return the reference to a tensor handle.
    pub fn as_ref(&self) -> TensorHandleRef<'_, R> {
        TensorHandleRef {
            handle: &self.handle,
            shape: &self.shape,
            runtime: PhantomData,
        }
    }
}

/// Borrowed version of a [tensor handle](TensorHandle).
pub struct TensorHandleRef<'a, R: Runtime> {
    /// The buffer where the data are stored.
    pub handle: &'a Handle,
    /// The shape of the tensor.
    pub shape: &'a Shape,
    runtime: PhantomData<R>,
}

impl<R: Runtime> Clone for TensorHandleRef<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Runtime> Copy for TensorHandleRef<'_, R> {}

impl<R: Runtime> core::fmt::Debug for TensorHandleRef<'_, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("TensorRef {{ shape: {} }}", self.shape))
    }
}

impl<'a, R: Runtime> TensorHandleRef<'a, R> {
    /// Create a new tensor handle reference.
    pub fn new(handle: &'a Handle, shape: &'a Shape) -> Self {
        Self {
            handle,
            shape,
            runtime: PhantomData,
        }
    }

    /// The binding of the tensor buffer, to be handed to a kernel.
    pub fn binding(&self) -> Binding {
        self.handle.clone().binding()
    }

    /// Copy the reference into an owned tensor handle sharing the same buffer.
    pub fn to_handle(&self) -> TensorHandle<R> {
        TensorHandle::new(self.handle.clone(), self.shape.clone())
    }
}
