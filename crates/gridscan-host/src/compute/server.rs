use gridscan_core::{
    compute::{Inputs, Kernel, TensorView},
    Shape,
};
use gridscan_runtime::{
    memory_management::{MemoryManagement, MemoryUsage},
    server::{Binding, ComputeServer, Handle, IoError, LaunchError},
    storage::BytesStorage,
};

const ELEM_SIZE: usize = core::mem::size_of::<f32>();

/// Executes kernels on the host, running every invocation of a dispatch as one task of a
/// parallel map over the output.
#[derive(new, Debug)]
pub struct HostServer {
    memory_management: MemoryManagement<BytesStorage>,
}

impl HostServer {
    fn read_inputs(
        &self,
        kernel: &dyn Kernel,
        bindings: &[Binding],
    ) -> Result<Vec<Vec<f32>>, LaunchError> {
        kernel
            .inputs()
            .iter()
            .zip(bindings)
            .map(|(input, binding)| {
                let bytes = self.memory_management.get(&binding.memory).ok_or_else(|| {
                    LaunchError::UnknownBinding {
                        kernel: kernel.id().to_string(),
                        name: input.name.to_string(),
                    }
                })?;
                let size = input.shape.num_elements() * ELEM_SIZE;
                if bytes.len() < size {
                    return Err(LaunchError::BindingSize {
                        kernel: kernel.id().to_string(),
                        name: input.name.to_string(),
                        expected: size,
                        actual: bytes.len(),
                    });
                }

                Ok(bytemuck::pod_collect_to_vec::<u8, f32>(&bytes[..size]))
            })
            .collect()
    }
}

impl ComputeServer for HostServer {
    type Kernel = Box<dyn Kernel>;

    fn read(&mut self, bindings: Vec<Binding>) -> Result<Vec<Vec<u8>>, IoError> {
        bindings
            .iter()
            .map(|binding| {
                self.memory_management
                    .get(&binding.memory)
                    .map(|bytes| bytes[..binding.size].to_vec())
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
        let expected = kernel.inputs().len() + 1;
        let Some((output, inputs)) = bindings.split_last().filter(|_| bindings.len() == expected)
        else {
            return Err(LaunchError::BindingCount {
                kernel: kernel.id().to_string(),
                expected,
                actual: bindings.len(),
            });
        };

        log::trace!(
            "Dispatching {} over {} invocations",
            kernel.id(),
            kernel.output_shape().num_elements()
        );
        let data = self.read_inputs(kernel.as_ref(), inputs)?;
        let views = kernel
            .inputs()
            .iter()
            .zip(data.iter())
            .map(|(input, values)| TensorView::new(&input.shape, values))
            .collect();
        let values = parallel_map(kernel.as_ref(), kernel.output_shape(), &Inputs::new(views));

        let size = values.len() * ELEM_SIZE;
        let bytes = self
            .memory_management
            .get_mut(&output.memory)
            .ok_or_else(|| LaunchError::UnknownBinding {
                kernel: kernel.id().to_string(),
                name: "output".to_string(),
            })?;
        if bytes.len() < size {
            return Err(LaunchError::BindingSize {
                kernel: kernel.id().to_string(),
                name: "output".to_string(),
                expected: size,
                actual: bytes.len(),
            });
        }
        bytes[..size].copy_from_slice(bytemuck::cast_slice(&values));

        Ok(())
    }

    fn sync(&mut self) {
        // Every dispatch completes before `execute` returns.
    }

    fn memory_usage(&self) -> MemoryUsage {
        self.memory_management.memory_usage()
    }

    fn memory_cleanup(&mut self) {
        self.memory_management.cleanup();
    }
}

#[cfg(feature = "rayon")]
fn parallel_map(kernel: &dyn Kernel, shape: &Shape, inputs: &Inputs<'_>) -> Vec<f32> {
    use rayon::prelude::*;

    (0..shape.num_elements())
        .into_par_iter()
        .map(|offset| kernel.compute(&shape.coordinate(offset), inputs))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn parallel_map(kernel: &dyn Kernel, shape: &Shape, inputs: &Inputs<'_>) -> Vec<f32> {
    (0..shape.num_elements())
        .map(|offset| kernel.compute(&shape.coordinate(offset), inputs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridscan_core::{
        compute::KernelInput, id::KernelId, kernel::KernelMetadata, Coordinate,
    };
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Transpose {
        inputs: Vec<KernelInput>,
        output: Shape,
    }

    impl Transpose {
        fn new(shape: Shape) -> Self {
            Self {
                output: shape.swapped(0, 1),
                inputs: vec![KernelInput::new("x", shape)],
            }
        }
    }

    impl KernelMetadata for Transpose {
        fn id(&self) -> KernelId {
            KernelId::new::<Self>().info(self.output.dims())
        }

        fn output_dims(&self) -> &[usize] {
            self.output.dims()
        }
    }

    impl Kernel for Transpose {
        fn inputs(&self) -> &[KernelInput] {
            &self.inputs
        }

        fn output_shape(&self) -> &Shape {
            &self.output
        }

        fn source(&self) -> String {
            "@compute\nfn main() {\n    let coords = output_coords();\n    write_output(read_x(coords.y, coords.x));\n}".to_string()
        }

        fn compute(&self, coordinate: &Coordinate, inputs: &Inputs<'_>) -> f32 {
            inputs[0].read(&coordinate.swapped(0, 1))
        }
    }

    fn create(server: &mut HostServer, values: &[f32]) -> Handle {
        server.create(bytemuck::cast_slice(values))
    }

    fn read(server: &mut HostServer, handle: Handle) -> Vec<f32> {
        let bytes = server.read(vec![handle.binding()]).unwrap().remove(0);
        bytemuck::pod_collect_to_vec(&bytes[..])
    }

    #[test]
    fn execute_writes_every_output_coordinate() {
        let mut server = HostServer::new(MemoryManagement::new(BytesStorage::default()));
        let input = create(&mut server, &[1., 2., 3., 4., 5., 6.]);
        let output = server.empty(6 * ELEM_SIZE);

        server
            .execute(
                Box::new(Transpose::new(Shape::new([2, 3]))),
                vec![input.binding(), output.clone().binding()],
            )
            .unwrap();

        assert_eq!(read(&mut server, output), vec![1., 4., 2., 5., 3., 6.]);
    }

    #[test]
    fn execute_rejects_missing_bindings() {
        let mut server = HostServer::new(MemoryManagement::new(BytesStorage::default()));
        let output = server.empty(6 * ELEM_SIZE);

        let result = server.execute(
            Box::new(Transpose::new(Shape::new([2, 3]))),
            vec![output.binding()],
        );

        assert!(matches!(
            result,
            Err(LaunchError::BindingCount {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn execute_rejects_small_outputs() {
        let mut server = HostServer::new(MemoryManagement::new(BytesStorage::default()));
        let input = create(&mut server, &[1., 2., 3., 4., 5., 6.]);
        let output = server.empty(2 * ELEM_SIZE);

        let result = server.execute(
            Box::new(Transpose::new(Shape::new([2, 3]))),
            vec![input.binding(), output.clone().binding()],
        );

        assert!(matches!(
            result,
            Err(LaunchError::BindingSize { expected: 24, actual: 8, .. })
        ));
        assert_eq!(read(&mut server, output), vec![0., 0.]);
    }
}
