use gridscan_runtime::{id::KernelId, kernel::KernelMetadata};

/// A kernel computing its output bytes from the input bytes.
pub trait DummyKernel: KernelMetadata {
    fn compute(&self, inputs: &[Vec<u8>]) -> Vec<u8>;
}

#[derive(Debug)]
pub struct DummyElementwiseAddition;

impl KernelMetadata for DummyElementwiseAddition {
    fn id(&self) -> KernelId {
        KernelId::new::<Self>()
    }
}

impl DummyKernel for DummyElementwiseAddition {
    fn compute(&self, inputs: &[Vec<u8>]) -> Vec<u8> {
        inputs[0]
            .iter()
            .zip(inputs[1].iter())
            .map(|(lhs, rhs)| lhs + rhs)
            .collect()
    }
}
