use gridscan_core::prelude::*;

use crate::{
    descriptor::ScanDescriptor,
    error::ScanError,
    kernels::{
        ContractKernel, InclusiveKernel, Instruction, MergeKernel, PermuteKernel,
        SequentialScanKernel,
    },
    strategy::{ScanState, ScanStrategy},
};

/// The kind of kernel issued by a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    /// [SequentialScanKernel] over a whole axis.
    Sequential,
    /// [ContractKernel] halving an axis.
    Contract,
    /// [MergeKernel] rebuilding an axis from its contraction.
    Merge,
    /// [InclusiveKernel] turning an exclusive scan into an inclusive one.
    Inclusive,
    /// [PermuteKernel] swapping two axes.
    Permute,
}

/// One dispatch issued by a scan, with the length of the axis scanned at its level.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub kind: DispatchKind,
    pub axis_len: usize,
}

/// Issues the dispatch chain of a scan.
///
/// Each level either scans its axis directly, or contracts it, scans the contraction and merges
/// the result back. Levels below the top one always compute exclusive scans. The chain is
/// strictly sequential: a dispatch is only issued once the previous one completed.
pub struct ScanOrchestrator<'a, R: Runtime> {
    client: &'a ComputeClient<R::Server, R::Channel>,
    strategy: ScanStrategy,
    trace: Vec<Dispatch>,
}

impl<'a, R: Runtime> ScanOrchestrator<'a, R> {
    /// Create an orchestrator dispatching on the given client.
    pub fn new(client: &'a ComputeClient<R::Server, R::Channel>, strategy: ScanStrategy) -> Self {
        Self {
            client,
            strategy,
            trace: Vec::new(),
        }
    }

    /// The dispatches issued so far.
    pub fn trace(&self) -> &[Dispatch] {
        &self.trace
    }

    /// Consume the orchestrator, returning the dispatches it issued.
    pub fn into_trace(self) -> Vec<Dispatch> {
        self.trace
    }

    /// Scan the input as described, returning a new tensor.
    pub fn scan(
        &mut self,
        descriptor: &ScanDescriptor,
        input: TensorHandleRef<'_, R>,
    ) -> Result<TensorHandle<R>, ScanError> {
        if input.shape != &descriptor.shape {
            return Err(ScanError::ShapeMismatch {
                expected: descriptor.shape.dims().to_vec(),
                actual: input.shape.dims().to_vec(),
            });
        }

        let axis = descriptor.axis;
        let innermost = descriptor.shape.rank() - 1;
        let len = descriptor.axis_len();
        if axis == innermost {
            return self.scan_innermost(input, &descriptor.instruction, descriptor.inclusive);
        }

        log::debug!(
            "Moving axis {axis} of {} to the innermost position",
            descriptor.shape
        );
        let permuted = self.dispatch(
            PermuteKernel::new(input.shape, axis, innermost)?,
            &[input],
            DispatchKind::Permute,
            len,
        )?;
        let scanned = self.scan_innermost(
            permuted.as_ref(),
            &descriptor.instruction,
            descriptor.inclusive,
        )?;

        self.dispatch(
            PermuteKernel::new(&scanned.shape, axis, innermost)?,
            &[scanned.as_ref()],
            DispatchKind::Permute,
            len,
        )
    }

    fn scan_innermost(
        &mut self,
        input: TensorHandleRef<'_, R>,
        instruction: &Instruction,
        inclusive: bool,
    ) -> Result<TensorHandle<R>, ScanError> {
        let len = input.shape[input.shape.rank() - 1];

        match self.select(len) {
            ScanState::Direct => self.sequential(input, instruction, !inclusive),
            ScanState::Recurse => {
                let exclusive = self.recurse(input, instruction)?;
                if !inclusive {
                    return Ok(exclusive);
                }

                self.dispatch(
                    InclusiveKernel::new(input.shape, instruction.clone())?,
                    &[exclusive.as_ref(), input],
                    DispatchKind::Inclusive,
                    len,
                )
            }
        }
    }

    fn exclusive(
        &mut self,
        input: TensorHandleRef<'_, R>,
        instruction: &Instruction,
    ) -> Result<TensorHandle<R>, ScanError> {
        let len = input.shape[input.shape.rank() - 1];

        match self.select(len) {
            ScanState::Direct => self.sequential(input, instruction, true),
            ScanState::Recurse => self.recurse(input, instruction),
        }
    }

    fn recurse(
        &mut self,
        input: TensorHandleRef<'_, R>,
        instruction: &Instruction,
    ) -> Result<TensorHandle<R>, ScanError> {
        let axis = input.shape.rank() - 1;
        let len = input.shape[axis];

        let contracted = self.dispatch(
            ContractKernel::new(input.shape, axis, instruction.clone())?,
            &[input],
            DispatchKind::Contract,
            len,
        )?;
        let reduced = self.exclusive(contracted.as_ref(), instruction)?;

        self.dispatch(
            MergeKernel::new(input.shape, &reduced.shape, axis, instruction.clone())?,
            &[input, reduced.as_ref()],
            DispatchKind::Merge,
            len,
        )
    }

    fn sequential(
        &mut self,
        input: TensorHandleRef<'_, R>,
        instruction: &Instruction,
        exclusive: bool,
    ) -> Result<TensorHandle<R>, ScanError> {
        let axis = input.shape.rank() - 1;

        self.dispatch(
            SequentialScanKernel::new(input.shape, axis, instruction.clone(), exclusive)?,
            &[input],
            DispatchKind::Sequential,
            input.shape[axis],
        )
    }

    fn select(&self, len: usize) -> ScanState {
        let state = self.strategy.select(len);
        log::debug!("Scan level over an axis of length {len}: {state:?}");
        state
    }

    fn dispatch<K: Kernel>(
        &mut self,
        kernel: K,
        inputs: &[TensorHandleRef<'_, R>],
        kind: DispatchKind,
        axis_len: usize,
    ) -> Result<TensorHandle<R>, ScanError> {
        let output = launch::<R, K>(self.client, kernel, inputs)?;
        self.trace.push(Dispatch::new(kind, axis_len));

        Ok(output)
    }
}
