use std::sync::Arc;

use gridscan_core::{ConfigurationError, Shape};

use crate::{axis::AxisIndexer, instructions::ScanInstruction};

/// Shared handle on the instruction of a scan, held by every kernel of its dispatch chain.
pub type Instruction = Arc<dyn ScanInstruction>;

/// Validates a shape scanned along `axis`, returning the indexer of that axis.
pub(crate) fn scan_indexer(shape: &Shape, axis: usize) -> Result<AxisIndexer, ConfigurationError> {
    let indexer = AxisIndexer::for_shape(shape, axis)?;
    if shape[axis] == 0 {
        return Err(ConfigurationError::EmptyAxis { axis });
    }
    shape.validate()?;

    Ok(indexer)
}

/// Assembles a kernel source: the operation definition followed by the entry point.
pub(crate) fn kernel_source(definition: Option<&str>, body: &str) -> String {
    let mut source = String::new();
    if let Some(definition) = definition {
        source.push_str(definition);
        source.push_str("\n\n");
    }
    source.push_str("@compute\nfn main() {\n");
    for line in body.lines() {
        source.push_str("    ");
        source.push_str(line);
        source.push('\n');
    }
    source.push('}');
    source
}
