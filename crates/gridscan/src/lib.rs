//! gridscan: associative scans over N-dimensional tensors, expressed as data-parallel kernels.
//!
//! ```no_run
//! use gridscan::{host::HostRuntime, scan::instructions::Add, Runtime, TensorHandle};
//!
//! let client = HostRuntime::client(&Default::default());
//! let input = TensorHandle::<HostRuntime>::from_data(&client, &[1., 2., 3., 4.], [4]).unwrap();
//! let output =
//!     gridscan::scan::associative_scan(&client, input.as_ref(), Add, 0, true, None).unwrap();
//!
//! assert_eq!(output.read(&client).unwrap(), vec![1., 3., 6., 10.]);
//! ```

pub use gridscan_core::*;

pub use gridscan_scan as scan;

#[cfg(feature = "host")]
pub use gridscan_host as host;
