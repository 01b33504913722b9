mod base;
pub use base::*;

mod mutex;
pub use mutex::*;
