mod base;
mod contract;
mod inclusive;
mod merge;
mod permute;
mod sequential;

pub use base::Instruction;
pub use contract::*;
pub use inclusive::*;
pub use merge::*;
pub use permute::*;
pub use sequential::*;
