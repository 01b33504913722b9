/// The host device, the only one available to the host backend.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct HostDevice;
