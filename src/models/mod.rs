mod devices;
mod topology;
mod vendors;

pub use devices::Device;
pub use topology::Topology;
pub use vendors::Vendor;
