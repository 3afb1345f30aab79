use serde::{Deserialize, Serialize};

use super::Device;

/// Topology is the ordered set of devices described by one topology document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub devices: Vec<Device>,
}

impl Topology {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
