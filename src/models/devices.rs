use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Vendor key used when a device record carries no `vendor` field
pub const DEFAULT_VENDOR: &str = "generic";

/// Device represents one network device entry from a topology document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_ip: Option<String>,
    /// Any other keys on the record; available to templates, otherwise ignored
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vendor: None,
            mgmt_ip: None,
            extra: Map::new(),
        }
    }

    /// Vendor string as written in the topology, or `generic` when absent
    pub fn vendor_or_default(&self) -> &str {
        self.vendor.as_deref().unwrap_or(DEFAULT_VENDOR)
    }

    /// All fields of the record as a flat JSON object, `null` values dropped
    pub fn fields(&self) -> Map<String, Value> {
        let mut fields: Map<String, Value> = self
            .extra
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        if let Some(vendor) = &self.vendor {
            fields.insert("vendor".to_string(), Value::String(vendor.clone()));
        }
        if let Some(mgmt_ip) = &self.mgmt_ip {
            fields.insert("mgmt_ip".to_string(), Value::String(mgmt_ip.clone()));
        }
        fields
    }
}
