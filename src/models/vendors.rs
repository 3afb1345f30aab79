use std::fmt;

/// Canonical vendor keys, as they appear (lowercased) in topology documents
pub mod vendor_key {
    pub const ARISTA: &str = "arista";
    pub const CISCO: &str = "cisco";
    pub const PALOALTO: &str = "paloalto";
    pub const GENERIC: &str = "generic";
}

const ARISTA_TEMPLATE: &str = r#"
hostname {{ name }}
!
interface Management1
   ip address {{ mgmt_ip }}/24
!
"#;

const CISCO_TEMPLATE: &str = r#"
hostname {{ name }}
!
interface GigabitEthernet0/0
   ip address {{ mgmt_ip }} 255.255.255.0
!
"#;

const PALOALTO_TEMPLATE: &str = r#"
set deviceconfig system hostname {{ name }}
set deviceconfig system ip-address {{ mgmt_ip }}
"#;

const GENERIC_TEMPLATE: &str = r#"
# Generic device config for {{ name }}
hostname {{ name }}
management ip {{ mgmt_ip }}
"#;

/// Vendor selects the built-in config template for a device.
///
/// The table is closed: anything that is not a known vendor resolves to
/// [`Vendor::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Arista,
    Cisco,
    PaloAlto,
    Generic,
}

impl Vendor {
    /// Vendors with a dedicated template, in listing order
    pub const BUILTIN: &'static [Vendor] = &[Vendor::Arista, Vendor::Cisco, Vendor::PaloAlto];

    /// Exact lookup of a lowercased vendor key; `None` for anything unknown
    pub fn lookup(key: &str) -> Option<Self> {
        match key {
            vendor_key::ARISTA => Some(Self::Arista),
            vendor_key::CISCO => Some(Self::Cisco),
            vendor_key::PALOALTO => Some(Self::PaloAlto),
            _ => None,
        }
    }

    /// Resolve a vendor string from a topology, case-insensitively, falling
    /// back to [`Vendor::Generic`]
    pub fn from_name(name: &str) -> Self {
        Self::lookup(&crate::utils::normalize_vendor(name)).unwrap_or(Self::Generic)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Arista => vendor_key::ARISTA,
            Self::Cisco => vendor_key::CISCO,
            Self::PaloAlto => vendor_key::PALOALTO,
            Self::Generic => vendor_key::GENERIC,
        }
    }

    /// Template body (Tera syntax) for this vendor
    pub fn template(&self) -> &'static str {
        match self {
            Self::Arista => ARISTA_TEMPLATE,
            Self::Cisco => CISCO_TEMPLATE,
            Self::PaloAlto => PALOALTO_TEMPLATE,
            Self::Generic => GENERIC_TEMPLATE,
        }
    }

    /// Device fields this vendor's template needs
    pub fn required_fields(&self) -> Vec<String> {
        crate::utils::template_fields(self.template())
            .into_iter()
            .collect()
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Generic)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
