use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex_lite::Regex;

/// Extension for rendered and deployed config files
pub const CONFIG_EXTENSION: &str = "cfg";

/// Normalize a vendor string for template lookup (trim nothing, lowercase only)
pub fn normalize_vendor(vendor: &str) -> String {
    vendor.to_lowercase()
}

/// Convert a device name to a config filename
/// e.g., "sw1" -> "sw1.cfg", "pod1/leaf1" -> "pod1_leaf1.cfg"
pub fn device_config_filename(name: &str) -> String {
    let safe_name = name.replace(['/', '\\'], "_");
    format!("{}.{}", safe_name, CONFIG_EXTENSION)
}

/// Return the variable names referenced by `{{ ... }}` expressions in a
/// template, in sorted order. Filters (`{{ name | upper }}`) and attribute
/// access (`{{ site.code }}`) report only the root variable.
pub fn template_fields(template: &str) -> BTreeSet<String> {
    static PLACEHOLDER: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{\{-?\s*([A-Za-z_][A-Za-z0-9_]*)").ok())
        .as_ref()
    else {
        return BTreeSet::new();
    };

    re.captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Trim surrounding whitespace and terminate with exactly one newline
pub fn finalize_config(text: &str) -> String {
    let mut out = text.trim().to_string();
    out.push('\n');
    out
}
