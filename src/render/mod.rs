use serde_json::Value;
use tera::{Context, Tera};

use crate::error::{NetfusionError, Result};
use crate::models::{Device, Vendor};
use crate::utils::{finalize_config, template_fields};

const TEMPLATE_NAME: &str = "device";

/// Render the config for a device using its vendor's built-in template.
///
/// The vendor is matched case-insensitively; unknown or absent vendors use
/// the generic template. Output is trimmed and ends with a single newline.
pub fn render_config(device: &Device) -> Result<String> {
    let vendor = Vendor::from_name(device.vendor_or_default());
    if vendor.is_fallback() && device.vendor.is_some() {
        tracing::debug!(
            "No template for vendor '{}' on {}, using generic",
            device.vendor_or_default(),
            device.name
        );
    }
    render_with_template(device, vendor.template())
}

/// Render a device against an arbitrary placeholder template.
///
/// Every `{{ field }}` must be present on the device (and not `null`),
/// otherwise this fails with [`NetfusionError::MissingField`] before Tera
/// is invoked.
pub fn render_with_template(device: &Device, template: &str) -> Result<String> {
    let fields = device.fields();

    if let Some(missing) = template_fields(template)
        .into_iter()
        .find(|field| !fields.contains_key(field))
    {
        return Err(NetfusionError::missing_field(&device.name, &missing));
    }

    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, template)?;

    let context = Context::from_value(Value::Object(fields))?;
    let rendered = tera.render(TEMPLATE_NAME, &context)?;

    Ok(finalize_config(&rendered))
}
