use crate::device::{
    DeviceAvailability, NormalizedInputDevice, PermissionState, RawInputDevice,
};

/// Convert a raw device listing into canonical records.
///
/// Availability fails open. Permission comes from the record when it carries
/// a recognised value, otherwise from `fallback_permission`. If several raw
/// records claim to be the default, only the first keeps the flag.
pub fn normalize(
    raw: &[RawInputDevice],
    fallback_permission: PermissionState,
) -> Vec<NormalizedInputDevice> {
    let mut default_taken = false;

    raw.iter()
        .map(|device| {
            let is_default = device.is_default && !default_taken;
            default_taken |= is_default;

            NormalizedInputDevice {
                id: device.id.clone(),
                name: device.name.clone(),
                is_default,
                is_loopback: device.is_loopback,
                availability: DeviceAvailability::parse_fail_open(device.availability.as_deref()),
                permission: device
                    .permission_state
                    .as_deref()
                    .and_then(PermissionState::parse)
                    .unwrap_or(fallback_permission),
                host: device.host.clone(),
                diagnostics: device.diagnostics.clone(),
            }
        })
        .collect()
}
