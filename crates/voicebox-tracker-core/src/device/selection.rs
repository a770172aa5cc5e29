use crate::device::NormalizedInputDevice;

/// Which device to use after a refresh, and whether the old one vanished.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceSelectionResolution {
    /// Device to use; always present and available in the refreshed set.
    pub selected_device_id: Option<String>,
    /// Previously selected device that is no longer listed at all.
    pub disconnected_device_id: Option<String>,
}

/// Resolve the selected device against a freshly normalized set.
///
/// Without a usable selection the available default wins, then the first
/// available microphone, then any available loopback source.
/// `disconnected_device_id` is only set when `current_id` disappeared from
/// the listing entirely. A device that is still listed but unavailable just
/// falls back to another selection without a disconnect notice.
pub fn resolve_selection(
    current_id: Option<&str>,
    devices: &[NormalizedInputDevice],
) -> DeviceSelectionResolution {
    if let Some(id) = current_id.filter(|id| devices.iter().any(|d| d.id == *id && d.is_available())) {
        return DeviceSelectionResolution {
            selected_device_id: Some(id.to_string()),
            disconnected_device_id: None,
        };
    }

    let selected_device_id = devices
        .iter()
        .find(|d| d.is_default && d.is_available())
        .or_else(|| devices.iter().find(|d| d.is_available() && !d.is_loopback))
        .or_else(|| devices.iter().find(|d| d.is_available()))
        .map(|d| d.id.clone());

    let disconnected_device_id = current_id
        .filter(|id| !devices.iter().any(|d| d.id == *id))
        .map(str::to_string);

    DeviceSelectionResolution {
        selected_device_id,
        disconnected_device_id,
    }
}
