use crate::{
    CoreResult, TrackerError,
    capture::CaptureFailureKind,
    device::{PermissionState, RawInputDevice},
};

use std::panic::Location;

use cpal::{
    DefaultStreamConfigError, Device, HostId,
    traits::{DeviceTrait, HostTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, instrument, warn};

/// Producer of raw input-device listings.
pub trait DeviceSource {
    /// Enumerate input devices as currently reported by the platform.
    fn list_input_devices(&self) -> CoreResult<Vec<RawInputDevice>>;

    /// Ambient permission state applied to records that carry none.
    fn permission_state(&self) -> PermissionState {
        PermissionState::Unknown
    }
}

/// One enumerated device with its assigned id.
///
/// `D` is the native handle; listing logic is generic over it so ids can be
/// assigned without a live host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListedDevice<D> {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) host: String,
    pub(crate) is_default: bool,
    pub(crate) is_loopback: bool,
    pub(crate) device: D,
}

/// Build the id of the device at `index` on `host`.
///
/// Ids are `input_<host>_<index>_<slug>`; index 0 is reserved for a default
/// device that the host does not list. Same-named devices therefore never
/// share an id.
pub fn input_device_id(host: &str, index: usize, name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }

    format!(
        "input_{}_{}_{}",
        host.to_ascii_lowercase(),
        index,
        slug.trim_matches('_')
    )
}

/// True for monitor and loopback sources that capture output, not a microphone.
pub fn is_loopback_source(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["monitor", "loopback", "stereo mix", "what u hear"]
        .iter()
        .any(|needle| lower.contains(needle))
}

/// Assign ids to the devices one host reports.
///
/// The first listed device named like `default` carries the default flag.
/// A default the host does not list is prepended with index 0.
pub(crate) fn list_host_devices<D>(
    host: &str,
    default: Option<(String, D)>,
    devices: impl IntoIterator<Item = (String, D)>,
) -> Vec<ListedDevice<D>> {
    let listed: Vec<(String, D)> = devices.into_iter().collect();
    let default_name = default.as_ref().map(|(name, _)| name.clone());
    let default_position = default_name
        .as_deref()
        .and_then(|default| listed.iter().position(|(name, _)| name == default));

    let mut result = Vec::with_capacity(listed.len() + 1);

    if let (Some((name, device)), None) = (default, default_position) {
        result.push(ListedDevice {
            id: input_device_id(host, 0, &name),
            is_loopback: is_loopback_source(&name),
            host: host.to_string(),
            is_default: true,
            name,
            device,
        });
    }

    result.extend(listed.into_iter().enumerate().map(|(index, (name, device))| ListedDevice {
        id: input_device_id(host, index + 1, &name),
        is_loopback: is_loopback_source(&name),
        host: host.to_string(),
        is_default: default_position == Some(index),
        name,
        device,
    }));

    result
}

/// [`DeviceSource`] over every cpal host available on this platform.
pub struct CpalDeviceSource {
    host_ids: Vec<HostId>,
}

impl CpalDeviceSource {
    /// Create a source over all available hosts.
    pub fn new() -> Self {
        Self {
            host_ids: cpal::available_hosts(),
        }
    }
}

impl Default for CpalDeviceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceSource for CpalDeviceSource {
    #[track_caller]
    #[instrument(skip(self))]
    fn list_input_devices(&self) -> CoreResult<Vec<RawInputDevice>> {
        let devices = enumerate_hosts(&self.host_ids)?;

        let listed: Vec<RawInputDevice> = devices
            .into_iter()
            .map(|listed| {
                let (availability, diagnostics) = match listed.device.default_input_config() {
                    Ok(config) => (
                        "available",
                        format!(
                            "{} Hz, {} ch, {:?}",
                            config.sample_rate(),
                            config.channels(),
                            config.sample_format()
                        ),
                    ),
                    Err(DefaultStreamConfigError::DeviceNotAvailable) => {
                        ("disconnected", "Device not available".to_string())
                    }
                    Err(e) => ("available", format!("Default input config unavailable: {}", e)),
                };
                let diagnostics = if listed.is_loopback {
                    format!("{}; loopback source", diagnostics)
                } else {
                    diagnostics
                };

                RawInputDevice {
                    id: listed.id,
                    name: listed.name,
                    is_default: listed.is_default,
                    is_loopback: listed.is_loopback,
                    availability: Some(availability.to_string()),
                    permission_state: Some("unknown".to_string()),
                    host: Some(listed.host),
                    diagnostics: Some(diagnostics),
                }
            })
            .collect();

        debug!(count = listed.len(), "Input devices listed");

        Ok(listed)
    }
}

#[allow(deprecated)]
fn device_name(device: &Device) -> String {
    device
        .name()
        .unwrap_or_else(|_| "Unknown Device".to_string())
}

/// Enumerate input devices across `host_ids`.
///
/// A host that cannot be opened or enumerated is skipped. Fails only when
/// every host failed.
#[track_caller]
fn enumerate_hosts(host_ids: &[HostId]) -> CoreResult<Vec<ListedDevice<Device>>> {
    let mut result = Vec::new();
    let mut failures = Vec::new();

    for &host_id in host_ids {
        let host_name = host_id.name();
        let host = match cpal::host_from_id(host_id) {
            Ok(host) => host,
            Err(e) => {
                warn!(host = host_name, error = %e, "Audio host unavailable");
                failures.push(format!("{}: {}", host_name, e));
                continue;
            }
        };

        let devices = match host.input_devices() {
            Ok(devices) => devices,
            Err(e) => {
                warn!(host = host_name, error = %e, "Input enumeration failed");
                failures.push(format!("{}: {}", host_name, e));
                continue;
            }
        };

        let default = host
            .default_input_device()
            .map(|device| (device_name(&device), device));
        result.extend(list_host_devices(
            host_name,
            default,
            devices.map(|device| (device_name(&device), device)),
        ));
    }

    if !host_ids.is_empty() && failures.len() == host_ids.len() {
        return Err(TrackerError::DeviceListFailed {
            reason: format!("Failed to enumerate input devices: {}", failures.join("; ")),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(result)
}

/// Look up the device listed as `device_id`, or the default input when `None`.
#[track_caller]
pub(crate) fn find_input_device(device_id: Option<&str>) -> CoreResult<(Device, String)> {
    let Some(id) = device_id else {
        let device = cpal::default_host()
            .default_input_device()
            .ok_or_else(|| TrackerError::CaptureFailed {
                kind: CaptureFailureKind::Device,
                reason: "No default input device".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let name = device_name(&device);
        return Ok((device, name));
    };

    let devices = enumerate_hosts(&cpal::available_hosts()).map_err(|e| TrackerError::CaptureFailed {
        kind: CaptureFailureKind::Device,
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    take_listed(devices, id)
        .map(|listed| (listed.device, listed.name))
        .ok_or_else(|| TrackerError::CaptureFailed {
            kind: CaptureFailureKind::Device,
            reason: format!("Input device '{}' not found", id),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// The listed device whose id is exactly `id`.
pub(crate) fn take_listed<D>(devices: Vec<ListedDevice<D>>, id: &str) -> Option<ListedDevice<D>> {
    devices.into_iter().find(|listed| listed.id == id)
}
