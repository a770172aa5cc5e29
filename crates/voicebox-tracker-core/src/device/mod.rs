mod cpal_source;
mod normalize;
mod normalized;
mod raw;
mod selection;

pub(crate) use cpal_source::find_input_device;
#[cfg(test)]
pub(crate) use cpal_source::{list_host_devices, take_listed};

pub use {
    cpal_source::{CpalDeviceSource, DeviceSource, input_device_id, is_loopback_source},
    normalize::normalize,
    normalized::{DeviceAvailability, NormalizedInputDevice, PermissionState},
    raw::RawInputDevice,
    selection::{DeviceSelectionResolution, resolve_selection},
};
