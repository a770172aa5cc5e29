use serde::{Deserialize, Serialize};

/// Whether a listed device can currently be captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceAvailability {
    /// Listed and usable.
    Available,
    /// Listed but reported as unplugged.
    Disconnected,
}

impl DeviceAvailability {
    /// Parse a raw availability value, failing open.
    ///
    /// Only an explicit `"disconnected"` marks a device unusable; missing or
    /// unrecognised values are treated as available so incomplete upstream
    /// metadata never hides a device from the listing.
    pub fn parse_fail_open(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "disconnected" => DeviceAvailability::Disconnected,
            _ => DeviceAvailability::Available,
        }
    }
}

/// Microphone permission as known for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Capture allowed.
    Granted,
    /// Capture refused.
    Denied,
    /// The user has not been asked yet.
    Prompt,
    /// Nothing is known.
    Unknown,
}

impl PermissionState {
    /// Parse a recognised permission value; `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "granted" => Some(PermissionState::Granted),
            "denied" => Some(PermissionState::Denied),
            "prompt" => Some(PermissionState::Prompt),
            "unknown" => Some(PermissionState::Unknown),
            _ => None,
        }
    }
}

/// Canonical device record produced by [`crate::device::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedInputDevice {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// True for at most one device per normalized set.
    pub is_default: bool,
    /// Monitor or loopback source; chosen only when no microphone is available.
    pub is_loopback: bool,
    /// Usability of the device.
    pub availability: DeviceAvailability,
    /// Permission state.
    pub permission: PermissionState,
    /// Audio host.
    pub host: Option<String>,
    /// Diagnostic text.
    pub diagnostics: Option<String>,
}

impl NormalizedInputDevice {
    /// True when the device can be selected for capture.
    pub fn is_available(&self) -> bool {
        self.availability == DeviceAvailability::Available
    }
}
