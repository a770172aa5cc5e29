use serde::{Deserialize, Serialize};

/// Device record as reported by the native device listing.
///
/// Only `id` and `name` are guaranteed; the status fields are free-form
/// strings and may be missing or garbled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputDevice {
    /// Stable identifier used to select the device.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the platform reports this as the default input.
    #[serde(default)]
    pub is_default: bool,
    /// Whether this source captures system output rather than a microphone.
    #[serde(default)]
    pub is_loopback: bool,
    /// Free-form availability, e.g. `"available"` or `"disconnected"`.
    #[serde(default)]
    pub availability: Option<String>,
    /// Free-form permission state, e.g. `"granted"`.
    #[serde(default)]
    pub permission_state: Option<String>,
    /// Audio host the device belongs to.
    #[serde(default)]
    pub host: Option<String>,
    /// Extra diagnostic text from the listing.
    #[serde(default)]
    pub diagnostics: Option<String>,
}
