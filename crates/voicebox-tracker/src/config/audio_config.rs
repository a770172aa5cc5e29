use crate::config::{default_device_refresh_interval_ms, default_max_duration_seconds};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Audio device and capture configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Selected input device id as listed by `devices` (None = default device).
    #[serde(default)]
    pub selected_device: Option<String>,

    /// Capture stops automatically after this many seconds.
    #[serde(default = "default_max_duration_seconds")]
    pub max_duration_seconds: u64,

    /// How often the device list is re-read while recording.
    #[serde(default = "default_device_refresh_interval_ms")]
    pub device_refresh_interval_ms: u64,
}

impl AudioConfig {
    pub(crate) fn max_duration(&self) -> Duration {
        Duration::from_secs(self.max_duration_seconds)
    }

    pub(crate) fn device_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.device_refresh_interval_ms)
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            selected_device: None,
            max_duration_seconds: default_max_duration_seconds(),
            device_refresh_interval_ms: default_device_refresh_interval_ms(),
        }
    }
}
