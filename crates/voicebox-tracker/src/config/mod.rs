mod audio_config;
#[allow(clippy::module_inception)]
mod config;
mod polling_config;
mod server_config;

pub(crate) use {
    audio_config::AudioConfig, config::Config, polling_config::PollingConfig,
    server_config::ServerConfig,
};

pub(crate) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:17493";
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub(crate) const DEFAULT_TASK_LIST_INTERVAL_MS: u64 = 1500;
pub(crate) const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 700;
pub(crate) const DEFAULT_TERMINAL_TTL_MS: u64 = 5000;
pub(crate) const DEFAULT_MAX_DURATION_SECONDS: u64 = 29;
pub(crate) const DEFAULT_DEVICE_REFRESH_INTERVAL_MS: u64 = 2000;

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

pub(crate) fn default_task_list_interval_ms() -> u64 {
    DEFAULT_TASK_LIST_INTERVAL_MS
}

pub(crate) fn default_progress_interval_ms() -> u64 {
    DEFAULT_PROGRESS_INTERVAL_MS
}

pub(crate) fn default_terminal_ttl_ms() -> u64 {
    DEFAULT_TERMINAL_TTL_MS
}

pub(crate) fn default_max_duration_seconds() -> u64 {
    DEFAULT_MAX_DURATION_SECONDS
}

pub(crate) fn default_device_refresh_interval_ms() -> u64 {
    DEFAULT_DEVICE_REFRESH_INTERVAL_MS
}
