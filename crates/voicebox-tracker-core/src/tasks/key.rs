use crate::{CoreResult, TrackerError};

use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Producer a unified task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSourceKind {
    /// Model download.
    Download,
    /// Speech generation.
    Generation,
    /// Recording upload/transcription pipeline.
    RecordingProcessing,
}

impl TaskSourceKind {
    /// Wire name used as the key prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskSourceKind::Download => "download",
            TaskSourceKind::Generation => "generation",
            TaskSourceKind::RecordingProcessing => "recording_processing",
        }
    }
}

impl fmt::Display for TaskSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collision-free identity of a unified task.
///
/// Rendered as `"<source>:<native-id>"`. Only the first `:` separates the
/// parts, so native ids may themselves contain colons.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskKey {
    /// Producing source.
    pub source: TaskSourceKind,
    /// Identifier assigned by the source.
    pub native_id: String,
}

impl TaskKey {
    /// Key for `native_id` from `source`.
    pub fn new(source: TaskSourceKind, native_id: impl Into<String>) -> Self {
        Self {
            source,
            native_id: native_id.into(),
        }
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.native_id)
    }
}

impl FromStr for TaskKey {
    type Err = TrackerError;

    #[track_caller]
    fn from_str(value: &str) -> CoreResult<Self> {
        let invalid = || TrackerError::InvalidTaskKey {
            value: value.to_string(),
            location: ErrorLocation::from(Location::caller()),
        };

        let (prefix, native_id) = value.split_once(':').ok_or_else(invalid)?;
        let source = match prefix {
            "download" => TaskSourceKind::Download,
            "generation" => TaskSourceKind::Generation,
            "recording_processing" => TaskSourceKind::RecordingProcessing,
            _ => return Err(invalid()),
        };
        if native_id.is_empty() {
            return Err(invalid());
        }

        Ok(TaskKey::new(source, native_id))
    }
}

impl Serialize for TaskKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
