use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered processing step of a recording-processing task.
///
/// Declaration order is the pipeline order; a conforming backend reports
/// stages monotonically for one task unless it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStage {
    /// Audio is being uploaded.
    Upload,
    /// Audio is being checked against the reference policy.
    Validate,
    /// Speech is being transcribed.
    Transcribe,
    /// Voice embedding is being computed.
    Embed,
    /// Results are being persisted.
    Save,
}

impl ProcessingStage {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStage::Upload => "upload",
            ProcessingStage::Validate => "validate",
            ProcessingStage::Transcribe => "transcribe",
            ProcessingStage::Embed => "embed",
            ProcessingStage::Save => "save",
        }
    }

    /// Status line shown while the stage runs.
    pub fn label(self) -> &'static str {
        match self {
            ProcessingStage::Upload => "Uploading sample",
            ProcessingStage::Validate => "Validating audio",
            ProcessingStage::Transcribe => "Transcribing",
            ProcessingStage::Embed => "Creating voice embedding",
            ProcessingStage::Save => "Saving sample",
        }
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
