#![allow(clippy::unwrap_used)]

use crate::tasks::ProcessingStage;

const PIPELINE: [ProcessingStage; 5] = [
    ProcessingStage::Upload,
    ProcessingStage::Validate,
    ProcessingStage::Transcribe,
    ProcessingStage::Embed,
    ProcessingStage::Save,
];

/// WHAT: Stages are ordered by pipeline position
/// WHY: Regression detection compares stages
#[test]
fn given_stage_list_when_comparing_then_pipeline_order() {
    assert!(PIPELINE.windows(2).all(|pair| pair[0] < pair[1]));
}

/// WHAT: Stage wire names decode and encode symmetrically
/// WHY: Stage values come from the backend as lower-case strings
#[test]
fn given_stage_strings_when_decoding_then_known_accepted_unknown_rejected() {
    let embed: ProcessingStage = serde_json::from_str(r#""embed""#).unwrap();

    assert_eq!(embed, ProcessingStage::Embed);
    assert_eq!(embed.to_string(), "embed");
    assert!(serde_json::from_str::<ProcessingStage>(r#""compress""#).is_err());
}

/// WHAT: Each stage has a human label
/// WHY: Labels are the subtitle fallback for processing tasks
#[test]
fn given_stage_when_labelling_then_human_text() {
    assert_eq!(ProcessingStage::Upload.label(), "Uploading sample");
    assert_eq!(ProcessingStage::Transcribe.label(), "Transcribing");
    assert_eq!(ProcessingStage::Embed.label(), "Creating voice embedding");
}
