use crate::AppResult;

use voicebox_tracker_core::capture::CapturedAudio;

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{info, instrument};

/// Write `audio` as 16-bit PCM WAV.
#[track_caller]
#[instrument(skip(audio), fields(samples = audio.samples.len()))]
pub(crate) fn write_wav(path: &Path, audio: &CapturedAudio) -> AppResult<()> {
    let spec = WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in &audio.samples {
        writer.write_sample(to_pcm16(sample))?;
    }
    writer.finalize()?;

    info!(path = ?path, duration_ms = audio.duration().as_millis(), "WAV written");

    Ok(())
}

/// Convert a normalized sample to 16-bit PCM, clipping out-of-range input.
pub(crate) fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}
