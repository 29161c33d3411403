//! Temporal frame sampling
//!
//! A video is decoded sequentially; a frame is selected exactly when
//! `frame_index % interval == 0` with `interval = max(round(fps), 1)`,
//! yielding roughly one sampled frame per second of source. Frame indices
//! are raw decode order, not sampled-sequence order.

use mimir_core::{FramePixels, Result};

/// Sequential decode session over one video.
///
/// Not restartable: a fresh source is required per scan. Real codec
/// integration lives behind this trait as a collaborator concern.
pub trait VideoSource: Send {
    /// Reported frame rate; values that are NaN or <= 0 mean "unreported"
    fn fps(&self) -> f32;

    /// Decode the next frame, or `None` at end of stream
    fn next_frame(&mut self) -> Result<Option<FramePixels>>;
}

/// A frame selected by the sampler
#[derive(Debug, Clone)]
pub struct SampledFrame {
    /// Raw decode-order index (0-based)
    pub index: u64,

    /// Decoded pixels
    pub pixels: FramePixels,
}

/// Evenly-spaced lazy frame sampler over a video source
pub struct FrameSampler<S: VideoSource> {
    source: S,
    interval: u64,
    next_index: u64,
}

impl<S: VideoSource> FrameSampler<S> {
    /// Wrap a source, deriving the sampling interval from its reported fps
    pub fn new(source: S) -> Self {
        let interval = effective_interval(source.fps());
        Self {
            source,
            interval,
            next_index: 0,
        }
    }

    /// The derived sampling interval in frames
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Ordinal of a sampled frame within the sampled sequence
    pub fn ordinal(&self, frame_index: u64) -> u64 {
        frame_index / self.interval
    }

    /// Decode forward to the next selected frame.
    ///
    /// A zero-length or truncated stream simply yields `None`.
    pub fn next_sampled(&mut self) -> Result<Option<SampledFrame>> {
        loop {
            let index = self.next_index;
            match self.source.next_frame()? {
                None => return Ok(None),
                Some(pixels) => {
                    self.next_index += 1;
                    if index % self.interval == 0 {
                        return Ok(Some(SampledFrame { index, pixels }));
                    }
                }
            }
        }
    }
}

/// `max(round(fps), 1)`; unreported fps falls back to analyzing every frame
fn effective_interval(fps: f32) -> u64 {
    if !fps.is_finite() || fps <= 0.0 {
        return 1;
    }
    (fps.round() as u64).max(1)
}
