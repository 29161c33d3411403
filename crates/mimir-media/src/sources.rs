//! Concrete video sources
//!
//! Real container demuxing is a collaborator concern; what ships here is an
//! in-memory buffer source for tests and demos, and an MJPEG reader for the
//! concatenated-JPEG byte streams the upload path accepts.

use crate::sampler::VideoSource;
use image::ImageFormat;
use mimir_core::{Error, FramePixels, Result};
use tracing::warn;

/// In-memory source over pre-decoded frames with a declared fps
pub struct FrameBufferSource {
    frames: std::vec::IntoIter<FramePixels>,
    fps: f32,
}

impl FrameBufferSource {
    pub fn new(frames: Vec<FramePixels>, fps: f32) -> Self {
        Self {
            frames: frames.into_iter(),
            fps,
        }
    }
}

impl VideoSource for FrameBufferSource {
    fn fps(&self) -> f32 {
        self.fps
    }

    fn next_frame(&mut self) -> Result<Option<FramePixels>> {
        Ok(self.frames.next())
    }
}

/// MJPEG (concatenated JPEG) byte-stream source.
///
/// Raw MJPEG carries no frame-rate metadata, so without an explicit hint
/// the sampler's unreported-fps fallback applies and every frame is
/// analyzed. Decoding is lazy, one frame per `next_frame` call.
#[derive(Debug)]
pub struct MjpegSource {
    data: Vec<u8>,
    segments: Vec<(usize, usize)>,
    cursor: usize,
    fps: f32,
}

impl MjpegSource {
    /// Open a byte stream as MJPEG.
    ///
    /// Fails with `UnreadableSource` when no JPEG start-of-image marker is
    /// present at all; a stream that is merely truncated opens fine and
    /// yields the frames that decode.
    pub fn new(data: Vec<u8>, fps_hint: Option<f32>) -> Result<Self> {
        let segments = split_jpeg_segments(&data);
        if segments.is_empty() {
            return Err(Error::unreadable_source(
                "no JPEG frames found in byte stream",
            ));
        }

        Ok(Self {
            data,
            segments,
            cursor: 0,
            fps: fps_hint.unwrap_or(0.0),
        })
    }

    /// Number of JPEG segments found in the stream
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl VideoSource for MjpegSource {
    fn fps(&self) -> f32 {
        self.fps
    }

    fn next_frame(&mut self) -> Result<Option<FramePixels>> {
        while self.cursor < self.segments.len() {
            let (start, end) = self.segments[self.cursor];
            self.cursor += 1;

            match image::load_from_memory_with_format(&self.data[start..end], ImageFormat::Jpeg)
            {
                Ok(img) => {
                    let rgb = img.to_rgb8();
                    let (width, height) = rgb.dimensions();
                    return Ok(Some(FramePixels::new(width, height, rgb.into_raw())?));
                }
                Err(e) => {
                    // Truncated tail segment: stop the stream, not the scan.
                    warn!(error = %e, "skipping undecodable JPEG segment");
                    return Ok(None);
                }
            }
        }
        Ok(None)
    }
}

/// Locate SOI..EOI spans in a concatenated JPEG stream
fn split_jpeg_segments(data: &[u8]) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut i = 0;
    while i + 1 < data.len() {
        if data[i] == 0xFF && data[i + 1] == 0xD8 {
            let start = i;
            let mut j = i + 2;
            let mut end = None;
            while j + 1 < data.len() {
                if data[j] == 0xFF && data[j + 1] == 0xD9 {
                    end = Some(j + 2);
                    break;
                }
                j += 1;
            }
            match end {
                Some(end) => {
                    segments.push((start, end));
                    i = end;
                }
                // Unterminated final frame: keep it, the decoder decides.
                None => {
                    segments.push((start, data.len()));
                    break;
                }
            }
        } else {
            i += 1;
        }
    }
    segments
}

/// Decode a single uploaded still image into frame pixels.
///
/// Undecodable content maps to `UnreadableSource`.
pub fn decode_image(bytes: &[u8]) -> Result<FramePixels> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| Error::unreadable_source(format!("cannot decode image: {e}")))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    FramePixels::new(width, height, rgb.into_raw())
}
