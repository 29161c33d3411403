//! Core types for Mimir

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of intent labels for text classification.
///
/// The set is versioned with the model that produced it: a fitted model
/// declares which of these labels it knows, and classification only ever
/// returns labels from the active model's declared set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Normal,
    Violence,
    Complain,
    AskHelp,
    End,
}

impl Intent {
    /// All known intents, in a stable order
    pub const ALL: [Intent; 6] = [
        Intent::Greeting,
        Intent::Normal,
        Intent::Violence,
        Intent::Complain,
        Intent::AskHelp,
        Intent::End,
    ];

    /// Wire name of this intent
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Normal => "normal",
            Intent::Violence => "violence",
            Intent::Complain => "complain",
            Intent::AskHelp => "ask_help",
            Intent::End => "end",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greeting" => Ok(Intent::Greeting),
            "normal" => Ok(Intent::Normal),
            "violence" => Ok(Intent::Violence),
            "complain" => Ok(Intent::Complain),
            "ask_help" => Ok(Intent::AskHelp),
            "end" => Ok(Intent::End),
            other => Err(Error::invalid_label(other)),
        }
    }
}

/// A single training unit: a text with its intent label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Example text; must be non-empty after trimming
    pub text: String,

    /// Intent label from the closed set
    pub label: Intent,
}

impl LabeledExample {
    /// Create a new labeled example
    pub fn new(text: impl Into<String>, label: Intent) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Raw decoded pixels for one frame (RGB, row-major)
#[derive(Debug, Clone)]
pub struct FramePixels {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Packed RGB bytes, `width * height * 3` long
    pub rgb: Vec<u8>,
}

impl FramePixels {
    /// Create frame pixels from raw RGB bytes.
    ///
    /// Returns a config error if the buffer length does not match the
    /// declared dimensions.
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> crate::Result<Self> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(Error::config(format!(
                "frame buffer is {} bytes, expected {}x{}x3 = {}",
                rgb.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self { width, height, rgb })
    }
}

/// Violence probability assigned to one sampled frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameScore {
    /// Raw decode-order index of the frame (0-based), not the sampled ordinal
    #[serde(rename = "frame")]
    pub frame_index: u64,

    /// Probability in [0, 1] that the frame depicts violence
    pub prob_violent: f32,
}

/// Document-level verdict for a scanned video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoVerdict {
    /// Per-frame scores in sampling order
    pub frames: Vec<FrameScore>,

    /// Frames with `prob_violent > 0.5`
    pub violent_frame_count: u64,

    /// Number of frames that were sampled and scored
    pub total_sampled_frames: u64,

    /// `violent_frame_count / max(total_sampled_frames, 1)`
    pub ratio: f32,

    /// Whether `ratio` exceeded the document-level threshold
    pub violent: bool,
}

impl VideoVerdict {
    /// The frame with the highest violence probability.
    ///
    /// Stable argmax: when several frames share the maximum, the first one
    /// in sampling order wins.
    pub fn most_dangerous_frame(&self) -> Option<&FrameScore> {
        let mut best: Option<&FrameScore> = None;
        for score in &self.frames {
            match best {
                Some(b) if score.prob_violent <= b.prob_violent => {}
                _ => best = Some(score),
            }
        }
        best
    }
}

/// Verdict for a single still image (the one-frame degenerate case)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageVerdict {
    /// Probability the image depicts violence
    pub prob_violent: f32,

    /// Probability the image does not depict violence
    pub prob_nonviolent: f32,

    /// `prob_violent > 0.5`
    pub violent: bool,
}

impl ImageVerdict {
    /// Build a verdict from a violent/non-violent probability pair
    pub fn from_probs(prob_violent: f32, prob_nonviolent: f32) -> Self {
        Self {
            prob_violent,
            prob_nonviolent,
            violent: prob_violent > 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_wire_names_round_trip() {
        for intent in Intent::ALL {
            let parsed: Intent = intent.as_str().parse().unwrap();
            assert_eq!(parsed, intent);
        }
    }

    #[test]
    fn intent_unknown_label_is_rejected() {
        let err = "sarcasm".parse::<Intent>().unwrap_err();
        assert!(matches!(err, Error::InvalidLabel(_)));
    }

    #[test]
    fn intent_serde_uses_snake_case() {
        let json = serde_json::to_string(&Intent::AskHelp).unwrap();
        assert_eq!(json, "\"ask_help\"");
        let back: Intent = serde_json::from_str("\"ask_help\"").unwrap();
        assert_eq!(back, Intent::AskHelp);
    }

    #[test]
    fn frame_pixels_validates_buffer_length() {
        assert!(FramePixels::new(2, 2, vec![0u8; 12]).is_ok());
        assert!(FramePixels::new(2, 2, vec![0u8; 11]).is_err());
    }

    #[test]
    fn most_dangerous_frame_is_stable_on_ties() {
        let verdict = VideoVerdict {
            frames: vec![
                FrameScore {
                    frame_index: 0,
                    prob_violent: 0.2,
                },
                FrameScore {
                    frame_index: 24,
                    prob_violent: 0.9,
                },
                FrameScore {
                    frame_index: 48,
                    prob_violent: 0.9,
                },
            ],
            violent_frame_count: 2,
            total_sampled_frames: 3,
            ratio: 2.0 / 3.0,
            violent: true,
        };

        assert_eq!(verdict.most_dangerous_frame().unwrap().frame_index, 24);
    }

    #[test]
    fn most_dangerous_frame_empty_is_none() {
        let verdict = VideoVerdict {
            frames: vec![],
            violent_frame_count: 0,
            total_sampled_frames: 0,
            ratio: 0.0,
            violent: false,
        };
        assert!(verdict.most_dangerous_frame().is_none());
    }

    #[test]
    fn frame_score_serializes_frame_field() {
        let score = FrameScore {
            frame_index: 24,
            prob_violent: 0.7,
        };
        let json = serde_json::to_value(score).unwrap();
        assert_eq!(json["frame"], 24);
    }
}
