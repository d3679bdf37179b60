//! Intents — what the user wants, as classified by the NLU service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slot::Slots;

/// Recognized intent of one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Intent {
    Greeting,
    Help,
    Cancel,
    Lights,
    /// Anything the NLU model reports that lightbot does not handle.
    #[default]
    None,
}

impl Intent {
    /// Map an NLU intent name onto an [`Intent`].
    ///
    /// Names are matched exactly as the NLU model declares them; anything
    /// else maps to [`Intent::None`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Greeting" => Self::Greeting,
            "Help" => Self::Help,
            "Cancel" => Self::Cancel,
            "Lights" => Self::Lights,
            _ => Self::None,
        }
    }

    /// The NLU model name of this intent.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Greeting => "Greeting",
            Self::Help => "Help",
            Self::Cancel => "Cancel",
            Self::Lights => "Lights",
            Self::None => "None",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of the NLU service for one message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    /// Top-scoring intent.
    pub intent: Intent,
    /// Confidence of [`intent`](Self::intent), between 0 and 1.
    pub score: f64,
    /// Extracted entity slots.
    pub slots: Slots,
}

impl Recognition {
    /// Build a recognition result.
    #[must_use]
    pub fn new(intent: Intent, score: f64, slots: Slots) -> Self {
        Self {
            intent,
            score,
            slots,
        }
    }

    /// The intent to route on: [`Intent::None`] when the score is below `threshold`.
    #[must_use]
    pub fn routed_intent(&self, threshold: f64) -> Intent {
        if self.score < threshold {
            Intent::None
        } else {
            self.intent
        }
    }
}
