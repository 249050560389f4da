//! The ten conceptual layers of the walk-through and their visibility flags.
//!
//! ```text
//!  Input Processing   1 Raw Input          Orchestration   6 Task Decomposition
//!                     2 Tokenization       LLM Internals   7 Attention
//!                     3 Embedding                          8 Next-Token Prediction
//!                     4 Semantic Search    Output          9 Detokenization
//!                     5 Context Injection  Processing     10 Post-Processing
//! ```

mod text;

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LayerlensError, Result};

/// Identifier of one of the ten layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerId {
    RawInput,
    Tokenization,
    Embedding,
    SemanticSearch,
    ContextInjection,
    TaskDecomposition,
    Attention,
    Prediction,
    Detokenization,
    PostProcessing,
}

/// Grouping used when rendering the layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    InputProcessing,
    Orchestration,
    LlmInternals,
    OutputProcessing,
}

impl Section {
    pub fn heading(&self) -> &'static str {
        match self {
            Section::InputProcessing => "Part 1: Input Processing",
            Section::Orchestration => "Part 2: Orchestration",
            Section::LlmInternals => "Part 3: LLM Internals",
            Section::OutputProcessing => "Part 4: Output Processing",
        }
    }
}

impl LayerId {
    /// Number of layers.
    pub const COUNT: usize = 10;

    /// All layers in presentation order.
    pub const ALL: [LayerId; LayerId::COUNT] = [
        LayerId::RawInput,
        LayerId::Tokenization,
        LayerId::Embedding,
        LayerId::SemanticSearch,
        LayerId::ContextInjection,
        LayerId::TaskDecomposition,
        LayerId::Attention,
        LayerId::Prediction,
        LayerId::Detokenization,
        LayerId::PostProcessing,
    ];

    /// Look up a layer by its 1-based number.
    ///
    /// Numbers outside `1..=10` are rejected with [`LayerlensError::InvalidLayer`].
    pub fn new(number: u8) -> Result<Self> {
        match number {
            1..=10 => Ok(Self::ALL[usize::from(number) - 1]),
            _ => Err(LayerlensError::InvalidLayer(number)),
        }
    }

    /// 1-based layer number.
    pub fn number(&self) -> u8 {
        // ALL has ten entries, so the index always fits
        (self.index() + 1) as u8
    }

    /// 0-based position in [`LayerId::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Key used by the front end and in serialized flag maps (`layer1`..`layer10`).
    pub fn key(&self) -> String {
        format!("layer{}", self.number())
    }

    pub fn title(&self) -> &'static str {
        text::TITLES[self.index()]
    }

    pub fn caption(&self) -> &'static str {
        text::CAPTIONS[self.index()]
    }

    /// Article quote shown under the layer card.
    pub fn quote(&self) -> &'static str {
        text::QUOTES[self.index()]
    }

    pub fn section(&self) -> Section {
        match self.number() {
            1..=5 => Section::InputProcessing,
            6 => Section::Orchestration,
            7 | 8 => Section::LlmInternals,
            _ => Section::OutputProcessing,
        }
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer {}: {}", self.number(), self.title())
    }
}

impl TryFrom<u8> for LayerId {
    type Error = LayerlensError;

    fn try_from(number: u8) -> Result<Self> {
        LayerId::new(number)
    }
}

impl Serialize for LayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for LayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let number = u8::deserialize(deserializer)?;
        LayerId::new(number).map_err(serde::de::Error::custom)
    }
}

/// Visibility flag for each layer. All layers start enabled.
///
/// Backed by a fixed array so the set of keys can never grow or shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledLayers {
    flags: [bool; LayerId::COUNT],
}

impl EnabledLayers {
    pub fn all() -> Self {
        Self {
            flags: [true; LayerId::COUNT],
        }
    }

    pub fn is_enabled(&self, layer: LayerId) -> bool {
        self.flags[layer.index()]
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, layer: LayerId) -> bool {
        let flag = &mut self.flags[layer.index()];
        *flag = !*flag;
        *flag
    }

    pub fn reset(&mut self) {
        self.flags = [true; LayerId::COUNT];
    }

    pub fn all_enabled(&self) -> bool {
        self.flags.iter().all(|f| *f)
    }

    /// Layers currently enabled, in order.
    pub fn enabled(&self) -> impl Iterator<Item = LayerId> + '_ {
        LayerId::ALL.into_iter().filter(move |l| self.is_enabled(*l))
    }

    pub fn iter(&self) -> impl Iterator<Item = (LayerId, bool)> + '_ {
        LayerId::ALL.into_iter().map(move |l| (l, self.is_enabled(l)))
    }
}

impl Default for EnabledLayers {
    fn default() -> Self {
        Self::all()
    }
}

impl Serialize for EnabledLayers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LayerId::COUNT))?;
        for (layer, enabled) in self.iter() {
            map.serialize_entry(&layer.key(), &enabled)?;
        }
        map.end()
    }
}
