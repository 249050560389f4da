use serde::{Deserialize, Serialize};

use crate::layers::LayerId;
use crate::session::Screen;

/// A single mutation of the session store, delivered to every observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateChange {
    /// One layer's visibility flipped
    LayerToggled { layer: LayerId, enabled: bool },

    /// All layers set back to visible
    LayersReset,

    /// Prompt text replaced
    UserInputChanged { text: String },

    /// Custom-prompt flag set
    CustomPromptToggled { active: bool },

    /// Compare mode switched on or off
    CompareModeToggled { enabled: bool },

    /// Presentation moved to another screen
    ScreenChanged { from: Screen, to: Screen },

    /// Default prompt restored, custom flag cleared and layers reset
    SessionReset,
}

impl StateChange {
    /// Whether this change can alter which layer data is shown.
    pub fn affects_layer_data(&self) -> bool {
        matches!(
            self,
            StateChange::UserInputChanged { .. }
                | StateChange::CustomPromptToggled { .. }
                | StateChange::SessionReset
        )
    }
}
