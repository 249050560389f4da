//! Which screen of the presentation is showing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LayerlensError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Title screen
    #[default]
    Intro,
    /// Chat demo with the canned answer
    Demo,
    /// Layer-by-layer breakdown
    Layers,
}

/// Allowed `(from, to)` edges.
const TRANSITIONS: [(Screen, Screen); 3] = [
    (Screen::Intro, Screen::Demo),
    (Screen::Demo, Screen::Layers),
    (Screen::Layers, Screen::Demo),
];

impl Screen {
    pub fn can_transition_to(&self, to: Screen) -> bool {
        TRANSITIONS.contains(&(*self, to))
    }

    /// Validate a move to `to` and return the new screen.
    pub fn transition(self, to: Screen) -> Result<Screen> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(LayerlensError::InvalidTransition { from: self, to })
        }
    }

    /// Screens to pass through, in order, to reach `target` along allowed edges.
    /// Empty when already there.
    pub fn path_to(self, target: Screen) -> Vec<Screen> {
        let mut path = Vec::new();
        let mut current = self;
        while current != target {
            current = match current {
                Screen::Intro => Screen::Demo,
                Screen::Demo if target == Screen::Layers => Screen::Layers,
                // Demo -> Intro and Layers -> Intro have no edge
                Screen::Demo | Screen::Layers if target == Screen::Intro => return Vec::new(),
                Screen::Demo | Screen::Layers => Screen::Demo,
            };
            path.push(current);
        }
        path
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Intro => "intro",
            Screen::Demo => "demo",
            Screen::Layers => "layers",
        };
        f.write_str(name)
    }
}
