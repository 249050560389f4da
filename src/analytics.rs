//! Privacy-friendly usage analytics.
//!
//! Events never leave the process: they are emitted as structured `tracing`
//! events under the `layerlens::analytics` target, so whichever subscriber the
//! front end installs decides where (if anywhere) they end up.

use serde::Serialize;

use crate::events::StateChange;
use crate::layers::LayerId;
use crate::session::{Screen, SessionSnapshot, StateObserver};

pub const TARGET: &str = "layerlens::analytics";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    PageView { page_name: String },
    LayerToggled { layer_number: u8, enabled: bool },
    CustomPromptSubmitted { prompt_length: usize },
    CompareModeToggled { enabled: bool },
    LayerExported { layer_number: u8 },
    LayerShared { layer_number: u8 },
    CompletedIntro,
    RevealedArchitecture,
    SessionReset,
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::PageView { .. } => "page_view",
            AnalyticsEvent::LayerToggled { .. } => "layer_toggled",
            AnalyticsEvent::CustomPromptSubmitted { .. } => "custom_prompt_submitted",
            AnalyticsEvent::CompareModeToggled { .. } => "compare_mode_toggled",
            AnalyticsEvent::LayerExported { .. } => "layer_exported",
            AnalyticsEvent::LayerShared { .. } => "layer_shared",
            AnalyticsEvent::CompletedIntro => "completed_intro",
            AnalyticsEvent::RevealedArchitecture => "revealed_architecture",
            AnalyticsEvent::SessionReset => "session_reset",
        }
    }

    pub fn layer_exported(layer: LayerId) -> Self {
        AnalyticsEvent::LayerExported {
            layer_number: layer.number(),
        }
    }

    pub fn layer_shared(layer: LayerId) -> Self {
        AnalyticsEvent::LayerShared {
            layer_number: layer.number(),
        }
    }

    /// Analytics events implied by a store change.
    pub fn from_change(change: &StateChange, snapshot: &SessionSnapshot) -> Vec<Self> {
        match change {
            StateChange::LayerToggled { layer, enabled } => vec![AnalyticsEvent::LayerToggled {
                layer_number: layer.number(),
                enabled: *enabled,
            }],
            StateChange::CustomPromptToggled { active: true } => {
                vec![AnalyticsEvent::CustomPromptSubmitted {
                    prompt_length: snapshot.user_input.chars().count(),
                }]
            }
            StateChange::CompareModeToggled { enabled } => {
                vec![AnalyticsEvent::CompareModeToggled { enabled: *enabled }]
            }
            StateChange::ScreenChanged { from, to } => {
                let mut events = vec![AnalyticsEvent::PageView {
                    page_name: to.to_string(),
                }];
                match (from, to) {
                    (Screen::Intro, Screen::Demo) => events.push(AnalyticsEvent::CompletedIntro),
                    (Screen::Demo, Screen::Layers) => {
                        events.push(AnalyticsEvent::RevealedArchitecture)
                    }
                    _ => {}
                }
                events
            }
            StateChange::SessionReset => vec![AnalyticsEvent::SessionReset],
            _ => Vec::new(),
        }
    }
}

/// Record an analytics event.
pub fn track(event: &AnalyticsEvent) {
    match serde_json::to_string(event) {
        Ok(properties) => {
            tracing::info!(target: TARGET, event = event.name(), %properties, "analytics")
        }
        Err(e) => tracing::warn!(target: TARGET, "Failed to serialize analytics event: {}", e),
    }
}

/// Observer that tracks analytics for every store change.
#[derive(Debug, Default)]
pub struct AnalyticsObserver;

impl StateObserver for AnalyticsObserver {
    fn on_change(&self, change: &StateChange, snapshot: &SessionSnapshot) {
        for event in AnalyticsEvent::from_change(change, snapshot) {
            track(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;

    #[test]
    fn test_toggle_maps_to_layer_number() {
        let store = SessionStore::new();
        let events = AnalyticsEvent::from_change(
            &StateChange::LayerToggled {
                layer: LayerId::Attention,
                enabled: false,
            },
            &store.snapshot(),
        );
        assert_eq!(
            events,
            vec![AnalyticsEvent::LayerToggled {
                layer_number: 7,
                enabled: false
            }]
        );
    }

    #[test]
    fn test_custom_prompt_reports_length_only() {
        let mut store = SessionStore::new();
        store.set_user_input("héllo");
        let events = AnalyticsEvent::from_change(
            &StateChange::CustomPromptToggled { active: true },
            &store.snapshot(),
        );
        assert_eq!(
            events,
            vec![AnalyticsEvent::CustomPromptSubmitted { prompt_length: 5 }]
        );

        let events = AnalyticsEvent::from_change(
            &StateChange::CustomPromptToggled { active: false },
            &store.snapshot(),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_screen_milestones() {
        let snapshot = SessionStore::new().snapshot();
        let reveal = AnalyticsEvent::from_change(
            &StateChange::ScreenChanged {
                from: Screen::Demo,
                to: Screen::Layers,
            },
            &snapshot,
        );
        assert_eq!(
            reveal,
            vec![
                AnalyticsEvent::PageView {
                    page_name: "layers".to_string()
                },
                AnalyticsEvent::RevealedArchitecture,
            ]
        );

        let back = AnalyticsEvent::from_change(
            &StateChange::ScreenChanged {
                from: Screen::Layers,
                to: Screen::Demo,
            },
            &snapshot,
        );
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn test_event_json_uses_snake_case_tag() {
        let json = serde_json::to_value(AnalyticsEvent::layer_exported(LayerId::Embedding)).unwrap();
        assert_eq!(json["event"], "layer_exported");
        assert_eq!(json["layer_number"], 3);
        assert_eq!(AnalyticsEvent::CompletedIntro.name(), "completed_intro");
    }

    #[test]
    fn test_observer_can_subscribe() {
        let mut store = SessionStore::new();
        store.subscribe(AnalyticsObserver);
        store.toggle_layer(LayerId::RawInput);
        assert_eq!(store.observer_count(), 1);
    }
}
