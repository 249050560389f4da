//! Per-session presentation state.
//!
//! `SessionStore` owns the layer visibility flags, the prompt text and the
//! custom-prompt flag. Every mutation synchronously recomputes the derived
//! layer data (when it can have changed) and then notifies all observers.
//!
//! There is one store per session. Create it with [`SessionStore::new`], hand
//! it to the front end, and call [`SessionStore::end`] when the session is over.

mod screen;

pub use screen::Screen;

use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::events::StateChange;
use crate::layers::{EnabledLayers, LayerId};
use crate::simulator::{self, example, Simulation, DEFAULT_PROMPT};

/// Receives every state change after it has been applied.
pub trait StateObserver: Send + Sync {
    fn on_change(&self, change: &StateChange, snapshot: &SessionSnapshot);
}

impl<F> StateObserver for F
where
    F: Fn(&StateChange, &SessionSnapshot) + Send + Sync,
{
    fn on_change(&self, change: &StateChange, snapshot: &SessionSnapshot) {
        self(change, snapshot)
    }
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Immutable copy of the store's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub user_input: String,
    pub show_custom_prompt: bool,
    pub enabled_layers: EnabledLayers,
    pub compare_mode: bool,
    pub screen: Screen,
}

impl SessionSnapshot {
    /// Whether the simulator runs for this state.
    ///
    /// The canned example is used when the custom flag is off or the text is
    /// the default prompt, even with the flag on.
    pub fn uses_simulator(&self) -> bool {
        self.show_custom_prompt && self.user_input != DEFAULT_PROMPT
    }

    /// Layer data the front end should show for this state.
    pub fn layer_data(&self) -> Simulation {
        if self.uses_simulator() {
            simulator::simulate(&self.user_input)
        } else {
            example::tokyo_trip()
        }
    }
}

pub struct SessionStore {
    state: SessionSnapshot,
    layer_data: Simulation,
    observers: Vec<(SubscriptionId, Box<dyn StateObserver>)>,
    next_subscription: u64,
}

impl SessionStore {
    /// Start a session on the intro screen with the default prompt.
    pub fn new() -> Self {
        let state = SessionSnapshot {
            session_id: Uuid::new_v4(),
            user_input: DEFAULT_PROMPT.to_string(),
            show_custom_prompt: false,
            enabled_layers: EnabledLayers::all(),
            compare_mode: false,
            screen: Screen::Intro,
        };
        tracing::info!(session_id = %state.session_id, "Session started");

        Self {
            layer_data: state.layer_data(),
            state,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.state.session_id
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.clone()
    }

    pub fn user_input(&self) -> &str {
        &self.state.user_input
    }

    pub fn show_custom_prompt(&self) -> bool {
        self.state.show_custom_prompt
    }

    pub fn enabled_layers(&self) -> &EnabledLayers {
        &self.state.enabled_layers
    }

    pub fn compare_mode(&self) -> bool {
        self.state.compare_mode
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    /// Derived layer data for the current state.
    pub fn layer_data(&self) -> &Simulation {
        &self.layer_data
    }

    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Flip one layer's visibility and return the new value.
    pub fn toggle_layer(&mut self, layer: LayerId) -> bool {
        let enabled = self.state.enabled_layers.toggle(layer);
        self.notify(StateChange::LayerToggled { layer, enabled });
        enabled
    }

    /// Toggle by 1-based layer number, rejecting numbers outside 1-10.
    pub fn toggle_layer_number(&mut self, number: u8) -> Result<bool> {
        let layer = LayerId::new(number)?;
        Ok(self.toggle_layer(layer))
    }

    pub fn reset_layers(&mut self) {
        self.state.enabled_layers.reset();
        self.notify(StateChange::LayersReset);
    }

    /// Replace the prompt text verbatim. Empty text is allowed.
    pub fn set_user_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.user_input = text.clone();
        self.notify(StateChange::UserInputChanged { text });
    }

    pub fn set_show_custom_prompt(&mut self, active: bool) {
        self.state.show_custom_prompt = active;
        self.notify(StateChange::CustomPromptToggled { active });
    }

    /// Make `text` the active custom prompt.
    ///
    /// Both fields change before observers hear about either, so the layer
    /// data is rebuilt once and every notification sees the final state.
    pub fn apply_custom_prompt(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.user_input = text.clone();
        self.state.show_custom_prompt = true;
        self.notify_all([
            StateChange::UserInputChanged { text },
            StateChange::CustomPromptToggled { active: true },
        ]);
    }

    pub fn set_compare_mode(&mut self, enabled: bool) {
        self.state.compare_mode = enabled;
        self.notify(StateChange::CompareModeToggled { enabled });
    }

    /// Restore the default prompt, clear the custom flag and re-enable every layer.
    pub fn reset(&mut self) {
        self.state.user_input = DEFAULT_PROMPT.to_string();
        self.state.show_custom_prompt = false;
        self.state.enabled_layers.reset();
        self.notify(StateChange::SessionReset);
    }

    /// Move to another screen along an allowed edge.
    pub fn navigate(&mut self, to: Screen) -> Result<()> {
        let from = self.state.screen;
        self.state.screen = from.transition(to)?;
        self.notify(StateChange::ScreenChanged { from, to });
        Ok(())
    }

    /// Walk the allowed edges until `target` is showing.
    pub fn navigate_to(&mut self, target: Screen) -> Result<()> {
        if self.state.screen == target {
            return Ok(());
        }
        let path = self.state.screen.path_to(target);
        if path.is_empty() {
            // no route; report the direct move as the invalid one
            return self.navigate(target);
        }
        for step in path {
            self.navigate(step)?;
        }
        Ok(())
    }

    /// End the session, dropping every observer.
    pub fn end(mut self) {
        let dropped = self.observers.len();
        self.observers.clear();
        tracing::info!(
            session_id = %self.state.session_id,
            observers = dropped,
            "Session ended"
        );
    }

    fn notify(&mut self, change: StateChange) {
        self.notify_all([change]);
    }

    fn notify_all<const N: usize>(&mut self, changes: [StateChange; N]) {
        for change in &changes {
            tracing::debug!(session_id = %self.state.session_id, ?change, "State changed");
        }

        if changes.iter().any(StateChange::affects_layer_data) {
            self.layer_data = self.state.layer_data();
        }

        for change in &changes {
            for (_, observer) in &self.observers {
                observer.on_change(change, &self.state);
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::error::LayerlensError;
    use crate::simulator::LayerData;

    fn recording_store() -> (SessionStore, Arc<Mutex<Vec<StateChange>>>) {
        let mut store = SessionStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |change: &StateChange, _: &SessionSnapshot| {
            sink.lock().push(change.clone());
        });
        (store, seen)
    }

    fn raw_message(sim: &Simulation) -> String {
        match &sim.record(LayerId::RawInput).data {
            LayerData::RawInput(raw) => raw.user_message.clone(),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_initial_state() {
        let store = SessionStore::new();
        assert_eq!(store.user_input(), DEFAULT_PROMPT);
        assert!(!store.show_custom_prompt());
        assert!(store.enabled_layers().all_enabled());
        assert!(!store.compare_mode());
        assert_eq!(store.screen(), Screen::Intro);
        assert_eq!(store.layer_data(), &example::tokyo_trip());
    }

    #[test]
    fn test_every_mutation_notifies() {
        let (mut store, seen) = recording_store();
        store.toggle_layer(LayerId::Attention);
        store.reset_layers();
        store.set_user_input("hello");
        store.set_show_custom_prompt(true);
        store.set_compare_mode(true);
        store.reset();
        store.navigate(Screen::Demo).unwrap();

        let seen = seen.lock();
        assert_eq!(
            *seen,
            vec![
                StateChange::LayerToggled {
                    layer: LayerId::Attention,
                    enabled: false
                },
                StateChange::LayersReset,
                StateChange::UserInputChanged {
                    text: "hello".to_string()
                },
                StateChange::CustomPromptToggled { active: true },
                StateChange::CompareModeToggled { enabled: true },
                StateChange::SessionReset,
                StateChange::ScreenChanged {
                    from: Screen::Intro,
                    to: Screen::Demo
                },
            ]
        );
    }

    #[test]
    fn test_observer_sees_updated_snapshot() {
        let mut store = SessionStore::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        store.subscribe(move |_: &StateChange, snapshot: &SessionSnapshot| {
            *sink.lock() = Some(snapshot.enabled_layers.is_enabled(LayerId::Embedding));
        });
        store.toggle_layer(LayerId::Embedding);
        assert_eq!(*seen.lock(), Some(false));
    }

    #[test]
    fn test_toggle_self_inverse_and_reset_idempotent() {
        let mut store = SessionStore::new();
        assert!(!store.toggle_layer(LayerId::Prediction));
        assert!(store.toggle_layer(LayerId::Prediction));
        assert!(store.enabled_layers().all_enabled());

        store.toggle_layer(LayerId::RawInput);
        store.reset_layers();
        let once = *store.enabled_layers();
        store.reset_layers();
        assert_eq!(*store.enabled_layers(), once);
        assert!(once.all_enabled());
    }

    #[test]
    fn test_toggle_unknown_layer_number_rejected() {
        let (mut store, seen) = recording_store();
        assert!(matches!(
            store.toggle_layer_number(11),
            Err(LayerlensError::InvalidLayer(11))
        ));
        assert!(seen.lock().is_empty());
        assert!(!store.toggle_layer_number(2).unwrap());
    }

    #[test]
    fn test_custom_prompt_runs_simulator() {
        let mut store = SessionStore::new();
        store.apply_custom_prompt("how do rockets work");
        assert!(store.snapshot().uses_simulator());
        assert_eq!(raw_message(store.layer_data()), "how do rockets work");
    }

    #[test]
    fn test_default_prompt_bypasses_simulator() {
        let mut store = SessionStore::new();

        // flag off: canned example even for other text
        store.set_user_input("something else");
        assert!(!store.snapshot().uses_simulator());
        assert_eq!(store.layer_data(), &example::tokyo_trip());

        // flag on with the default text: still the canned example
        store.apply_custom_prompt(DEFAULT_PROMPT);
        assert!(store.show_custom_prompt());
        assert!(!store.snapshot().uses_simulator());
        assert_eq!(store.layer_data(), &example::tokyo_trip());
    }

    #[test]
    fn test_empty_custom_prompt_allowed() {
        let mut store = SessionStore::new();
        store.apply_custom_prompt("");
        assert_eq!(store.user_input(), "");
        assert_eq!(raw_message(store.layer_data()), "");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = SessionStore::new();
        store.apply_custom_prompt("explain monads");
        store.toggle_layer(LayerId::Tokenization);
        store.toggle_layer(LayerId::Detokenization);

        store.reset();
        assert_eq!(store.user_input(), DEFAULT_PROMPT);
        assert!(!store.show_custom_prompt());
        assert!(store.enabled_layers().all_enabled());
        assert_eq!(store.layer_data(), &example::tokyo_trip());
    }

    #[test]
    fn test_apply_custom_prompt_notifies_with_final_state() {
        let mut store = SessionStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |change: &StateChange, snapshot: &SessionSnapshot| {
            sink.lock().push((
                change.clone(),
                snapshot.user_input.clone(),
                snapshot.uses_simulator(),
            ));
        });

        store.apply_custom_prompt("why is the sky blue");

        let text = "why is the sky blue".to_string();
        assert_eq!(
            *seen.lock(),
            vec![
                (StateChange::UserInputChanged { text: text.clone() }, text.clone(), true),
                (StateChange::CustomPromptToggled { active: true }, text.clone(), true),
            ]
        );
        assert_eq!(raw_message(store.layer_data()), text);
    }

    #[test]
    fn test_toggle_does_not_recompute_layer_data() {
        let mut store = SessionStore::new();
        store.apply_custom_prompt("what is rust");
        let before = store.layer_data().clone();
        store.toggle_layer(LayerId::Attention);
        assert_eq!(store.layer_data(), &before);
    }

    #[test]
    fn test_navigation() {
        let (mut store, seen) = recording_store();
        assert!(store.navigate(Screen::Layers).is_err());
        assert!(seen.lock().is_empty());

        store.navigate_to(Screen::Layers).unwrap();
        assert_eq!(store.screen(), Screen::Layers);
        assert_eq!(seen.lock().len(), 2);

        store.navigate(Screen::Demo).unwrap();
        assert!(matches!(
            store.navigate_to(Screen::Intro),
            Err(LayerlensError::InvalidTransition {
                from: Screen::Demo,
                to: Screen::Intro
            })
        ));
    }

    #[test]
    fn test_unsubscribe() {
        let (mut store, seen) = recording_store();
        let count = Arc::new(Mutex::new(0));
        let counter = count.clone();
        let id = store.subscribe(move |_: &StateChange, _: &SessionSnapshot| {
            *counter.lock() += 1;
        });
        assert_eq!(store.observer_count(), 2);

        store.toggle_layer(LayerId::RawInput);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle_layer(LayerId::RawInput);

        assert_eq!(*count.lock(), 1);
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_end_drops_observers() {
        let mut store = SessionStore::new();
        let token = Arc::new(());
        let held = token.clone();
        store.subscribe(move |_: &StateChange, _: &SessionSnapshot| {
            let _ = &held;
        });
        assert_eq!(Arc::strong_count(&token), 2);
        store.end();
        assert_eq!(Arc::strong_count(&token), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = SessionStore::new();
        let b = SessionStore::new();
        a.toggle_layer(LayerId::Embedding);
        assert_ne!(a.session_id(), b.session_id());
        assert!(b.enabled_layers().all_enabled());
    }
}
