//! Notifications published by the controller.

use serde::Serialize;

use crate::evaluator::RunResult;
use crate::state::PlaygroundState;

/// Something the host may want to observe.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaygroundEvent {
    /// The evaluator module is loaded and its evaluators are listed.
    /// Published once.
    WasmReady,
    /// A run finished, successfully or not.
    RunCompleted(RunCompleted),
}

/// Payload of [`PlaygroundEvent::RunCompleted`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunCompleted {
    pub state: PlaygroundState,
    pub result: RunResult,
    /// Mirrors [`RunResult::is_error`].
    pub error: bool,
}

type Listener = Box<dyn Fn(&PlaygroundEvent)>;

/// Ordered list of listeners. Listeners live as long as the bus.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&PlaygroundEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn publish(&self, event: &PlaygroundEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}
