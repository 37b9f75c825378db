use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Holds the current state and applies a pure transition function to every
/// event. Effects are handed back to the caller; workers report their results
/// through `sender()` and the UI loop picks them up with `pending_events()`.
pub struct StateMachine<TState, TEvent, TEffect> {
    state: TState,
    transition_fn: Arc<dyn Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync>,
    event_sender: Sender<TEvent>,
    event_receiver: Receiver<TEvent>,
}

impl<TState, TEvent, TEffect> StateMachine<TState, TEvent, TEffect>
where
    TState: Clone,
{
    pub fn new<T>(init: (TState, Vec<TEffect>), transition_fn: T) -> (Self, Vec<TEffect>)
    where
        T: Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync + 'static,
    {
        let (event_sender, event_receiver) = channel();
        let (state, effects) = init;

        (
            Self {
                state,
                transition_fn: Arc::new(transition_fn),
                event_sender,
                event_receiver,
            },
            effects,
        )
    }

    pub fn state(&self) -> &TState {
        &self.state
    }

    pub fn sender(&self) -> Sender<TEvent> {
        self.event_sender.clone()
    }

    pub fn dispatch(&mut self, event: TEvent) -> Vec<TEffect> {
        let (new_state, effects) = (self.transition_fn)(self.state.clone(), event);
        self.state = new_state;
        effects
    }

    /// Events reported by workers since the last call, oldest first.
    pub fn pending_events(&self) -> Vec<TEvent> {
        self.event_receiver.try_iter().collect()
    }
}
