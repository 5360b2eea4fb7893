//! Editing-session state per widget family

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use scrivo_core::events::event_types;
use scrivo_core::fsm::{StateId, StateMachine};

use crate::native::WidgetFamily;

/// Editing-session states
pub mod states {
    use scrivo_core::fsm::StateId;

    pub const IDLE: StateId = 0;
    pub const EDITING: StateId = 1;
}

/// Tracks whether a widget is in an editing session
///
/// Each family gets its own machine. Touch machines request a content sync on
/// entering `EDITING`; desktop machines do not.
pub struct EditingSession {
    machine: StateMachine,
    sync_requested: Arc<AtomicBool>,
}

impl EditingSession {
    pub fn new(family: WidgetFamily) -> Self {
        let sync_requested = Arc::new(AtomicBool::new(false));

        let builder = StateMachine::builder(states::IDLE)
            .on(states::IDLE, event_types::BEGIN_EDITING, states::EDITING)
            .on(states::EDITING, event_types::END_EDITING, states::IDLE);

        let machine = if family.syncs_content_on_begin_editing() {
            let flag = Arc::clone(&sync_requested);
            builder
                .on_enter(states::EDITING, move || flag.store(true, Ordering::SeqCst))
                .build()
        } else {
            builder.build()
        };

        Self {
            machine,
            sync_requested,
        }
    }

    /// Enter the editing state. Returns true if content should be synced back.
    pub fn begin(&mut self) -> bool {
        self.machine.send(event_types::BEGIN_EDITING);
        self.sync_requested.swap(false, Ordering::SeqCst)
    }

    pub fn end(&mut self) {
        self.machine.send(event_types::END_EDITING);
    }

    pub fn is_editing(&self) -> bool {
        self.machine.is_in(states::EDITING)
    }

    pub fn state(&self) -> StateId {
        self.machine.current_state()
    }
}
