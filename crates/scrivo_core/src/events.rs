//! Event identifiers
//!
//! Native text widgets report editing through a small set of events. The ids
//! double as `fsm::EventId`s for editing-session state machines.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// The widget became first responder and started an editing session
    pub const BEGIN_EDITING: EventType = 90;
    /// The widget content changed because of a user edit
    pub const TEXT_CHANGED: EventType = 91;
    /// A user edit is about to be applied and may be rejected
    pub const SHOULD_CHANGE: EventType = 92;
    /// The editing session ended
    pub const END_EDITING: EventType = 93;
}

/// Human-readable event name, for logs
pub fn event_name(event: EventType) -> &'static str {
    match event {
        event_types::BEGIN_EDITING => "begin-editing",
        event_types::TEXT_CHANGED => "text-changed",
        event_types::SHOULD_CHANGE => "should-change",
        event_types::END_EDITING => "end-editing",
        _ => "unknown",
    }
}
