//! Error types shared by the Scrivo crates

use thiserror::Error;

/// Errors raised by bindings, native widgets and the adapter layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrivoError {
    /// The widget factory could not produce a native widget
    #[error("Native widget creation failed: {0}")]
    WidgetCreation(String),

    /// A character offset does not resolve to a position in the current content
    #[error("Offset {offset} is out of range for content of length {len}")]
    PositionOutOfRange { offset: usize, len: usize },

    /// The observer was detached from its widget (the view was unmounted)
    #[error("Text view observer is detached")]
    Detached,

    /// A write was attempted through a constant binding
    #[error("Cannot write through a constant binding")]
    ConstantBinding,
}

/// Result type for Scrivo operations
pub type Result<T> = std::result::Result<T, ScrivoError>;
