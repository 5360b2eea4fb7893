//! Scrivo Core Runtime
//!
//! Foundational primitives for the Scrivo text view:
//!
//! - **Bindings**: two-way references to externally owned state
//! - **Environment**: ambient values supplied by the enclosing UI context
//! - **Main queue**: deferral of work to the next UI event-loop iteration
//! - **State machines**: per-family editing-session states
//! - **Style values**: colors, fonts, insets
//!
//! # Example
//!
//! ```rust
//! use scrivo_core::{Binding, MainQueue};
//!
//! let text = Binding::new(String::new());
//! let queue = MainQueue::new();
//!
//! let deferred = text.clone();
//! queue.schedule(move || deferred.set("later".to_string()));
//! assert_eq!(text.get(), "");
//!
//! queue.run_next_iteration();
//! assert_eq!(text.get(), "later");
//! ```

pub mod binding;
pub mod environment;
pub mod error;
pub mod events;
pub mod fsm;
pub mod queue;
pub mod style;

pub use binding::{dirty_flag, Binding, DirtyFlag};
pub use environment::{Environment, EnvironmentKey};
pub use error::{Result, ScrivoError};
pub use events::{event_types, EventType};
pub use fsm::{EventId, StateId, StateMachine};
pub use queue::{MainQueue, TaskId};
pub use style::{Color, EdgeInsets, Font, FontFamily, FontWeight, LineBreakMode, SemanticColor};
