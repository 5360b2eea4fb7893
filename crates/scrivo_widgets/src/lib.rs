//! Scrivo Widgets
//!
//! A declarative multi-line text view backed by a long-lived native widget.
//!
//! - [`TextView`]: builder-style view value, rebuilt on every render
//! - [`TextViewAdapter`]: reconciles one native widget against each render
//! - [`TextViewCoordinator`]: routes native edit and focus events back into
//!   bindings and callbacks
//! - [`NativeTextWidget`]: the seam to a platform widget;
//!   [`HeadlessTextWidget`] is the in-memory implementation
//!
//! # Example
//!
//! ```rust
//! use scrivo_core::{Binding, Environment, MainQueue};
//! use scrivo_widgets::prelude::*;
//!
//! let text = Binding::new("hello".to_string());
//! let queue = MainQueue::new();
//!
//! let view = TextView::new(&text).widget_family(WidgetFamily::Desktop);
//! let mounted = view.mount(&Environment::new(), &queue).unwrap();
//!
//! mounted
//!     .adapter()
//!     .with_widget_as::<HeadlessTextWidget, _>(|widget| widget.insert_text(" world"));
//! assert_eq!(text.get(), "hello world");
//! ```

pub mod adapter;
pub mod configuration;
pub mod content;
pub mod coordinator;
pub mod editing;
pub mod headless;
pub mod native;
pub mod paragraph;
pub mod rich_text;
pub mod text_view;

pub use adapter::{SharedTextWidget, TextViewAdapter};
pub use configuration::{
    Autocapitalization, CommitCallback, EditingChangedCallback, KeyboardType, ReturnKeyType,
    TextContentType, TextViewConfiguration,
};
pub use content::TextContent;
pub use coordinator::TextViewCoordinator;
pub use editing::EditingSession;
pub use headless::{HeadlessTextWidget, KeyboardSettings};
pub use native::{
    DefaultTextWidgetFactory, NativeTextWidget, TextWidgetFactory, TextWidgetObserver,
    WidgetFamily,
};
pub use paragraph::{ParagraphSpacingEnvironment, ParagraphSpacingKey, ParagraphStyle};
pub use rich_text::{AttributeRun, RichText, TextAttributes};
pub use text_view::{MountedTextView, PlaceholderLabel, TextView};

/// Commonly used types
pub mod prelude {
    pub use crate::configuration::{
        Autocapitalization, KeyboardType, ReturnKeyType, TextContentType,
    };
    pub use crate::headless::HeadlessTextWidget;
    pub use crate::native::{NativeTextWidget, WidgetFamily};
    pub use crate::paragraph::ParagraphSpacingEnvironment;
    pub use crate::rich_text::{RichText, TextAttributes};
    pub use crate::text_view::{MountedTextView, PlaceholderLabel, TextView};
}
