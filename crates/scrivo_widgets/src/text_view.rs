//! Ready-to-use multi-line TextView
//!
//! Declarative text view with:
//! - Plain or attributed content through a two-way binding
//! - A placeholder label shown beneath the widget while content is empty
//! - Fluent configuration, one field per builder method
//! - Focus control and return-key commit
//!
//! # Example
//!
//! ```rust
//! use scrivo_core::{Binding, Environment, MainQueue};
//! use scrivo_widgets::text_view::TextView;
//!
//! let notes = Binding::new(String::new());
//! let queue = MainQueue::new();
//! let env = Environment::new();
//!
//! let view = TextView::with_placeholder("Notes", &notes)
//!     .dismiss_keyboard_on_return(true)
//!     .first_responder(true);
//!
//! let mut mounted = view.mount(&env, &queue).unwrap();
//! assert!(mounted.placeholder().unwrap().is_visible);
//!
//! notes.set("Buy milk".to_string());
//! mounted.update(&view, &env);
//! assert!(!mounted.placeholder().unwrap().is_visible);
//! ```

use std::fmt;
use std::sync::Arc;

use scrivo_core::binding::Binding;
use scrivo_core::environment::Environment;
use scrivo_core::error::Result;
use scrivo_core::queue::MainQueue;
use scrivo_core::style::{Color, EdgeInsets, Font, SemanticColor};

use crate::adapter::TextViewAdapter;
use crate::configuration::{
    Autocapitalization, KeyboardType, ReturnKeyType, TextContentType, TextViewConfiguration,
};
use crate::content::TextContent;
use crate::native::{DefaultTextWidgetFactory, TextWidgetFactory, WidgetFamily};
use crate::rich_text::RichText;

/// The placeholder label composed beneath the live widget
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderLabel {
    pub text: String,
    /// True exactly when the content is empty
    pub is_visible: bool,
    /// Visibility changes are applied instantly, never cross-faded
    pub animated: bool,
    /// Same as the widget's text container inset, so both align
    pub padding: EdgeInsets,
    pub font: Font,
    pub color: Color,
}

/// A declarative multi-line text view
#[derive(Clone)]
pub struct TextView {
    content: TextContent,
    placeholder: Option<String>,
    configuration: TextViewConfiguration,
    family: WidgetFamily,
    factory: Option<Arc<dyn TextWidgetFactory>>,
}

impl TextView {
    fn from_content(content: TextContent, placeholder: Option<String>) -> Self {
        Self {
            content,
            placeholder,
            configuration: TextViewConfiguration::default(),
            family: WidgetFamily::current(),
            factory: None,
        }
    }

    /// Edit a plain-string binding
    pub fn new(text: &Binding<String>) -> Self {
        Self::from_content(TextContent::Plain(text.clone()), None)
    }

    /// Edit a plain-string binding, showing `title` while it is empty
    pub fn with_placeholder(title: impl Into<String>, text: &Binding<String>) -> Self {
        Self::from_content(TextContent::Plain(text.clone()), Some(title.into()))
    }

    /// Display attributed text read-only
    pub fn constant(text: RichText) -> Self {
        let mut view = Self::from_content(TextContent::Attributed(Binding::constant(text)), None);
        view.configuration.is_constant = true;
        view
    }

    /// Edit an attributed-text binding
    pub fn rich(text: &Binding<RichText>) -> Self {
        Self::from_content(TextContent::Attributed(text.clone()), None)
    }

    /// Edit an optional string, treating `None` as empty
    pub fn optional(text: &Binding<Option<String>>) -> Self {
        Self::new(&text.unwrap_or(String::new()))
    }

    /// Edit an optional string with a placeholder, treating `None` as empty
    pub fn optional_with_placeholder(
        title: impl Into<String>,
        text: &Binding<Option<String>>,
    ) -> Self {
        Self::with_placeholder(title, &text.unwrap_or(String::new()))
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Request focus once, when the view is first mounted
    pub fn initial_first_responder(mut self, focused: bool) -> Self {
        self.configuration.is_initial_first_responder = Some(focused);
        self
    }

    /// Request or relinquish focus on every render
    pub fn first_responder(mut self, focused: bool) -> Self {
        self.configuration.is_first_responder = Some(focused);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.configuration.font = Some(font);
        self
    }

    pub fn foreground_color(mut self, color: SemanticColor) -> Self {
        self.configuration.text_color = Some(color.resolve());
        self
    }

    pub fn foreground_native_color(mut self, color: Color) -> Self {
        self.configuration.text_color = Some(color);
        self
    }

    pub fn text_container_inset(mut self, inset: EdgeInsets) -> Self {
        self.configuration.text_container_inset = inset;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.configuration.is_editable = editable;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.configuration.is_selectable = selectable;
        self
    }

    /// Commit on return instead of inserting a newline
    pub fn dismiss_keyboard_on_return(mut self, dismiss: bool) -> Self {
        self.configuration.dismiss_keyboard_on_return = dismiss;
        self
    }

    pub fn enables_return_key_automatically(mut self, enabled: bool) -> Self {
        self.configuration.enables_return_key_automatically = Some(enabled);
        self
    }

    pub fn autocapitalization(mut self, autocapitalization: Autocapitalization) -> Self {
        self.configuration.autocapitalization = autocapitalization;
        self
    }

    pub fn text_content_type(mut self, content_type: TextContentType) -> Self {
        self.configuration.text_content_type = Some(content_type);
        self
    }

    pub fn keyboard_type(mut self, keyboard_type: KeyboardType) -> Self {
        self.configuration.keyboard_type = keyboard_type;
        self
    }

    pub fn return_key_type(mut self, return_key_type: ReturnKeyType) -> Self {
        self.configuration.return_key_type = return_key_type;
        self
    }

    pub fn on_editing_changed<F: Fn(bool) + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.configuration.on_editing_changed = Some(Arc::new(callback));
        self
    }

    pub fn on_commit<F: Fn() + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.configuration.on_commit = Some(Arc::new(callback));
        self
    }

    /// Choose the native widget family (defaults to the compilation target's)
    pub fn widget_family(mut self, family: WidgetFamily) -> Self {
        self.family = family;
        self
    }

    /// Create the native widget with a custom factory
    pub fn widget_factory(mut self, factory: Arc<dyn TextWidgetFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn content(&self) -> &TextContent {
        &self.content
    }

    pub fn configuration(&self) -> &TextViewConfiguration {
        &self.configuration
    }

    pub fn family(&self) -> WidgetFamily {
        self.family
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The placeholder label for the current content, if the view has one
    pub fn placeholder_label(&self, env: &Environment) -> Option<PlaceholderLabel> {
        let text = self.placeholder.as_ref()?;
        Some(PlaceholderLabel {
            text: text.clone(),
            is_visible: self.is_empty(),
            animated: false,
            padding: self.configuration.text_container_inset,
            font: self.configuration.resolve_font(env),
            color: SemanticColor::Secondary.resolve(),
        })
    }

    /// Create the native widget and render into it
    pub fn mount(&self, env: &Environment, queue: &MainQueue) -> Result<MountedTextView> {
        let adapter = match &self.factory {
            Some(factory) => self.mount_with(factory.as_ref(), env, queue)?,
            None => self.mount_with(&DefaultTextWidgetFactory, env, queue)?,
        };

        Ok(MountedTextView {
            adapter,
            placeholder: self.placeholder_label(env),
        })
    }

    fn mount_with(
        &self,
        factory: &dyn TextWidgetFactory,
        env: &Environment,
        queue: &MainQueue,
    ) -> Result<TextViewAdapter> {
        TextViewAdapter::mount(
            factory,
            self.family,
            &self.configuration,
            &self.content,
            env,
            queue.clone(),
        )
    }
}

impl fmt::Debug for TextView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextView")
            .field("content", &self.content)
            .field("placeholder", &self.placeholder)
            .field("configuration", &self.configuration)
            .field("family", &self.family)
            .field("custom_factory", &self.factory.is_some())
            .finish()
    }
}

/// A text view attached to its native widget
pub struct MountedTextView {
    adapter: TextViewAdapter,
    placeholder: Option<PlaceholderLabel>,
}

impl MountedTextView {
    /// Re-render with a freshly built view value
    pub fn update(&mut self, view: &TextView, env: &Environment) {
        self.adapter
            .reconcile(&view.configuration, &view.content, env);
        self.placeholder = view.placeholder_label(env);
    }

    pub fn placeholder(&self) -> Option<&PlaceholderLabel> {
        self.placeholder.as_ref()
    }

    pub fn adapter(&self) -> &TextViewAdapter {
        &self.adapter
    }

    /// Detach the observer and release the native widget
    pub fn unmount(self) {
        self.adapter.unmount();
    }
}
