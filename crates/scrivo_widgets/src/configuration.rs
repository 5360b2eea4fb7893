//! Per-render configuration of a text view
//!
//! A `TextViewConfiguration` is rebuilt on every render pass and handed to the
//! adapter, which applies it to the long-lived native widget.

use std::fmt;
use std::sync::Arc;

use scrivo_core::environment::Environment;
use scrivo_core::style::{Color, EdgeInsets, Font};

/// Called with `true` when editing begins and `false` when it ends
pub type EditingChangedCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Called when the user commits the text
pub type CommitCallback = Arc<dyn Fn() + Send + Sync>;

/// Keyboard layout requested from touch platforms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyboardType {
    #[default]
    Default,
    Ascii,
    NumbersAndPunctuation,
    Url,
    NumberPad,
    PhonePad,
    EmailAddress,
    DecimalPad,
    WebSearch,
}

/// Title of the return key on touch keyboards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReturnKeyType {
    #[default]
    Default,
    Go,
    Next,
    Search,
    Send,
    Done,
}

/// Automatic capitalization on touch keyboards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Autocapitalization {
    None,
    Words,
    #[default]
    Sentences,
    AllCharacters,
}

/// Semantic hint about the expected content, used for autofill
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextContentType {
    Name,
    EmailAddress,
    Url,
    Username,
    Password,
    OneTimeCode,
    FullStreetAddress,
    TelephoneNumber,
}

/// Every tunable behavior of a text view, for one render pass
#[derive(Clone)]
pub struct TextViewConfiguration {
    /// Bound to immutable attributed content; never editable
    pub is_constant: bool,
    pub on_editing_changed: Option<EditingChangedCallback>,
    pub on_commit: Option<CommitCallback>,
    /// Focus request applied once, when the widget is created
    pub is_initial_first_responder: Option<bool>,
    /// Focus request applied on every render; `None` leaves focus alone
    pub is_first_responder: Option<bool>,
    pub is_editable: bool,
    pub is_selectable: bool,
    /// Overrides the ambient font
    pub font: Option<Font>,
    /// Overrides the ambient foreground color
    pub text_color: Option<Color>,
    pub text_container_inset: EdgeInsets,
    /// Commit instead of inserting a newline on return
    pub dismiss_keyboard_on_return: bool,
    pub enables_return_key_automatically: Option<bool>,
    pub autocapitalization: Autocapitalization,
    pub text_content_type: Option<TextContentType>,
    pub keyboard_type: KeyboardType,
    pub return_key_type: ReturnKeyType,
}

impl Default for TextViewConfiguration {
    fn default() -> Self {
        Self {
            is_constant: false,
            on_editing_changed: None,
            on_commit: None,
            is_initial_first_responder: None,
            is_first_responder: None,
            is_editable: true,
            is_selectable: true,
            font: None,
            text_color: None,
            text_container_inset: EdgeInsets::ZERO,
            dismiss_keyboard_on_return: false,
            enables_return_key_automatically: None,
            autocapitalization: Autocapitalization::default(),
            text_content_type: None,
            keyboard_type: KeyboardType::default(),
            return_key_type: ReturnKeyType::default(),
        }
    }
}

impl TextViewConfiguration {
    /// Whether the widget accepts edits in a context with the given enabled state
    ///
    /// Constant content is never editable. Otherwise a disabled context (a
    /// disabled form, say) degrades the view to read-only.
    pub fn effective_editable(&self, ambient_enabled: bool) -> bool {
        if self.is_constant {
            false
        } else {
            ambient_enabled && self.is_editable
        }
    }

    /// Explicit font, then ambient font, then the platform body font
    pub fn resolve_font(&self, env: &Environment) -> Font {
        self.font
            .clone()
            .or_else(|| env.font.clone())
            .unwrap_or_else(Font::body)
    }

    /// Explicit color, then ambient color, then the platform label color
    pub fn resolve_text_color(&self, env: &Environment) -> Color {
        self.text_color
            .or(env.foreground_color)
            .unwrap_or(Color::LABEL)
    }

    pub(crate) fn notify_editing_changed(&self, editing: bool) {
        if let Some(callback) = &self.on_editing_changed {
            callback(editing);
        }
    }

    pub(crate) fn notify_commit(&self) {
        if let Some(callback) = &self.on_commit {
            callback();
        }
    }
}

impl fmt::Debug for TextViewConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextViewConfiguration")
            .field("is_constant", &self.is_constant)
            .field("is_initial_first_responder", &self.is_initial_first_responder)
            .field("is_first_responder", &self.is_first_responder)
            .field("is_editable", &self.is_editable)
            .field("is_selectable", &self.is_selectable)
            .field("font", &self.font)
            .field("text_color", &self.text_color)
            .field("text_container_inset", &self.text_container_inset)
            .field("dismiss_keyboard_on_return", &self.dismiss_keyboard_on_return)
            .field(
                "enables_return_key_automatically",
                &self.enables_return_key_automatically,
            )
            .field("autocapitalization", &self.autocapitalization)
            .field("text_content_type", &self.text_content_type)
            .field("keyboard_type", &self.keyboard_type)
            .field("return_key_type", &self.return_key_type)
            // Callbacks are opaque
            .finish_non_exhaustive()
    }
}
