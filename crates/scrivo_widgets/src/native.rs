//! Native text widget seam
//!
//! The adapter never talks to a platform toolkit directly. It drives a
//! [`NativeTextWidget`] produced by a [`TextWidgetFactory`] and listens to it
//! through a [`TextWidgetObserver`]. Platform backends implement these traits;
//! [`HeadlessTextWidget`](crate::headless::HeadlessTextWidget) is the built-in
//! implementation.

use std::any::Any;
use std::ops::Range;
use std::sync::Arc;

use scrivo_core::error::Result;
use scrivo_core::style::{Color, EdgeInsets, Font};

use crate::configuration::{Autocapitalization, KeyboardType, ReturnKeyType, TextContentType};
use crate::headless::HeadlessTextWidget;
use crate::rich_text::{RichText, TextAttributes};

/// Family of native text widgets
///
/// Families differ in small observable ways (see
/// [`WidgetFamily::syncs_content_on_begin_editing`]), which are kept rather
/// than unified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetFamily {
    /// Touch toolkits with software keyboards (iOS, Android)
    Touch,
    /// Desktop toolkits with hardware keyboards
    Desktop,
}

impl WidgetFamily {
    /// Family for the compilation target
    pub fn current() -> Self {
        if cfg!(any(target_os = "ios", target_os = "android")) {
            WidgetFamily::Touch
        } else {
            WidgetFamily::Desktop
        }
    }

    /// Touch widgets push their content back into the binding when editing begins
    pub fn syncs_content_on_begin_editing(self) -> bool {
        matches!(self, WidgetFamily::Touch)
    }

    /// Only touch widgets present a software keyboard
    pub fn has_software_keyboard(self) -> bool {
        matches!(self, WidgetFamily::Touch)
    }
}

/// Receives user-driven events from a native widget
///
/// Programmatic mutations made by the adapter never produce these events.
pub trait TextWidgetObserver: Send + Sync {
    /// The widget became first responder
    fn did_begin_editing(&self, widget: &dyn NativeTextWidget);

    /// The user changed the content
    fn did_change(&self, widget: &dyn NativeTextWidget);

    /// The user is about to replace `range` with `replacement`; return false to reject
    fn should_change(
        &self,
        widget: &dyn NativeTextWidget,
        range: Range<usize>,
        replacement: &str,
    ) -> bool;

    /// The widget resigned first responder
    fn did_end_editing(&self, widget: &dyn NativeTextWidget);
}

/// A long-lived native multi-line text widget
///
/// Offsets and ranges are in characters.
pub trait NativeTextWidget: Send {
    fn family(&self) -> WidgetFamily;

    /// Install or remove the event observer
    fn set_observer(&mut self, observer: Option<Arc<dyn TextWidgetObserver>>);

    // Content

    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn rich_text(&self) -> RichText;
    fn set_rich_text(&mut self, text: &RichText);
    fn set_font(&mut self, font: &Font);
    fn set_text_color(&mut self, color: Color);
    /// Attributes given to text the user types
    fn set_typing_attributes(&mut self, attributes: &TextAttributes);

    // Selection

    fn selected_range(&self) -> Option<Range<usize>>;
    fn set_selected_range(&mut self, range: Range<usize>);
    /// Resolve a character offset from the start of the document
    fn position_from_offset(&self, offset: usize) -> Result<usize>;

    // Interaction

    fn set_editable(&mut self, editable: bool);
    fn set_selectable(&mut self, selectable: bool);
    fn set_scroll_enabled(&mut self, enabled: bool);

    // Layout

    /// Whether the widget measures itself against a preferred width
    fn supports_preferred_max_layout_width(&self) -> bool {
        false
    }
    fn set_preferred_max_layout_width(&mut self, _width: Option<f32>) {}
    /// 0 means unlimited
    fn set_maximum_number_of_lines(&mut self, lines: usize);
    fn set_text_container_inset(&mut self, inset: EdgeInsets);

    // Keyboard, ignored by widgets without a software keyboard

    fn set_enables_return_key_automatically(&mut self, _enabled: bool) {}
    fn set_keyboard_type(&mut self, _keyboard_type: KeyboardType) {}
    fn set_return_key_type(&mut self, _return_key_type: ReturnKeyType) {}
    fn set_autocapitalization(&mut self, _autocapitalization: Autocapitalization) {}
    fn set_text_content_type(&mut self, _content_type: Option<TextContentType>) {}

    // Focus

    fn is_first_responder(&self) -> bool;
    fn become_first_responder(&mut self) -> bool;
    fn resign_first_responder(&mut self) -> bool;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Creates native widgets for a text view
pub trait TextWidgetFactory: Send + Sync {
    fn make_widget(&self, family: WidgetFamily) -> Result<Box<dyn NativeTextWidget>>;
}

/// Factory used when a view does not install its own
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTextWidgetFactory;

impl TextWidgetFactory for DefaultTextWidgetFactory {
    fn make_widget(&self, family: WidgetFamily) -> Result<Box<dyn NativeTextWidget>> {
        Ok(Box::new(HeadlessTextWidget::new(family)))
    }
}
