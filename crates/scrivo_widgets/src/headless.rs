//! In-memory native text widget
//!
//! `HeadlessTextWidget` behaves like a platform text widget without a window:
//! it stores content, selection and focus, resets the selection when its
//! content is replaced, and reports user edits to its observer. It is what
//! [`DefaultTextWidgetFactory`](crate::native::DefaultTextWidgetFactory)
//! returns, and what tests drive to simulate typing.

use std::any::Any;
use std::ops::Range;
use std::sync::Arc;

use scrivo_core::error::{Result, ScrivoError};
use scrivo_core::style::{Color, EdgeInsets, Font};

use crate::configuration::{Autocapitalization, KeyboardType, ReturnKeyType, TextContentType};
use crate::native::{NativeTextWidget, TextWidgetObserver, WidgetFamily};
use crate::rich_text::{RichText, TextAttributes};

/// Keyboard settings, only meaningful for touch widgets
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyboardSettings {
    pub enables_return_key_automatically: bool,
    pub keyboard_type: KeyboardType,
    pub return_key_type: ReturnKeyType,
    pub autocapitalization: Autocapitalization,
    pub text_content_type: Option<TextContentType>,
}

/// A native text widget that lives in memory
pub struct HeadlessTextWidget {
    family: WidgetFamily,
    observer: Option<Arc<dyn TextWidgetObserver>>,
    content: RichText,
    font: Font,
    text_color: Color,
    typing_attributes: TextAttributes,
    selection: Option<Range<usize>>,
    editable: bool,
    selectable: bool,
    scroll_enabled: bool,
    preferred_max_layout_width: Option<f32>,
    maximum_number_of_lines: usize,
    text_container_inset: EdgeInsets,
    keyboard: KeyboardSettings,
    first_responder: bool,
    /// Bumped whenever the content actually changes
    revision: u64,
}

impl HeadlessTextWidget {
    pub fn new(family: WidgetFamily) -> Self {
        Self {
            family,
            observer: None,
            content: RichText::default(),
            font: Font::body(),
            text_color: Color::LABEL,
            typing_attributes: TextAttributes::default(),
            selection: None,
            editable: true,
            selectable: true,
            scroll_enabled: true,
            preferred_max_layout_width: None,
            maximum_number_of_lines: 0,
            text_container_inset: EdgeInsets::ZERO,
            keyboard: KeyboardSettings::default(),
            first_responder: false,
            revision: 0,
        }
    }

    fn replace_content(&mut self, content: RichText) {
        let end = content.char_len();
        self.content = content;
        self.revision += 1;
        // Replacing the content drops the old selection, like platform widgets do
        self.selection = Some(end..end);
    }

    // =========================================================================
    // User input simulation
    // =========================================================================

    /// Replace `range` as if the user typed `replacement`
    ///
    /// Returns false when the widget is read-only or the observer rejects the edit.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> bool {
        if !self.editable {
            return false;
        }

        let len = self.content.char_len();
        let start = range.start.min(len);
        let range = start..range.end.clamp(start, len);

        let observer = self.observer.clone();
        if let Some(observer) = &observer {
            if !observer.should_change(&*self, range.clone(), replacement) {
                tracing::trace!("Edit {:?} rejected by observer", range);
                return false;
            }
        }

        let typing = self.typing_attributes.clone();
        self.content.replace_range(range.clone(), replacement, &typing);
        self.revision += 1;
        let caret = range.start + replacement.chars().count();
        self.selection = Some(caret..caret);

        if let Some(observer) = &observer {
            observer.did_change(&*self);
        }
        true
    }

    /// Type `text` over the current selection (or at the end)
    pub fn insert_text(&mut self, text: &str) -> bool {
        let range = self.current_selection();
        self.replace_range(range, text)
    }

    /// Delete the selection or the character before the caret
    pub fn delete_backward(&mut self) -> bool {
        let range = self.current_selection();
        if range.is_empty() {
            if range.start == 0 {
                return false;
            }
            self.replace_range(range.start - 1..range.start, "")
        } else {
            self.replace_range(range, "")
        }
    }

    /// Move the selection as if the user tapped or dragged
    pub fn select(&mut self, range: Range<usize>) {
        if self.selectable {
            self.set_selected_range(range);
        }
    }

    fn current_selection(&self) -> Range<usize> {
        let end = self.content.char_len();
        self.selection.clone().unwrap_or(end..end)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn typing_attributes(&self) -> &TextAttributes {
        &self.typing_attributes
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    pub fn preferred_max_layout_width(&self) -> Option<f32> {
        self.preferred_max_layout_width
    }

    pub fn maximum_number_of_lines(&self) -> usize {
        self.maximum_number_of_lines
    }

    pub fn text_container_inset(&self) -> EdgeInsets {
        self.text_container_inset
    }

    pub fn keyboard(&self) -> &KeyboardSettings {
        &self.keyboard
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }
}

impl NativeTextWidget for HeadlessTextWidget {
    fn family(&self) -> WidgetFamily {
        self.family
    }

    fn set_observer(&mut self, observer: Option<Arc<dyn TextWidgetObserver>>) {
        self.observer = observer;
    }

    fn text(&self) -> String {
        self.content.as_str().to_string()
    }

    fn set_text(&mut self, text: &str) {
        if self.content.as_str() == text && self.content.runs().is_empty() {
            return;
        }
        self.replace_content(RichText::new(text));
    }

    fn rich_text(&self) -> RichText {
        self.content.clone()
    }

    fn set_rich_text(&mut self, text: &RichText) {
        if &self.content == text {
            return;
        }
        self.replace_content(text.clone());
    }

    fn set_font(&mut self, font: &Font) {
        self.font = font.clone();
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn set_typing_attributes(&mut self, attributes: &TextAttributes) {
        self.typing_attributes = attributes.clone();
    }

    fn selected_range(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    fn set_selected_range(&mut self, range: Range<usize>) {
        let len = self.content.char_len();
        let start = range.start.min(len);
        self.selection = Some(start..range.end.clamp(start, len));
    }

    fn position_from_offset(&self, offset: usize) -> Result<usize> {
        let len = self.content.char_len();
        if offset <= len {
            Ok(offset)
        } else {
            Err(ScrivoError::PositionOutOfRange { offset, len })
        }
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn supports_preferred_max_layout_width(&self) -> bool {
        // Touch widgets size themselves inside flexible layouts
        self.family == WidgetFamily::Touch
    }

    fn set_preferred_max_layout_width(&mut self, width: Option<f32>) {
        self.preferred_max_layout_width = width;
    }

    fn set_maximum_number_of_lines(&mut self, lines: usize) {
        self.maximum_number_of_lines = lines;
    }

    fn set_text_container_inset(&mut self, inset: EdgeInsets) {
        self.text_container_inset = inset;
    }

    fn set_enables_return_key_automatically(&mut self, enabled: bool) {
        if self.family.has_software_keyboard() {
            self.keyboard.enables_return_key_automatically = enabled;
        }
    }

    fn set_keyboard_type(&mut self, keyboard_type: KeyboardType) {
        if self.family.has_software_keyboard() {
            self.keyboard.keyboard_type = keyboard_type;
        }
    }

    fn set_return_key_type(&mut self, return_key_type: ReturnKeyType) {
        if self.family.has_software_keyboard() {
            self.keyboard.return_key_type = return_key_type;
        }
    }

    fn set_autocapitalization(&mut self, autocapitalization: Autocapitalization) {
        if self.family.has_software_keyboard() {
            self.keyboard.autocapitalization = autocapitalization;
        }
    }

    fn set_text_content_type(&mut self, content_type: Option<TextContentType>) {
        if self.family.has_software_keyboard() {
            self.keyboard.text_content_type = content_type;
        }
    }

    fn is_first_responder(&self) -> bool {
        self.first_responder
    }

    fn become_first_responder(&mut self) -> bool {
        if self.first_responder {
            return true;
        }
        self.first_responder = true;
        if self.selection.is_none() {
            let end = self.content.char_len();
            self.selection = Some(end..end);
        }
        if let Some(observer) = self.observer.clone() {
            observer.did_begin_editing(&*self);
        }
        true
    }

    fn resign_first_responder(&mut self) -> bool {
        if !self.first_responder {
            return true;
        }
        self.first_responder = false;
        if let Some(observer) = self.observer.clone() {
            observer.did_end_editing(&*self);
        }
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
        reject_newlines: bool,
    }

    impl TextWidgetObserver for Recorder {
        fn did_begin_editing(&self, _widget: &dyn NativeTextWidget) {
            self.events.lock().unwrap().push("begin".into());
        }

        fn did_change(&self, widget: &dyn NativeTextWidget) {
            self.events
                .lock()
                .unwrap()
                .push(format!("change:{}", widget.text()));
        }

        fn should_change(
            &self,
            _widget: &dyn NativeTextWidget,
            _range: Range<usize>,
            replacement: &str,
        ) -> bool {
            !(self.reject_newlines && replacement == "\n")
        }

        fn did_end_editing(&self, _widget: &dyn NativeTextWidget) {
            self.events.lock().unwrap().push("end".into());
        }
    }

    #[test]
    fn test_programmatic_set_is_silent_and_moves_caret_to_end() {
        let recorder = Arc::new(Recorder::default());
        let mut widget = HeadlessTextWidget::new(WidgetFamily::Desktop);
        widget.set_observer(Some(recorder.clone()));

        widget.set_text("hello");
        assert_eq!(widget.text(), "hello");
        assert_eq!(widget.selected_range(), Some(5..5));
        assert_eq!(widget.revision(), 1);

        // Same content again is not a mutation
        widget.set_text("hello");
        assert_eq!(widget.revision(), 1);
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_typing_reports_changes() {
        let recorder = Arc::new(Recorder::default());
        let mut widget = HeadlessTextWidget::new(WidgetFamily::Desktop);
        widget.set_observer(Some(recorder.clone()));
        widget.set_text("ab");

        widget.select(1..1);
        assert!(widget.insert_text("X"));
        assert_eq!(widget.text(), "aXb");
        assert_eq!(widget.selected_range(), Some(2..2));

        assert!(widget.delete_backward());
        assert_eq!(widget.text(), "ab");
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["change:aXb".to_string(), "change:ab".to_string()]
        );
    }

    #[test]
    fn test_rejected_edit_leaves_content() {
        let recorder = Arc::new(Recorder {
            reject_newlines: true,
            ..Default::default()
        });
        let mut widget = HeadlessTextWidget::new(WidgetFamily::Touch);
        widget.set_observer(Some(recorder.clone()));
        widget.set_text("line");

        assert!(!widget.insert_text("\n"));
        assert_eq!(widget.text(), "line");
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_read_only_widget_ignores_typing() {
        let mut widget = HeadlessTextWidget::new(WidgetFamily::Desktop);
        widget.set_editable(false);
        assert!(!widget.insert_text("x"));
        assert_eq!(widget.text(), "");
    }

    #[test]
    fn test_focus_events() {
        let recorder = Arc::new(Recorder::default());
        let mut widget = HeadlessTextWidget::new(WidgetFamily::Touch);
        widget.set_observer(Some(recorder.clone()));

        assert!(widget.become_first_responder());
        assert!(widget.become_first_responder());
        assert!(widget.resign_first_responder());
        assert_eq!(*recorder.events.lock().unwrap(), vec!["begin", "end"]);
    }

    #[test]
    fn test_position_from_offset() {
        let mut widget = HeadlessTextWidget::new(WidgetFamily::Desktop);
        widget.set_text("abc");
        assert_eq!(widget.position_from_offset(3), Ok(3));
        assert_eq!(
            widget.position_from_offset(4),
            Err(ScrivoError::PositionOutOfRange { offset: 4, len: 3 })
        );
    }

    #[test]
    fn test_desktop_ignores_keyboard_settings() {
        let mut desktop = HeadlessTextWidget::new(WidgetFamily::Desktop);
        desktop.set_keyboard_type(KeyboardType::EmailAddress);
        assert_eq!(desktop.keyboard().keyboard_type, KeyboardType::Default);

        let mut touch = HeadlessTextWidget::new(WidgetFamily::Touch);
        touch.set_keyboard_type(KeyboardType::EmailAddress);
        assert_eq!(touch.keyboard().keyboard_type, KeyboardType::EmailAddress);
    }
}
