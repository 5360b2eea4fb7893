//! Native widget adapter
//!
//! The adapter owns one native widget for the lifetime of a mounted text view
//! and reconciles it against each render's configuration, content and
//! environment. Reconciliation runs in a fixed order:
//!
//! 1. snapshot the cursor offset (before content is touched)
//! 2. interaction flags (editable, selectable, scrolling)
//! 3. layout (preferred width, line limit, insets)
//! 4. text, font, color and paragraph style
//! 5. restore the cursor offset
//! 6. keyboard presentation
//! 7. focus, deferred to the next main-queue iteration
//!
//! Focus is decided when the deferred task runs, not when it is scheduled.
//! Each render only records its intent; the task reads the latest one, so
//! several renders inside one iteration resolve to the last of them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use scrivo_core::environment::Environment;
use scrivo_core::error::Result;
use scrivo_core::queue::{MainQueue, TaskId};

use crate::configuration::TextViewConfiguration;
use crate::content::TextContent;
use crate::coordinator::TextViewCoordinator;
use crate::native::{NativeTextWidget, TextWidgetFactory, TextWidgetObserver, WidgetFamily};
use crate::paragraph::{ParagraphSpacingEnvironment, ParagraphStyle};
use crate::rich_text::{RichText, TextAttributes};

/// Native widget shared with deferred focus tasks
pub type SharedTextWidget = Arc<Mutex<Box<dyn NativeTextWidget>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FocusRequest {
    Become,
    Resign,
}

/// Focus wanted by the most recent render
#[derive(Clone, Copy, Debug, Default)]
struct FocusIntent {
    /// Initial focus requested at mount and not yet applied
    initial: bool,
    requested: Option<bool>,
    enabled: bool,
}

impl FocusIntent {
    fn request(&self, focused: bool) -> Option<FocusRequest> {
        match self.requested {
            Some(true) if !focused && self.enabled => Some(FocusRequest::Become),
            Some(false) if focused => Some(FocusRequest::Resign),
            Some(_) => None,
            None if self.initial && !focused && self.enabled => Some(FocusRequest::Become),
            None => None,
        }
    }
}

type SharedFocusIntent = Arc<Mutex<FocusIntent>>;

fn lock_intent(intent: &SharedFocusIntent) -> MutexGuard<'_, FocusIntent> {
    intent.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps one native widget consistent with the latest render
pub struct TextViewAdapter {
    widget: SharedTextWidget,
    coordinator: Arc<TextViewCoordinator>,
    queue: MainQueue,
    focus_intent: SharedFocusIntent,
    /// At most one focus task waits on the queue at a time
    pending_focus: Option<TaskId>,
}

impl TextViewAdapter {
    /// Create the native widget and run the first reconciliation
    pub fn mount(
        factory: &dyn TextWidgetFactory,
        family: WidgetFamily,
        configuration: &TextViewConfiguration,
        content: &TextContent,
        env: &Environment,
        queue: MainQueue,
    ) -> Result<Self> {
        let mut widget = factory.make_widget(family)?;
        let coordinator = Arc::new(TextViewCoordinator::new(
            family,
            configuration.clone(),
            content.clone(),
        ));
        let observer: Arc<dyn TextWidgetObserver> = coordinator.clone();
        widget.set_observer(Some(observer));

        tracing::debug!("Mounted {:?} text widget", family);

        let focus_intent = FocusIntent {
            initial: configuration.is_initial_first_responder == Some(true),
            ..Default::default()
        };

        let mut adapter = Self {
            widget: Arc::new(Mutex::new(widget)),
            coordinator,
            queue,
            focus_intent: Arc::new(Mutex::new(focus_intent)),
            pending_focus: None,
        };

        adapter.reconcile(configuration, content, env);

        // Initial focus is considered once, at creation
        if adapter.pending_focus.is_none() {
            lock_intent(&adapter.focus_intent).initial = false;
        }

        Ok(adapter)
    }

    fn lock_widget(&self) -> MutexGuard<'_, Box<dyn NativeTextWidget>> {
        self.widget.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bring the native widget in line with a new render
    pub fn reconcile(
        &mut self,
        configuration: &TextViewConfiguration,
        content: &TextContent,
        env: &Environment,
    ) {
        self.coordinator
            .refresh(configuration.clone(), content.clone());

        {
            let mut guard = self.lock_widget();
            let widget: &mut dyn NativeTextWidget = &mut **guard;

            let cursor = widget.selected_range().map(|range| range.start);

            apply_interaction(widget, configuration, content, env);
            apply_layout(widget, configuration, env);
            apply_text(widget, configuration, content, env);

            if let Some(offset) = cursor {
                restore_cursor(widget, offset);
            }

            apply_keyboard(widget, configuration);
        }

        self.reconcile_focus(configuration, env);
    }

    fn reconcile_focus(&mut self, configuration: &TextViewConfiguration, env: &Environment) {
        {
            let mut intent = lock_intent(&self.focus_intent);
            intent.requested = configuration.is_first_responder;
            intent.enabled = env.is_enabled;
        }

        if let Some(id) = self.pending_focus {
            if self.queue.is_pending(id) {
                tracing::trace!("Focus task already pending, intent updated");
                return;
            }
            self.pending_focus = None;
        }

        let focused = self.lock_widget().is_first_responder();
        let request = lock_intent(&self.focus_intent).request(focused);
        if let Some(request) = request {
            self.schedule_focus(request);
        }
    }

    fn schedule_focus(&mut self, request: FocusRequest) {
        let widget: Weak<Mutex<Box<dyn NativeTextWidget>>> = Arc::downgrade(&self.widget);
        let intent = Arc::clone(&self.focus_intent);

        let id = self.queue.schedule(move || {
            let Some(widget) = widget.upgrade() else {
                tracing::trace!("Skipping focus task: text view unmounted");
                return;
            };
            let mut widget = widget.lock().unwrap_or_else(PoisonError::into_inner);

            // Decide against the latest render and the widget's focus right now
            let request = {
                let mut intent = lock_intent(&intent);
                let request = intent.request(widget.is_first_responder());
                intent.initial = false;
                request
            };

            match request {
                Some(FocusRequest::Become) => {
                    widget.become_first_responder();
                }
                Some(FocusRequest::Resign) => {
                    widget.resign_first_responder();
                }
                None => tracing::trace!("Focus already matches the latest render"),
            }
        });

        tracing::debug!("Scheduled focus request {:?}", request);
        self.pending_focus = Some(id);
    }

    /// Run `f` with the native widget
    ///
    /// Must not be called from inside a binding write or text view callback.
    pub fn with_widget<R>(&self, f: impl FnOnce(&mut dyn NativeTextWidget) -> R) -> R {
        let mut guard = self.lock_widget();
        f(&mut **guard)
    }

    /// Run `f` with the native widget downcast to `W`
    pub fn with_widget_as<W, R>(&self, f: impl FnOnce(&mut W) -> R) -> Option<R>
    where
        W: NativeTextWidget + 'static,
    {
        let mut guard = self.lock_widget();
        guard.as_any_mut().downcast_mut::<W>().map(f)
    }

    pub fn coordinator(&self) -> &TextViewCoordinator {
        &self.coordinator
    }

    pub fn family(&self) -> WidgetFamily {
        self.coordinator.family()
    }

    /// Release the native widget now
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for TextViewAdapter {
    fn drop(&mut self) {
        self.coordinator.detach();
        if let Some(id) = self.pending_focus.take() {
            self.queue.cancel(id);
        }
        self.lock_widget().set_observer(None);
        tracing::debug!("Unmounted {:?} text widget", self.coordinator.family());
    }
}

// =============================================================================
// Reconciliation steps
// =============================================================================

fn apply_interaction(
    widget: &mut dyn NativeTextWidget,
    configuration: &TextViewConfiguration,
    content: &TextContent,
    env: &Environment,
) {
    // A constant binding rejects writes however the view was built
    let editable = configuration.effective_editable(env.is_enabled) && !content.is_constant();
    tracing::trace!(
        "editable={} (constant={}, enabled={})",
        editable,
        configuration.is_constant || content.is_constant(),
        env.is_enabled
    );
    widget.set_editable(editable);
    widget.set_scroll_enabled(env.is_scroll_enabled);
    widget.set_selectable(configuration.is_selectable);
}

fn apply_layout(
    widget: &mut dyn NativeTextWidget,
    configuration: &TextViewConfiguration,
    env: &Environment,
) {
    if widget.supports_preferred_max_layout_width() {
        widget.set_preferred_max_layout_width(env.preferred_max_layout_width);
    }
    widget.set_maximum_number_of_lines(env.line_limit.unwrap_or(0));
    widget.set_text_container_inset(configuration.text_container_inset);
}

fn apply_text(
    widget: &mut dyn NativeTextWidget,
    configuration: &TextViewConfiguration,
    content: &TextContent,
    env: &Environment,
) {
    let font = configuration.resolve_font(env);
    let color = configuration.resolve_text_color(env);
    let requires_attributes = content.is_attributed() || env.paragraph_spacing().is_some();

    if !requires_attributes {
        if let TextContent::Plain(binding) = content {
            widget.set_text(&binding.get());
            widget.set_font(&font);
            widget.set_text_color(color);
            // Typed text must stay unstyled once attribution is no longer needed
            widget.set_typing_attributes(&TextAttributes::default());
            return;
        }
    }

    let attributes = TextAttributes {
        font: Some(font),
        color: Some(color),
        paragraph: Some(ParagraphStyle::from_environment(env)),
    };

    match content {
        TextContent::Plain(binding) => {
            // Rebuilt every pass; the widget ignores identical content
            widget.set_rich_text(&RichText::styled(binding.get(), attributes.clone()));
        }
        TextContent::Attributed(binding) => {
            let value = binding.get();
            if widget.rich_text() != value {
                tracing::trace!("Attributed content changed externally");
                widget.set_rich_text(&value);
            }
        }
    }

    widget.set_typing_attributes(&attributes);
}

fn restore_cursor(widget: &mut dyn NativeTextWidget, offset: usize) {
    match widget.position_from_offset(offset) {
        Ok(position) => widget.set_selected_range(position..position),
        Err(err) => tracing::trace!("Cursor not restored: {}", err),
    }
}

fn apply_keyboard(widget: &mut dyn NativeTextWidget, configuration: &TextViewConfiguration) {
    if let Some(enabled) = configuration.enables_return_key_automatically {
        widget.set_enables_return_key_automatically(enabled);
    }
    widget.set_keyboard_type(configuration.keyboard_type);
    widget.set_return_key_type(configuration.return_key_type);
    widget.set_autocapitalization(configuration.autocapitalization);
    widget.set_text_content_type(configuration.text_content_type);
}
