//! Native event handling
//!
//! The coordinator is the single observer installed on a text view's native
//! widget. The adapter refreshes its configuration and content on every
//! reconciliation pass, so callbacks always see the latest bindings instead of
//! the ones captured when the widget was created.

use std::ops::Range;
use std::sync::{Mutex, MutexGuard, PoisonError};

use scrivo_core::error::ScrivoError;
use scrivo_core::events::{event_name, event_types, EventType};

use crate::configuration::TextViewConfiguration;
use crate::content::TextContent;
use crate::editing::EditingSession;
use crate::native::{NativeTextWidget, TextWidgetObserver, WidgetFamily};

struct CoordinatorState {
    configuration: TextViewConfiguration,
    content: TextContent,
    detached: bool,
}

/// Writes native events back into bindings and callbacks
pub struct TextViewCoordinator {
    family: WidgetFamily,
    state: Mutex<CoordinatorState>,
    session: Mutex<EditingSession>,
}

impl TextViewCoordinator {
    pub fn new(
        family: WidgetFamily,
        configuration: TextViewConfiguration,
        content: TextContent,
    ) -> Self {
        Self {
            family,
            state: Mutex::new(CoordinatorState {
                configuration,
                content,
                detached: false,
            }),
            session: Mutex::new(EditingSession::new(family)),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_session(&self) -> MutexGuard<'_, EditingSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the configuration and content seen by future callbacks
    pub fn refresh(&self, configuration: TextViewConfiguration, content: TextContent) {
        let mut state = self.lock_state();
        state.configuration = configuration;
        state.content = content;
    }

    /// Stop reacting to events; called when the view unmounts
    pub fn detach(&self) {
        self.lock_state().detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.lock_state().detached
    }

    pub fn family(&self) -> WidgetFamily {
        self.family
    }

    /// Whether the widget is inside an editing session
    pub fn is_editing(&self) -> bool {
        self.lock_session().is_editing()
    }

    /// Clone the current configuration and content, unless detached
    ///
    /// Callbacks run on the clones so user code never runs under our lock.
    fn snapshot(&self, event: EventType) -> Option<(TextViewConfiguration, TextContent)> {
        let state = self.lock_state();
        if state.detached {
            tracing::trace!("Ignoring {}: {}", event_name(event), ScrivoError::Detached);
            return None;
        }
        Some((state.configuration.clone(), state.content.clone()))
    }

    /// Push the widget's content into whichever binding is active
    fn write_back(content: &TextContent, widget: &dyn NativeTextWidget) {
        debug_assert!(
            !content.is_constant(),
            "text view received an edit for constant content"
        );
        if content.is_constant() {
            tracing::warn!("Dropping edit: {}", ScrivoError::ConstantBinding);
            return;
        }

        match content {
            TextContent::Plain(binding) => {
                let text = widget.text();
                if binding.get() != text {
                    binding.set(text);
                }
            }
            TextContent::Attributed(binding) => {
                let text = widget.rich_text();
                if binding.get() != text {
                    binding.set(text);
                }
            }
        }
    }
}

impl TextWidgetObserver for TextViewCoordinator {
    fn did_begin_editing(&self, widget: &dyn NativeTextWidget) {
        let Some((configuration, content)) = self.snapshot(event_types::BEGIN_EDITING) else {
            return;
        };

        let sync = self.lock_session().begin();
        configuration.notify_editing_changed(true);

        if sync && !configuration.is_constant && !content.is_constant() {
            tracing::trace!("Syncing content on begin-editing ({:?})", self.family);
            Self::write_back(&content, widget);
        }
    }

    fn did_change(&self, widget: &dyn NativeTextWidget) {
        let Some((_, content)) = self.snapshot(event_types::TEXT_CHANGED) else {
            return;
        };
        Self::write_back(&content, widget);
    }

    fn should_change(
        &self,
        _widget: &dyn NativeTextWidget,
        _range: Range<usize>,
        replacement: &str,
    ) -> bool {
        let Some((configuration, _)) = self.snapshot(event_types::SHOULD_CHANGE) else {
            return true;
        };

        if configuration.dismiss_keyboard_on_return && replacement == "\n" {
            tracing::debug!("Return pressed, committing instead of inserting newline");
            configuration.notify_commit();
            return false;
        }
        true
    }

    fn did_end_editing(&self, _widget: &dyn NativeTextWidget) {
        let Some((configuration, _)) = self.snapshot(event_types::END_EDITING) else {
            return;
        };

        self.lock_session().end();
        configuration.notify_editing_changed(false);
        configuration.notify_commit();
    }
}
