//! End-to-end behavior of a mounted text view

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use scrivo_core::{Binding, Environment, MainQueue, ScrivoError};
use scrivo_widgets::prelude::*;
use scrivo_widgets::{KeyboardSettings, NativeTextWidget, TextWidgetFactory};

fn headless<R>(mounted: &MountedTextView, f: impl FnOnce(&mut HeadlessTextWidget) -> R) -> R {
    mounted
        .adapter()
        .with_widget_as::<HeadlessTextWidget, _>(f)
        .expect("default factory builds headless widgets")
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    (count, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_placeholder_tracks_emptiness() {
    let text = Binding::new(String::new());
    let env = Environment::new();
    let queue = MainQueue::new();
    let view = TextView::with_placeholder("Write something", &text);

    let mut mounted = view.mount(&env, &queue).unwrap();
    assert!(mounted.placeholder().unwrap().is_visible);

    text.set("x".to_string());
    mounted.update(&view, &env);
    assert!(!mounted.placeholder().unwrap().is_visible);

    text.set(String::new());
    mounted.update(&view, &env);
    let label = mounted.placeholder().unwrap();
    assert!(label.is_visible);
    assert!(!label.animated);
}

#[test]
fn test_view_without_placeholder_has_no_label() {
    let text = Binding::new(String::new());
    let mounted = TextView::new(&text)
        .mount(&Environment::new(), &MainQueue::new())
        .unwrap();
    assert!(mounted.placeholder().is_none());
}

#[test]
fn test_constant_and_disabled_views_are_read_only() {
    let queue = MainQueue::new();

    let constant = TextView::constant(RichText::new("fixed"))
        .editable(true)
        .mount(&Environment::new(), &queue)
        .unwrap();
    headless(&constant, |widget| {
        assert!(!widget.is_editable());
        assert!(!widget.insert_text("!"));
        assert_eq!(widget.text(), "fixed");
    });

    let fixed = Binding::constant("fixed".to_string());
    let constant_binding = TextView::new(&fixed)
        .mount(&Environment::new(), &queue)
        .unwrap();
    headless(&constant_binding, |widget| {
        assert!(!widget.is_editable());
        assert!(!widget.insert_text("!"));
    });
    assert_eq!(fixed.get(), "fixed");

    let rich_fixed = Binding::constant(RichText::new("fixed"));
    let constant_rich = TextView::rich(&rich_fixed)
        .mount(&Environment::new(), &queue)
        .unwrap();
    headless(&constant_rich, |widget| assert!(!widget.is_editable()));

    let text = Binding::new(String::new());
    let disabled = TextView::new(&text)
        .mount(&Environment::new().with_enabled(false), &queue)
        .unwrap();
    headless(&disabled, |widget| assert!(!widget.is_editable()));

    let not_editable = TextView::new(&text)
        .editable(false)
        .mount(&Environment::new(), &queue)
        .unwrap();
    headless(&not_editable, |widget| assert!(!widget.is_editable()));
}

#[test]
fn test_plain_text_round_trip() {
    let text = Binding::new("draft".to_string());
    let env = Environment::new();
    let view = TextView::new(&text).widget_family(WidgetFamily::Desktop);
    let mounted = view.mount(&env, &MainQueue::new()).unwrap();

    headless(&mounted, |widget| {
        assert_eq!(widget.text(), "draft");
        widget.insert_text(" two");
        widget.delete_backward();
    });
    assert_eq!(text.get(), "draft tw");
}

#[test]
fn test_attributed_round_trip_keeps_runs() {
    let bold = TextAttributes {
        font: Some(scrivo_core::Font::body().bold()),
        ..Default::default()
    };
    let text = Binding::new(RichText::new("Title").with_run(0..5, bold.clone()));
    let view = TextView::rich(&text);
    let mounted = view.mount(&Environment::new(), &MainQueue::new()).unwrap();

    headless(&mounted, |widget| {
        widget.select(5..5);
        widget.insert_text("!");
    });

    let value = text.get();
    assert_eq!(value.as_str(), "Title!");
    assert_eq!(value.runs()[0].range, 0..5);
    assert_eq!(value.runs()[0].attributes, bold);
}

#[test]
fn test_reconcile_is_idempotent() {
    let text = Binding::new("same".to_string());
    let env = Environment::new();
    let view = TextView::new(&text);
    let mut mounted = view.mount(&env, &MainQueue::new()).unwrap();

    let before = headless(&mounted, |widget| {
        widget.select(2..2);
        widget.revision()
    });
    mounted.update(&view, &env);
    mounted.update(&view, &env);

    headless(&mounted, |widget| {
        assert_eq!(widget.revision(), before);
        assert_eq!(widget.selected_range(), Some(2..2));
    });
}

#[test]
fn test_cursor_survives_external_update() {
    let text = Binding::new("hello".to_string());
    let env = Environment::new();
    let view = TextView::new(&text);
    let mut mounted = view.mount(&env, &MainQueue::new()).unwrap();

    headless(&mounted, |widget| widget.select(3..3));
    text.set("hello world".to_string());
    mounted.update(&view, &env);

    headless(&mounted, |widget| {
        assert_eq!(widget.text(), "hello world");
        assert_eq!(widget.selected_range(), Some(3..3));
    });
}

#[test]
fn test_return_commits_instead_of_inserting_newline() {
    let text = Binding::new("line".to_string());
    let (commits, on_commit) = counter();
    let view = TextView::new(&text)
        .dismiss_keyboard_on_return(true)
        .on_commit(on_commit);
    let mounted = view.mount(&Environment::new(), &MainQueue::new()).unwrap();

    let inserted = headless(&mounted, |widget| widget.insert_text("\n"));
    assert!(!inserted);
    assert_eq!(commits.load(Ordering::SeqCst), 1);
    assert_eq!(text.get(), "line");

    // Multi-character pastes containing a newline are not intercepted
    headless(&mounted, |widget| widget.insert_text("\nnext"));
    assert_eq!(text.get(), "line\nnext");
    assert_eq!(commits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_return_inserts_newline_by_default() {
    let text = Binding::new("line".to_string());
    let (commits, on_commit) = counter();
    let view = TextView::new(&text).on_commit(on_commit);
    let mounted = view.mount(&Environment::new(), &MainQueue::new()).unwrap();

    assert!(headless(&mounted, |widget| widget.insert_text("\n")));
    assert_eq!(text.get(), "line\n");
    assert_eq!(commits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_focus_is_deferred_to_next_iteration() {
    let text = Binding::new(String::new());
    let env = Environment::new();
    let queue = MainQueue::new();
    let editing = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&editing);

    let view = TextView::new(&text)
        .first_responder(true)
        .on_editing_changed(move |is_editing| log.lock().unwrap().push(is_editing));
    let mut mounted = view.mount(&env, &queue).unwrap();

    assert!(!headless(&mounted, |widget| widget.is_first_responder()));
    assert_eq!(queue.run_next_iteration(), 1);
    assert!(headless(&mounted, |widget| widget.is_first_responder()));
    assert!(mounted.adapter().coordinator().is_editing());

    // Already focused: re-rendering schedules nothing
    mounted.update(&view, &env);
    assert_eq!(queue.pending_count(), 0);

    let view = view.first_responder(false);
    mounted.update(&view, &env);
    assert!(headless(&mounted, |widget| widget.is_first_responder()));
    queue.run_next_iteration();
    assert!(!headless(&mounted, |widget| widget.is_first_responder()));

    assert_eq!(*editing.lock().unwrap(), vec![true, false]);
}

#[test]
fn test_initial_focus_applies_once() {
    let text = Binding::new(String::new());
    let env = Environment::new();
    let queue = MainQueue::new();
    let view = TextView::new(&text).initial_first_responder(true);
    let mut mounted = view.mount(&env, &queue).unwrap();

    queue.run_until_idle(4);
    assert!(headless(&mounted, |widget| widget.is_first_responder()));

    headless(&mounted, |widget| widget.resign_first_responder());
    mounted.update(&view, &env);
    assert_eq!(queue.pending_count(), 0);
    assert!(!headless(&mounted, |widget| widget.is_first_responder()));
}

#[test]
fn test_unmount_cancels_focus_and_ignores_events() {
    let text = Binding::new(String::new());
    let queue = MainQueue::new();
    let (commits, on_commit) = counter();
    let view = TextView::new(&text)
        .first_responder(true)
        .on_commit(on_commit);
    let mounted = view.mount(&Environment::new(), &queue).unwrap();
    assert_eq!(queue.pending_count(), 1);

    mounted.unmount();
    assert_eq!(queue.pending_count(), 0);
    assert_eq!(queue.run_next_iteration(), 0);
    assert_eq!(commits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_touch_syncs_content_when_editing_begins() {
    for (family, expected) in [
        (WidgetFamily::Touch, "shown"),
        (WidgetFamily::Desktop, "external"),
    ] {
        let text = Binding::new("shown".to_string());
        let queue = MainQueue::new();
        let view = TextView::new(&text).widget_family(family);
        let mounted = view.mount(&Environment::new(), &queue).unwrap();

        // The owner changes the value without re-rendering
        text.set("external".to_string());
        headless(&mounted, |widget| widget.become_first_responder());

        assert_eq!(text.get(), expected, "{:?}", family);
    }
}

#[test]
fn test_keyboard_settings_reach_touch_widgets_only() {
    let text = Binding::new(String::new());
    let queue = MainQueue::new();
    let build = |family: WidgetFamily| {
        TextView::new(&text)
            .keyboard_type(KeyboardType::EmailAddress)
            .return_key_type(ReturnKeyType::Done)
            .autocapitalization(Autocapitalization::None)
            .enables_return_key_automatically(true)
            .widget_family(family)
    };

    let touch = build(WidgetFamily::Touch)
        .mount(&Environment::new(), &queue)
        .unwrap();
    headless(&touch, |widget| {
        let keyboard = widget.keyboard();
        assert_eq!(keyboard.keyboard_type, KeyboardType::EmailAddress);
        assert_eq!(keyboard.return_key_type, ReturnKeyType::Done);
        assert_eq!(keyboard.autocapitalization, Autocapitalization::None);
        assert!(keyboard.enables_return_key_automatically);
    });

    let desktop = build(WidgetFamily::Desktop)
        .mount(&Environment::new(), &queue)
        .unwrap();
    headless(&desktop, |widget| {
        assert_eq!(widget.keyboard(), &KeyboardSettings::default());
    });
}

struct Unavailable;

impl TextWidgetFactory for Unavailable {
    fn make_widget(
        &self,
        _family: WidgetFamily,
    ) -> scrivo_core::Result<Box<dyn NativeTextWidget>> {
        Err(ScrivoError::WidgetCreation("no window server".into()))
    }
}

#[test]
fn test_custom_factory_errors_surface_on_mount() {
    let text = Binding::new(String::new());
    let result = TextView::new(&text)
        .widget_factory(Arc::new(Unavailable))
        .mount(&Environment::new(), &MainQueue::new());
    assert!(matches!(result, Err(ScrivoError::WidgetCreation(_))));
}
