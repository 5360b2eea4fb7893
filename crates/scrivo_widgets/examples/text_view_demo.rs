//! Text View Demo
//!
//! Mounts a notes field on an in-memory widget, simulates a short editing
//! session and logs what the text view does along the way.
//!
//! Run with:
//! `RUST_LOG=scrivo_widgets=trace cargo run -p scrivo_widgets --example text_view_demo`

use scrivo_core::{Binding, EdgeInsets, Environment, Font, MainQueue, Result, SemanticColor};
use scrivo_widgets::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let notes = Binding::new(String::new());
    let queue = MainQueue::new();
    let env = Environment::new().with_paragraph_spacing(4.0);

    let committed = notes.clone();
    let view = TextView::with_placeholder("What's on your mind?", &notes)
        .font(Font::system(15.0))
        .foreground_color(SemanticColor::Primary)
        .text_container_inset(EdgeInsets::symmetric(5.0, 8.0))
        .return_key_type(ReturnKeyType::Done)
        .dismiss_keyboard_on_return(true)
        .first_responder(true)
        .on_editing_changed(|editing| tracing::info!("editing: {}", editing))
        .on_commit(move || tracing::info!("committed {:?}", committed.get()));

    let mut mounted = view.mount(&env, &queue)?;
    report(&mounted);

    // Focus lands on the next main-queue iteration
    queue.run_next_iteration();

    mounted.adapter().with_widget_as::<HeadlessTextWidget, _>(|widget| {
        widget.insert_text("Pick up groceries");
        widget.insert_text("\n");
    });

    // Re-render after the binding changed, as a host framework would
    mounted.update(&view, &env);
    report(&mounted);

    let view = view.first_responder(false);
    mounted.update(&view, &env);
    queue.run_until_idle(8);

    tracing::info!("final text: {:?}", notes.get());
    mounted.unmount();
    Ok(())
}

fn report(mounted: &MountedTextView) {
    if let Some(label) = mounted.placeholder() {
        tracing::info!(
            "placeholder {:?} visible={}",
            label.text,
            label.is_visible
        );
    }
}
