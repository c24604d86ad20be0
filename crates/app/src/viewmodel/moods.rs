//! Mood picker and history view model

use std::rc::Rc;
use std::sync::Arc;

use moodlog_core::{MoodEntry, MoodLabel, SessionState};
use slint::{ComponentHandle, ModelRc, VecModel};

use super::{render, Controller};
use crate::{EntryItem, MainWindow, MoodItem};

pub fn setup_mood_bindings(window: &MainWindow, controller: Arc<Controller>) {
    let controller_toggle = controller.clone();
    let window_weak = window.as_weak();
    window.on_toggle_mood(move |index| {
        let Some(label) = usize::try_from(index).ok().and_then(MoodLabel::from_index) else {
            tracing::warn!(index, "Ignoring toggle for unknown mood");
            return;
        };
        controller_toggle.toggle_mood_selection(label);
        if let Some(w) = window_weak.upgrade() {
            render(&w, &controller_toggle);
        }
    });

    let controller_note = controller.clone();
    window.on_note_edited(move |text| {
        controller_note.set_note(&text);
    });

    let controller_submit = controller;
    let window_weak = window.as_weak();
    window.on_submit_entry(move || {
        if controller_submit.submit_entry().is_none() {
            return;
        }
        if let Some(w) = window_weak.upgrade() {
            render(&w, &controller_submit);
        }
    });
}

pub fn render_session(window: &MainWindow, session: &SessionState) {
    window.set_moods(ModelRc::from(Rc::new(VecModel::from(mood_items(session)))));
    window.set_entries(ModelRc::from(Rc::new(VecModel::from(entry_items(
        &session.entries,
    )))));
}

fn mood_items(session: &SessionState) -> Vec<MoodItem> {
    MoodLabel::ALL
        .iter()
        .map(|label| MoodItem {
            label: label.name().into(),
            glyph: label.glyph().into(),
            selected: session.selection.contains(*label),
        })
        .collect()
}

fn entry_items(entries: &[MoodEntry]) -> Vec<EntryItem> {
    entries
        .iter()
        .map(|e| EntryItem {
            id: e.id.as_str().into(),
            author: e.author.as_str().into(),
            moods: e.moods.display().into(),
            note: e.note.as_deref().unwrap_or_default().into(),
            date: e.date.as_str().into(),
        })
        .collect()
}
