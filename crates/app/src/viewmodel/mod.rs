//! View model bindings for Slint UI

mod moods;
mod session;
mod sync;

use std::sync::Arc;

use moodlog_core::{Database, Screen};

use crate::controller::MoodController;
use crate::MainWindow;

pub type Controller = MoodController<Database>;

pub fn setup_bindings(window: &MainWindow, controller: Arc<Controller>) {
    session::setup_session_bindings(window, controller.clone());
    moods::setup_mood_bindings(window, controller.clone());
    sync::setup_sync_bindings(window, controller);
}

/// Push the controller's current state into the window
pub fn render(window: &MainWindow, controller: &Controller) {
    let session = controller.snapshot();

    window.set_screen(screen_name(session.screen()).into());
    window.set_dark_mode(session.preferences.dark_mode);
    window.set_user_name(session.preferences.display_name().into());
    window.set_can_submit(!session.selection.is_empty());
    window.set_synced(controller.is_synced());

    // Only overwrite the draft when it changed underneath the editor
    if window.get_note_draft().as_str() != session.note {
        window.set_note_draft(session.note.as_str().into());
    }

    moods::render_session(window, &session);
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::Loading => "loading",
        Screen::Onboarding => "onboarding",
        Screen::NameEntry => "name",
        Screen::Main => "main",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_names_match_ui() {
        assert_eq!(screen_name(Screen::Loading), "loading");
        assert_eq!(screen_name(Screen::Onboarding), "onboarding");
        assert_eq!(screen_name(Screen::NameEntry), "name");
        assert_eq!(screen_name(Screen::Main), "main");
    }
}
