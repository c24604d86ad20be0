//! Onboarding, name entry, theme, and reset bindings

use std::sync::Arc;

use slint::ComponentHandle;

use super::{render, Controller};
use crate::MainWindow;

pub fn setup_session_bindings(window: &MainWindow, controller: Arc<Controller>) {
    let controller_onboard = controller.clone();
    let window_weak = window.as_weak();
    window.on_complete_onboarding(move || {
        controller_onboard.complete_onboarding();
        if let Some(w) = window_weak.upgrade() {
            render(&w, &controller_onboard);
        }
    });

    let controller_name = controller.clone();
    let window_weak = window.as_weak();
    window.on_submit_name(move |name| {
        if !controller_name.set_user_name(&name) {
            return;
        }
        if let Some(w) = window_weak.upgrade() {
            render(&w, &controller_name);
        }
    });

    let controller_theme = controller.clone();
    let window_weak = window.as_weak();
    window.on_dark_mode_toggled(move |enabled| {
        // Write completes in the background
        drop(controller_theme.set_dark_mode(enabled));
        if let Some(w) = window_weak.upgrade() {
            render(&w, &controller_theme);
        }
    });

    let controller_reset = controller;
    let window_weak = window.as_weak();
    window.on_reset_confirmed(move || {
        controller_reset.reset();
        // Start over exactly like a fresh launch, including the history fetch
        drop(controller_reset.initialize());
        if let Some(w) = window_weak.upgrade() {
            w.set_sync_status("".into());
            render(&w, &controller_reset);
        }
    });
}
