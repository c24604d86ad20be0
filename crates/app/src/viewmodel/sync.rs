//! Remote sync status bindings
//!
//! Background fetches and uploads report through the controller's event
//! queue; a UI timer drains it and refreshes the window.

use std::sync::Arc;
use std::time::Duration;

use slint::{ComponentHandle, Timer, TimerMode};

use super::{render, Controller};
use crate::controller::{ControllerEvent, SyncOperation};
use crate::MainWindow;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn setup_sync_bindings(window: &MainWindow, controller: Arc<Controller>) {
    let controller_poll = controller.clone();
    let window_weak = window.as_weak();
    let timer = Timer::default();
    timer.start(TimerMode::Repeated, POLL_INTERVAL, move || {
        let Some(window) = window_weak.upgrade() else {
            return;
        };

        let mut needs_render = false;
        while let Some(event) = controller_poll.try_recv_event() {
            window.set_sync_status(status_line(&event).into());
            needs_render |= matches!(event, ControllerEvent::EntriesLoaded { .. });
        }
        if needs_render {
            render(&window, &controller_poll);
        }
    });
    // Keep timer alive
    std::mem::forget(timer);

    let window_weak = window.as_weak();
    window.on_refresh_requested(move || {
        if controller.refresh().is_some() {
            if let Some(w) = window_weak.upgrade() {
                w.set_sync_status("Refreshing…".into());
            }
        }
    });
}

/// Status text shown under the history for an event
fn status_line(event: &ControllerEvent) -> &'static str {
    match event {
        ControllerEvent::EntriesLoaded { .. } | ControllerEvent::EntryAppended { .. } => "",
        ControllerEvent::SyncFailed {
            operation: SyncOperation::Fetch,
            ..
        } => "Offline: couldn't load shared history",
        ControllerEvent::SyncFailed {
            operation: SyncOperation::Append,
            ..
        } => "Offline: your last entry is only on this device",
    }
}
