use tauri::{AppHandle, Manager, WebviewWindow};
use url::Url;

use crate::{
    append_desktop_log, append_window_log,
    menu_actions::{self, MenuAction},
    shell_locale, window_actions,
    window_host::{TauriWindowHost, WindowHost},
    window_registry::WindowRequest,
    window_zoom::ZoomChange,
    ShellContext, DEFAULT_SHELL_LOCALE,
};

const FORCE_RELOAD_QUERY_KEY: &str = "_reload";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOpenDecision {
    IgnoreBecauseSignedOut,
    Open,
}

fn decide_menu_open(authenticated: bool) -> MenuOpenDecision {
    if authenticated {
        MenuOpenDecision::Open
    } else {
        MenuOpenDecision::IgnoreBecauseSignedOut
    }
}

fn focused_window(app_handle: &AppHandle, action: &str) -> Option<WebviewWindow> {
    let focused = app_handle
        .webview_windows()
        .into_values()
        .find(|window| window.is_focused().unwrap_or(false));
    if focused.is_none() {
        append_desktop_log(&format!("{action} skipped: no focused window"));
    }
    focused
}

fn reload_focused_window(app_handle: &AppHandle) {
    let Some(window) = focused_window(app_handle, "reload") else {
        return;
    };

    if let Err(error) = window.eval("window.location.reload()") {
        append_desktop_log(&format!(
            "failed to reload window '{}': {error}",
            window.label()
        ));
    }
}

/// Same page with a fresh `_reload` query value, so the document bypasses
/// the webview cache. Other query pairs and the fragment are kept.
fn force_reload_url(current: &Url, stamp: i64) -> Url {
    let kept: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(key, _)| key != FORCE_RELOAD_QUERY_KEY)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = current.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(FORCE_RELOAD_QUERY_KEY, &stamp.to_string());
    url
}

fn force_reload_focused_window(app_handle: &AppHandle) {
    let Some(window) = focused_window(app_handle, "force reload") else {
        return;
    };

    let stamp = chrono::Utc::now().timestamp_millis();
    let result = window
        .url()
        .and_then(|url| window.navigate(force_reload_url(&url, stamp)));
    if let Err(error) = result {
        append_desktop_log(&format!(
            "failed to force reload window '{}': {error}",
            window.label()
        ));
    }
}

fn zoom_focused_window(app_handle: &AppHandle, change: ZoomChange) {
    let Some(window) = focused_window(app_handle, "zoom") else {
        return;
    };
    let context = app_handle.state::<ShellContext>();
    let factor = match context.zoom_levels.lock() {
        Ok(mut levels) => levels.apply(window.label(), change),
        Err(_) => {
            append_desktop_log("zoom skipped: zoom state lock poisoned");
            return;
        }
    };

    if let Err(error) = window.set_zoom(factor) {
        append_desktop_log(&format!(
            "failed to zoom window '{}': {error}",
            window.label()
        ));
    }
}

fn open_menu_window<H, F>(
    context: &ShellContext,
    host: &H,
    menu_id: &str,
    request: &WindowRequest,
    log: F,
) where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    if let Err(error) = window_actions::open_child_window(context, host, request, &log) {
        log(&format!("menu {menu_id} could not open a window: {error}"));
    }
}

pub fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match menu_actions::action_from_menu_id(menu_id) {
        Some(MenuAction::OpenWindow(entry)) => {
            let context = app_handle.state::<ShellContext>();
            match decide_menu_open(context.session.is_authenticated()) {
                MenuOpenDecision::IgnoreBecauseSignedOut => {
                    append_window_log(&format!("menu {} ignored: no active session", entry.id));
                    return;
                }
                MenuOpenDecision::Open => {}
            }

            let request =
                entry.window_request(shell_locale::resolve_shell_locale(DEFAULT_SHELL_LOCALE));
            // Window creation from an event handler must leave the event loop thread.
            let app_handle_cloned = app_handle.clone();
            let menu_id = entry.id;
            tauri::async_runtime::spawn(async move {
                let context = app_handle_cloned.state::<ShellContext>();
                let host = TauriWindowHost::new(&app_handle_cloned, &context.config);
                open_menu_window(&context, &host, menu_id, &request, append_window_log);
            });
        }
        Some(MenuAction::ReloadFocusedWindow) => reload_focused_window(app_handle),
        Some(MenuAction::ForceReloadFocusedWindow) => force_reload_focused_window(app_handle),
        Some(MenuAction::ZoomFocusedWindow(change)) => zoom_focused_window(app_handle, change),
        Some(MenuAction::Quit) => {
            append_desktop_log("menu quit requested, exiting desktop process");
            app_handle.exit(0);
        }
        None => {}
    }
}
