#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api_client;
mod app_constants;
mod app_runtime;
mod app_types;
mod desktop_bridge_commands;
mod geometry;
mod logging;
mod login_flow;
mod menu_actions;
mod menu_handler;
mod menu_setup;
mod runtime_paths;
mod session_store;
mod shell_config;
mod shell_locale;
mod window_actions;
mod window_host;
mod window_registry;
mod window_zoom;

pub(crate) use app_constants::*;
pub(crate) use app_types::{ApiBridgeResult, AtomicFlagGuard, BridgeResult, ShellContext};
pub(crate) use logging::{
    append_api_log, append_desktop_log, append_session_log, append_startup_log, append_window_log,
};

fn main() {
    app_runtime::run();
}
