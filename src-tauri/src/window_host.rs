use tauri::{AppHandle, Manager, PhysicalPosition, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{
    geometry::{Position, Rect, Size},
    menu_setup,
    shell_config::ShellConfig,
    window_registry::PendingChild,
    DASHBOARD_ROUTE, LOGIN_ROUTE, LOGIN_WINDOW_LABEL, MAIN_WINDOW_LABEL,
};

pub(crate) const LOGIN_WINDOW_SIZE: Size = Size::new(400, 400);
pub(crate) const MAIN_WINDOW_SIZE: Size = Size::new(1280, 800);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSpec {
    pub(crate) label: String,
    pub(crate) route: String,
    pub(crate) title: String,
    pub(crate) size: Size,
    pub(crate) resizable: bool,
    pub(crate) position: Option<Position>,
    pub(crate) parent: Option<&'static str>,
    pub(crate) maximized: bool,
}

impl WindowSpec {
    pub(crate) fn login() -> Self {
        Self {
            label: LOGIN_WINDOW_LABEL.to_string(),
            route: LOGIN_ROUTE.to_string(),
            title: "Login".to_string(),
            size: LOGIN_WINDOW_SIZE,
            resizable: false,
            position: None,
            parent: None,
            maximized: false,
        }
    }

    pub(crate) fn primary() -> Self {
        Self {
            label: MAIN_WINDOW_LABEL.to_string(),
            route: DASHBOARD_ROUTE.to_string(),
            title: "Auditoria".to_string(),
            size: MAIN_WINDOW_SIZE,
            resizable: true,
            position: None,
            parent: None,
            maximized: true,
        }
    }

    pub(crate) fn child(pending: &PendingChild) -> Self {
        Self {
            label: pending.window.id.clone(),
            route: pending.window.route.clone(),
            title: pending.window.title.clone(),
            size: pending.window.size,
            resizable: pending.window.resizable,
            position: pending.position,
            parent: pending.position.map(|_| MAIN_WINDOW_LABEL),
            maximized: false,
        }
    }
}

/// The windowing operations the shell needs, kept narrow so window
/// bookkeeping can run against an in-memory host in tests.
pub(crate) trait WindowHost {
    fn create_window(&self, spec: &WindowSpec) -> Result<(), String>;
    fn window_bounds(&self, label: &str) -> Option<Rect>;
    fn set_window_position(&self, label: &str, position: Position) -> Result<(), String>;
    fn close_window(&self, label: &str) -> Result<(), String>;
    fn focus_window(&self, label: &str) -> Result<(), String>;
    fn install_app_menu(&self) -> Result<(), String>;
}

pub(crate) struct TauriWindowHost<'a> {
    app_handle: &'a AppHandle,
    config: &'a ShellConfig,
}

impl<'a> TauriWindowHost<'a> {
    pub(crate) fn new(app_handle: &'a AppHandle, config: &'a ShellConfig) -> Self {
        Self { app_handle, config }
    }

    fn window(&self, label: &str) -> Result<WebviewWindow, String> {
        self.app_handle
            .get_webview_window(label)
            .ok_or_else(|| format!("Window '{label}' is not open."))
    }
}

impl WindowHost for TauriWindowHost<'_> {
    fn create_window(&self, spec: &WindowSpec) -> Result<(), String> {
        let url = WebviewUrl::External(self.config.route_url(&spec.route)?);
        let mut builder = WebviewWindowBuilder::new(self.app_handle, spec.label.as_str(), url)
            .title(spec.title.as_str())
            .inner_size(f64::from(spec.size.width), f64::from(spec.size.height))
            .resizable(spec.resizable)
            .maximized(spec.maximized);

        if let Some(parent_label) = spec.parent {
            if let Some(parent) = self.app_handle.get_webview_window(parent_label) {
                builder = builder.parent(&parent).map_err(|error| {
                    format!("Failed to attach window '{}' to '{parent_label}': {error}", spec.label)
                })?;
            }
        }

        let window = builder
            .build()
            .map_err(|error| format!("Failed to create window '{}': {error}", spec.label))?;

        if let Some(position) = spec.position {
            window
                .set_position(PhysicalPosition::new(position.x, position.y))
                .map_err(|error| format!("Failed to position window '{}': {error}", spec.label))?;
        }
        Ok(())
    }

    fn window_bounds(&self, label: &str) -> Option<Rect> {
        let window = self.app_handle.get_webview_window(label)?;
        let position = window.outer_position().ok()?;
        let size = window.outer_size().ok()?;
        Some(Rect::new(position.x, position.y, size.width, size.height))
    }

    fn set_window_position(&self, label: &str, position: Position) -> Result<(), String> {
        self.window(label)?
            .set_position(PhysicalPosition::new(position.x, position.y))
            .map_err(|error| format!("Failed to move window '{label}': {error}"))
    }

    fn close_window(&self, label: &str) -> Result<(), String> {
        self.window(label)?
            .close()
            .map_err(|error| format!("Failed to close window '{label}': {error}"))
    }

    fn focus_window(&self, label: &str) -> Result<(), String> {
        let window = self.window(label)?;
        if let Ok(true) = window.is_minimized() {
            if let Err(error) = window.unminimize() {
                crate::append_window_log(&format!(
                    "failed to unminimize window '{label}': {error}"
                ));
            }
        }
        window
            .set_focus()
            .map_err(|error| format!("Failed to focus window '{label}': {error}"))
    }

    fn install_app_menu(&self) -> Result<(), String> {
        menu_setup::setup_app_menu(self.app_handle)
    }
}
