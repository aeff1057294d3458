use tauri::{
    menu::{AboutMetadata, IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu},
    AppHandle, Wry,
};

use crate::{
    append_desktop_log,
    menu_actions::{self, MenuGroup},
    shell_locale::{self, ShellTexts},
    DEFAULT_SHELL_LOCALE,
};

fn window_entry_items(
    app_handle: &AppHandle,
    group: MenuGroup,
    locale: &str,
) -> Result<Vec<MenuItem<Wry>>, String> {
    menu_actions::entries_in(group)
        .map(|entry| {
            MenuItem::with_id(
                app_handle,
                entry.id,
                entry.title_for(locale),
                true,
                entry.accelerator,
            )
            .map_err(|error| format!("Failed to create menu item {}: {error}", entry.id))
        })
        .collect()
}

fn submenu_of(
    app_handle: &AppHandle,
    label: &str,
    items: &[MenuItem<Wry>],
) -> Result<Submenu<Wry>, String> {
    let refs: Vec<&dyn IsMenuItem<Wry>> = items
        .iter()
        .map(|item| item as &dyn IsMenuItem<Wry>)
        .collect();
    Submenu::with_items(app_handle, label, true, &refs)
        .map_err(|error| format!("Failed to build {label} menu: {error}"))
}

fn file_submenu(
    app_handle: &AppHandle,
    texts: &ShellTexts,
    locale: &str,
) -> Result<Submenu<Wry>, String> {
    let items = window_entry_items(app_handle, MenuGroup::File, locale)?;
    if let Some(new_window) = items.first() {
        new_window
            .set_text(texts.new_window)
            .map_err(|error| format!("Failed to label new window menu item: {error}"))?;
    }
    let quit_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_QUIT,
        texts.quit,
        true,
        Some("CmdOrCtrl+Q"),
    )
    .map_err(|error| format!("Failed to create quit menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create menu separator: {error}"))?;

    let mut refs: Vec<&dyn IsMenuItem<Wry>> = items
        .iter()
        .map(|item| item as &dyn IsMenuItem<Wry>)
        .collect();
    refs.push(&separator);
    refs.push(&quit_item);
    Submenu::with_items(app_handle, texts.menu_file, true, &refs)
        .map_err(|error| format!("Failed to build file menu: {error}"))
}

fn edit_submenu(app_handle: &AppHandle, texts: &ShellTexts) -> Result<Submenu<Wry>, String> {
    let map_error = |error: tauri::Error| format!("Failed to build edit menu: {error}");
    Submenu::with_items(
        app_handle,
        texts.menu_edit,
        true,
        &[
            &PredefinedMenuItem::undo(app_handle, Some(texts.undo)).map_err(map_error)?,
            &PredefinedMenuItem::redo(app_handle, Some(texts.redo)).map_err(map_error)?,
            &PredefinedMenuItem::separator(app_handle).map_err(map_error)?,
            &PredefinedMenuItem::cut(app_handle, Some(texts.cut)).map_err(map_error)?,
            &PredefinedMenuItem::copy(app_handle, Some(texts.copy)).map_err(map_error)?,
            &PredefinedMenuItem::paste(app_handle, Some(texts.paste)).map_err(map_error)?,
            &PredefinedMenuItem::select_all(app_handle, Some(texts.select_all))
                .map_err(map_error)?,
        ],
    )
    .map_err(map_error)
}

fn view_submenu(app_handle: &AppHandle, texts: &ShellTexts) -> Result<Submenu<Wry>, String> {
    let map_error = |error: tauri::Error| format!("Failed to build view menu: {error}");
    let item = |id: &str, text: &str, accelerator: &str| {
        MenuItem::with_id(app_handle, id, text, true, Some(accelerator)).map_err(map_error)
    };
    Submenu::with_items(
        app_handle,
        texts.menu_view,
        true,
        &[
            &item(menu_actions::MENU_RELOAD, texts.reload, "CmdOrCtrl+R")?,
            &item(
                menu_actions::MENU_FORCE_RELOAD,
                texts.force_reload,
                "CmdOrCtrl+Shift+R",
            )?,
            &PredefinedMenuItem::separator(app_handle).map_err(map_error)?,
            &item(menu_actions::MENU_ZOOM_RESET, texts.reset_zoom, "CmdOrCtrl+0")?,
            &item(menu_actions::MENU_ZOOM_IN, texts.zoom_in, "CmdOrCtrl+=")?,
            &item(menu_actions::MENU_ZOOM_OUT, texts.zoom_out, "CmdOrCtrl+-")?,
            &PredefinedMenuItem::separator(app_handle).map_err(map_error)?,
            &PredefinedMenuItem::fullscreen(app_handle, Some(texts.fullscreen))
                .map_err(map_error)?,
        ],
    )
    .map_err(map_error)
}

fn window_submenu(app_handle: &AppHandle, texts: &ShellTexts) -> Result<Submenu<Wry>, String> {
    let map_error = |error: tauri::Error| format!("Failed to build window menu: {error}");
    Submenu::with_items(
        app_handle,
        texts.menu_window,
        true,
        &[
            &PredefinedMenuItem::minimize(app_handle, Some(texts.minimize)).map_err(map_error)?,
            &PredefinedMenuItem::close_window(app_handle, Some(texts.close_window))
                .map_err(map_error)?,
        ],
    )
    .map_err(map_error)
}

fn help_submenu(app_handle: &AppHandle, texts: &ShellTexts) -> Result<Submenu<Wry>, String> {
    let map_error = |error: tauri::Error| format!("Failed to build help menu: {error}");
    let package_info = app_handle.package_info();
    let metadata = AboutMetadata {
        name: Some(package_info.name.clone()),
        version: Some(package_info.version.to_string()),
        ..Default::default()
    };
    Submenu::with_items(
        app_handle,
        texts.menu_help,
        true,
        &[&PredefinedMenuItem::about(app_handle, Some(texts.about), Some(metadata))
            .map_err(map_error)?],
    )
    .map_err(map_error)
}

pub(crate) fn build_app_menu(app_handle: &AppHandle) -> Result<Menu<Wry>, String> {
    let locale = shell_locale::resolve_shell_locale(DEFAULT_SHELL_LOCALE);
    let texts = shell_locale::shell_texts_for_locale(locale);

    let file = file_submenu(app_handle, &texts, locale)?;
    let registrations = submenu_of(
        app_handle,
        texts.menu_registrations,
        &window_entry_items(app_handle, MenuGroup::Registrations, locale)?,
    )?;
    let audit = submenu_of(
        app_handle,
        texts.menu_audit,
        &window_entry_items(app_handle, MenuGroup::Audit, locale)?,
    )?;
    let reports = submenu_of(
        app_handle,
        texts.menu_reports,
        &window_entry_items(app_handle, MenuGroup::Reports, locale)?,
    )?;
    let edit = edit_submenu(app_handle, &texts)?;
    let view = view_submenu(app_handle, &texts)?;
    let window = window_submenu(app_handle, &texts)?;
    let help = help_submenu(app_handle, &texts)?;

    Menu::with_items(
        app_handle,
        &[
            &file,
            &registrations,
            &audit,
            &reports,
            &edit,
            &view,
            &window,
            &help,
        ],
    )
    .map_err(|error| format!("Failed to build application menu: {error}"))
}

/// Installs the application menu on the primary window (app-wide on macOS).
pub(crate) fn setup_app_menu(app_handle: &AppHandle) -> Result<(), String> {
    let menu = build_app_menu(app_handle)?;

    #[cfg(target_os = "macos")]
    {
        app_handle
            .set_menu(menu)
            .map_err(|error| format!("Failed to install application menu: {error}"))?;
    }

    #[cfg(not(target_os = "macos"))]
    {
        use tauri::Manager;

        let Some(window) = app_handle.get_webview_window(crate::MAIN_WINDOW_LABEL) else {
            return Err("Primary window is not open; menu not installed.".to_string());
        };
        window
            .set_menu(menu)
            .map_err(|error| format!("Failed to install application menu: {error}"))?;
    }

    append_desktop_log("application menu installed");
    Ok(())
}
