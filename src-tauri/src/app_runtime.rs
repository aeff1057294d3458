use tauri::{AppHandle, Manager, RunEvent, Window, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log, append_window_log, login_flow, menu_handler,
    shell_config::ShellConfig,
    window_actions,
    window_host::{TauriWindowHost, WindowHost},
    window_registry, ShellContext, DESKTOP_LOG_FILE, LOGIN_WINDOW_LABEL, MAIN_WINDOW_LABEL,
};

fn handle_window_event(window: &Window, event: &WindowEvent) {
    let app_handle = window.app_handle();
    let Some(context) = app_handle.try_state::<ShellContext>() else {
        return;
    };
    let host = TauriWindowHost::new(app_handle, &context.config);
    let label = window.label();

    if let WindowEvent::Destroyed = event {
        if let Ok(mut levels) = context.zoom_levels.lock() {
            levels.forget(label);
        }
    }

    if label == MAIN_WINDOW_LABEL {
        match event {
            WindowEvent::Moved(_) => {
                window_actions::handle_primary_moved(&context, &host, append_window_log)
            }
            WindowEvent::Resized(_) => {
                window_actions::handle_primary_resized(&context, &host, append_window_log)
            }
            WindowEvent::Destroyed => {
                append_window_log("primary window destroyed, closing child windows");
                window_actions::close_all_children(&context, &host, append_window_log);
            }
            _ => {}
        }
        return;
    }

    if !window_registry::is_child_window_label(label) {
        return;
    }
    match event {
        WindowEvent::Moved(_) => {
            window_actions::handle_child_moved(&context, &host, label, append_window_log)
        }
        WindowEvent::Resized(_) => {
            window_actions::handle_child_resized(&context, &host, label, append_window_log)
        }
        WindowEvent::Destroyed => {
            window_actions::handle_child_destroyed(&context, label, append_window_log)
        }
        _ => {}
    }
}

fn focus_existing_window(app_handle: &AppHandle) {
    let Some(context) = app_handle.try_state::<ShellContext>() else {
        return;
    };
    let host = TauriWindowHost::new(app_handle, &context.config);
    let label = if context.session.is_authenticated() {
        MAIN_WINDOW_LABEL
    } else {
        LOGIN_WINDOW_LABEL
    };

    if let Err(error) = host.focus_window(label) {
        append_desktop_log(&format!("second instance focus failed: {error}"));
    }
}

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        crate::logging::resolve_desktop_log_path(
            crate::runtime_paths::default_desktop_root_dir(),
            DESKTOP_LOG_FILE,
        )
        .display()
    ));

    let config = ShellConfig::from_env();
    append_startup_log(&format!(
        "api base url: {}; renderer url: {}",
        config.api_base_url, config.renderer_base_url
    ));
    let context = match ShellContext::new(config) {
        Ok(context) => context,
        Err(error) => {
            append_startup_log(&format!("failed to initialize shell context: {error}"));
            eprintln!("Auditoria startup failed: {error}");
            std::process::exit(1);
        }
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            focus_existing_window(app);
        }))
        .manage(context)
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::desktop_bridge_is_desktop_runtime,
            crate::desktop_bridge_commands::desktop_bridge_get_session,
            crate::desktop_bridge_commands::desktop_bridge_report_login,
            crate::desktop_bridge_commands::desktop_bridge_sign_in,
            crate::desktop_bridge_commands::desktop_bridge_logout,
            crate::desktop_bridge_commands::desktop_bridge_open_child_window,
            crate::desktop_bridge_commands::desktop_bridge_api_list,
            crate::desktop_bridge_commands::desktop_bridge_api_create,
            crate::desktop_bridge_commands::desktop_bridge_api_update,
            crate::desktop_bridge_commands::desktop_bridge_api_delete,
        ])
        .on_window_event(handle_window_event)
        .on_menu_event(|app_handle, event| {
            menu_handler::handle_menu_event(app_handle, event.id().as_ref())
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            let context = app_handle.state::<ShellContext>();
            let host = TauriWindowHost::new(&app_handle, &context.config);
            if let Err(error) = login_flow::open_login_window(&host, append_startup_log) {
                append_startup_log(&format!("failed to open login window: {error}"));
                return Err(error.into());
            }
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                if let Some(context) = app_handle.try_state::<ShellContext>() {
                    context.session.clear_session();
                }
                append_desktop_log("desktop process exiting");
            }
        });
}
