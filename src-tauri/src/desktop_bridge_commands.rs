use serde_json::Value;
use tauri::{AppHandle, Manager};

use crate::{
    api_client::ApiCollection,
    append_api_log, append_session_log, append_window_log,
    login_flow::{self, LoginOutcome},
    session_store::Session,
    window_actions,
    window_host::TauriWindowHost,
    window_registry::{ChildWindowOptions, WindowRequest},
    ApiBridgeResult, AtomicFlagGuard, BridgeResult, ShellContext,
};

fn parse_collection(raw: &str) -> Result<ApiCollection, String> {
    ApiCollection::from_path(raw).ok_or_else(|| format!("Unknown API collection '{}'.", raw.trim()))
}

fn parse_window_request(
    route: &str,
    title: Option<String>,
    options: Option<ChildWindowOptions>,
) -> Result<WindowRequest, String> {
    let route = route.trim();
    if !route.starts_with('/') || route.starts_with("//") {
        return Err(format!("Invalid window route '{route}'."));
    }

    let title = title
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| route.to_string());
    Ok(WindowRequest::new(route, title).with_options(options.unwrap_or_default()))
}

#[tauri::command]
pub(crate) fn desktop_bridge_is_desktop_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) fn desktop_bridge_get_session(app_handle: AppHandle) -> Option<Session> {
    app_handle.state::<ShellContext>().session.get_session()
}

/// The renderer authenticated on its own and hands the result to the shell.
#[tauri::command]
pub(crate) async fn desktop_bridge_report_login(
    app_handle: AppHandle,
    name: String,
    token: String,
) -> BridgeResult {
    let context = app_handle.state::<ShellContext>();
    let host = TauriWindowHost::new(&app_handle, &context.config);
    BridgeResult::from_result(
        login_flow::complete_login(&context, &host, &name, &token, append_session_log).map(|_| ()),
    )
}

#[tauri::command]
pub(crate) async fn desktop_bridge_sign_in(
    app_handle: AppHandle,
    username: String,
    password: String,
) -> BridgeResult {
    let context = app_handle.state::<ShellContext>();
    let Some(_guard) = AtomicFlagGuard::try_set(&context.is_signing_in) else {
        return BridgeResult::failed("Sign-in already in progress.");
    };

    let result = context.api.sign_in(username.trim(), &password).await;
    let host = TauriWindowHost::new(&app_handle, &context.config);
    match login_flow::apply_sign_in_result(&context, &host, result, append_session_log) {
        LoginOutcome::SignedIn(_) => BridgeResult::ok(),
        LoginOutcome::Rejected(reason) => BridgeResult::failed(reason),
    }
}

#[tauri::command]
pub(crate) async fn desktop_bridge_logout(app_handle: AppHandle) -> BridgeResult {
    let context = app_handle.state::<ShellContext>();
    let host = TauriWindowHost::new(&app_handle, &context.config);
    BridgeResult::from_result(login_flow::logout(&context, &host, append_session_log))
}

#[tauri::command]
pub(crate) async fn desktop_bridge_open_child_window(
    app_handle: AppHandle,
    route: String,
    title: Option<String>,
    options: Option<ChildWindowOptions>,
) -> BridgeResult {
    let context = app_handle.state::<ShellContext>();
    if !context.session.is_authenticated() {
        return BridgeResult::failed("No active session.");
    }

    let request = match parse_window_request(&route, title, options) {
        Ok(request) => request,
        Err(error) => return BridgeResult::failed(error),
    };
    let host = TauriWindowHost::new(&app_handle, &context.config);
    BridgeResult::from_result(
        window_actions::open_child_window(&context, &host, &request, append_window_log).map(|_| ()),
    )
}

#[tauri::command]
pub(crate) async fn desktop_bridge_api_list(
    app_handle: AppHandle,
    collection: String,
) -> ApiBridgeResult {
    let collection = match parse_collection(&collection) {
        Ok(collection) => collection,
        Err(error) => return ApiBridgeResult::failed(error),
    };
    let context = app_handle.state::<ShellContext>();
    ApiBridgeResult::from_api(context.api.list(collection).await)
}

#[tauri::command]
pub(crate) async fn desktop_bridge_api_create(
    app_handle: AppHandle,
    collection: String,
    body: Value,
) -> ApiBridgeResult {
    let collection = match parse_collection(&collection) {
        Ok(collection) => collection,
        Err(error) => return ApiBridgeResult::failed(error),
    };
    let context = app_handle.state::<ShellContext>();
    let result = context.api.create(collection, &body).await;
    if let Err(error) = &result {
        append_api_log(&format!("create in {} failed: {error}", collection.path()));
    }
    ApiBridgeResult::from_api(result)
}

#[tauri::command]
pub(crate) async fn desktop_bridge_api_update(
    app_handle: AppHandle,
    collection: String,
    id: String,
    body: Value,
) -> ApiBridgeResult {
    let collection = match parse_collection(&collection) {
        Ok(collection) => collection,
        Err(error) => return ApiBridgeResult::failed(error),
    };
    let context = app_handle.state::<ShellContext>();
    let result = context.api.update(collection, &id, &body).await;
    if let Err(error) = &result {
        append_api_log(&format!("update of {}/{id} failed: {error}", collection.path()));
    }
    ApiBridgeResult::from_api(result)
}

#[tauri::command]
pub(crate) async fn desktop_bridge_api_delete(
    app_handle: AppHandle,
    collection: String,
    id: String,
) -> ApiBridgeResult {
    let collection = match parse_collection(&collection) {
        Ok(collection) => collection,
        Err(error) => return ApiBridgeResult::failed(error),
    };
    let context = app_handle.state::<ShellContext>();
    let result = context.api.delete(collection, &id).await;
    if let Err(error) = &result {
        append_api_log(&format!("delete of {}/{id} failed: {error}", collection.path()));
    }
    ApiBridgeResult::from_api(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    #[test]
    fn parse_collection_accepts_known_paths_only() {
        assert_eq!(parse_collection(" usuarios "), Ok(ApiCollection::Users));
        assert!(parse_collection("produtos").is_err());
    }

    #[test]
    fn parse_window_request_defaults_title_to_route() {
        let request = parse_window_request("/relatorios", Some("  ".to_string()), None)
            .expect("valid request");
        assert_eq!(request.title, "/relatorios");
        assert_eq!(request.options, ChildWindowOptions::default());
    }

    #[test]
    fn parse_window_request_keeps_options() {
        let options = ChildWindowOptions::sized(500, 400).with_offset(Position::new(5, 5));
        let request = parse_window_request(
            "/cadastros/loja",
            Some("Loja".to_string()),
            Some(options),
        )
        .expect("valid request");
        assert_eq!(request.title, "Loja");
        assert_eq!(request.options, options);
    }

    #[test]
    fn parse_window_request_rejects_foreign_routes() {
        assert!(parse_window_request("https://evil.example.com", None, None).is_err());
        assert!(parse_window_request("//evil.example.com", None, None).is_err());
    }
}
