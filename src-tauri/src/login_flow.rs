use crate::{
    api_client::{ApiError, SignInResponse},
    session_store::Session,
    window_actions,
    window_host::{WindowHost, WindowSpec},
    ShellContext, LOGIN_WINDOW_LABEL, MAIN_WINDOW_LABEL,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoginOutcome {
    SignedIn(Session),
    Rejected(String),
}

pub(crate) fn open_login_window<H, F>(host: &H, log: F) -> Result<(), String>
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    if host.window_bounds(LOGIN_WINDOW_LABEL).is_some() {
        return host.focus_window(LOGIN_WINDOW_LABEL);
    }

    host.create_window(&WindowSpec::login()).inspect_err(|error| {
        log(&format!("failed to open login window: {error}"));
    })
}

fn show_primary_window<H, F>(host: &H, log: &F) -> Result<(), String>
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    if host.window_bounds(MAIN_WINDOW_LABEL).is_some() {
        return host.focus_window(MAIN_WINDOW_LABEL);
    }

    host.create_window(&WindowSpec::primary())?;
    if let Err(error) = host.install_app_menu() {
        log(&format!("failed to install application menu: {error}"));
    }
    Ok(())
}

/// Stores the session and swaps the login window for the primary window.
///
/// The primary window is created before the login window closes so the
/// process never runs without a window. On failure the session that was
/// current before the call is put back.
pub(crate) fn complete_login<H, F>(
    context: &ShellContext,
    host: &H,
    display_name: &str,
    token: &str,
    log: F,
) -> Result<Session, String>
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    if token.trim().is_empty() {
        return Err("Login response did not include a token.".to_string());
    }

    let previous = context
        .session
        .replace_session(Some(Session::new(display_name.trim(), token.trim())));
    if let Err(error) = show_primary_window(host, &log) {
        log(&format!("failed to open primary window after login: {error}"));
        context.session.replace_session(previous);
        return Err(error);
    }

    if host.window_bounds(LOGIN_WINDOW_LABEL).is_some() {
        if let Err(error) = host.close_window(LOGIN_WINDOW_LABEL) {
            log(&format!("failed to close login window: {error}"));
        }
    }

    let session = context
        .session
        .get_session()
        .ok_or_else(|| "Session was cleared during login.".to_string())?;
    log(&format!("user '{}' signed in", session.display_name));
    Ok(session)
}

/// Applies the remote sign-in result. A rejected login never touches the
/// session or the login window.
pub(crate) fn apply_sign_in_result<H, F>(
    context: &ShellContext,
    host: &H,
    result: Result<SignInResponse, ApiError>,
    log: F,
) -> LoginOutcome
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    match result {
        Ok(response) => {
            match complete_login(context, host, &response.user.name, &response.token, &log) {
                Ok(session) => LoginOutcome::SignedIn(session),
                Err(error) => LoginOutcome::Rejected(error),
            }
        }
        Err(error) => {
            log(&format!("sign-in rejected: {error}"));
            LoginOutcome::Rejected(error.to_string())
        }
    }
}

/// Clears the session, tears down every shell window and returns to login.
pub(crate) fn logout<H, F>(context: &ShellContext, host: &H, log: F) -> Result<(), String>
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    if let Some(session) = context.session.clear_session() {
        log(&format!("user '{}' signed out", session.display_name));
    }

    open_login_window(host, &log)?;
    window_actions::close_all_children(context, host, &log);
    if host.window_bounds(MAIN_WINDOW_LABEL).is_some() {
        host.close_window(MAIN_WINDOW_LABEL)?;
    }
    Ok(())
}
