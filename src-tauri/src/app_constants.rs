pub(crate) const DEFAULT_API_URL: &str = "https://back-auditoria.onrender.com/";
pub(crate) const DEFAULT_RENDERER_URL: &str = "http://localhost:5123/";
pub(crate) const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;
pub(crate) const DEFAULT_SHELL_LOCALE: &str = "pt-BR";

pub(crate) const API_URL_ENV: &str = "AUDITORIA_API_URL";
pub(crate) const RENDERER_URL_ENV: &str = "AUDITORIA_RENDERER_URL";
pub(crate) const HTTP_TIMEOUT_ENV: &str = "AUDITORIA_HTTP_TIMEOUT_MS";
pub(crate) const DESKTOP_LOCALE_ENV: &str = "AUDITORIA_DESKTOP_LOCALE";
pub(crate) const DESKTOP_ROOT_ENV: &str = "AUDITORIA_DESKTOP_ROOT";

pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const LOGIN_WINDOW_LABEL: &str = "login";

pub(crate) const LOGIN_ROUTE: &str = "/login";
pub(crate) const DASHBOARD_ROUTE: &str = "/dashboard";
