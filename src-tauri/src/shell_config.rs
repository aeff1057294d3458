use std::{env, time::Duration};

use url::Url;

use crate::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_RENDERER_URL,
    HTTP_TIMEOUT_ENV, RENDERER_URL_ENV,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShellConfig {
    pub(crate) api_base_url: Url,
    pub(crate) renderer_base_url: Url,
    pub(crate) http_timeout: Duration,
}

impl ShellConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_values(
            env::var(API_URL_ENV).ok().as_deref(),
            env::var(RENDERER_URL_ENV).ok().as_deref(),
            env::var(HTTP_TIMEOUT_ENV).ok().as_deref(),
        )
    }

    pub(crate) fn from_values(
        api_url: Option<&str>,
        renderer_url: Option<&str>,
        http_timeout_ms: Option<&str>,
    ) -> Self {
        Self {
            api_base_url: normalize_base_url(api_url.unwrap_or(DEFAULT_API_URL), DEFAULT_API_URL),
            renderer_base_url: normalize_base_url(
                renderer_url.unwrap_or(DEFAULT_RENDERER_URL),
                DEFAULT_RENDERER_URL,
            ),
            http_timeout: parse_timeout(http_timeout_ms),
        }
    }

    pub(crate) fn route_url(&self, route: &str) -> Result<Url, String> {
        resolve_route_url(&self.renderer_base_url, route)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

fn parse_default_url(default_url: &str) -> Url {
    // Defaults are compile-time constants with a trailing slash.
    Url::parse(default_url).unwrap_or_else(|_| {
        Url::parse("http://localhost/").expect("static fallback url is valid")
    })
}

/// Parses an http(s) base URL, forcing a trailing slash so relative joins keep
/// any path prefix.
pub(crate) fn normalize_base_url(raw: &str, default_url: &str) -> Url {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return parse_default_url(default_url);
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if !parsed.path().ends_with('/') {
                let path = format!("{}/", parsed.path());
                parsed.set_path(&path);
            }
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed
        }
        _ => parse_default_url(default_url),
    }
}

pub(crate) fn resolve_route_url(base: &Url, route: &str) -> Result<Url, String> {
    let route = route.trim();
    if !route.starts_with('/') || route.starts_with("//") {
        return Err(format!("Invalid window route '{route}': routes must start with a single '/'."));
    }

    base.join(route.trim_start_matches('/'))
        .map_err(|error| format!("Invalid window route '{route}': {error}"))
}

fn parse_timeout(raw: Option<&str>) -> Duration {
    let millis = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_MS);
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;

    #[test]
    fn defaults_point_at_remote_api_and_local_renderer() {
        let config = ShellConfig::default();
        assert_eq!(config.api_base_url.as_str(), "https://back-auditoria.onrender.com/");
        assert_eq!(config.renderer_base_url.as_str(), "http://localhost:5123/");
        assert_eq!(config.http_timeout, Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS));
    }

    #[test]
    fn normalize_base_url_adds_trailing_slash_and_drops_query() {
        let url = normalize_base_url(" https://api.example.com/v1?x=1 ", DEFAULT_API_URL);
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
    }

    #[test]
    fn normalize_base_url_rejects_unsupported_schemes() {
        assert_eq!(
            normalize_base_url("file:///etc/passwd", DEFAULT_RENDERER_URL).as_str(),
            "http://localhost:5123/"
        );
        assert_eq!(
            normalize_base_url("not a url", DEFAULT_RENDERER_URL).as_str(),
            "http://localhost:5123/"
        );
    }

    #[test]
    fn resolve_route_url_keeps_base_path_prefix() {
        let base = Url::parse("http://localhost:5123/app/").expect("valid base");
        let url = resolve_route_url(&base, "/cadastros/categoria").expect("route resolves");
        assert_eq!(url.as_str(), "http://localhost:5123/app/cadastros/categoria");
    }

    #[test]
    fn resolve_route_url_rejects_relative_and_protocol_relative_routes() {
        let base = Url::parse("http://localhost:5123/").expect("valid base");
        assert!(resolve_route_url(&base, "cadastros").is_err());
        assert!(resolve_route_url(&base, "//evil.example.com/x").is_err());
    }

    #[test]
    fn parse_timeout_ignores_zero_and_garbage() {
        assert_eq!(parse_timeout(Some("0")), Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS));
        assert_eq!(parse_timeout(Some("abc")), Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS));
        assert_eq!(parse_timeout(Some(" 1500 ")), Duration::from_millis(1500));
    }
}
