use serde::Serialize;
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use crate::{
    api_client::{ApiClient, ApiError},
    session_store::SessionStore,
    shell_config::ShellConfig,
    window_registry::WindowRegistry,
    window_zoom::ZoomLevels,
};

/// Everything the shell process shares between its menu, window-event and
/// bridge handlers. Registered once as Tauri managed state.
#[derive(Debug)]
pub(crate) struct ShellContext {
    pub(crate) config: ShellConfig,
    pub(crate) session: Arc<SessionStore>,
    pub(crate) api: ApiClient,
    pub(crate) registry: Mutex<WindowRegistry>,
    pub(crate) zoom_levels: Mutex<ZoomLevels>,
    pub(crate) is_signing_in: AtomicBool,
}

impl ShellContext {
    pub(crate) fn new(config: ShellConfig) -> Result<Self, ApiError> {
        let session = Arc::new(SessionStore::new());
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            session,
            api,
            registry: Mutex::new(WindowRegistry::new()),
            zoom_levels: Mutex::new(ZoomLevels::new()),
            is_signing_in: AtomicBool::new(false),
        })
    }

    pub(crate) fn with_registry<T>(
        &self,
        f: impl FnOnce(&mut WindowRegistry) -> T,
    ) -> Result<T, String> {
        let mut guard = self
            .registry
            .lock()
            .map_err(|_| "Window registry lock poisoned.".to_string())?;
        Ok(f(&mut guard))
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }

    pub(crate) fn from_result(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(reason) => Self::failed(reason),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiBridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
    pub(crate) status: Option<u16>,
    pub(crate) data: Option<Value>,
}

impl ApiBridgeResult {
    pub(crate) fn from_api(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Self {
                ok: true,
                reason: None,
                status: None,
                data: Some(data),
            },
            Err(error) => Self {
                ok: false,
                status: error.status(),
                reason: Some(error.to_string()),
                data: None,
            },
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
            status: None,
            data: None,
        }
    }
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use serde_json::json;

    use super::*;

    #[test]
    fn atomic_flag_guard_try_set_rejects_double_set_until_drop() {
        let flag = AtomicBool::new(false);

        let guard = AtomicFlagGuard::try_set(&flag).expect("first set should succeed");
        assert!(flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_some());
    }

    #[test]
    fn shell_context_shares_session_with_api_client() {
        let context = ShellContext::new(ShellConfig::default()).expect("context builds");
        context.session.set_session("Ana", "tok");
        assert_eq!(
            context.session.authorization_header().as_deref(),
            Some("Bearer tok")
        );
        assert_eq!(context.with_registry(|registry| registry.len()), Ok(0));
    }

    #[test]
    fn api_bridge_result_carries_status_and_message() {
        let result = ApiBridgeResult::from_api(Err(ApiError::Status {
            status: 404,
            message: "Categoria não encontrada".to_string(),
        }));
        assert_eq!(
            serde_json::to_value(&result).expect("serialize"),
            json!({
                "ok": false,
                "reason": "Categoria não encontrada",
                "status": 404,
                "data": null
            })
        );
    }

    #[test]
    fn bridge_result_from_result_maps_errors() {
        assert_eq!(BridgeResult::from_result(Ok(())), BridgeResult::ok());
        assert_eq!(
            BridgeResult::from_result(Err("nope".to_string())),
            BridgeResult::failed("nope")
        );
    }
}
