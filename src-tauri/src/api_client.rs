use std::sync::Arc;

use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::{session_store::SessionStore, shell_config::ShellConfig};

const SIGN_IN_PATH: &str = "auth/signIn/";
const DEFAULT_SIGN_IN_ERROR: &str = "Erro na autenticação";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Invalid API path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Failed to decode API response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// REST collections the screens read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCollection {
    Categories,
    PaymentMethods,
    PauseReasons,
    LossReasons,
    Genders,
    Users,
    Stores,
    Questions,
    OperationalAssessments,
    Audits,
    Sales,
}

impl ApiCollection {
    pub const ALL: [ApiCollection; 11] = [
        Self::Categories,
        Self::PaymentMethods,
        Self::PauseReasons,
        Self::LossReasons,
        Self::Genders,
        Self::Users,
        Self::Stores,
        Self::Questions,
        Self::OperationalAssessments,
        Self::Audits,
        Self::Sales,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Categories => "categorias",
            Self::PaymentMethods => "formadepagamento",
            Self::PauseReasons => "motivodepausa",
            Self::LossReasons => "motivoperdas",
            Self::Genders => "cadsexo",
            Self::Users => "usuarios",
            Self::Stores => "loja",
            Self::Questions => "cadquestoes",
            Self::OperationalAssessments => "cadavoperacional",
            Self::Audits => "auditoria",
            Self::Sales => "vendas",
        }
    }

    pub fn from_path(raw: &str) -> Option<Self> {
        let normalized = raw.trim().trim_matches('/');
        Self::ALL
            .into_iter()
            .find(|collection| collection.path() == normalized)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInUser {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: SignInUser,
}

/// The one HTTP client every screen goes through.
///
/// Requests built here carry `Authorization: Bearer <token>` exactly when the
/// session store holds a session at build time.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ShellConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|error| ApiError::Client(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let trimmed = path.trim();
        if trimmed.starts_with("//") || trimmed.contains("://") {
            return Err(ApiError::InvalidPath {
                path: path.to_string(),
                reason: "absolute URLs are not allowed".to_string(),
            });
        }

        self.base_url
            .join(trimmed.trim_start_matches('/'))
            .map_err(|error| ApiError::InvalidPath {
                path: path.to_string(),
                reason: error.to_string(),
            })
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.client.request(method, url);
        Ok(match self.session.authorization_header() {
            Some(header) => builder.header(AUTHORIZATION, header),
            None => builder,
        })
    }

    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut builder = self.request(method.clone(), path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            crate::append_api_log(&format!("{method} {path} failed with status {status}"));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message_from_body(&text)
                    .unwrap_or_else(|| format!("Request failed with status {status}")),
            });
        }

        parse_json_body(&text)
    }

    pub async fn list(&self, collection: ApiCollection) -> Result<Value, ApiError> {
        self.send_json(Method::GET, collection.path(), None).await
    }

    pub async fn create(
        &self,
        collection: ApiCollection,
        body: &Value,
    ) -> Result<Value, ApiError> {
        self.send_json(Method::POST, collection.path(), Some(body))
            .await
    }

    pub async fn update(
        &self,
        collection: ApiCollection,
        id: &str,
        body: &Value,
    ) -> Result<Value, ApiError> {
        let path = item_path(collection, id)?;
        self.send_json(Method::PUT, &path, Some(body)).await
    }

    pub async fn delete(&self, collection: ApiCollection, id: &str) -> Result<Value, ApiError> {
        let path = item_path(collection, id)?;
        self.send_json(Method::DELETE, &path, None).await
    }

    /// Authenticates without attaching any existing session token.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SignInResponse, ApiError> {
        let url = self.endpoint(SIGN_IN_PATH)?;
        let response = self
            .client
            .post(url)
            .json(&SignInRequest { username, password })
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message_from_body(&text)
                    .unwrap_or_else(|| DEFAULT_SIGN_IN_ERROR.to_string()),
            });
        }

        serde_json::from_str(&text).map_err(|error| ApiError::Decode(error.to_string()))
    }
}

fn item_path(collection: ApiCollection, id: &str) -> Result<String, ApiError> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') || id.contains('?') || id.contains('#') {
        return Err(ApiError::InvalidPath {
            path: format!("{}/{}", collection.path(), id),
            reason: "record id must be a single path segment".to_string(),
        });
    }

    Ok(format!("{}/{}", collection.path(), id))
}

fn parse_json_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(text).map_err(|error| ApiError::Decode(error.to_string()))
}

pub(crate) fn error_message_from_body(text: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(text).ok()?;
    let message = parsed.get("message")?;
    let message = match message {
        Value::String(message) => message.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };

    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}
