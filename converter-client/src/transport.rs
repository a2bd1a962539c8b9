//! `reqwest`-backed HTTP transport.

use converter_types::{GatewayError, HttpTransport, QueryParams};
use reqwest::Client;

/// Error type for raw HTTP exchanges.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Maps onto the gateway taxonomy, tagging decode failures with `url`.
    pub fn into_gateway(self, url: &str) -> GatewayError {
        match self {
            ClientError::Http(e) => GatewayError::Transport(e.to_string()),
            ClientError::Api { status, message } => GatewayError::Api { status, message },
            ClientError::Json(e) => GatewayError::InvalidShape {
                endpoint: url.to_string(),
                reason: e.to_string(),
            },
        }
    }
}

/// GETs JSON documents over HTTP(S).
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch(
        &self,
        url: &str,
        params: &QueryParams,
    ) -> Result<serde_json::Value, ClientError> {
        let resp = self.http.get(url).query(params).send().await?;
        handle_response(resp).await
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
    ) -> Result<serde_json::Value, GatewayError> {
        self.fetch(url, params)
            .await
            .map_err(|e| e.into_gateway(url))
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<serde_json::Value, ClientError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
