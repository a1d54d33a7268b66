//! ipstack.com geolocation client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::service::{GeoProvider, ProviderError, ProviderResult};

/// ipstack error code meaning "no data for this resource".
const NOT_FOUND_CODE: i64 = 404;

/// Client for the ipstack standard lookup endpoint (`GET /{ip}?access_key=...`).
///
/// The access key is sent as a query parameter and stripped from any transport
/// error before it is surfaced, so it never reaches the logs.
pub struct IpstackProvider {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl IpstackProvider {
    /// Creates a client for `base_url` (e.g. `http://api.ipstack.com`).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProviderError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
        })
    }

    fn lookup_url(&self, ip: &str) -> String {
        format!("{}/{}", self.base_url, ip)
    }
}

#[async_trait]
impl GeoProvider for IpstackProvider {
    async fn lookup(&self, ip: &str) -> ProviderResult<Option<Value>> {
        let response = self
            .client
            .get(self.lookup_url(ip))
            .query(&[("access_key", self.access_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(ip, "Provider has no record for address");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(ip, status = status.as_u16(), "Provider returned non-success status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url()))?;

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        interpret_body(body)
    }
}

/// Separates records, "no data" answers and error payloads.
///
/// ipstack reports failures with HTTP 200 and a body like
/// `{"success": false, "error": {"code": 101, "type": "invalid_access_key", "info": "..."}}`.
fn interpret_body(body: Value) -> ProviderResult<Option<Value>> {
    let map = match &body {
        Value::Object(map) => map,
        Value::Null => return Ok(None),
        other => {
            return Err(ProviderError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                json_kind(other)
            )));
        }
    };

    if map.is_empty() {
        return Ok(None);
    }

    if let Some(error) = map.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
        if code == NOT_FOUND_CODE {
            return Ok(None);
        }

        let info = error
            .get("info")
            .or_else(|| error.get("type"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();

        return Err(ProviderError::Api { code, info });
    }

    if map.get("success") == Some(&Value::Bool(false)) {
        return Err(ProviderError::Api {
            code: 0,
            info: "request was not successful".to_string(),
        });
    }

    Ok(Some(body))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
