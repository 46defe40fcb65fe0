//! Signed JSON client for the Tencent Cloud API
//!
//! Every call is an HTTPS POST of a JSON body to
//! `https://<service>.tencentcloudapi.com/`, identified by the `X-TC-Action`
//! and `X-TC-Version` headers and signed with TC3-HMAC-SHA256. Successful
//! and failed calls share one envelope:
//!
//! ```json
//! {"Response": {"RequestId": "...", "Error": {"Code": "...", "Message": "..."}}}
//! ```

use crate::error::{Result, TencentError};
use crate::ratelimit::RateLimiter;
use crate::sign::{CONTENT_TYPE, Credentials, authorization};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const API_DOMAIN: &str = "tencentcloudapi.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiError {
    code: String,
    message: String,
}

/// Identity behind the configured credentials
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub account_id: String,
    pub arn: String,
    pub user_id: String,
}

pub struct TencentClient {
    credentials: Credentials,
    region: String,
    endpoint: Option<String>,
    http: reqwest::Client,
    limiter: RateLimiter,
}

impl TencentClient {
    pub fn new(credentials: Credentials, region: impl Into<String>) -> Result<Self> {
        if credentials.secret_id.is_empty() || credentials.secret_key.is_empty() {
            return Err(TencentError::MissingCredentials);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("tcform/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            credentials,
            region: region.into(),
            endpoint: None,
            http,
            limiter: RateLimiter::default(),
        })
    }

    /// Send every call to `endpoint` instead of the public service domain
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_rate_limit(mut self, per_second: u32) -> Self {
        self.limiter = RateLimiter::new(per_second);
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn url(&self, service: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string() + "/",
            None => format!("https://{}.{}/", service, API_DOMAIN),
        }
    }

    /// Issue one API call and decode the `Response` object
    pub async fn call<Req, Resp>(
        &self,
        service: &str,
        version: &str,
        action: &str,
        request: &Req,
    ) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        self.limiter.check(action).await;

        let url = self.url(service);
        let parsed = reqwest::Url::parse(&url).map_err(|e| TencentError::InvalidResponse {
            action: action.to_string(),
            message: format!("invalid endpoint {}: {}", url, e),
        })?;
        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => format!("{}.{}", service, API_DOMAIN),
        };

        let payload = serde_json::to_vec(request)?;
        let now = Utc::now();
        let auth = authorization(&self.credentials, service, &host, &payload, now);

        let mut builder = self
            .http
            .post(parsed)
            .header("Authorization", auth)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-TC-Action", action)
            .header("X-TC-Version", version)
            .header("X-TC-Timestamp", now.timestamp().to_string())
            .header("X-TC-Region", &self.region)
            .header("X-TC-RequestClient", concat!("tcform/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.credentials.token {
            builder = builder.header("X-TC-Token", token);
        }

        tracing::debug!("api[{}] request body [{}]", action, String::from_utf8_lossy(&payload));

        let response = builder.body(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| TencentError::InvalidResponse {
                action: action.to_string(),
                message: format!("HTTP {}: {}", status, e),
            })?;
        let mut response = envelope.response;

        let request_id = response
            .get("RequestId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if let Some(error) = response.get("Error") {
            let error: ApiError = serde_json::from_value(error.clone())?;
            tracing::debug!(
                "api[{}] fail, RequestId [{}], reason [{}: {}]",
                action,
                request_id,
                error.code,
                error.message
            );
            return Err(TencentError::Api {
                action: action.to_string(),
                code: error.code,
                message: error.message,
                request_id,
            });
        }

        tracing::debug!("api[{}] success, RequestId [{}]", action, request_id);
        if let Some(map) = response.as_object_mut() {
            map.remove("RequestId");
        }
        Ok(serde_json::from_value(response)?)
    }

    /// Who the credentials belong to
    pub async fn caller_identity(&self) -> Result<CallerIdentity> {
        self.call("sts", "2018-08-13", "GetCallerIdentity", &serde_json::json!({}))
            .await
    }
}
