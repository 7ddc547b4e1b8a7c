//! Client interface to the remote consent service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Where a grant stands for a given `(user, tool)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    /// The service has no record of a grant request for this pair
    Unrequested,

    /// A grant was requested and the user has not yet decided
    Pending,

    /// The user approved; the tool may be offered to the model
    Granted,

    /// The user declined; the tool must not be offered
    Denied,
}

/// Response to a grant request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantRequest {
    /// Where the user completes the consent flow. Absent when the grant is
    /// already resolved.
    pub grant_url: Option<String>,

    /// Status at the time of the request
    pub status: GrantStatus,
}

/// Errors from talking to the consent service
#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("consent service protocol error: {0}")]
    Protocol(String),
}

/// Remote grant API: request a grant for a `(user, tool)` pair and check
/// where it stands.
///
/// Implementations must be safe to call repeatedly; requesting a grant that
/// already exists returns the existing one rather than creating a duplicate.
#[async_trait]
pub trait ConsentService: Send + Sync {
    /// Ask the service to start (or resume) a grant flow for this pair
    async fn request_grant(&self, tool: &str, user_id: &str)
        -> Result<GrantRequest, ConsentError>;

    /// Check the current status of the pair's grant
    async fn check_status(&self, tool: &str, user_id: &str) -> Result<GrantStatus, ConsentError>;
}

#[derive(Serialize)]
struct GrantRequestBody<'a> {
    tool: &'a str,
    user_id: &'a str,
}

#[derive(Deserialize)]
struct GrantStatusBody {
    status: GrantStatus,
}

/// JSON-over-HTTP consent service client.
///
/// Endpoints:
/// - `POST {base}/v1/grants` with `{"tool", "user_id"}` starts a grant flow
/// - `GET {base}/v1/grants/status?tool=..&user_id=..` reports status
pub struct HttpConsentService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpConsentService {
    /// Create a client for the consent service at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ConsentError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConsentError::Protocol(format!("invalid consent URL: {}", e)))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ConsentError> {
        self.base_url
            .join(path)
            .map_err(|e| ConsentError::Protocol(format!("invalid endpoint path: {}", e)))
    }
}

#[async_trait]
impl ConsentService for HttpConsentService {
    async fn request_grant(
        &self,
        tool: &str,
        user_id: &str,
    ) -> Result<GrantRequest, ConsentError> {
        let url = self.endpoint("v1/grants")?;
        let response = self
            .client
            .post(url)
            .json(&GrantRequestBody { tool, user_id })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConsentError::Protocol(format!(
                "grant request failed with status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn check_status(&self, tool: &str, user_id: &str) -> Result<GrantStatus, ConsentError> {
        let url = self.endpoint("v1/grants/status")?;
        let response = self
            .client
            .get(url)
            .query(&[("tool", tool), ("user_id", user_id)])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(GrantStatus::Unrequested);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConsentError::Protocol(format!(
                "status check failed with status {}: {}",
                status, body
            )));
        }

        let body: GrantStatusBody = response.json().await?;
        Ok(body.status)
    }
}
