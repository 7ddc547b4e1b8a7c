//! The grant handshake: request, surface the URL, poll until resolved.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;

use super::service::{ConsentError, ConsentService, GrantStatus};

const DEFAULT_POLL_ATTEMPTS: u32 = 30;
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
const MAX_POLL_DELAY: Duration = Duration::from_secs(8);

/// Authorization did not resolve to a grant
#[derive(Debug, Error)]
#[error("authorization failed for tool '{tool_name}': {reason}")]
pub struct AuthorizationError {
    /// Tool for which authorization was sought
    pub tool_name: String,
    /// Why the handshake failed
    pub reason: String,
}

impl AuthorizationError {
    fn new(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            reason: reason.into(),
        }
    }
}

/// Resolved authorization for one `(user, tool)` pair
#[derive(Debug, Clone)]
pub struct AuthorizationState {
    pub tool_name: String,
    pub user_id: String,
    pub status: GrantStatus,
    /// Consent URL, if one was issued during the handshake
    pub grant_url: Option<String>,
}

type GrantKey = (String, String);

/// Runs the grant handshake against a [`ConsentService`] and caches the
/// results for the session.
///
/// Granted pairs are remembered in memory; a second call to
/// [`ensure_authorized`](ConsentBootstrapper::ensure_authorized) for the same
/// pair returns without touching the network. Nothing is persisted across
/// processes; a new session re-checks the service, which holds the durable
/// record.
pub struct ConsentBootstrapper {
    service: Arc<dyn ConsentService>,
    states: Mutex<HashMap<GrantKey, AuthorizationState>>,
    poll_attempts: u32,
    initial_delay: Duration,
    on_grant_url: Box<dyn Fn(&str, &str) + Send + Sync>,
}

impl ConsentBootstrapper {
    /// Create a bootstrapper over the given service with default polling
    pub fn new(service: Arc<dyn ConsentService>) -> Self {
        Self {
            service,
            states: Mutex::new(HashMap::new()),
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            on_grant_url: Box::new(|_, _| {}),
        }
    }

    /// Override the polling budget (attempts and initial delay)
    pub fn with_polling(mut self, attempts: u32, initial_delay: Duration) -> Self {
        self.poll_attempts = attempts;
        self.initial_delay = initial_delay;
        self
    }

    /// Register a callback invoked with `(tool_name, grant_url)` whenever a
    /// consent URL must be surfaced to the operator
    pub fn on_grant_url(mut self, f: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        self.on_grant_url = Box::new(f);
        self
    }

    /// Ensure the user holds a grant for the tool, running the handshake if
    /// needed.
    ///
    /// Idempotent for granted pairs: once this returns `Ok` for a pair, later
    /// calls return the cached state with no network traffic.
    pub async fn ensure_authorized(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationState, AuthorizationError> {
        let key = (user_id.to_string(), tool_name.to_string());

        if let Some(state) = self.states.lock().get(&key) {
            if state.status == GrantStatus::Granted {
                return Ok(state.clone());
            }
        }

        let state = self.handshake(tool_name, user_id).await?;
        self.states.lock().insert(key, state.clone());
        Ok(state)
    }

    async fn handshake(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationState, AuthorizationError> {
        let status = self
            .service
            .check_status(tool_name, user_id)
            .await
            .map_err(|e| Self::service_error(tool_name, e))?;

        let mut grant_url = None;
        match status {
            GrantStatus::Granted => {
                return Ok(AuthorizationState {
                    tool_name: tool_name.to_string(),
                    user_id: user_id.to_string(),
                    status,
                    grant_url,
                });
            }
            GrantStatus::Denied => {
                return Err(AuthorizationError::new(tool_name, "grant was denied"));
            }
            GrantStatus::Unrequested => {
                let request = self
                    .service
                    .request_grant(tool_name, user_id)
                    .await
                    .map_err(|e| Self::service_error(tool_name, e))?;

                match request.status {
                    GrantStatus::Granted => {
                        return Ok(AuthorizationState {
                            tool_name: tool_name.to_string(),
                            user_id: user_id.to_string(),
                            status: GrantStatus::Granted,
                            grant_url: request.grant_url,
                        });
                    }
                    GrantStatus::Denied => {
                        return Err(AuthorizationError::new(tool_name, "grant was denied"));
                    }
                    _ => {}
                }

                if let Some(url) = &request.grant_url {
                    (self.on_grant_url)(tool_name, url);
                }
                grant_url = request.grant_url;
            }
            GrantStatus::Pending => {}
        }

        // Grant flow in progress; poll until the user decides or we give up
        let mut delay = self.initial_delay;
        for _ in 0..self.poll_attempts {
            tokio::time::sleep(delay).await;
            delay = std::cmp::min(delay * 2, MAX_POLL_DELAY);

            let status = self
                .service
                .check_status(tool_name, user_id)
                .await
                .map_err(|e| Self::service_error(tool_name, e))?;

            match status {
                GrantStatus::Granted => {
                    return Ok(AuthorizationState {
                        tool_name: tool_name.to_string(),
                        user_id: user_id.to_string(),
                        status,
                        grant_url,
                    });
                }
                GrantStatus::Denied => {
                    return Err(AuthorizationError::new(tool_name, "grant was denied"));
                }
                GrantStatus::Pending | GrantStatus::Unrequested => {}
            }
        }

        Err(AuthorizationError::new(
            tool_name,
            "timed out waiting for the grant to be approved",
        ))
    }

    fn service_error(tool_name: &str, err: ConsentError) -> AuthorizationError {
        AuthorizationError::new(tool_name, err.to_string())
    }
}
