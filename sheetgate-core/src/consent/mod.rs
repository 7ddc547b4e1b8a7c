//! Per-user, per-tool authorization against a remote consent service.
//!
//! Before a tool is ever offered to the model, the user must hold a grant for
//! it. Grants live on a remote consent service; this module runs the
//! handshake that obtains them.
//!
//! # Overview
//!
//! - **[`ConsentService`]**: Trait over the remote grant API (request + status)
//! - **[`HttpConsentService`]**: JSON-over-HTTP implementation
//! - **[`ConsentBootstrapper`]**: Runs the full handshake per tool: request a
//!   grant, surface the consent URL to the operator, poll until the decision
//!   arrives
//!
//! # Handshake
//!
//! For each `(user, tool)` pair the bootstrapper:
//!
//! 1. Checks its session cache; an already-granted pair returns immediately
//!    with no network traffic.
//! 2. Asks the service for the current grant status.
//! 3. If no grant exists, requests one; the service answers with a consent
//!    URL, which is surfaced to the operator out of band.
//! 4. Polls the status with bounded backoff until the grant resolves to
//!    granted or denied, or the attempt budget runs out.
//!
//! A denied or timed-out grant is an [`AuthorizationError`]; callers are
//! expected to withhold the tool entirely rather than retry silently.

mod bootstrap;
mod service;

pub use bootstrap::{AuthorizationError, AuthorizationState, ConsentBootstrapper};
pub use service::{ConsentError, ConsentService, GrantRequest, GrantStatus, HttpConsentService};
