//! Registry service client.
//!
//! The registry tracks API definitions and the state of their analysis
//! runs. This module defines the capability the orchestrator consumes;
//! the HTTP implementation lives in [`client`].

pub mod client;

pub use client::HttpRegistryClient;

use crate::models::{StateUpdateRequest, StateUpdateResponse};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a registry collaborator.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot connect to registry at {url}")]
    Connect { url: String },

    #[error("registry request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("registry rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("failed to decode registry response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("registry request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Capability set the orchestrator needs from the registry.
///
/// Each call is attempted exactly once per analysis run; any retry
/// policy belongs to the implementation behind this trait, not the
/// orchestrator.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Records an analysis state transition, returning the correlation
    /// handle (only meaningful on the `started` transition).
    async fn update_analysis_state(
        &self,
        request: &StateUpdateRequest,
    ) -> Result<StateUpdateResponse, RegistryError>;

    /// Fetches the raw specification content for the analyzed definition.
    ///
    /// The content shape is not validated here; it is handed to the
    /// compiler backend as-is.
    async fn get_specification_content(&self) -> Result<String, RegistryError>;
}
