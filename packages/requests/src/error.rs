// ABOUTME: Error types for the requests package
// ABOUTME: Covers lookup misses and status-gated actions

use dealdraft_core::RequestStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Request not found: {0}")]
    NotFound(String),

    #[error("Action '{action}' is not available while status is {status}")]
    ActionUnavailable {
        action: &'static str,
        status: RequestStatus,
    },
}

pub type Result<T> = std::result::Result<T, RequestError>;
