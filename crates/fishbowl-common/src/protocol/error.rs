use std::fmt;

use thiserror::Error;

/// The I/O phase whose deadline expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoPhase {
    Connect,
    Write,
    Read,
}

impl fmt::Display for IoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoPhase::Connect => f.write_str("connect"),
            IoPhase::Write => f.write_str("write"),
            IoPhase::Read => f.write_str("read"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FishbowlError {
    #[error("Missing host")]
    MissingHost,

    #[error("Missing username")]
    MissingUsername,

    #[error("Missing password")]
    MissingPassword,

    #[error("Connection not established")]
    ConnectionNotEstablished,

    #[error("Connection timed out during {phase}")]
    ConnectionTimeout { phase: IoPhase },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Server rejected request with status {code}: {message}")]
    ServerRejected { code: u32, message: String },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FishbowlError {
    pub fn timeout(phase: IoPhase) -> Self {
        FishbowlError::ConnectionTimeout { phase }
    }
}

impl From<xmltree::ParseError> for FishbowlError {
    fn from(err: xmltree::ParseError) -> Self {
        FishbowlError::ProtocolError(format!("malformed XML: {}", err))
    }
}

impl From<xmltree::Error> for FishbowlError {
    fn from(err: xmltree::Error) -> Self {
        FishbowlError::ProtocolError(format!("XML serialization failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, FishbowlError>;
