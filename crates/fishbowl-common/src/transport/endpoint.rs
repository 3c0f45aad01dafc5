use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::error::{FishbowlError, Result};
use crate::transport::frame::DEFAULT_MAX_FRAME_LEN;

/// Port the server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 28192;

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30_000;

/// Where to connect and how long each I/O phase may take.
///
/// The three timeouts are independent: logins can be slow to answer while a
/// stuck connect should fail fast.
///
/// # Default Configuration
///
/// - `port`: 28192
/// - `connect_timeout_ms`: 5000
/// - `write_timeout_ms`: 5000
/// - `read_timeout_ms`: 30000
/// - `max_frame_len`: 100 MB
///
/// # Example
///
/// ```
/// use fishbowl_common::transport::Endpoint;
/// use std::time::Duration;
///
/// let endpoint = Endpoint::new("inventory.local")
///     .unwrap()
///     .with_port(28200)
///     .with_read_timeout(Duration::from_secs(60));
///
/// assert_eq!(endpoint.port(), 28200);
/// assert_eq!(endpoint.connect_timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_connect_timeout_ms")]
    connect_timeout_ms: u64,
    #[serde(default = "default_write_timeout_ms")]
    write_timeout_ms: u64,
    #[serde(default = "default_read_timeout_ms")]
    read_timeout_ms: u64,
    #[serde(default = "default_max_frame_len")]
    max_frame_len: usize,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_write_timeout_ms() -> u64 {
    DEFAULT_WRITE_TIMEOUT_MS
}

fn default_read_timeout_ms() -> u64 {
    DEFAULT_READ_TIMEOUT_MS
}

fn default_max_frame_len() -> usize {
    DEFAULT_MAX_FRAME_LEN
}

impl Endpoint {
    /// Creates an endpoint with default port and timeouts.
    ///
    /// Fails with `MissingHost` for an empty host.
    pub fn new(host: impl Into<String>) -> Result<Self> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(FishbowlError::MissingHost);
        }

        Ok(Self {
            host,
            port: DEFAULT_PORT,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = duration_to_ms(timeout);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout_ms = duration_to_ms(timeout);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout_ms = duration_to_ms(timeout);
        self
    }

    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    /// Checks values that the builder and deserialization cannot rule out.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(FishbowlError::MissingHost);
        }
        if self.port == 0 {
            return Err(FishbowlError::InvalidConfig("port must be non-zero".to_string()));
        }
        for (name, value) in [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("write_timeout_ms", self.write_timeout_ms),
            ("read_timeout_ms", self.read_timeout_ms),
        ] {
            if value == 0 {
                return Err(FishbowlError::InvalidConfig(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn max_frame_len(&self) -> usize {
        self.max_frame_len
    }
}

/// Sub-millisecond durations round up so a tiny timeout never becomes zero.
fn duration_to_ms(timeout: Duration) -> u64 {
    let ms = timeout.as_millis();
    if ms == 0 && !timeout.is_zero() {
        1
    } else {
        u64::try_from(ms).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let endpoint = Endpoint::new("localhost").unwrap();
        assert_eq!(endpoint.host(), "localhost");
        assert_eq!(endpoint.port(), 28192);
        assert_eq!(endpoint.connect_timeout(), Duration::from_secs(5));
        assert_eq!(endpoint.write_timeout(), Duration::from_secs(5));
        assert_eq!(endpoint.read_timeout(), Duration::from_secs(30));
        assert_eq!(endpoint.max_frame_len(), DEFAULT_MAX_FRAME_LEN);
        assert!(endpoint.validate().is_ok());
    }

    #[test]
    fn test_missing_host() {
        assert!(matches!(Endpoint::new(""), Err(FishbowlError::MissingHost)));
        assert!(matches!(Endpoint::new("  "), Err(FishbowlError::MissingHost)));
    }

    #[test]
    fn test_builders() {
        let endpoint = Endpoint::new("db")
            .unwrap()
            .with_port(1)
            .with_connect_timeout(Duration::from_millis(200))
            .with_write_timeout(Duration::from_secs(1))
            .with_read_timeout(Duration::from_secs(2))
            .with_max_frame_len(10);
        assert_eq!(endpoint.port(), 1);
        assert_eq!(endpoint.connect_timeout(), Duration::from_millis(200));
        assert_eq!(endpoint.write_timeout(), Duration::from_secs(1));
        assert_eq!(endpoint.read_timeout(), Duration::from_secs(2));
        assert_eq!(endpoint.max_frame_len(), 10);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let endpoint = Endpoint::new("db")
            .unwrap()
            .with_read_timeout(Duration::ZERO);
        assert!(matches!(
            endpoint.validate(),
            Err(FishbowlError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sub_millisecond_rounds_up() {
        let endpoint = Endpoint::new("db")
            .unwrap()
            .with_connect_timeout(Duration::from_micros(10));
        assert_eq!(endpoint.connect_timeout(), Duration::from_millis(1));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let endpoint: Endpoint =
            serde_json::from_str(r#"{"host": "erp", "read_timeout_ms": 1000}"#).unwrap();
        assert_eq!(endpoint.host(), "erp");
        assert_eq!(endpoint.port(), DEFAULT_PORT);
        assert_eq!(endpoint.read_timeout(), Duration::from_secs(1));
        assert_eq!(endpoint.write_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_deserialized_empty_host_fails_validation() {
        let endpoint: Endpoint = serde_json::from_str(r#"{"host": ""}"#).unwrap();
        assert!(matches!(endpoint.validate(), Err(FishbowlError::MissingHost)));
    }
}
