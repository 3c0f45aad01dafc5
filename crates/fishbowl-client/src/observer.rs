//! Observability hook
//!
//! The client reports what it is doing through an [`Observer`] instead of
//! logging inline. The default [`TracingObserver`] turns every event into a
//! `tracing` record; embedders can swap in their own (metrics, audit logs)
//! with [`Client::with_observer`](crate::Client::with_observer).

use std::net::SocketAddr;

use fishbowl_common::{FishbowlError, Status};

/// Points in the client lifecycle where an observer is invoked.
#[derive(Debug)]
pub enum ClientEvent<'a> {
    Connecting { host: &'a str, port: u16 },
    Connected { peer: SocketAddr },
    ConnectFailed { host: &'a str, port: u16, error: &'a FishbowlError },
    Sending { operation: &'a str, bytes: usize },
    Received { operation: &'a str, bytes: usize, status: &'a Status },
    ExchangeFailed { operation: &'a str, error: &'a FishbowlError },
    Closed,
}

/// Receives client events. Must not panic.
pub trait Observer: Send {
    fn on_event(&self, event: &ClientEvent<'_>);
}

impl<F> Observer for F
where
    F: Fn(&ClientEvent<'_>) + Send,
{
    fn on_event(&self, event: &ClientEvent<'_>) {
        self(event)
    }
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&self, event: &ClientEvent<'_>) {
        match event {
            ClientEvent::Connecting { host, port } => {
                tracing::debug!(host, port, "connecting");
            }
            ClientEvent::Connected { peer } => {
                tracing::info!(peer = %peer, "connected");
            }
            ClientEvent::ConnectFailed { host, port, error } => {
                tracing::warn!(host, port, error = %error, "connect failed");
            }
            ClientEvent::Sending { operation, bytes } => {
                tracing::debug!(operation, bytes, "sending request");
            }
            ClientEvent::Received {
                operation,
                bytes,
                status,
            } => {
                if status.is_success() {
                    tracing::debug!(operation, bytes, code = ?status.code, "received reply");
                } else {
                    tracing::warn!(
                        operation,
                        bytes,
                        code = ?status.code,
                        message = ?status.message,
                        "server reported failure"
                    );
                }
            }
            ClientEvent::ExchangeFailed { operation, error } => {
                tracing::warn!(operation, error = %error, "exchange failed, ticket cleared");
            }
            ClientEvent::Closed => {
                tracing::info!("connection closed");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_event(&self, _event: &ClientEvent<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_closure_observer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer = move |event: &ClientEvent<'_>| {
            sink.lock().unwrap().push(format!("{:?}", event));
        };

        observer.on_event(&ClientEvent::Closed);
        observer.on_event(&ClientEvent::Sending {
            operation: "login",
            bytes: 12,
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], "Closed");
        assert!(seen[1].contains("login"));
    }

    #[test]
    fn test_tracing_observer_handles_every_event() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let error = FishbowlError::ConnectionNotEstablished;
        let failed = Status::new(Some(1120), Some("bad password".to_string()));
        let ok = Status::default();
        let observer = TracingObserver;

        observer.on_event(&ClientEvent::Connecting {
            host: "localhost",
            port: 28192,
        });
        observer.on_event(&ClientEvent::Connected {
            peer: "127.0.0.1:28192".parse().unwrap(),
        });
        observer.on_event(&ClientEvent::ConnectFailed {
            host: "localhost",
            port: 28192,
            error: &error,
        });
        observer.on_event(&ClientEvent::Received {
            operation: "login",
            bytes: 10,
            status: &ok,
        });
        observer.on_event(&ClientEvent::Received {
            operation: "login",
            bytes: 10,
            status: &failed,
        });
        observer.on_event(&ClientEvent::ExchangeFailed {
            operation: "login",
            error: &error,
        });
        observer.on_event(&ClientEvent::Closed);
    }
}
