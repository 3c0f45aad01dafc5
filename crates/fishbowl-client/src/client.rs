use fishbowl_common::transport::{Connection, Endpoint};
use fishbowl_common::{Envelope, FishbowlError, Reply, Request, Result, Status};
use serde_json::Value;

use crate::engine::ProtocolEngine;
use crate::observer::{ClientEvent, Observer};
use crate::registry::OperationRegistry;
use crate::requests::{AppIdentity, Login};

/// Client for one Fishbowl server session.
///
/// Owns a single TCP connection and the ticket that goes with it. Every
/// method that talks to the server takes `&mut self`: there is at most one
/// exchange in flight, and callers that want concurrency use one client per
/// session.
///
/// # Example
///
/// ```no_run
/// use fishbowl_client::requests::GetCustomer;
/// use fishbowl_client::Client;
/// use fishbowl_common::transport::Endpoint;
///
/// let mut client = Client::new(Endpoint::new("erp.local").unwrap()).unwrap();
/// client.connect().unwrap();
/// client.login("admin", "secret").unwrap();
///
/// let customer = client.send(&GetCustomer::new("Acme")).unwrap();
/// println!("{:?}", customer);
///
/// client.close();
/// ```
pub struct Client {
    endpoint: Endpoint,
    connection: Option<Connection>,
    engine: ProtocolEngine,
    registry: OperationRegistry,
    identity: AppIdentity,
    username: Option<String>,
    password: Option<String>,
}

impl Client {
    /// Creates an unconnected client. Fails when the endpoint is invalid.
    pub fn new(endpoint: Endpoint) -> Result<Self> {
        endpoint.validate()?;

        Ok(Self {
            endpoint,
            connection: None,
            engine: ProtocolEngine::new(),
            registry: OperationRegistry::builtin(),
            identity: AppIdentity::default(),
            username: None,
            password: None,
        })
    }

    /// Shorthand for `Client::new(Endpoint::new(host)?)`.
    pub fn with_host(host: impl Into<String>) -> Result<Self> {
        Self::new(Endpoint::new(host)?)
    }

    /// Replaces the default [`TracingObserver`](crate::observer::TracingObserver).
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.engine.set_observer(observer);
        self
    }

    /// Replaces the builtin operation registry used by [`call`](Self::call).
    pub fn with_registry(mut self, registry: OperationRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the integration identity sent with every login.
    pub fn with_identity(mut self, identity: AppIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn host(&self) -> &str {
        self.endpoint.host()
    }

    pub fn port(&self) -> u16 {
        self.endpoint.port()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(password.into());
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Opens the connection. A fresh connection starts without a ticket.
    ///
    /// Calling this while already connected keeps the existing connection.
    pub fn connect(&mut self) -> Result<&mut Self> {
        if self.is_connected() {
            return Ok(self);
        }

        let (host, port) = (self.endpoint.host(), self.endpoint.port());
        self.engine.notify(&ClientEvent::Connecting { host, port });

        match Connection::open(&self.endpoint) {
            Ok(connection) => {
                self.engine.notify(&ClientEvent::Connected {
                    peer: connection.peer_addr(),
                });
                self.connection = Some(connection);
                self.engine.clear_ticket();
                Ok(self)
            }
            Err(error) => {
                self.engine.notify(&ClientEvent::ConnectFailed {
                    host,
                    port,
                    error: &error,
                });
                self.connection = None;
                Err(error)
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .map_or(false, Connection::is_open)
    }

    pub fn has_ticket(&self) -> bool {
        self.engine.has_ticket()
    }

    /// Starts a fresh session.
    ///
    /// Any existing ticket is dropped first. Blank credentials fail before
    /// anything is sent. A reply with a non-success status, on the
    /// `FbiMsgsRs` section or on `LoginRs` itself, fails with
    /// `ServerRejected`; every failure leaves the client without a ticket.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&mut Self> {
        if !self.is_connected() {
            return Err(FishbowlError::ConnectionNotEstablished);
        }
        if username.trim().is_empty() {
            return Err(FishbowlError::MissingUsername);
        }
        if password.trim().is_empty() {
            return Err(FishbowlError::MissingPassword);
        }

        self.username = Some(username.to_string());
        self.password = Some(password.to_string());

        let request = Login::new(username, password).with_identity(self.identity.clone());

        self.engine.clear_ticket();
        let outcome = self
            .exchange(&request)
            .and_then(|reply| {
                if reply.status.is_success() {
                    Ok(())
                } else {
                    Err(rejected(&reply.status))
                }
            });

        if let Err(error) = outcome {
            self.engine.clear_ticket();
            return Err(error);
        }
        Ok(self)
    }

    /// Sends a request and returns its distilled result.
    pub fn send<R: Request + ?Sized>(&mut self, request: &R) -> Result<R::Output> {
        self.send_with_status(request).map(|reply| reply.result)
    }

    /// Like [`send`](Self::send) but keeps the status and ticket of the reply.
    pub fn send_with_status<R: Request + ?Sized>(
        &mut self,
        request: &R,
    ) -> Result<Reply<R::Output>> {
        self.exchange(request)
    }

    /// Builds the named operation from JSON arguments and sends it.
    pub fn call(&mut self, operation: &str, args: Value) -> Result<Value> {
        let request = self.registry.build(operation, args)?;
        self.send(&request)
    }

    fn exchange<R: Request + ?Sized>(&mut self, request: &R) -> Result<Reply<R::Output>> {
        let connection = self
            .connection
            .as_mut()
            .filter(|connection| connection.is_open())
            .ok_or(FishbowlError::ConnectionNotEstablished)?;
        self.engine.exchange(connection, request)
    }

    /// The last document sent, ticket included.
    pub fn last_request(&self) -> Option<&Envelope> {
        self.engine.last_request()
    }

    /// The last reply envelope received.
    pub fn last_response(&self) -> Option<&Envelope> {
        self.engine.last_response()
    }

    /// Closes the connection and drops the ticket. Safe to call repeatedly.
    pub fn close(&mut self) -> &mut Self {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
            self.engine.notify(&ClientEvent::Closed);
        }
        self.engine.clear_ticket();
        self
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("connected", &self.is_connected())
            .field("engine", &self.engine)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.close();
    }
}

fn rejected(status: &Status) -> FishbowlError {
    FishbowlError::ServerRejected {
        code: status.code.unwrap_or_default(),
        message: status
            .message
            .clone()
            .unwrap_or_else(|| "no status message".to_string()),
    }
}
