//! Protocol engine
//!
//! Drives one request through a full exchange:
//!
//! 1. compose the request document (validation errors stop here, no I/O)
//! 2. attach the session ticket, or an empty placeholder before login, and
//!    serialize; a failure here still leaves the session untouched
//! 3. record the document as last request, send it framed
//! 4. read the length prefix and exactly that many body bytes
//! 5. parse the body as an envelope, malformed bodies are fatal
//! 6. distill the result, adopt the reply's ticket, record last response
//!
//! Any failure from step 3 on clears the ticket before it is returned.

use fishbowl_common::transport::FrameTransport;
use fishbowl_common::{Envelope, Reply, Request, Result, Ticket};

use crate::observer::{ClientEvent, Observer, TracingObserver};
use crate::session::Session;

pub struct ProtocolEngine {
    session: Session,
    last_request: Option<Envelope>,
    last_response: Option<Envelope>,
    observer: Box<dyn Observer>,
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self::with_observer(TracingObserver)
    }

    pub fn with_observer(observer: impl Observer + 'static) -> Self {
        Self {
            session: Session::new(),
            last_request: None,
            last_response: None,
            observer: Box::new(observer),
        }
    }

    pub fn set_observer(&mut self, observer: impl Observer + 'static) {
        self.observer = Box::new(observer);
    }

    pub(crate) fn notify(&self, event: &ClientEvent<'_>) {
        self.observer.on_event(event);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn has_ticket(&self) -> bool {
        self.session.has_ticket()
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.session.ticket()
    }

    pub fn clear_ticket(&mut self) {
        self.session.clear();
    }

    /// The last document handed to the transport, ticket included.
    pub fn last_request(&self) -> Option<&Envelope> {
        self.last_request.as_ref()
    }

    /// The last reply that parsed as an envelope.
    pub fn last_response(&self) -> Option<&Envelope> {
        self.last_response.as_ref()
    }

    /// Runs one exchange and returns everything the reply carried.
    pub fn exchange<T, R>(&mut self, transport: &mut T, request: &R) -> Result<Reply<R::Output>>
    where
        T: FrameTransport + ?Sized,
        R: Request + ?Sized,
    {
        let (document, body) = self.prepare(request)?;

        match self.transmit(transport, request, document, body) {
            Ok(reply) => Ok(reply),
            Err(error) => {
                self.session.clear();
                self.observer.on_event(&ClientEvent::ExchangeFailed {
                    operation: request.name(),
                    error: &error,
                });
                Err(error)
            }
        }
    }

    /// Runs one exchange and returns only the distilled result.
    pub fn send<T, R>(&mut self, transport: &mut T, request: &R) -> Result<R::Output>
    where
        T: FrameTransport + ?Sized,
        R: Request + ?Sized,
    {
        self.exchange(transport, request).map(|reply| reply.result)
    }

    /// Composes the document with the current ticket and serializes it.
    /// Failures here happen before any I/O and leave the session alone.
    pub(crate) fn prepare<R>(&self, request: &R) -> Result<(Envelope, Vec<u8>)>
    where
        R: Request + ?Sized,
    {
        let mut document = request.compose()?;
        document.attach_ticket(self.session.ticket());
        let body = document.to_bytes()?;
        Ok((document, body))
    }

    fn transmit<T, R>(
        &mut self,
        transport: &mut T,
        request: &R,
        document: Envelope,
        body: Vec<u8>,
    ) -> Result<Reply<R::Output>>
    where
        T: FrameTransport + ?Sized,
        R: Request + ?Sized,
    {
        self.last_request = Some(document);
        self.last_response = None;

        self.observer.on_event(&ClientEvent::Sending {
            operation: request.name(),
            bytes: body.len(),
        });
        transport.write_frame(&body)?;

        let reply_body = transport.read_frame()?;
        let envelope = Envelope::parse(&reply_body)?;
        let reply = request.parse_response(&envelope);
        self.last_response = Some(envelope);
        let reply = reply?;

        self.observer.on_event(&ClientEvent::Received {
            operation: request.name(),
            bytes: reply_body.len(),
            status: &reply.status,
        });
        self.session.set(reply.ticket.clone());

        Ok(reply)
    }
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProtocolEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolEngine")
            .field("session", &self.session)
            .field("last_request", &self.last_request.is_some())
            .field("last_response", &self.last_response.is_some())
            .finish()
    }
}
