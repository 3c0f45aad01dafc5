//! Request contract
//!
//! A request is a pure value: it turns its own fields into an envelope and
//! turns a reply envelope back into a result. It never sees the socket or
//! the session ticket; the engine driving it owns both.

use crate::protocol::error::Result;
use crate::protocol::ticket::Ticket;
use crate::xml::Envelope;

/// Status code the server uses for a successful operation.
pub const SUCCESS_CODE: u32 = 1000;

/// Status reported by the server for one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    /// `None` when the reply carries no status attribute at all.
    pub code: Option<u32>,
    pub message: Option<String>,
}

impl Status {
    pub fn new(code: Option<u32>, message: Option<String>) -> Self {
        Self { code, message }
    }

    /// Only an explicit, non-success code counts as failure.
    pub fn is_success(&self) -> bool {
        self.code.map_or(true, |code| code == SUCCESS_CODE)
    }
}

/// Everything extracted from one reply envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: Status,
    /// Refreshed ticket, `None` when the reply did not carry one.
    pub ticket: Option<Ticket>,
    pub result: T,
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            status: self.status,
            ticket: self.ticket,
            result: f(self.result),
        }
    }
}

/// One protocol operation.
///
/// # Example
///
/// ```
/// use fishbowl_common::protocol::{Request, Result};
/// use fishbowl_common::xml::{element::{text_element, element_with}, Envelope};
///
/// struct Ping;
///
/// impl Request for Ping {
///     type Output = bool;
///
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn compose(&self) -> Result<Envelope> {
///         Ok(Envelope::request(element_with("PingRq", [text_element("Echo", "hi")])))
///     }
///
///     fn distill(&self, response: &Envelope) -> Result<bool> {
///         Ok(response.find("PingRs").is_some())
///     }
/// }
///
/// let envelope = Ping.compose().unwrap();
/// assert_eq!(envelope.message().unwrap().name, "PingRq");
/// ```
pub trait Request {
    /// Domain value produced from a reply. Use `Option<T>` where "no match"
    /// is a legitimate answer, and `()` for operations with nothing to return.
    type Output;

    /// Operation name used in events and the operation registry.
    fn name(&self) -> &'static str;

    /// Builds the outbound document, without ticket.
    ///
    /// Fails with `ValidationError` when required fields are missing; this
    /// runs before any I/O.
    fn compose(&self) -> Result<Envelope>;

    /// Maps the reply to the domain result.
    fn distill(&self, response: &Envelope) -> Result<Self::Output>;

    /// Splits a reply into status, ticket and distilled result.
    fn parse_response(&self, response: &Envelope) -> Result<Reply<Self::Output>> {
        Ok(Reply {
            status: response.status()?,
            ticket: response.ticket(),
            result: self.distill(response)?,
        })
    }
}

impl<R: Request + ?Sized> Request for &R {
    type Output = R::Output;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn compose(&self) -> Result<Envelope> {
        (**self).compose()
    }

    fn distill(&self, response: &Envelope) -> Result<Self::Output> {
        (**self).distill(response)
    }

    fn parse_response(&self, response: &Envelope) -> Result<Reply<Self::Output>> {
        (**self).parse_response(response)
    }
}
