//! Fishbowl protocol: shared types and transport
//!
//! This crate holds everything about the wire that does not depend on
//! session state:
//!
//! - **Protocol Layer**: error taxonomy, session ticket, the [`Request`]
//!   contract every operation implements
//! - **XML Layer**: the `FbiXml` envelope and element helpers
//! - **Transport Layer**: length-prefixed frames over a synchronous TCP
//!   connection with separate connect, write and read deadlines
//!
//! # Wire Format
//!
//! - **Transport**: one TCP connection per client
//! - **Serialization**: UTF-8 XML
//! - **Message Format**: `[4-byte length prefix as u32 big-endian] + [XML data]`
//! - **Default Port**: 28192
//!
//! # Example
//!
//! ```
//! use fishbowl_common::xml::{element::text_element, Envelope};
//! use fishbowl_common::Ticket;
//!
//! let mut envelope = Envelope::request(text_element("VoidSORq", ""));
//! envelope.attach_ticket(Some(&Ticket::with_key("abc")));
//!
//! assert_eq!(envelope.ticket().unwrap().key().as_deref(), Some("abc"));
//! ```

pub mod protocol;
pub mod transport;
pub mod xml;

pub use protocol::*;
pub use xml::Envelope;
