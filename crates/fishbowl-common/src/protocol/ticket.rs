//! Session ticket
//!
//! The server hands out a ticket after a successful exchange and expects it
//! back, verbatim, on every later request. The ticket is kept as the raw
//! `<Ticket>` element: the client never interprets it beyond checking that
//! it is not empty.

use xmltree::Element;

use crate::xml::element::{child_text, element_with, is_blank, text_element};

/// Element name of the ticket inside the envelope root.
pub const TICKET_ELEMENT: &str = "Ticket";

/// An opaque session ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    element: Element,
}

impl Ticket {
    /// Wraps a `<Ticket>` element received from the server.
    ///
    /// Returns `None` for elements with a different name and for empty
    /// tickets (`<Ticket/>`), which the server sends on replies that do not
    /// carry session state.
    pub fn from_element(element: Element) -> Option<Self> {
        if element.name != TICKET_ELEMENT || is_blank(&element) {
            return None;
        }
        Some(Self { element })
    }

    /// Builds a ticket carrying a `<Key>` child, the shape the server uses.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            element: element_with(TICKET_ELEMENT, [text_element("Key", key)]),
        }
    }

    /// The empty `<Ticket/>` sent before the server has issued one.
    pub fn placeholder() -> Element {
        Element::new(TICKET_ELEMENT)
    }

    /// The session key, when the ticket has the usual `<Key>` child.
    pub fn key(&self) -> Option<String> {
        child_text(&self.element, "Key")
    }

    pub fn as_element(&self) -> &Element {
        &self.element
    }

    pub fn into_element(self) -> Element {
        self.element
    }
}
