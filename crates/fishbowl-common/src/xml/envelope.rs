//! Message envelope
//!
//! Every document on the wire has the same outer shape:
//!
//! ```text
//! <FbiXml>
//!   <Ticket>...</Ticket>          (first child, requests always carry one)
//!   <FbiMsgsRq>                   (FbiMsgsRs on replies)
//!     <SomeOperationRq>...</SomeOperationRq>
//!   </FbiMsgsRq>
//! </FbiXml>
//! ```

use std::borrow::Cow;

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::protocol::error::{FishbowlError, Result};
use crate::protocol::ticket::{Ticket, TICKET_ELEMENT};
use crate::protocol::Status;
use crate::xml::element::{child_elements, find_descendant};

pub const ROOT_ELEMENT: &str = "FbiXml";
pub const REQUEST_SECTION: &str = "FbiMsgsRq";
pub const RESPONSE_SECTION: &str = "FbiMsgsRs";

const STATUS_CODE_ATTR: &str = "statusCode";
const STATUS_MESSAGE_ATTR: &str = "statusMessage";

/// A parsed or composed protocol document.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    root: Element,
}

impl Envelope {
    /// Wraps one operation element as an outbound request document.
    pub fn request(message: Element) -> Self {
        Self::wrap(REQUEST_SECTION, message)
    }

    fn wrap(section: &str, message: Element) -> Self {
        let mut section = Element::new(section);
        section.children.push(XMLNode::Element(message));

        let mut root = Element::new(ROOT_ELEMENT);
        root.children.push(XMLNode::Element(section));
        Self { root }
    }

    /// Accepts an already-built tree, checking only the root name.
    pub fn from_element(root: Element) -> Result<Self> {
        if root.name != ROOT_ELEMENT {
            return Err(FishbowlError::ProtocolError(format!(
                "expected <{}> document root, found <{}>",
                ROOT_ELEMENT, root.name
            )));
        }
        Ok(Self { root })
    }

    /// Parses a frame body.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let root = Element::parse(body)?;
        Self::from_element(root)
    }

    /// Serializes the document as UTF-8 XML, without indentation.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let config = EmitterConfig::new()
            .perform_indent(false)
            .write_document_declaration(true);
        self.root.write_with_config(&mut out, config)?;
        Ok(out)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    /// The `FbiMsgsRq`/`FbiMsgsRs` section: the first non-ticket child.
    pub fn section(&self) -> Option<&Element> {
        child_elements(&self.root).find(|child| child.name != TICKET_ELEMENT)
    }

    /// The operation element inside the section.
    pub fn message(&self) -> Option<&Element> {
        self.section().and_then(|section| child_elements(section).next())
    }

    /// First element named `name` anywhere in the document.
    pub fn find(&self, name: &str) -> Option<&Element> {
        find_descendant(&self.root, name)
    }

    /// The ticket carried by this document, if it has a non-empty one.
    pub fn ticket(&self) -> Option<Ticket> {
        self.root
            .get_child(TICKET_ELEMENT)
            .cloned()
            .and_then(Ticket::from_element)
    }

    /// Puts `ticket` (or an empty placeholder) first under the root,
    /// replacing any ticket already there.
    pub fn attach_ticket(&mut self, ticket: Option<&Ticket>) {
        self.root.children.retain(|node| {
            node.as_element()
                .map_or(true, |element| element.name != TICKET_ELEMENT)
        });
        let element = match ticket {
            Some(ticket) => ticket.as_element().clone(),
            None => Ticket::placeholder(),
        };
        self.root.children.insert(0, XMLNode::Element(element));
    }

    /// Reads `statusCode`/`statusMessage` from the section and the operation
    /// element.
    ///
    /// A failing code on the operation element wins, since the section can
    /// report 1000 while the operation itself was refused. Otherwise the
    /// section's status is used, then the operation's.
    pub fn status(&self) -> Result<Status> {
        let section = self.section().map(status_of).transpose()?.flatten();
        let operation = self.message().map(status_of).transpose()?.flatten();

        let status = match (section, operation) {
            (_, Some(operation)) if !operation.is_success() => operation,
            (Some(section), _) => section,
            (None, Some(operation)) => operation,
            (None, None) => Status::new(None, None),
        };
        Ok(status)
    }

    /// Lossy string rendering for logs and diagnostics.
    pub fn to_xml_string(&self) -> Cow<'static, str> {
        match self.to_bytes() {
            Ok(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
            Err(_) => Cow::Borrowed("<unserializable envelope>"),
        }
    }
}

/// The status carried by one element, `None` without a `statusCode`.
fn status_of(element: &Element) -> Result<Option<Status>> {
    let Some(code) = element.attributes.get(STATUS_CODE_ATTR) else {
        return Ok(None);
    };
    let code = code.trim().parse::<u32>().map_err(|_| {
        FishbowlError::ProtocolError(format!(
            "non-numeric statusCode {:?} on <{}>",
            code, element.name
        ))
    })?;
    let message = element.attributes.get(STATUS_MESSAGE_ATTR).cloned();
    Ok(Some(Status::new(Some(code), message)))
}
