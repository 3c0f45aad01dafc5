//! Domain objects
//!
//! Plain structs mapped to and from the XML fragments the server uses. The
//! protocol engine never touches these; requests call them while distilling
//! a reply.

pub mod customer;
pub mod sales_order_item;
pub mod tag;

pub use customer::Customer;
pub use sales_order_item::SalesOrderItem;
pub use tag::{Location, Tag, TrackingItem};

use fishbowl_common::xml::element::child_text;
use fishbowl_common::{FishbowlError, Result};
use xmltree::Element;

/// Reads a `true`/`false` child, tolerating case and surrounding blanks.
pub(crate) fn child_bool(element: &Element, name: &str) -> Result<Option<bool>> {
    match child_text(element, name) {
        Some(text) => match text.to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(FishbowlError::ProtocolError(format!(
                "<{}> in <{}> is not a boolean: {:?}",
                name, element.name, text
            ))),
        },
        None => Ok(None),
    }
}

/// Appends `<name>value</name>` when the value is present.
pub(crate) fn push_opt(children: &mut Vec<Element>, name: &str, value: Option<impl ToString>) {
    if let Some(value) = value {
        children.push(fishbowl_common::xml::element::text_element(
            name,
            value.to_string(),
        ));
    }
}
