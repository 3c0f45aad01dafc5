use fishbowl_common::xml::element::{element_with, text_element};
use fishbowl_common::{Envelope, Request, Result};
use serde::{Deserialize, Serialize};

use super::required;

/// `VoidSORq`: void a sales order by number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoidSalesOrder {
    pub so_number: Option<String>,
}

impl VoidSalesOrder {
    pub const NAME: &'static str = "void_sales_order";

    pub fn new(so_number: impl Into<String>) -> Self {
        Self {
            so_number: Some(so_number.into()),
        }
    }
}

impl Request for VoidSalesOrder {
    type Output = ();

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compose(&self) -> Result<Envelope> {
        let so_number = required("so_number", self.so_number.as_deref())?;
        Ok(Envelope::request(element_with(
            "VoidSORq",
            [text_element("SONumber", so_number)],
        )))
    }

    fn distill(&self, _response: &Envelope) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::fixtures::reply;
    use fishbowl_common::xml::element::child_text;
    use fishbowl_common::FishbowlError;

    #[test]
    fn test_compose() {
        let envelope = VoidSalesOrder::new("SO-1001").compose().unwrap();
        let message = envelope.message().unwrap();
        assert_eq!(message.name, "VoidSORq");
        assert_eq!(child_text(message, "SONumber").as_deref(), Some("SO-1001"));
    }

    #[test]
    fn test_compose_requires_number() {
        match VoidSalesOrder::default().compose() {
            Err(FishbowlError::ValidationError(msg)) => assert!(msg.contains("so_number")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_status_reaches_caller() {
        let response = reply(r#"<VoidSORs statusCode="1000"/>"#);
        let reply = VoidSalesOrder::new("SO-1001").parse_response(&response).unwrap();
        assert_eq!(reply.status.code, Some(1000));
    }
}
