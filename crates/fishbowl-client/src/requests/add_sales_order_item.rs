use fishbowl_common::xml::element::{element_with, text_element};
use fishbowl_common::{Envelope, FishbowlError, Request, Result};
use serde::{Deserialize, Serialize};

use super::required;
use crate::objects::SalesOrderItem;

/// `AddSOItemRq`: append a line to an existing sales order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddSalesOrderItem {
    pub order_number: Option<String>,
    pub item: Option<SalesOrderItem>,
}

impl AddSalesOrderItem {
    pub const NAME: &'static str = "add_sales_order_item";

    pub fn new(order_number: impl Into<String>, item: SalesOrderItem) -> Self {
        Self {
            order_number: Some(order_number.into()),
            item: Some(item),
        }
    }
}

impl Request for AddSalesOrderItem {
    type Output = Option<SalesOrderItem>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compose(&self) -> Result<Envelope> {
        let order_number = required("order_number", self.order_number.as_deref())?;
        let item = self.item.as_ref().ok_or_else(|| {
            FishbowlError::ValidationError("Must provide a sales order item".to_string())
        })?;
        item.validate()?;

        Ok(Envelope::request(element_with(
            "AddSOItemRq",
            [text_element("OrderNum", order_number), item.to_xml()],
        )))
    }

    /// The server echoes the stored line, with its assigned ID, when it has one.
    fn distill(&self, response: &Envelope) -> Result<Self::Output> {
        response
            .find(SalesOrderItem::ELEMENT)
            .map(SalesOrderItem::from_xml)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::fixtures::reply;
    use fishbowl_common::xml::element::child_text;

    #[test]
    fn test_compose() {
        let request = AddSalesOrderItem::new("SO-7", SalesOrderItem::new("B201", 3.0));
        let envelope = request.compose().unwrap();
        let message = envelope.message().unwrap();

        assert_eq!(message.name, "AddSOItemRq");
        assert_eq!(child_text(message, "OrderNum").as_deref(), Some("SO-7"));
        let item = message.get_child("SalesOrderItem").unwrap();
        assert_eq!(child_text(item, "ProductNumber").as_deref(), Some("B201"));
    }

    #[test]
    fn test_compose_requires_order_number() {
        let request = AddSalesOrderItem {
            order_number: None,
            item: Some(SalesOrderItem::new("B201", 1.0)),
        };
        assert!(matches!(
            request.compose(),
            Err(FishbowlError::ValidationError(_))
        ));
    }

    #[test]
    fn test_compose_requires_item() {
        let request = AddSalesOrderItem {
            order_number: Some("SO-7".to_string()),
            item: None,
        };
        assert!(matches!(
            request.compose(),
            Err(FishbowlError::ValidationError(_))
        ));
    }

    #[test]
    fn test_compose_validates_item() {
        let request = AddSalesOrderItem::new("SO-7", SalesOrderItem::new("", 1.0));
        assert!(matches!(
            request.compose(),
            Err(FishbowlError::ValidationError(_))
        ));
    }

    #[test]
    fn test_distill_echoed_item() {
        let response = reply(
            "<AddSOItemRs statusCode=\"1000\"><SalesOrderItem><ID>44</ID><ProductNumber>B201</ProductNumber><Quantity>3</Quantity></SalesOrderItem></AddSOItemRs>",
        );
        let request = AddSalesOrderItem::new("SO-7", SalesOrderItem::new("B201", 3.0));
        let item = request.distill(&response).unwrap().unwrap();
        assert_eq!(item.id, Some(44));
        assert_eq!(item.quantity, 3.0);
    }

    #[test]
    fn test_distill_without_echo() {
        let response = reply("<AddSOItemRs statusCode=\"1000\"/>");
        let request = AddSalesOrderItem::new("SO-7", SalesOrderItem::new("B201", 3.0));
        assert_eq!(request.distill(&response).unwrap(), None);
    }
}
