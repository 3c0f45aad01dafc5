use fishbowl_common::xml::element::{child_int, child_text, element_with};
use fishbowl_common::{FishbowlError, Result};
use serde::{Deserialize, Serialize};
use xmltree::Element;

use super::{child_bool, push_opt};

/// Item type code for an ordinary sale line.
pub const ITEM_TYPE_SALE: u32 = 10;

/// One line of a sales order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesOrderItem {
    pub id: Option<u32>,
    pub product_number: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub uom_code: Option<String>,
    pub product_price: Option<f64>,
    pub item_type: u32,
    pub taxable: bool,
    pub new_item: bool,
    pub line_number: Option<u32>,
    pub note: Option<String>,
}

impl Default for SalesOrderItem {
    fn default() -> Self {
        Self {
            id: None,
            product_number: String::new(),
            description: None,
            quantity: 1.0,
            uom_code: None,
            product_price: None,
            item_type: ITEM_TYPE_SALE,
            taxable: false,
            new_item: true,
            line_number: None,
            note: None,
        }
    }
}

impl SalesOrderItem {
    pub const ELEMENT: &'static str = "SalesOrderItem";

    pub fn new(product_number: impl Into<String>, quantity: f64) -> Self {
        Self {
            product_number: product_number.into(),
            quantity,
            ..Self::default()
        }
    }

    /// Checks the fields the server refuses to do without.
    pub fn validate(&self) -> Result<()> {
        if self.product_number.trim().is_empty() {
            return Err(FishbowlError::ValidationError(
                "sales order item needs a product_number".to_string(),
            ));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(FishbowlError::ValidationError(format!(
                "sales order item quantity must be positive, got {}",
                self.quantity
            )));
        }
        Ok(())
    }

    pub fn to_xml(&self) -> Element {
        let mut children = Vec::new();
        push_opt(&mut children, "ID", self.id);
        push_opt(&mut children, "ProductNumber", Some(&self.product_number));
        push_opt(&mut children, "Description", self.description.as_ref());
        push_opt(&mut children, "Quantity", Some(self.quantity));
        push_opt(&mut children, "UOMCode", self.uom_code.as_ref());
        push_opt(&mut children, "ProductPrice", self.product_price);
        push_opt(&mut children, "ItemType", Some(self.item_type));
        push_opt(&mut children, "Taxable", Some(self.taxable));
        push_opt(&mut children, "NewItemFlag", Some(self.new_item));
        push_opt(&mut children, "LineNumber", self.line_number);
        push_opt(&mut children, "Note", self.note.as_ref());
        element_with(Self::ELEMENT, children)
    }

    pub fn from_xml(element: &Element) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            id: child_int(element, "ID")?,
            product_number: child_text(element, "ProductNumber").unwrap_or_default(),
            description: child_text(element, "Description"),
            quantity: parse_decimal(element, "Quantity")?.unwrap_or(defaults.quantity),
            uom_code: child_text(element, "UOMCode"),
            product_price: parse_decimal(element, "ProductPrice")?,
            item_type: child_int(element, "ItemType")?.unwrap_or(defaults.item_type),
            taxable: child_bool(element, "Taxable")?.unwrap_or(defaults.taxable),
            new_item: child_bool(element, "NewItemFlag")?.unwrap_or(defaults.new_item),
            line_number: child_int(element, "LineNumber")?,
            note: child_text(element, "Note"),
        })
    }
}

fn parse_decimal(element: &Element, name: &str) -> Result<Option<f64>> {
    child_text(element, name)
        .map(|text| {
            text.parse::<f64>().map_err(|_| {
                FishbowlError::ProtocolError(format!(
                    "<{}> in <{}> is not a number: {:?}",
                    name, element.name, text
                ))
            })
        })
        .transpose()
}
