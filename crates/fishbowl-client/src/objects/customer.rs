use fishbowl_common::xml::element::{child_int, child_text};
use fishbowl_common::Result;
use serde::{Deserialize, Serialize};
use xmltree::Element;

use super::child_bool;

/// A customer record as returned by `CustomerGetRq`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub customer_id: Option<u32>,
    pub account_id: Option<u32>,
    pub name: Option<String>,
    pub number: Option<String>,
    pub status: Option<String>,
    pub credit_limit: Option<String>,
    pub tax_exempt: Option<bool>,
    pub tax_exempt_number: Option<String>,
    pub default_salesman: Option<String>,
    pub default_payment_terms: Option<String>,
    pub note: Option<String>,
    pub active: Option<bool>,
}

impl Customer {
    pub const ELEMENT: &'static str = "Customer";

    pub fn from_xml(element: &Element) -> Result<Self> {
        Ok(Self {
            customer_id: child_int(element, "CustomerID")?,
            account_id: child_int(element, "AccountID")?,
            name: child_text(element, "Name"),
            number: child_text(element, "Number"),
            status: child_text(element, "Status"),
            credit_limit: child_text(element, "CreditLimit"),
            tax_exempt: child_bool(element, "TaxExempt")?,
            tax_exempt_number: child_text(element, "TaxExemptNumber"),
            default_salesman: child_text(element, "DefaultSalesman"),
            default_payment_terms: child_text(element, "DefPaymentTerms"),
            note: child_text(element, "Note"),
            active: child_bool(element, "ActiveFlag")?,
        })
    }
}
