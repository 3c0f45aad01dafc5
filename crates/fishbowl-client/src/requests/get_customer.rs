use fishbowl_common::xml::element::{element_with, text_element};
use fishbowl_common::{Envelope, Request, Result};
use serde::{Deserialize, Serialize};

use super::required;
use crate::objects::Customer;

/// `CustomerGetRq`: look a customer up by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetCustomer {
    pub name: Option<String>,
}

impl GetCustomer {
    pub const NAME: &'static str = "get_customer";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Request for GetCustomer {
    type Output = Option<Customer>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compose(&self) -> Result<Envelope> {
        let name = required("customer name", self.name.as_deref())?;
        Ok(Envelope::request(element_with(
            "CustomerGetRq",
            [text_element("Name", name)],
        )))
    }

    fn distill(&self, response: &Envelope) -> Result<Self::Output> {
        response
            .find(Customer::ELEMENT)
            .map(Customer::from_xml)
            .transpose()
    }
}
