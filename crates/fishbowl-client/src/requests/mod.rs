//! Request catalog
//!
//! Each request turns its fields into an `FbiMsgsRq` payload and distills
//! the matching reply. None of them see the socket or the ticket, so they
//! are unit-tested here against canned envelopes.

pub mod add_sales_order_item;
pub mod get_customer;
pub mod get_part_tag;
pub mod login;
pub mod void_sales_order;

pub use add_sales_order_item::AddSalesOrderItem;
pub use get_customer::GetCustomer;
pub use get_part_tag::GetPartTag;
pub use login::{AppIdentity, Login};
pub use void_sales_order::VoidSalesOrder;

use fishbowl_common::{FishbowlError, Result};

/// Returns the trimmed value, or a `ValidationError` naming the field.
pub(crate) fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(FishbowlError::ValidationError(format!(
            "Must provide {}",
            field
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("name", Some(" Acme ")).unwrap(), "Acme");
        assert!(matches!(
            required("name", Some("  ")),
            Err(FishbowlError::ValidationError(msg)) if msg == "Must provide name"
        ));
        assert!(required("name", None).is_err());
    }
}
