//! Operation registry
//!
//! An explicit table from operation name to request constructor, so callers
//! holding only a name and JSON arguments (scripts, admin tools, queues) can
//! still go through the typed request catalog.
//!
//! # Example
//!
//! ```
//! use fishbowl_client::registry::OperationRegistry;
//! use serde_json::json;
//!
//! let registry = OperationRegistry::builtin();
//! let request = registry.build("get_customer", json!({"name": "Acme"})).unwrap();
//!
//! assert_eq!(request.name(), "get_customer");
//! assert!(registry.build("launch_rockets", json!({})).is_err());
//! ```

use std::collections::BTreeMap;

use fishbowl_common::{Envelope, FishbowlError, Request, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::requests::{AddSalesOrderItem, GetCustomer, GetPartTag, VoidSalesOrder};

type Constructor = fn(Value) -> Result<DynRequest>;

/// Object-safe view of a request whose output serializes to JSON.
trait ErasedRequest: Send {
    fn operation_name(&self) -> &'static str;
    fn compose_envelope(&self) -> Result<Envelope>;
    fn distill_json(&self, response: &Envelope) -> Result<Value>;
}

impl<R> ErasedRequest for R
where
    R: Request + Send,
    R::Output: Serialize,
{
    fn operation_name(&self) -> &'static str {
        self.name()
    }

    fn compose_envelope(&self) -> Result<Envelope> {
        self.compose()
    }

    fn distill_json(&self, response: &Envelope) -> Result<Value> {
        let output = self.distill(response)?;
        Ok(serde_json::to_value(output)?)
    }
}

/// A request built from the registry; its result is a JSON value.
pub struct DynRequest {
    inner: Box<dyn ErasedRequest>,
}

impl DynRequest {
    pub fn new<R>(request: R) -> Self
    where
        R: Request + Send + 'static,
        R::Output: Serialize,
    {
        Self {
            inner: Box::new(request),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.operation_name()
    }
}

impl std::fmt::Debug for DynRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynRequest")
            .field("name", &self.name())
            .finish()
    }
}

impl Request for DynRequest {
    type Output = Value;

    fn name(&self) -> &'static str {
        self.inner.operation_name()
    }

    fn compose(&self) -> Result<Envelope> {
        self.inner.compose_envelope()
    }

    fn distill(&self, response: &Envelope) -> Result<Value> {
        self.inner.distill_json(response)
    }
}

fn construct<R>(args: Value) -> Result<DynRequest>
where
    R: Request + DeserializeOwned + Send + 'static,
    R::Output: Serialize,
{
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    let request: R = serde_json::from_value(args)
        .map_err(|e| FishbowlError::ValidationError(format!("invalid arguments: {}", e)))?;
    Ok(DynRequest::new(request))
}

/// Name → constructor table.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    constructors: BTreeMap<&'static str, Constructor>,
}

impl OperationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every request of the catalog except `login`, which
    /// has its own entry point on the client.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register::<GetCustomer>(GetCustomer::NAME)
            .register::<GetPartTag>(GetPartTag::NAME)
            .register::<VoidSalesOrder>(VoidSalesOrder::NAME)
            .register::<AddSalesOrderItem>(AddSalesOrderItem::NAME);
        registry
    }

    /// Registers `R` under `name`, replacing any previous entry.
    pub fn register<R>(&mut self, name: &'static str) -> &mut Self
    where
        R: Request + DeserializeOwned + Send + 'static,
        R::Output: Serialize,
    {
        self.constructors.insert(name, construct::<R>);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    /// Builds the request registered under `name` from JSON arguments.
    pub fn build(&self, name: &str, args: Value) -> Result<DynRequest> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| FishbowlError::UnknownOperation(name.to_string()))?;
        constructor(args)
    }
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.constructors.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(inner: &str) -> Envelope {
        Envelope::parse(
            format!(r#"<FbiXml><Ticket/><FbiMsgsRs statusCode="1000">{inner}</FbiMsgsRs></FbiXml>"#)
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_names() {
        let registry = OperationRegistry::builtin();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec![
                "add_sales_order_item",
                "get_customer",
                "get_part_tag",
                "void_sales_order"
            ]
        );
        assert!(!registry.contains("login"));
    }

    #[test]
    fn test_unknown_operation() {
        let err = OperationRegistry::builtin()
            .build("add_inventory", json!({}))
            .unwrap_err();
        assert!(matches!(err, FishbowlError::UnknownOperation(name) if name == "add_inventory"));
    }

    #[test]
    fn test_bad_arguments_are_validation_errors() {
        let err = OperationRegistry::builtin()
            .build("get_customer", json!({"name": 12}))
            .unwrap_err();
        assert!(matches!(err, FishbowlError::ValidationError(_)));
    }

    #[test]
    fn test_null_arguments_reach_request_validation() {
        let request = OperationRegistry::builtin()
            .build("void_sales_order", Value::Null)
            .unwrap();
        assert!(matches!(
            request.compose(),
            Err(FishbowlError::ValidationError(_))
        ));
    }

    #[test]
    fn test_dyn_request_distills_to_json() {
        let request = OperationRegistry::builtin()
            .build("get_customer", json!({"name": "Acme"}))
            .unwrap();

        let envelope = request.compose().unwrap();
        assert_eq!(envelope.message().unwrap().name, "CustomerGetRq");

        let found = request
            .distill(&reply(
                "<CustomerGetRs><Customer><CustomerID>3</CustomerID><Name>Acme</Name></Customer></CustomerGetRs>",
            ))
            .unwrap();
        assert_eq!(found["customer_id"], json!(3));
        assert_eq!(found["name"], json!("Acme"));

        let missing = request.distill(&reply("<CustomerGetRs/>")).unwrap();
        assert_eq!(missing, Value::Null);
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = OperationRegistry::new();
        registry.register::<VoidSalesOrder>("void");

        let request = registry.build("void", json!({"so_number": "SO-9"})).unwrap();
        assert_eq!(request.name(), "void_sales_order");
        assert!(registry.build("get_customer", json!({})).is_err());
    }
}
