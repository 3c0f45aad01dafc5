//! Fishbowl client
//!
//! Session-aware client for the Fishbowl XML protocol.
//!
//! # Components
//!
//! - [`Client`]: connection lifecycle, login, `send`, diagnostics
//! - [`ProtocolEngine`]: compose → ticket → frame → parse → distill
//! - [`Session`]: the ticket echoed on every request
//! - [`observer`]: injected event hook, `tracing` by default
//! - [`requests`] / [`objects`]: the request catalog and its domain types
//! - [`registry`]: name → request constructor table for dynamic callers
//!
//! # Example
//!
//! ```no_run
//! use fishbowl_client::requests::VoidSalesOrder;
//! use fishbowl_client::Client;
//! use serde_json::json;
//!
//! let mut client = Client::with_host("erp.local").unwrap();
//! client.connect().unwrap().login("admin", "secret").unwrap();
//!
//! client.send(&VoidSalesOrder::new("SO-1001")).unwrap();
//! let customer = client.call("get_customer", json!({"name": "Acme"})).unwrap();
//! println!("{}", customer);
//! ```

pub mod client;
pub mod engine;
pub mod objects;
pub mod observer;
pub mod registry;
pub mod requests;
pub mod session;

pub use client::Client;
pub use engine::ProtocolEngine;
pub use observer::{ClientEvent, NoopObserver, Observer, TracingObserver};
pub use registry::{DynRequest, OperationRegistry};
pub use session::Session;

pub use fishbowl_common::{FishbowlError, IoPhase, Reply, Request, Result, Status, Ticket};
pub use fishbowl_common::transport::Endpoint;
