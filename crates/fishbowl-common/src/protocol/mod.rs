pub mod error;
pub mod request;
pub mod ticket;

pub use error::{FishbowlError, IoPhase, Result};
pub use request::{Reply, Request, Status, SUCCESS_CODE};
pub use ticket::{Ticket, TICKET_ELEMENT};
