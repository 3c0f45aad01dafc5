pub mod element;
pub mod envelope;

pub use envelope::{Envelope, REQUEST_SECTION, RESPONSE_SECTION, ROOT_ELEMENT};
