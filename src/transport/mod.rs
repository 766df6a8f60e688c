//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod response;
mod send_bulk;
mod send_sms;

pub use response::{TransportError, decode_json_response};
pub use send_bulk::encode_send_bulk_body;
pub use send_sms::encode_send_sms_body;
