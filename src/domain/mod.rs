//! Domain layer: strong types with validation and invariants (no I/O).

mod credentials;
mod environment;
mod request;
mod validation;
mod value;

pub use credentials::Credentials;
pub use environment::{EndpointSet, Endpoints, Environment};
pub use request::{BulkMessage, SendBulk, SendSms};
pub use validation::ValidationError;
pub use value::{
    DEFAULT_REGION, MessageText, Password, PhoneNumber, RawPhoneNumber, Recipients, SenderId,
    Username, normalize_numbers,
};
