//! Typed Rust client for the NextSMS HTTP API.
//!
//! The crate is split into a domain layer of validated types, a transport layer
//! for the JSON wire format, and a small client layer that holds credentials and
//! talks to the gateway.
//!
//! ```rust,no_run
//! use nextsms::{Credentials, MessageText, NextSmsClient, RawPhoneNumber, SendSms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nextsms::NextSmsError> {
//!     let client = NextSmsClient::new(Credentials::new("username", "password")?);
//!     let phone = RawPhoneNumber::new("255757294146")?;
//!     let msg = MessageText::new("hello")?;
//!     let response = client.send(SendSms::with_default_sender(phone, msg)).await?;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{NextSmsClient, NextSmsClientBuilder, NextSmsError};
pub use domain::{
    BulkMessage, Credentials, DEFAULT_REGION, EndpointSet, Endpoints, Environment, MessageText,
    Password, PhoneNumber, RawPhoneNumber, Recipients, SendBulk, SendSms, SenderId, Username,
    ValidationError, normalize_numbers,
};
