//! HTTP client for the virtual-number provider API.
//!
//! The provider issues rented phone numbers and relays the SMS they
//! receive. Every endpoint answers with a `{success, data, error}`
//! envelope; this crate decodes it into typed results.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_API_URL, DEFAULT_SERVICE, VirtualNumberClient};
pub use error::ProviderError;
pub use types::{ActiveNumber, CountryListing, PurchasedNumberData, SmsMessage};
