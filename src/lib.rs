//! # ustid
//!
//! EU VAT ID validation against the [VIES](https://ec.europa.eu/taxation_customs/vies/)
//! SOAP service.
//!
//! One call does the whole pipeline: format check, checkVat request,
//! fault handling, and a normalized result.
//!
//! ```no_run
//! # async fn run() -> Result<(), ustid::VatError> {
//! use std::time::Duration;
//!
//! let check = ustid::check_vat("DE123456789", Some(Duration::from_secs(10))).await?;
//! assert!(check.valid);
//! println!("{}: {}", check.name, check.address);
//! # Ok(())
//! # }
//! ```
//!
//! ## Degraded service
//!
//! Member state databases go down regularly. When VIES reports that
//! with a `soap:Server` fault, [`check_vat`] returns `valid: true` with
//! `server_validated: false` instead of failing — the authority being
//! unreachable cannot disprove validity, and it must not block an
//! integrator's order flow. Every other fault is surfaced as a
//! [`VatError`].
//!
//! ## Offline use
//!
//! [`split_vat_id`] checks the format without touching the network, and
//! [`build_check_vat_envelope`] / [`parse_check_vat_response`] are
//! public so callers with their own HTTP stack can drive the SOAP
//! exchange themselves.

mod catalog;
mod client;
mod countries;
mod envelope;
mod error;
mod response;

pub use catalog::readable_fault_message;
pub use client::{VIES_ENDPOINT, check_vat, split_vat_id};
pub use countries::is_eu_vat_country;
pub use envelope::build_check_vat_envelope;
pub use error::VatError;
pub use response::{VatCheck, parse_check_vat_response};
