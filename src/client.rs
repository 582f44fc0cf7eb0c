//! checkVat orchestration against the live VIES service.

use std::time::Duration;

use reqwest::header;
use tracing::{debug, warn};

use crate::countries::is_eu_vat_country;
use crate::envelope::build_check_vat_envelope;
use crate::error::VatError;
use crate::response::{VatCheck, parse_check_vat_response};

/// The VIES checkVat SOAP endpoint.
pub const VIES_ENDPOINT: &str =
    "https://ec.europa.eu/taxation_customs/vies/services/checkVatService";

const SOAP_ACTION: &str = "urn:ec.europa.eu:taxud:vies:services:checkVat/checkVat";

/// Fault code VIES returns when a member state's source data server is
/// down. Only this exact code triggers the presume-valid fallback.
const SOURCE_SERVER_DOWN: &str = "soap:Server";

const CLIENT_USER_AGENT: &str = concat!("ustid/", env!("CARGO_PKG_VERSION"));

/// Split a VAT ID into its country code and number, by format only.
///
/// The input must carry the 2-letter VIES country prefix (e.g.
/// "DE123456789"); the number part must be 2 to 13 uppercase
/// alphanumerics. No network call is made.
///
/// # Errors
///
/// [`VatError::InvalidCountry`] when the prefix is not a VIES country
/// code (checked first), [`VatError::InvalidNumber`] when the number
/// part fails the shape check.
pub fn split_vat_id(vat_id: &str) -> Result<(&str, &str), VatError> {
    let country_code = vat_id
        .get(..2)
        .filter(|code| is_eu_vat_country(code))
        .ok_or_else(|| VatError::InvalidCountry(vat_id.to_string()))?;

    let vat_number = &vat_id[2..];
    let shape_ok = (2..=13).contains(&vat_number.len())
        && vat_number
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if !shape_ok {
        return Err(VatError::InvalidNumber(vat_id.to_string()));
    }

    Ok((country_code, vat_number))
}

/// Validate a VAT ID against VIES.
///
/// Checks the format locally first, then asks the member state's
/// database through the checkVat operation. `timeout` bounds the whole
/// network call; `None` leaves it to the transport defaults.
///
/// When VIES reports that the member state's own database is down
/// (fault code `soap:Server`), the ID is presumed valid rather than
/// blocking the caller: the result then carries `valid: true` with
/// `server_validated: false` and empty trader details.
///
/// ```no_run
/// # async fn run() -> Result<(), ustid::VatError> {
/// use std::time::Duration;
///
/// let check = ustid::check_vat("DE123456789", Some(Duration::from_secs(10))).await?;
/// if check.valid {
///     println!("{} — {}", check.name, check.address);
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// [`VatError::InvalidCountry`] / [`VatError::InvalidNumber`] for local
/// format failures (no request is sent), [`VatError::RemoteFault`] for
/// SOAP faults other than the fallback case,
/// [`VatError::MalformedResponse`] when the body matches neither the
/// success nor the fault shape, and [`VatError::Timeout`] /
/// [`VatError::Transport`] for failures of the call itself.
pub async fn check_vat(vat_id: &str, timeout: Option<Duration>) -> Result<VatCheck, VatError> {
    let (country_code, vat_number) = split_vat_id(vat_id)?;
    let envelope = build_check_vat_envelope(country_code, vat_number);

    debug!(
        country_code,
        number_len = vat_number.len(),
        "querying VIES checkVat"
    );

    let client = reqwest::Client::builder()
        .build()
        .map_err(VatError::from_transport)?;

    let mut request = client
        .post(VIES_ENDPOINT)
        .header(header::CONTENT_TYPE, "application/xml")
        .header(header::ACCEPT, "application/xml,text/xml")
        .header(header::ACCEPT_ENCODING, "none")
        .header(header::ACCEPT_CHARSET, "utf-8")
        .header(header::CONNECTION, "close")
        .header("SOAPAction", SOAP_ACTION)
        .header(header::USER_AGENT, CLIENT_USER_AGENT)
        .body(envelope);
    if let Some(limit) = timeout {
        request = request.timeout(limit);
    }

    let response = request.send().await.map_err(VatError::from_transport)?;
    // VIES delivers SOAP faults with a 500 status; the body is parsed
    // regardless of the HTTP status.
    let body = response.text().await.map_err(VatError::from_transport)?;

    debug!(bytes = body.len(), "VIES response received");

    settle(parse_check_vat_response(&body), country_code, vat_number)
}

/// Apply the degraded-service policy to a parse outcome.
///
/// A member state keeping its source data server down must not block
/// integrators' business flows, so a `soap:Server` fault turns into a
/// presumed-valid result. Every other outcome passes through.
fn settle(
    parsed: Result<VatCheck, VatError>,
    country_code: &str,
    vat_number: &str,
) -> Result<VatCheck, VatError> {
    match parsed {
        Err(VatError::RemoteFault { ref code, .. }) if code == SOURCE_SERVER_DOWN => {
            warn!(
                country_code,
                "VIES source data server down, presuming VAT ID valid"
            );
            Ok(VatCheck {
                country_code: country_code.to_string(),
                vat_number: vat_number.to_string(),
                valid: true,
                server_validated: false,
                name: String::new(),
                address: String::new(),
            })
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- split_vat_id ---

    #[test]
    fn split_valid_id() {
        let (cc, num) = split_vat_id("DE123456789").unwrap();
        assert_eq!(cc, "DE");
        assert_eq!(num, "123456789");
    }

    #[test]
    fn unknown_country_rejected_before_shape() {
        // The number part would also fail the shape check, but the
        // country check comes first.
        assert!(matches!(
            split_vat_id("XXabc").unwrap_err(),
            VatError::InvalidCountry(_)
        ));
    }

    #[test]
    fn number_too_short() {
        assert!(matches!(
            split_vat_id("DE1").unwrap_err(),
            VatError::InvalidNumber(_)
        ));
    }

    #[test]
    fn number_too_long() {
        assert!(matches!(
            split_vat_id("DE12345678901234").unwrap_err(),
            VatError::InvalidNumber(_)
        ));
    }

    #[test]
    fn lowercase_rejected() {
        assert!(matches!(
            split_vat_id("DEx23456789").unwrap_err(),
            VatError::InvalidNumber(_)
        ));
    }

    #[test]
    fn symbols_rejected() {
        assert!(matches!(
            split_vat_id("DE12345678-").unwrap_err(),
            VatError::InvalidNumber(_)
        ));
    }

    #[test]
    fn empty_and_short_inputs_are_invalid_country() {
        assert!(matches!(
            split_vat_id("").unwrap_err(),
            VatError::InvalidCountry(_)
        ));
        assert!(matches!(
            split_vat_id("D").unwrap_err(),
            VatError::InvalidCountry(_)
        ));
    }

    #[test]
    fn non_ascii_prefix_is_invalid_country() {
        assert!(matches!(
            split_vat_id("ÄT12345678").unwrap_err(),
            VatError::InvalidCountry(_)
        ));
    }

    // --- fallback policy ---

    fn server_fault() -> VatError {
        VatError::RemoteFault {
            code: "soap:Server".into(),
            message: "Unknown error".into(),
        }
    }

    #[test]
    fn server_fault_presumes_valid() {
        let check = settle(Err(server_fault()), "DE", "123456789").unwrap();
        assert!(check.valid);
        assert!(!check.server_validated);
        assert_eq!(check.country_code, "DE");
        assert_eq!(check.vat_number, "123456789");
        assert!(check.name.is_empty());
        assert!(check.address.is_empty());
    }

    #[test]
    fn client_fault_propagates() {
        let fault = VatError::RemoteFault {
            code: "soap:Client".into(),
            message: "The VAT number part is empty or invalid".into(),
        };
        assert!(matches!(
            settle(Err(fault), "DE", "123456789").unwrap_err(),
            VatError::RemoteFault { code, .. } if code == "soap:Client"
        ));
    }

    #[test]
    fn fault_code_match_is_exact() {
        let fault = VatError::RemoteFault {
            code: "soap:ServerError".into(),
            message: "Unknown error".into(),
        };
        assert!(settle(Err(fault), "DE", "123456789").is_err());
    }

    #[test]
    fn malformed_response_propagates() {
        let err = VatError::MalformedResponse {
            field: "countryCode".into(),
            body: String::new(),
        };
        assert!(matches!(
            settle(Err(err), "DE", "123456789").unwrap_err(),
            VatError::MalformedResponse { .. }
        ));
    }

    #[test]
    fn success_passes_through() {
        let check = VatCheck {
            country_code: "DE".into(),
            vat_number: "123456789".into(),
            valid: true,
            server_validated: true,
            name: "ACME GMBH".into(),
            address: "MUSTERSTR. 1, 10115 BERLIN".into(),
        };
        let settled = settle(Ok(check), "DE", "123456789").unwrap();
        assert!(settled.server_validated);
        assert_eq!(settled.name, "ACME GMBH");
    }
}
