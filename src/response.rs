//! checkVat response parsing.
//!
//! VIES answers are flat, stable XML, so the parser streams events and
//! captures the first occurrence of each expected tag by its local name,
//! ignoring namespace prefixes. Nested or reordered documents are not a
//! concern the service has ever presented.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::{Deserialize, Serialize};

use crate::catalog::readable_fault_message;
use crate::error::VatError;

/// Outcome of a VIES checkVat lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatCheck {
    /// Country code the lookup ran against.
    pub country_code: String,
    /// VAT number part, without the country prefix.
    pub vat_number: String,
    /// Whether the VAT ID is registered and currently valid.
    pub valid: bool,
    /// `true` when the member state database answered; `false` when it
    /// was down and validity was presumed.
    pub server_validated: bool,
    /// Registered trader name, or empty if not disclosed.
    pub name: String,
    /// Registered address on a single line, or empty if not disclosed.
    pub address: String,
}

#[derive(Clone, Copy)]
enum Slot {
    CountryCode,
    VatNumber,
    Valid,
    Name,
    Address,
    FaultCode,
    FaultString,
}

/// First-occurrence capture of the tags a checkVat answer can carry.
#[derive(Default)]
struct Captured {
    country_code: Option<String>,
    vat_number: Option<String>,
    valid: Option<String>,
    name: Option<String>,
    address: Option<String>,
    fault_code: Option<String>,
    fault_string: Option<String>,
    /// A `Fault` element with actual content was seen. An empty
    /// `<soap:Fault></soap:Fault>` does not count.
    fault_present: bool,
}

impl Captured {
    fn open_slot(&self, local_name: &[u8]) -> Option<Slot> {
        match local_name {
            b"countryCode" if self.country_code.is_none() => Some(Slot::CountryCode),
            b"vatNumber" if self.vat_number.is_none() => Some(Slot::VatNumber),
            b"valid" if self.valid.is_none() => Some(Slot::Valid),
            b"name" if self.name.is_none() => Some(Slot::Name),
            b"address" if self.address.is_none() => Some(Slot::Address),
            b"faultcode" if self.fault_code.is_none() => Some(Slot::FaultCode),
            b"faultstring" if self.fault_string.is_none() => Some(Slot::FaultString),
            _ => None,
        }
    }

    fn commit(&mut self, slot: Slot, text: &str) {
        let dest = match slot {
            Slot::CountryCode => &mut self.country_code,
            Slot::VatNumber => &mut self.vat_number,
            Slot::Valid => &mut self.valid,
            Slot::Name => &mut self.name,
            Slot::Address => &mut self.address,
            Slot::FaultCode => &mut self.fault_code,
            Slot::FaultString => &mut self.fault_string,
        };
        if dest.is_none() {
            *dest = Some(text.trim().to_string());
        }
    }
}

/// Parse the raw body of a checkVat call.
///
/// Returns the [`VatCheck`] on success (always `server_validated: true`
/// on this path — the degraded-service fallback is decided by the
/// caller, not the parser).
///
/// # Errors
///
/// - [`VatError::RemoteFault`] when the body carries a non-empty SOAP
///   fault; the faultstring is resolved through the message catalog.
/// - [`VatError::MalformedResponse`] when a required tag is absent,
///   naming the first missing tag and attaching the raw body.
pub fn parse_check_vat_response(body: &str) -> Result<VatCheck, VatError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut captured = Captured::default();
    let mut fault_depth = 0usize;
    let mut current: Option<Slot> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if fault_depth > 0 {
                    captured.fault_present = true;
                    fault_depth += 1;
                } else if e.name().local_name().as_ref() == b"Fault" {
                    fault_depth = 1;
                }
                current = captured.open_slot(e.name().local_name().as_ref());
                text.clear();
            }
            Ok(Event::Empty(_)) => {
                // Self-closing tags carry no text and fill no slot, but
                // they do make a surrounding fault non-empty.
                if fault_depth > 0 {
                    captured.fault_present = true;
                }
                current = None;
            }
            Ok(Event::Text(ref t)) => {
                if fault_depth > 0 {
                    captured.fault_present = true;
                }
                if current.is_some() {
                    text.push_str(&t.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(_)) => {
                if fault_depth > 0 {
                    fault_depth -= 1;
                }
                if let Some(slot) = current.take() {
                    captured.commit(slot, &text);
                }
            }
            Ok(Event::Eof) => break,
            // A body the reader cannot make sense of is not an error of
            // its own: stop reading and let the missing-field checks
            // below report what the document lacked.
            Err(_) => break,
            _ => {}
        }
    }

    if captured.fault_present {
        let faultstring = captured
            .fault_string
            .ok_or_else(|| malformed("faultstring", body))?;
        let code = captured
            .fault_code
            .ok_or_else(|| malformed("faultcode", body))?;
        return Err(VatError::RemoteFault {
            code,
            message: readable_fault_message(&faultstring).to_string(),
        });
    }

    let country_code = captured
        .country_code
        .ok_or_else(|| malformed("countryCode", body))?;
    let vat_number = captured
        .vat_number
        .ok_or_else(|| malformed("vatNumber", body))?;
    let valid = captured.valid.ok_or_else(|| malformed("valid", body))? == "true";
    let name = captured.name.ok_or_else(|| malformed("name", body))?;
    let address = captured.address.ok_or_else(|| malformed("address", body))?;

    Ok(VatCheck {
        country_code,
        vat_number,
        valid,
        server_validated: true,
        name,
        // Member states return multi-line addresses; fold them for
        // single-line display.
        address: address.replace('\n', ", "),
    })
}

fn malformed(field: &str, body: &str) -> VatError {
    VatError::MalformedResponse {
        field: field.to_string(),
        body: body.to_string(),
    }
}
