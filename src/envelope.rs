//! SOAP 1.1 request envelope for the VIES checkVat operation.

/// Render the checkVat request envelope.
///
/// `country_code` and `vat_number` must already have passed
/// [`split_vat_id`](crate::split_vat_id): both are uppercase
/// alphanumeric only, so no XML escaping is required here.
///
/// Output is deterministic — identical inputs produce byte-identical
/// envelopes.
pub fn build_check_vat_envelope(country_code: &str, vat_number: &str) -> String {
    format!(
        r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"
  xmlns:tns1="urn:ec.europa.eu:taxud:vies:services:checkVat:types"
  xmlns:impl="urn:ec.europa.eu:taxud:vies:services:checkVat">
  <soap:Header>
  </soap:Header>
  <soap:Body>
    <tns1:checkVat xmlns:tns1="urn:ec.europa.eu:taxud:vies:services:checkVat:types"
     xmlns="urn:ec.europa.eu:taxud:vies:services:checkVat:types">
     <tns1:countryCode>{country_code}</tns1:countryCode>
     <tns1:vatNumber>{vat_number}</tns1:vatNumber>
    </tns1:checkVat>
  </soap:Body>
</soap:Envelope>"#
    )
    .trim()
    .to_string()
}
