//! Country codes served by the VIES checkVat service.
//!
//! VIES uses VAT-registration codes, not plain ISO 3166-1: Greece is
//! `EL` (never `GR`), and Northern Ireland traders keep the `XI` prefix
//! under the Windsor Framework. `GB` remains in the set for legacy
//! lookups of pre-Brexit registrations.

/// Check whether `code` is a country code the VIES service accepts.
pub fn is_eu_vat_country(code: &str) -> bool {
    EU_VAT_CODES.binary_search(&code).is_ok()
}

/// VAT country codes recognised by VIES (29 entries).
/// Sorted for binary search.
static EU_VAT_CODES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "GB", "HR", "HU", "IE",
    "IT", "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK", "XI",
];
