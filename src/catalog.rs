//! Human-readable messages for the faultstrings VIES is known to return.

/// Fallback message for faultstrings not in the catalog.
const UNKNOWN_FAULT: &str = "Unknown error";

/// Known VIES faultstrings and their descriptions.
/// Sorted for binary search.
static FAULT_MESSAGES: &[(&str, &str)] = &[
    (
        "INVALID_INPUT_COUNTRY",
        "The country code in the VAT ID is invalid",
    ),
    (
        "INVALID_INPUT_NUMBER",
        "The VAT number part is empty or invalid",
    ),
    (
        "MS_MAX_CONCURRENT_REQ",
        "The VAT database of the requested member country has had too many requests, please try again later",
    ),
    (
        "MS_UNAVAILABLE",
        "The VAT database of the requested member country is unavailable, please try again later",
    ),
    (
        "SERVER_BUSY",
        "The service cannot process your request, please try again later",
    ),
    (
        "SERVICE_UNAVAILABLE",
        "The VIES VAT service is unavailable, please try again later",
    ),
    (
        "TIMEOUT",
        "The request to the VAT database of the requested member country has timed out, please try again later",
    ),
];

/// Resolve a VIES faultstring to a readable message.
///
/// Total function: unrecognised faultstrings resolve to a generic
/// unknown-error message rather than failing.
pub fn readable_fault_message(faultstring: &str) -> &'static str {
    FAULT_MESSAGES
        .binary_search_by_key(&faultstring, |&(key, _)| key)
        .map(|idx| FAULT_MESSAGES[idx].1)
        .unwrap_or(UNKNOWN_FAULT)
}
