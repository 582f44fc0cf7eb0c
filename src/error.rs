use thiserror::Error;

/// Errors that can occur while validating a VAT ID.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VatError {
    /// The 2-letter prefix of the VAT ID is not a country VIES serves.
    /// Raised locally, before any network call.
    #[error("the country code in VAT ID '{0}' is invalid")]
    InvalidCountry(String),

    /// The VAT ID does not match the required shape: two uppercase
    /// letters followed by 2 to 13 uppercase alphanumerics. Raised
    /// locally, before any network call.
    #[error("the VAT number part of '{0}' is empty or invalid")]
    InvalidNumber(String),

    /// The service answered with a SOAP fault. `message` is the
    /// catalog-resolved description of the faultstring.
    #[error("VIES fault {code}: {message}")]
    RemoteFault { code: String, message: String },

    /// The response body contained neither the expected checkVat fields
    /// nor a usable fault. Carries the first missing tag and the raw
    /// body for diagnostics.
    #[error("malformed VIES response: no <{field}> element found")]
    MalformedResponse { field: String, body: String },

    /// The request exceeded the caller-supplied deadline.
    #[error("VIES request timed out")]
    Timeout,

    /// Connection-level failure talking to the service.
    #[error("VIES transport error: {0}")]
    Transport(String),
}

impl VatError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}
