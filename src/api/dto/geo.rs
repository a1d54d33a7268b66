//! DTOs for the `/geo` resource.
//!
//! Responses are the provider records themselves, so only request shapes are
//! defined here.

use serde::Deserialize;
use validator::Validate;

use crate::domain::identifier::RequestIdentifier;
use crate::error::AppError;

/// Identifier parameters of the `/geo` resource.
///
/// Read from the query string by `GET /geo` and `DELETE /geo`, and from the
/// JSON body by `POST /geo`:
///
/// ```json
/// { "ip": "142.251.98.139" }
/// ```
///
/// Exactly one of `ip` or `url` must be supplied.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LocationParams {
    /// IPv4 or IPv6 literal.
    #[validate(length(max = 64))]
    pub ip: Option<String>,

    /// Hostname or URL whose host is resolved to an IP.
    #[validate(length(max = 2048))]
    pub url: Option<String>,
}

impl LocationParams {
    /// Validates the parameters and builds the request identifier.
    ///
    /// Exclusivity is checked before field lengths, so supplying both fields is
    /// always reported as ambiguous.
    ///
    /// # Errors
    ///
    /// See [`RequestIdentifier::from_parts`]; over-long values yield
    /// [`AppError::BadRequest`].
    pub fn identifier(&self) -> Result<RequestIdentifier, AppError> {
        let identifier = RequestIdentifier::from_parts(self.ip.as_deref(), self.url.as_deref())?;
        self.validate()?;
        Ok(identifier)
    }
}
