use std::fmt;

/// Transaction status vocabulary carried by `vads_trans_status`.
///
/// Codes outside the documented set are preserved verbatim in `Other` so the
/// caller can still route on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Abandoned,
    Authorised,
    AuthorisedToValidate,
    Cancelled,
    Captured,
    CaptureFailed,
    Expired,
    Refused,
    Suspended,
    UnderVerification,
    WaitingAuthorisation,
    WaitingAuthorisationToValidate,
    Other(String),
}

impl PaymentStatus {
    /// True when the payment went through and the order can be marked paid.
    pub fn is_successful(&self) -> bool {
        matches!(
            self,
            Self::Authorised | Self::AuthorisedToValidate | Self::Captured
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Abandoned => "ABANDONED",
            Self::Authorised => "AUTHORISED",
            Self::AuthorisedToValidate => "AUTHORISED_TO_VALIDATE",
            Self::Cancelled => "CANCELLED",
            Self::Captured => "CAPTURED",
            Self::CaptureFailed => "CAPTURE_FAILED",
            Self::Expired => "EXPIRED",
            Self::Refused => "REFUSED",
            Self::Suspended => "SUSPENDED",
            Self::UnderVerification => "UNDER_VERIFICATION",
            Self::WaitingAuthorisation => "WAITING_AUTHORISATION",
            Self::WaitingAuthorisationToValidate => "WAITING_AUTHORISATION_TO_VALIDATE",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(code: &str) -> Self {
        match code {
            "ABANDONED" => Self::Abandoned,
            "AUTHORISED" => Self::Authorised,
            "AUTHORISED_TO_VALIDATE" => Self::AuthorisedToValidate,
            "CANCELLED" => Self::Cancelled,
            "CAPTURED" => Self::Captured,
            "CAPTURE_FAILED" => Self::CaptureFailed,
            "EXPIRED" => Self::Expired,
            "REFUSED" => Self::Refused,
            "SUSPENDED" => Self::Suspended,
            "UNDER_VERIFICATION" => Self::UnderVerification,
            "WAITING_AUTHORISATION" => Self::WaitingAuthorisation,
            "WAITING_AUTHORISATION_TO_VALIDATE" => Self::WaitingAuthorisationToValidate,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
