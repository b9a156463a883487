use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("response carries no signature field")]
    SignatureMissing,
    #[error("response signature does not match the recomputed signature")]
    SignatureMismatch,
    #[error("response is missing the '{0}' field")]
    MissingField(&'static str),
    #[error("transaction has no gateway transaction id assigned")]
    MissingTransactionId,
    #[error("invalid field argument '{0}', expected name=value")]
    InvalidFieldArgument(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
