// Errors returned by the table store and the operation dispatcher

use kyc_common::{kyc::KycError, serializer::ReaderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    // Domain errors: arity, schema, duplicate key, not found, invalid date
    #[error(transparent)]
    Kyc(#[from] KycError),
    #[error("Error while decoding data from disk: {}", _0)]
    Deserialize(#[from] ReaderError),
    #[error(transparent)]
    Sled(#[from] sled::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl LedgerError {
    /// Domain error carried by this error, if any
    pub fn as_kyc_error(&self) -> Option<&KycError> {
        match self {
            Self::Kyc(e) => Some(e),
            _ => None,
        }
    }
}
