// KycQueryResult - What a query returns to the caller
// Built by the status evaluator, never persisted

use serde::{Deserialize, Serialize};

use crate::kyc::{KycError, KycRecord, KycResult, KycStatus};

/// Query result sent over the wire
///
/// Fields are serialized in this exact order. `source` is the empty string
/// whenever `kyc_status` is `Expired`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KycQueryResult {
    #[serde(rename = "EnrollId")]
    pub enroll_id: String,
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "LastUpdated")]
    pub last_updated: String,
    #[serde(rename = "BankName")]
    pub bank_name: String,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "KycStatus")]
    pub kyc_status: KycStatus,
}

impl KycQueryResult {
    /// Build the result for a stored record
    /// Source is copied only if the status shows it
    pub fn from_record(record: KycRecord, kyc_status: KycStatus) -> Self {
        let source = if kyc_status.shows_source() {
            record.source
        } else {
            String::new()
        };

        Self {
            enroll_id: record.enroll_id,
            user_name: record.user_name,
            last_updated: record.last_updated,
            bank_name: record.bank_name,
            expiry_date: record.expiry_date,
            source,
            kyc_status,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.kyc_status.is_expired()
    }

    /// Encode as the JSON payload returned by a query
    pub fn to_json_bytes(&self) -> KycResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| KycError::Serialization(e.to_string()))
    }

    /// Decode a JSON payload produced by `to_json_bytes`
    pub fn from_json_bytes(bytes: &[u8]) -> KycResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| KycError::Serialization(e.to_string()))
    }
}
