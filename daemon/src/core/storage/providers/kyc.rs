// KYC record storage provider trait
//
// Records are keyed by their enrollment ID. Insert never overwrites and
// replace never creates: each check and its write happen as one atomic step
// in every backend.

use crate::core::error::LedgerError;
use async_trait::async_trait;
use kyc_common::kyc::KycRecord;

/// Storage provider for the rows of the KYC table
#[async_trait]
pub trait KycProvider {
    /// Check if a record exists for this enrollment ID
    async fn has_kyc_record(&self, enroll_id: &str) -> Result<bool, LedgerError>;

    /// Get the stored record
    ///
    /// # Errors
    /// * `NotFound` - No record is stored under this enrollment ID
    async fn get_kyc_record(&self, enroll_id: &str) -> Result<KycRecord, LedgerError>;

    /// Insert a new record
    ///
    /// # Errors
    /// * `DuplicateKey` - A record already exists, it is left untouched
    async fn insert_kyc_record(&mut self, record: &KycRecord) -> Result<(), LedgerError>;

    /// Replace the five non-key fields of an existing record
    ///
    /// # Errors
    /// * `NotFound` - No record is stored under this enrollment ID
    async fn replace_kyc_record(&mut self, record: &KycRecord) -> Result<(), LedgerError>;

    /// Count stored records
    async fn count_kyc_records(&self) -> Result<u64, LedgerError>;
}
