use async_trait::async_trait;
use kyc_common::kyc::{ensure_enroll_id, KycError, KycRecord};
use log::trace;

use crate::core::{
    error::LedgerError,
    storage::{rocksdb::Column, KycProvider, RocksStorage},
};

#[async_trait]
impl KycProvider for RocksStorage {
    async fn has_kyc_record(&self, enroll_id: &str) -> Result<bool, LedgerError> {
        ensure_enroll_id(enroll_id)?;
        self.ensure_kyc_table()?;
        self.contains_data(Column::KycRecords, &enroll_id)
    }

    async fn get_kyc_record(&self, enroll_id: &str) -> Result<KycRecord, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get kyc record {}", enroll_id);
        }

        ensure_enroll_id(enroll_id)?;
        self.ensure_kyc_table()?;
        self.load_optional_from_disk(Column::KycRecords, enroll_id)?
            .ok_or_else(|| KycError::NotFound(enroll_id.to_owned()).into())
    }

    async fn insert_kyc_record(&mut self, record: &KycRecord) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("insert kyc record {}", record.enroll_id);
        }

        ensure_enroll_id(&record.enroll_id)?;
        self.ensure_kyc_table()?;
        if self.contains_data(Column::KycRecords, &record.enroll_id)? {
            return Err(KycError::DuplicateKey(record.enroll_id.clone()).into());
        }

        self.insert_into_disk(Column::KycRecords, record.enroll_id.as_bytes(), record)
    }

    async fn replace_kyc_record(&mut self, record: &KycRecord) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("replace kyc record {}", record.enroll_id);
        }

        ensure_enroll_id(&record.enroll_id)?;
        self.ensure_kyc_table()?;
        if !self.contains_data(Column::KycRecords, &record.enroll_id)? {
            return Err(KycError::NotFound(record.enroll_id.clone()).into());
        }

        self.insert_into_disk(Column::KycRecords, record.enroll_id.as_bytes(), record)
    }

    async fn count_kyc_records(&self) -> Result<u64, LedgerError> {
        Ok(self.count_entries(Column::KycRecords)? as u64)
    }
}
