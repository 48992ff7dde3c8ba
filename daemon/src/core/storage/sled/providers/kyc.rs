use ::sled::transaction::{abort, ConflictableTransactionResult, TransactionError, TransactionalTree};
use async_trait::async_trait;
use kyc_common::{
    kyc::{ensure_enroll_id, KycError, KycRecord},
    serializer::Serializer,
};
use log::trace;

use crate::core::{
    error::LedgerError,
    storage::{KycProvider, SledStorage},
};

#[async_trait]
impl KycProvider for SledStorage {
    async fn has_kyc_record(&self, enroll_id: &str) -> Result<bool, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("has kyc record {}", enroll_id);
        }

        ensure_enroll_id(enroll_id)?;
        self.ensure_kyc_table()?;
        Ok(self.kyc_records.contains_key(enroll_id.as_bytes())?)
    }

    async fn get_kyc_record(&self, enroll_id: &str) -> Result<KycRecord, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get kyc record {}", enroll_id);
        }

        ensure_enroll_id(enroll_id)?;
        self.ensure_kyc_table()?;
        Self::load_optional_from_disk(&self.kyc_records, enroll_id.as_bytes())?
            .ok_or_else(|| KycError::NotFound(enroll_id.to_owned()).into())
    }

    async fn insert_kyc_record(&mut self, record: &KycRecord) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("insert kyc record {}", record.enroll_id);
        }

        ensure_enroll_id(&record.enroll_id)?;
        self.ensure_kyc_table()?;

        let swap = self.kyc_records.compare_and_swap(
            record.enroll_id.as_bytes(),
            None as Option<&[u8]>,
            Some(record.to_bytes()),
        )?;

        // The stored record is left untouched on conflict
        if swap.is_err() {
            return Err(KycError::DuplicateKey(record.enroll_id.clone()).into());
        }
        Ok(())
    }

    async fn replace_kyc_record(&mut self, record: &KycRecord) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("replace kyc record {}", record.enroll_id);
        }

        ensure_enroll_id(&record.enroll_id)?;
        self.ensure_kyc_table()?;

        let key = record.enroll_id.as_bytes();
        let value = record.to_bytes();
        let result = self.kyc_records.transaction(
            |tx: &TransactionalTree| -> ConflictableTransactionResult<(), KycError> {
                if tx.get(key)?.is_none() {
                    return abort(KycError::NotFound(record.enroll_id.clone()));
                }
                tx.insert(key, value.as_slice())?;
                Ok(())
            },
        );

        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Abort(e)) => Err(e.into()),
            Err(TransactionError::Storage(e)) => Err(e.into()),
        }
    }

    async fn count_kyc_records(&self) -> Result<u64, LedgerError> {
        Ok(self.kyc_records.len() as u64)
    }
}
