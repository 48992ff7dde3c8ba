// In-memory backend
//
// Holds the tables and the KYC rows in insertion order. Used by tests and by
// the `memory` storage backend, whose data lives as long as the process.

use anyhow::anyhow;
use async_trait::async_trait;
use indexmap::IndexMap;
use kyc_common::{
    config::KYC_TABLE_NAME,
    kyc::{ensure_enroll_id, KycError, KycRecord, TableSchema},
};
use log::{debug, trace};

use crate::core::{
    error::LedgerError,
    storage::{KycProvider, Storage, TableProvider},
};

/// In-memory storage with fault injection
///
/// # Example
/// ```rust
/// use kyc_daemon::core::storage::MemoryStorage;
///
/// let storage = MemoryStorage::new().fail_on_write();
/// ```
#[derive(Default)]
pub struct MemoryStorage {
    /// table name -> schema
    tables: IndexMap<String, TableSchema>,
    /// enroll_id -> record
    kyc_records: IndexMap<String, KycRecord>,

    // ===== Fault Injection Flags =====
    /// Refuse every table definition
    reject_table_definitions: bool,
    /// Fail every record insert or replace
    fail_on_write: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable fault injection: table creation will fail with a schema error
    pub fn reject_table_definitions(mut self) -> Self {
        self.reject_table_definitions = true;
        self
    }

    /// Enable fault injection: record writes will fail with a backend error
    pub fn fail_on_write(mut self) -> Self {
        self.fail_on_write = true;
        self
    }

    fn ensure_kyc_table(&self) -> Result<(), LedgerError> {
        if !self.tables.contains_key(KYC_TABLE_NAME) {
            return Err(KycError::Schema(format!("table {} does not exist", KYC_TABLE_NAME)).into());
        }
        Ok(())
    }

    fn ensure_writable(&self) -> Result<(), LedgerError> {
        if self.fail_on_write {
            return Err(anyhow!("memory storage refused the write").into());
        }
        Ok(())
    }
}

#[async_trait]
impl TableProvider for MemoryStorage {
    async fn create_table(&mut self, schema: &TableSchema) -> Result<(), LedgerError> {
        if self.reject_table_definitions {
            return Err(KycError::Schema(format!("table {} definition refused", schema.name)).into());
        }

        schema.validate()?;
        if self.tables.contains_key(&schema.name) {
            return Err(KycError::Schema(format!("table {} already exists", schema.name)).into());
        }

        debug!("creating table {} in memory", schema.name);
        self.tables.insert(schema.name.clone(), schema.clone());
        Ok(())
    }

    async fn get_table_schema(&self, name: &str) -> Result<Option<TableSchema>, LedgerError> {
        Ok(self.tables.get(name).cloned())
    }
}

#[async_trait]
impl KycProvider for MemoryStorage {
    async fn has_kyc_record(&self, enroll_id: &str) -> Result<bool, LedgerError> {
        ensure_enroll_id(enroll_id)?;
        self.ensure_kyc_table()?;
        Ok(self.kyc_records.contains_key(enroll_id))
    }

    async fn get_kyc_record(&self, enroll_id: &str) -> Result<KycRecord, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get kyc record {}", enroll_id);
        }

        ensure_enroll_id(enroll_id)?;
        self.ensure_kyc_table()?;
        self.kyc_records
            .get(enroll_id)
            .cloned()
            .ok_or_else(|| KycError::NotFound(enroll_id.to_owned()).into())
    }

    async fn insert_kyc_record(&mut self, record: &KycRecord) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("insert kyc record {}", record.enroll_id);
        }

        ensure_enroll_id(&record.enroll_id)?;
        self.ensure_kyc_table()?;
        if self.kyc_records.contains_key(&record.enroll_id) {
            return Err(KycError::DuplicateKey(record.enroll_id.clone()).into());
        }

        self.ensure_writable()?;
        self.kyc_records
            .insert(record.enroll_id.clone(), record.clone());
        Ok(())
    }

    async fn replace_kyc_record(&mut self, record: &KycRecord) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("replace kyc record {}", record.enroll_id);
        }

        ensure_enroll_id(&record.enroll_id)?;
        self.ensure_kyc_table()?;
        self.ensure_writable()?;
        match self.kyc_records.get_mut(&record.enroll_id) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(KycError::NotFound(record.enroll_id.clone()).into()),
        }
    }

    async fn count_kyc_records(&self) -> Result<u64, LedgerError> {
        Ok(self.kyc_records.len() as u64)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn flush(&mut self) -> Result<(), LedgerError> {
        Ok(())
    }
}
