mod providers;

use ::sled::{Db, Tree};
use async_trait::async_trait;
use kyc_common::{
    config::KYC_TABLE_NAME,
    kyc::KycError,
    serializer::Serializer,
};
use log::{debug, info, trace};

use crate::{
    config::{KYC_RECORDS_TREE, TABLES_TREE},
    core::{error::LedgerError, storage::Storage},
};

// Sled backend
//
// Two trees: one for the table schemas keyed by table name, one for the
// KYC rows keyed by enrollment ID. Insert and replace rely on sled atomic
// primitives so the existence check and the write cannot be split.
pub struct SledStorage {
    db: Db,
    // table name -> schema
    tables: Tree,
    // enroll_id -> record
    kyc_records: Tree,
}

impl SledStorage {
    /// Open (or create) the database under `{dir_path}sled`
    pub fn new(dir_path: &str, cache_size: Option<u64>) -> Result<Self, LedgerError> {
        let path = format!("{}sled", dir_path);
        let mut config = ::sled::Config::new().path(&path);
        if let Some(size) = cache_size {
            config = config.cache_capacity(size);
        }

        Self::open(config, &path)
    }

    /// Open a database removed on drop
    pub fn temporary() -> Result<Self, LedgerError> {
        Self::open(::sled::Config::new().temporary(true), "temporary")
    }

    fn open(config: ::sled::Config, label: &str) -> Result<Self, LedgerError> {
        let db = config.open()?;
        let storage = Self {
            tables: db.open_tree(TABLES_TREE)?,
            kyc_records: db.open_tree(KYC_RECORDS_TREE)?,
            db,
        };

        info!(
            "sled storage opened at {} with {} KYC records",
            label,
            storage.kyc_records.len()
        );
        Ok(storage)
    }

    // Load and decode a value, None if the key is absent
    fn load_optional_from_disk<T: Serializer>(
        tree: &Tree,
        key: &[u8],
    ) -> Result<Option<T>, LedgerError> {
        match tree.get(key)? {
            Some(bytes) => Ok(Some(T::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    fn ensure_kyc_table(&self) -> Result<(), LedgerError> {
        if !self.tables.contains_key(KYC_TABLE_NAME.as_bytes())? {
            return Err(KycError::Schema(format!("table {} does not exist", KYC_TABLE_NAME)).into());
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for SledStorage {
    async fn flush(&mut self) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("flush sled storage");
        }

        let flushed = self.db.flush()?;
        debug!("flushed {} bytes to disk", flushed);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), LedgerError> {
        info!("stopping sled storage");
        self.flush().await
    }
}
