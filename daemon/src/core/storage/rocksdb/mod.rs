mod column;
mod providers;

use std::sync::Arc;

use crate::core::{config::RocksDBConfig, error::LedgerError, storage::Storage};
use anyhow::Context;
use async_trait::async_trait;
use kyc_common::{config::KYC_TABLE_NAME, kyc::KycError, serializer::Serializer};
use log::{debug, info, trace};
use rocksdb::{
    BlockBasedOptions, Cache, ColumnFamilyDescriptor, DBWithThreadMode,
    IteratorMode as InternalIteratorMode, MultiThreaded, Options,
};
use strum::IntoEnumIterator;

pub use column::*;

macro_rules! cf_handle {
    ($db: expr, $column: expr) => {
        $db.cf_handle($column.as_ref())
            .with_context(|| format!("Column {:?} not found", $column))?
    };
}

type InnerDB = DBWithThreadMode<MultiThreaded>;

// RocksDB backend
// One column family per Column variant. Writes take `&mut self`, so the
// existence check and the write of a record run without interleaving.
pub struct RocksStorage {
    db: Arc<InnerDB>,
}

impl RocksStorage {
    /// Open (or create) the database under `{dir}rocksdb`
    pub fn new(dir: &str, cache_size: usize, config: &RocksDBConfig) -> Result<Self, LedgerError> {
        let cfs = Column::iter()
            .map(|column| ColumnFamilyDescriptor::new(column.to_string(), Options::default()));

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.increase_parallelism(config.parallelism as _);
        opts.set_max_open_files(config.max_open_files);
        opts.set_compression_type(config.compression_mode.convert());

        let mut block_opts = BlockBasedOptions::default();
        let cache = Cache::new_lru_cache(cache_size);
        block_opts.set_block_cache(&cache);
        opts.set_block_based_table_factory(&block_opts);

        let path = format!("{}rocksdb", dir);
        let db = InnerDB::open_cf_descriptors(&opts, &path, cfs)
            .with_context(|| format!("Failed to open RocksDB at {}", path))?;

        info!("rocksdb storage opened at {}", path);
        Ok(Self { db: Arc::new(db) })
    }

    pub fn contains_data<K: AsRef<[u8]>>(&self, column: Column, key: &K) -> Result<bool, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("contains data {:?}", column);
        }

        let cf = cf_handle!(self.db, column);
        let value = self
            .db
            .get_pinned_cf(&cf, key.as_ref())
            .with_context(|| format!("Error while checking if key exists in column {:?}", column))?;

        Ok(value.is_some())
    }

    // Count how many entries we have stored in a column
    pub fn count_entries(&self, column: Column) -> Result<usize, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("count entries {:?}", column);
        }

        let cf = cf_handle!(self.db, column);
        Ok(self.db.iterator_cf(&cf, InternalIteratorMode::Start).count())
    }

    pub fn load_optional_from_disk<K: AsRef<[u8]> + ?Sized, V: Serializer>(
        &self,
        column: Column,
        key: &K,
    ) -> Result<Option<V>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("load optional from disk {:?}", column);
        }

        let cf = cf_handle!(self.db, column);
        let data = self
            .db
            .get_pinned_cf(&cf, key.as_ref())
            .with_context(|| format!("Internal error while reading column {:?}", column))?;

        match data {
            Some(bytes) => Ok(Some(V::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    pub(super) fn insert_into_disk<K: AsRef<[u8]>, V: Serializer>(
        &mut self,
        column: Column,
        key: K,
        value: &V,
    ) -> Result<(), LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("insert into disk {:?}", column);
        }

        let cf = cf_handle!(self.db, column);
        self.db
            .put_cf(&cf, key.as_ref(), value.to_bytes())
            .with_context(|| format!("Error while inserting into disk column {:?}", column))?;

        Ok(())
    }

    fn ensure_kyc_table(&self) -> Result<(), LedgerError> {
        if !self.contains_data(Column::Tables, &KYC_TABLE_NAME)? {
            return Err(KycError::Schema(format!("table {} does not exist", KYC_TABLE_NAME)).into());
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for RocksStorage {
    async fn flush(&mut self) -> Result<(), LedgerError> {
        for column in Column::iter() {
            let cf = cf_handle!(self.db, column);
            self.db
                .flush_cf(&cf)
                .with_context(|| format!("Error while flushing column {:?}", column))?;
        }

        debug!("rocksdb storage flushed");
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), LedgerError> {
        info!("stopping rocksdb storage");
        self.flush().await
    }
}
