use async_trait::async_trait;
use kyc_common::kyc::{KycError, TableSchema};
use log::debug;

use crate::core::{
    error::LedgerError,
    storage::{rocksdb::Column, RocksStorage, TableProvider},
};

#[async_trait]
impl TableProvider for RocksStorage {
    async fn create_table(&mut self, schema: &TableSchema) -> Result<(), LedgerError> {
        schema.validate()?;
        if self.contains_data(Column::Tables, &schema.name)? {
            return Err(KycError::Schema(format!("table {} already exists", schema.name)).into());
        }

        self.insert_into_disk(Column::Tables, schema.name.as_bytes(), schema)?;
        debug!("table {} created", schema.name);
        Ok(())
    }

    async fn get_table_schema(&self, name: &str) -> Result<Option<TableSchema>, LedgerError> {
        self.load_optional_from_disk(Column::Tables, name)
    }
}
