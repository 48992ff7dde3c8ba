use async_trait::async_trait;
use kyc_common::{
    kyc::{KycError, TableSchema},
    serializer::Serializer,
};
use log::{debug, trace};

use crate::core::{
    error::LedgerError,
    storage::{SledStorage, TableProvider},
};

#[async_trait]
impl TableProvider for SledStorage {
    async fn create_table(&mut self, schema: &TableSchema) -> Result<(), LedgerError> {
        schema.validate()?;

        // Compare against an absent value: concurrent definitions of the
        // same table cannot both succeed
        let swap = self.tables.compare_and_swap(
            schema.name.as_bytes(),
            None as Option<&[u8]>,
            Some(schema.to_bytes()),
        )?;

        if swap.is_err() {
            return Err(KycError::Schema(format!("table {} already exists", schema.name)).into());
        }

        debug!("table {} created", schema.name);
        Ok(())
    }

    async fn get_table_schema(&self, name: &str) -> Result<Option<TableSchema>, LedgerError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get table schema {}", name);
        }
        Self::load_optional_from_disk(&self.tables, name.as_bytes())
    }
}
