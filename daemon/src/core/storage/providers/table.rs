// Table definition provider
//
// A table is created once with its schema. Every KYC operation requires
// the KYC table to exist first.

use crate::core::error::LedgerError;
use async_trait::async_trait;
use kyc_common::kyc::{KycError, TableSchema};

#[async_trait]
pub trait TableProvider: Send + Sync {
    /// Define a new table
    ///
    /// # Errors
    /// * `Schema` - The schema is invalid, the table already exists or the
    ///   backend refused the definition
    async fn create_table(&mut self, schema: &TableSchema) -> Result<(), LedgerError>;

    /// Get the schema of a table, None if it was never created
    async fn get_table_schema(&self, name: &str) -> Result<Option<TableSchema>, LedgerError>;

    async fn has_table(&self, name: &str) -> Result<bool, LedgerError> {
        Ok(self.get_table_schema(name).await?.is_some())
    }

    // Fail with a schema error if the table is missing
    async fn ensure_table(&self, name: &str) -> Result<(), LedgerError> {
        if !self.has_table(name).await? {
            return Err(KycError::Schema(format!("table {} does not exist", name)).into());
        }
        Ok(())
    }
}
