mod memory;
mod providers;

pub mod sled;

#[cfg(feature = "rocksdb")]
pub mod rocksdb;

pub use self::{memory::MemoryStorage, providers::*, sled::SledStorage};

#[cfg(feature = "rocksdb")]
pub use self::rocksdb::RocksStorage;

use crate::core::error::LedgerError;
use async_trait::async_trait;

#[async_trait]
pub trait Storage: TableProvider + KycProvider + Sync + Send + 'static {
    // Write pending changes to disk
    async fn flush(&mut self) -> Result<(), LedgerError>;

    // Flush and release the backend
    async fn stop(&mut self) -> Result<(), LedgerError> {
        self.flush().await
    }
}
