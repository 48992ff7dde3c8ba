#![cfg(feature = "rocksdb")]
#![allow(clippy::disallowed_methods)]

// RocksDB backend, only built with the `rocksdb` feature

use kyc_common::{
    config::KYC_TABLE_NAME,
    kyc::{KycError, KycRecord, TableSchema},
};
use kyc_daemon::core::{
    config::RocksDBConfig,
    storage::{KycProvider, RocksStorage, Storage, TableProvider},
};
use tempdir::TempDir;

const CACHE_SIZE: usize = 8 * 1024 * 1024;

fn open(dir: &TempDir) -> RocksStorage {
    RocksStorage::new(
        &format!("{}/", dir.path().display()),
        CACHE_SIZE,
        &RocksDBConfig::default(),
    )
    .unwrap()
}

fn record(enroll_id: &str, user_name: &str) -> KycRecord {
    KycRecord::new(enroll_id, user_name, "2020-01-01", "BankA", "2030-01-01", "SourceX")
}

#[tokio::test]
async fn test_rocksdb_insert_replace_and_reopen() {
    let dir = TempDir::new("kyc-rocksdb").unwrap();

    {
        let mut storage = open(&dir);
        let err = storage.insert_kyc_record(&record("E1", "Alice")).await.unwrap_err();
        assert!(matches!(err.as_kyc_error(), Some(KycError::Schema(_))));

        storage.create_table(&TableSchema::kyc()).await.unwrap();
        let err = storage.create_table(&TableSchema::kyc()).await.unwrap_err();
        assert!(matches!(err.as_kyc_error(), Some(KycError::Schema(_))));

        let err = storage.replace_kyc_record(&record("E1", "Alice")).await.unwrap_err();
        assert_eq!(err.as_kyc_error(), Some(&KycError::NotFound("E1".to_string())));

        storage.insert_kyc_record(&record("E1", "Alice")).await.unwrap();
        let err = storage.insert_kyc_record(&record("E1", "Mallory")).await.unwrap_err();
        assert_eq!(err.as_kyc_error(), Some(&KycError::DuplicateKey("E1".to_string())));

        storage.replace_kyc_record(&record("E1", "Alicia")).await.unwrap();
        storage.stop().await.unwrap();
    }

    let storage = open(&dir);
    assert!(storage.has_table(KYC_TABLE_NAME).await.unwrap());
    assert_eq!(storage.get_kyc_record("E1").await.unwrap().user_name, "Alicia");
    assert_eq!(storage.count_kyc_records().await.unwrap(), 1);
}
