use clap::{Args, ValueEnum};
use kyc_common::{kyc::ComparisonField, logger::LogLevel};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_CACHE_SIZE, DEFAULT_DIR_PATH, DEFAULT_LOG_FILE};

#[cfg(feature = "rocksdb")]
pub use self::rocksdb_config::*;

// Backend used to persist the KYC table
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[clap(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    // Lives as long as the process
    Memory,
    #[default]
    Sled,
    // Requires the `rocksdb` feature
    Rocksdb,
}

fn default_dir_path() -> String {
    DEFAULT_DIR_PATH.to_owned()
}

fn default_cache_size() -> usize {
    DEFAULT_CACHE_SIZE
}

fn default_log_filename() -> String {
    DEFAULT_LOG_FILE.to_owned()
}

#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct Config {
    /// Directory used by the persistent backends
    #[clap(long, default_value_t = default_dir_path())]
    #[serde(default = "default_dir_path")]
    pub dir_path: String,
    /// Storage backend holding the KYC table
    #[clap(long, value_enum, default_value_t = StorageBackend::Sled)]
    #[serde(default)]
    pub storage_backend: StorageBackend,
    /// Stored date compared against today to decide if a record is expired
    #[clap(long, value_enum, default_value_t = ComparisonField::LastUpdated)]
    #[serde(default)]
    pub comparison_field: ComparisonField,
    /// Cache size of the storage backend, in bytes
    #[clap(long, default_value_t = DEFAULT_CACHE_SIZE)]
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
    /// Log level printed on stdout and in the log file
    #[clap(long, value_enum, default_value_t = LogLevel::Info)]
    #[serde(default)]
    pub log_level: LogLevel,
    /// Log file name
    #[clap(long, default_value_t = default_log_filename())]
    #[serde(default = "default_log_filename")]
    pub log_filename: String,
    /// Do not write logs to a file
    #[clap(long)]
    #[serde(default)]
    pub disable_file_logging: bool,
    #[cfg(feature = "rocksdb")]
    #[clap(flatten)]
    #[serde(default)]
    pub rocksdb: RocksDBConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir_path: default_dir_path(),
            storage_backend: StorageBackend::default(),
            comparison_field: ComparisonField::default(),
            cache_size: default_cache_size(),
            log_level: LogLevel::default(),
            log_filename: default_log_filename(),
            disable_file_logging: false,
            #[cfg(feature = "rocksdb")]
            rocksdb: RocksDBConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON document
    /// Missing fields take their default value
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(feature = "rocksdb")]
mod rocksdb_config {
    use clap::{Args, ValueEnum};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Copy, Clone, Default, ValueEnum, Serialize, Deserialize)]
    #[clap(rename_all = "snake_case")]
    #[serde(rename_all = "snake_case")]
    pub enum CompressionMode {
        None,
        #[default]
        Snappy,
        Zlib,
        Lz4,
        Zstd,
    }

    impl CompressionMode {
        pub fn convert(self) -> rocksdb::DBCompressionType {
            match self {
                Self::None => rocksdb::DBCompressionType::None,
                Self::Snappy => rocksdb::DBCompressionType::Snappy,
                Self::Zlib => rocksdb::DBCompressionType::Zlib,
                Self::Lz4 => rocksdb::DBCompressionType::Lz4,
                Self::Zstd => rocksdb::DBCompressionType::Zstd,
            }
        }
    }

    fn default_parallelism() -> usize {
        2
    }

    fn default_max_open_files() -> i32 {
        256
    }

    #[derive(Debug, Clone, Args, Serialize, Deserialize)]
    pub struct RocksDBConfig {
        /// RocksDB background threads
        #[clap(name = "rocksdb-parallelism", long = "rocksdb-parallelism", default_value_t = default_parallelism())]
        #[serde(default = "default_parallelism")]
        pub parallelism: usize,
        /// RocksDB maximum open files, -1 for unlimited
        #[clap(name = "rocksdb-max-open-files", long = "rocksdb-max-open-files", default_value_t = default_max_open_files())]
        #[serde(default = "default_max_open_files")]
        pub max_open_files: i32,
        /// RocksDB compression of the stored records
        #[clap(name = "rocksdb-compression-mode", long = "rocksdb-compression-mode", value_enum, default_value_t = CompressionMode::Snappy)]
        #[serde(default)]
        pub compression_mode: CompressionMode,
    }

    impl Default for RocksDBConfig {
        fn default() -> Self {
            Self {
                parallelism: default_parallelism(),
                max_open_files: default_max_open_files(),
                compression_mode: CompressionMode::default(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_backend, StorageBackend::Sled);
        assert_eq!(config.comparison_field, ComparisonField::LastUpdated);
        assert_eq!(config.dir_path, DEFAULT_DIR_PATH);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.disable_file_logging);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = Config::from_json(
            r#"{"storage_backend": "memory", "comparison_field": "expiry_date"}"#,
        )
        .unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.comparison_field, ComparisonField::ExpiryDate);
        assert_eq!(config.cache_size, DEFAULT_CACHE_SIZE);
        assert_eq!(config.log_filename, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_config_rejects_unknown_backend() {
        assert!(Config::from_json(r#"{"storage_backend": "postgres"}"#).is_err());
    }
}
