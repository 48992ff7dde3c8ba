// Default directory of the persistent backends
// Suffixed by the backend name when opened
pub const DEFAULT_DIR_PATH: &str = "kyc_data/";

// Default cache size for storage DB, in bytes
pub const DEFAULT_CACHE_SIZE: usize = 64 * 1024 * 1024;

// Default log file, used unless file logging is disabled
pub const DEFAULT_LOG_FILE: &str = "kyc_daemon.log";

// Sled tree holding the rows of the KYC table
pub const KYC_RECORDS_TREE: &str = "kyc_records";

// Sled tree holding table schemas, keyed by table name
pub const TABLES_TREE: &str = "tables";
