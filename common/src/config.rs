pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Name of the single table holding every KYC record
pub const KYC_TABLE_NAME: &str = "KYC";

// Column names of the KYC table, in storage order
// The first column is the primary key
pub const COLUMN_ENROLL_ID: &str = "EnrollId";
pub const COLUMN_USER_NAME: &str = "UserName";
pub const COLUMN_LAST_UPDATED: &str = "LastUpdated";
pub const COLUMN_BANK_NAME: &str = "BankName";
pub const COLUMN_EXPIRY_DATE: &str = "ExpiryDate";
pub const COLUMN_SOURCE: &str = "Source";

pub const KYC_COLUMNS: [&str; 6] = [
    COLUMN_ENROLL_ID,
    COLUMN_USER_NAME,
    COLUMN_LAST_UPDATED,
    COLUMN_BANK_NAME,
    COLUMN_EXPIRY_DATE,
    COLUMN_SOURCE,
];

// Number of flat arguments expected by each operation
pub const WRITE_ARGS_COUNT: usize = KYC_COLUMNS.len();
pub const UPDATE_ARGS_COUNT: usize = KYC_COLUMNS.len();
pub const QUERY_ARGS_COUNT: usize = 1;
pub const INIT_ARGS_COUNT: usize = 0;

// Calendar date format used by every stored date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";
// Exact length of a date formatted with DATE_FORMAT
pub const DATE_LEN: usize = 10;
