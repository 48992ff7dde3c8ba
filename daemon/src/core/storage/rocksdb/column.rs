use strum::{AsRefStr, Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Column {
    // Rows of the KYC table
    // {enroll_id} => {record}
    KycRecords,
    // Table definitions
    // {table_name} => {schema}
    Tables,
}
