// KycRecord - One row of the KYC table
//
// Every field is a plain string. The empty string is a valid stored value
// and is never treated as "missing". Dates are kept as the caller wrote them
// and are only parsed when a status is evaluated.

use serde::{Deserialize, Serialize};

use crate::{
    config::KYC_COLUMNS,
    serializer::{Reader, ReaderError, Serializer, Writer},
};

/// Stored KYC record
///
/// `enroll_id` is the primary key and never changes once the record exists.
/// The five other fields are replaced as a whole by an update.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KycRecord {
    #[serde(rename = "EnrollId")]
    pub enroll_id: String,

    #[serde(rename = "UserName")]
    pub user_name: String,

    /// Date of the last attestation (YYYY-MM-DD), set by the caller
    #[serde(rename = "LastUpdated")]
    pub last_updated: String,

    /// Bank that submitted the attestation
    #[serde(rename = "BankName")]
    pub bank_name: String,

    /// Expiry date of the attestation (YYYY-MM-DD)
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: String,

    /// Verifying authority or source system
    #[serde(rename = "Source")]
    pub source: String,
}

impl KycRecord {
    pub fn new(
        enroll_id: impl Into<String>,
        user_name: impl Into<String>,
        last_updated: impl Into<String>,
        bank_name: impl Into<String>,
        expiry_date: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            enroll_id: enroll_id.into(),
            user_name: user_name.into(),
            last_updated: last_updated.into(),
            bank_name: bank_name.into(),
            expiry_date: expiry_date.into(),
            source: source.into(),
        }
    }

    /// Build a record from the flat column list, in table order
    pub fn from_columns(columns: [String; 6]) -> Self {
        let [enroll_id, user_name, last_updated, bank_name, expiry_date, source] = columns;
        Self {
            enroll_id,
            user_name,
            last_updated,
            bank_name,
            expiry_date,
            source,
        }
    }

    /// Flatten the record into its columns, in table order
    pub fn into_columns(self) -> [String; 6] {
        [
            self.enroll_id,
            self.user_name,
            self.last_updated,
            self.bank_name,
            self.expiry_date,
            self.source,
        ]
    }

    /// Borrow every column with its name, in table order
    pub fn columns(&self) -> [(&'static str, &str); 6] {
        [
            (KYC_COLUMNS[0], &self.enroll_id),
            (KYC_COLUMNS[1], &self.user_name),
            (KYC_COLUMNS[2], &self.last_updated),
            (KYC_COLUMNS[3], &self.bank_name),
            (KYC_COLUMNS[4], &self.expiry_date),
            (KYC_COLUMNS[5], &self.source),
        ]
    }

    #[inline]
    pub fn get_enroll_id(&self) -> &str {
        &self.enroll_id
    }
}

impl Serializer for KycRecord {
    fn write(&self, writer: &mut Writer) {
        for (_, value) in self.columns() {
            writer.write_string(value);
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            enroll_id: reader.read_string()?,
            user_name: reader.read_string()?,
            last_updated: reader.read_string()?,
            bank_name: reader.read_string()?,
            expiry_date: reader.read_string()?,
            source: reader.read_string()?,
        })
    }

    fn size(&self) -> usize {
        self.columns()
            .iter()
            .map(|(_, value)| 4 + value.len())
            .sum()
    }
}
