// Table schema definitions
// A backend stores one schema per table and refuses to define it twice

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    config::{KYC_COLUMNS, KYC_TABLE_NAME},
    kyc::{KycError, KycResult},
    serializer::{Reader, ReaderError, Serializer, Writer},
};

/// Column value type
/// Only strings are stored by the KYC table
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColumnType {
    String = 0,
}

impl Serializer for ColumnType {
    fn write(&self, writer: &mut Writer) {
        writer.write_u8(*self as u8);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        match reader.read_u8()? {
            0 => Ok(ColumnType::String),
            _ => Err(ReaderError::InvalidValue),
        }
    }

    fn size(&self) -> usize {
        1
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
    /// Part of the primary key
    pub key: bool,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType, key: bool) -> Self {
        Self {
            name: name.into(),
            column_type,
            key,
        }
    }
}

impl Serializer for ColumnDefinition {
    fn write(&self, writer: &mut Writer) {
        writer.write_string(&self.name);
        self.column_type.write(writer);
        writer.write_bool(self.key);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            name: reader.read_string()?,
            column_type: ColumnType::read(reader)?,
            key: reader.read_bool()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Schema of the KYC table: EnrollId key followed by five string columns
    pub fn kyc() -> Self {
        let columns = KYC_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| ColumnDefinition::new(*name, ColumnType::String, i == 0))
            .collect();

        Self::new(KYC_TABLE_NAME, columns)
    }

    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| c.key)
    }

    /// Check the definition before a backend accepts it
    ///
    /// A schema needs a name, at least one column, unique column names and
    /// exactly one key column.
    pub fn validate(&self) -> KycResult<()> {
        if self.name.is_empty() {
            return Err(KycError::Schema("table name is empty".to_string()));
        }

        if self.columns.is_empty() {
            return Err(KycError::Schema(format!(
                "table {} has no columns",
                self.name
            )));
        }

        let mut names = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(KycError::Schema(format!(
                    "table {} has an unnamed column",
                    self.name
                )));
            }
            if !names.insert(column.name.as_str()) {
                return Err(KycError::Schema(format!(
                    "table {} has duplicate column {}",
                    self.name, column.name
                )));
            }
        }

        let keys = self.key_columns().count();
        if keys != 1 {
            return Err(KycError::Schema(format!(
                "table {} must have exactly one key column, found {}",
                self.name, keys
            )));
        }

        Ok(())
    }
}

impl Serializer for TableSchema {
    fn write(&self, writer: &mut Writer) {
        writer.write_string(&self.name);
        writer.write_u32(&(self.columns.len() as u32));
        for column in &self.columns {
            column.write(writer);
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let name = reader.read_string()?;
        let count = reader.read_u32()? as usize;
        // Each column takes at least 6 bytes
        if count > reader.size() / 6 {
            return Err(ReaderError::InvalidSize);
        }

        let mut columns = Vec::with_capacity(count);
        for _ in 0..count {
            columns.push(ColumnDefinition::read(reader)?);
        }

        Ok(Self { name, columns })
    }
}
