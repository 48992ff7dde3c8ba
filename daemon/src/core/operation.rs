// Named operations accepted by the ledger
//
// Arguments arrive as a positional list of strings. Arity is checked before
// anything else, so a malformed call never reaches storage.

use std::str::FromStr;

use kyc_common::{
    config::{INIT_ARGS_COUNT, QUERY_ARGS_COUNT, UPDATE_ARGS_COUNT, WRITE_ARGS_COUNT},
    kyc::{KycError, KycRecord, KycResult},
};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Name of the initialization operation, used in arity errors
pub const INIT_OPERATION: &str = "init";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum OperationKind {
    Write,
    Update,
    Query,
}

impl OperationKind {
    pub fn expected_args(&self) -> usize {
        match self {
            Self::Write => WRITE_ARGS_COUNT,
            Self::Update => UPDATE_ARGS_COUNT,
            Self::Query => QUERY_ARGS_COUNT,
        }
    }

    // Query only reads, the others mutate the table
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKycRequest {
    pub enroll_id: String,
}

impl QueryKycRequest {
    pub fn new(enroll_id: impl Into<String>) -> Self {
        Self {
            enroll_id: enroll_id.into(),
        }
    }
}

/// A parsed operation, ready to run against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KycOperation {
    // Insert if absent
    Write(KycRecord),
    // Replace if present
    Update(KycRecord),
    Query(QueryKycRequest),
}

impl KycOperation {
    /// Parse a named operation with its positional arguments
    ///
    /// # Errors
    /// * `UnknownOperation` - The name is not write, update or query
    /// * `ArgumentCount` - The number of arguments does not match
    pub fn parse(function: &str, args: &[String]) -> KycResult<Self> {
        let kind = OperationKind::from_str(function)
            .map_err(|_| KycError::UnknownOperation(function.to_owned()))?;

        let operation = match kind {
            OperationKind::Write => {
                Self::Write(KycRecord::from_columns(expect_args(kind.as_ref(), args)?))
            }
            OperationKind::Update => {
                Self::Update(KycRecord::from_columns(expect_args(kind.as_ref(), args)?))
            }
            OperationKind::Query => {
                let [enroll_id] = expect_args(kind.as_ref(), args)?;
                Self::Query(QueryKycRequest { enroll_id })
            }
        };

        Ok(operation)
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Write(_) => OperationKind::Write,
            Self::Update(_) => OperationKind::Update,
            Self::Query(_) => OperationKind::Query,
        }
    }

    pub fn get_enroll_id(&self) -> &str {
        match self {
            Self::Write(record) | Self::Update(record) => &record.enroll_id,
            Self::Query(request) => &request.enroll_id,
        }
    }
}

/// Check that exactly `N` arguments were given and take them
pub fn expect_args<const N: usize>(operation: &str, args: &[String]) -> KycResult<[String; N]> {
    if args.len() != N {
        return Err(KycError::ArgumentCount {
            operation: operation.to_owned(),
            expected: N,
            provided: args.len(),
        });
    }

    Ok(std::array::from_fn(|i| args[i].clone()))
}

/// Initialization takes no argument
pub fn expect_init_args(args: &[String]) -> KycResult<()> {
    let [] = expect_args::<INIT_ARGS_COUNT>(INIT_OPERATION, args)?;
    Ok(())
}
