// KYC record store core
// This module holds everything a backend needs to store KYC records and
// answer status queries about them.
//
// Design:
// - One table (KYC) keyed by the enrollment ID, six string columns
// - Status (OK / Expired) is never stored, it is derived on every query
// - Source is redacted from the query result when the record is Expired

mod date;
mod error;
mod evaluator;
mod query;
mod record;
mod schema;
mod status;

pub use date::*;
pub use error::*;
pub use evaluator::*;
pub use query::*;
pub use record::*;
pub use schema::*;
pub use status::*;

/// Reject empty enrollment IDs
/// Every table operation calls this before touching storage
#[inline]
pub fn ensure_enroll_id(enroll_id: &str) -> KycResult<()> {
    if enroll_id.is_empty() {
        return Err(KycError::EmptyEnrollId);
    }
    Ok(())
}
